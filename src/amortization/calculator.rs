use log::{debug, info, trace};

use crate::amortization::{apply_interest_balance, compute_totals, AmortizationItem, AmortizationResult};
use crate::context::{build_context_at, BaseContext, ContextItem};
use crate::decimal::Money;
use crate::errors::{Result, ScheduleError};
use crate::events::{EventStore, RecalculationReason, ScheduleEvent};
use crate::formula::annuity_payment;
use crate::operators::OperatorProvider;
use crate::types::{CalculationMode, RepaymentType};

/// period by period schedule calculator over one base context
pub struct AmortizationCalculator<'a> {
    base: &'a BaseContext,
}

impl<'a> AmortizationCalculator<'a> {
    pub fn new(base: &'a BaseContext) -> Self {
        Self { base }
    }

    /// calculate the full schedule
    pub fn calculate<P: OperatorProvider + ?Sized>(&self, operators: &P) -> Result<AmortizationResult> {
        let mut events = EventStore::new();
        self.calculate_with_events(operators, &mut events)
    }

    /// calculate the full schedule, recording notable transitions in `events`.
    ///
    /// periods run strictly in order from 1 to the term; a loan stops at the
    /// first period whose closing balance is zero or below.
    pub fn calculate_with_events<P: OperatorProvider + ?Sized>(
        &self,
        operators: &P,
        events: &mut EventStore,
    ) -> Result<AmortizationResult> {
        let base = self.base;
        let term_periods = base.term_periods;

        let mut context_list = Vec::with_capacity(term_periods as usize + 1);
        let mut amortization_list = Vec::with_capacity(term_periods as usize + 1);
        context_list.push(ContextItem::initial(base));
        amortization_list.push(AmortizationItem::initial(base)?);

        for period in 1..=term_periods {
            let previous_context = &context_list[context_list.len() - 1];
            let previous_item = &amortization_list[amortization_list.len() - 1];

            let active = operators.active_at(period);
            let mut context = build_context_at(period, previous_item, base, &active, events)?;

            let previous_rate = previous_context.eff_interest_rate;
            let rate_changed = context.eff_interest_rate != previous_rate;
            if rate_changed {
                debug!(
                    "period {}: effective rate {} -> {}",
                    period, previous_rate, context.eff_interest_rate
                );
                events.emit(ScheduleEvent::InterestRateChanged {
                    period,
                    old_rate: previous_rate,
                    new_rate: context.eff_interest_rate,
                });
            }

            let carried = previous_context.repayment;
            let reason = if period == 1 {
                Some(RecalculationReason::FirstPeriod)
            } else if rate_changed {
                Some(RecalculationReason::RateChanged)
            } else {
                None
            };

            context.repayment = match reason {
                Some(reason) if self.recomputes_repayment() => {
                    let repayment = self.scheduled_repayment(&context)?;
                    debug!(
                        "period {}: scheduled repayment {} -> {} ({:?})",
                        period, carried, repayment, reason
                    );
                    events.emit(ScheduleEvent::RepaymentRecalculated {
                        period,
                        previous_repayment: carried,
                        repayment,
                        eff_interest_rate: context.eff_interest_rate,
                        reason,
                    });
                    repayment
                }
                _ => carried,
            };

            let item = self.settle_period(&context, events)?;
            trace!("{:?}", item);

            let paid_off = base.mode == CalculationMode::Loan && !item.principal_balance.is_positive();
            context_list.push(context);
            amortization_list.push(item);

            if paid_off {
                let periods_remaining = term_periods - period;
                if periods_remaining > 0 {
                    info!(
                        "loan paid off at period {} of {}, {} periods early",
                        period, term_periods, periods_remaining
                    );
                    events.emit(ScheduleEvent::EarlyPayoff {
                        period,
                        periods_remaining,
                    });
                }
                break;
            }
        }

        let totals = compute_totals(&amortization_list)?;
        apply_interest_balance(&mut amortization_list, &totals, base.mode)?;

        Ok(AmortizationResult {
            totals,
            context_list,
            amortization_list,
        })
    }

    /// loans size their own repayment unless one was forced; a forced repayment
    /// is never recomputed, not even on a rate change. savings deposits are
    /// always the configured amount.
    fn recomputes_repayment(&self) -> bool {
        self.base.mode == CalculationMode::Loan && self.base.repayment.is_none()
    }

    fn scheduled_repayment(&self, context: &ContextItem) -> Result<Money> {
        match self.base.repayment_type {
            RepaymentType::InterestOnly => context
                .principal
                .checked_apply_rate(context.eff_interest_rate)
                .ok_or_else(|| ScheduleError::overflow("interest-only repayment")),
            RepaymentType::PrincipalAndInterest => {
                let periods_remaining = self.base.term_periods - context.period + 1;
                annuity_payment(context.principal, context.eff_interest_rate, periods_remaining)
            }
        }
    }

    /// split the period's cash flow into interest and principal and close the balance
    fn settle_period(&self, context: &ContextItem, events: &mut EventStore) -> Result<AmortizationItem> {
        let mut repayment = add(context.repayment, context.extra_repayment_or_zero(), "repayment")?;
        repayment = add(repayment, context.lump_sum_or_zero(), "repayment")?;

        let considered_principal = sub(context.principal, context.offset_or_zero(), "offset principal")?;
        let interest_paid = considered_principal
            .checked_apply_rate(context.eff_interest_rate)
            .ok_or_else(|| ScheduleError::overflow("interest"))?
            .max(Money::ZERO);

        let (principal_paid, principal_balance) = match self.base.mode {
            CalculationMode::Loan => {
                let payoff = add(context.principal, interest_paid, "payoff")?;
                if repayment > payoff {
                    events.emit(ScheduleEvent::FinalRepaymentCapped {
                        period: context.period,
                        requested: repayment,
                        repayment: payoff,
                    });
                    repayment = payoff;
                }
                let principal_paid = sub(repayment, interest_paid, "principal paid")?;
                (principal_paid, sub(context.principal, principal_paid, "principal balance")?)
            }
            // deposits and interest both grow the balance
            CalculationMode::Savings => {
                let balance = add(context.principal, repayment, "principal balance")?;
                (Money::ZERO, add(balance, interest_paid, "principal balance")?)
            }
        };

        // fees are cash flow only
        repayment = add(repayment, context.fee_or_zero(), "repayment")?;

        Ok(AmortizationItem {
            period: context.period,
            principal_balance,
            interest_balance: Money::ZERO,
            interest_paid,
            principal_paid,
            repayment,
            payment_date: self.base.payment_date(context.period)?,
        })
    }
}

fn add(a: Money, b: Money, what: &str) -> Result<Money> {
    a.checked_add(b).ok_or_else(|| ScheduleError::overflow(what))
}

fn sub(a: Money, b: Money, what: &str) -> Result<Money> {
    a.checked_sub(b).ok_or_else(|| ScheduleError::overflow(what))
}
