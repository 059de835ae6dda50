pub mod builder;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ScheduleConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::formula::{effective_rate, effective_term_count, term_periods};
use crate::types::{CalculationMode, Frequency, RepaymentType};

pub use builder::build_context_at;

/// normalized loan parameters, the starting state of every period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseContext {
    pub principal: Money,
    pub interest_rate: Rate,
    pub interest_rate_frequency: Frequency,
    pub term: Decimal,
    pub term_frequency: Frequency,
    pub repayment: Option<Money>,
    pub repayment_type: RepaymentType,
    pub repayment_frequency: Frequency,
    pub mode: CalculationMode,
    pub start_date: Option<DateTime<Utc>>,

    // derived
    pub eff_interest_rate: Rate,
    pub eff_term: Decimal,
    pub term_periods: u32,
}

impl BaseContext {
    pub fn from_config(config: &ScheduleConfig) -> Result<Self> {
        config.validate()?;

        let eff_interest_rate = effective_rate(
            config.interest_rate,
            config.interest_rate_frequency,
            config.repayment_frequency,
        );
        let eff_term = effective_term_count(config.term, config.term_frequency, config.repayment_frequency);

        Ok(Self {
            principal: config.principal,
            interest_rate: config.interest_rate,
            interest_rate_frequency: config.interest_rate_frequency,
            term: config.term,
            term_frequency: config.term_frequency,
            repayment: config.repayment,
            repayment_type: config.repayment_type,
            repayment_frequency: config.repayment_frequency,
            mode: CalculationMode::from_savings_flag(config.is_savings_mode),
            start_date: config.start_date,
            eff_interest_rate,
            eff_term,
            term_periods: term_periods(eff_term)?,
        })
    }

    pub fn is_savings_mode(&self) -> bool {
        self.mode.is_savings()
    }

    /// date a period falls due, when the schedule is dated
    pub fn payment_date(&self, period: u32) -> Result<Option<DateTime<Utc>>> {
        match self.start_date {
            None => Ok(None),
            Some(start) => self
                .repayment_frequency
                .advance(start, period)
                .map(Some)
                .ok_or_else(|| ScheduleError::CalculationError {
                    message: format!("payment date for period {} is out of range", period),
                }),
        }
    }
}

/// loan state entering a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextItem {
    pub period: u32,
    /// opening balance
    pub principal: Money,
    pub eff_interest_rate: Rate,
    pub eff_term: Decimal,
    /// last scheduled or forced repayment
    pub repayment: Money,

    pub fee: Option<Money>,
    pub offset: Option<Money>,
    pub lump_sum: Option<Money>,
    pub eff_extra_repayment: Option<Money>,
}

impl ContextItem {
    /// period 0 placeholder seeded from the base context
    pub fn initial(base: &BaseContext) -> Self {
        Self::opening(0, base.principal, base)
    }

    /// fresh context for `period` with only the base fields set
    pub(crate) fn opening(period: u32, principal: Money, base: &BaseContext) -> Self {
        Self {
            period,
            principal,
            eff_interest_rate: base.eff_interest_rate,
            eff_term: base.eff_term,
            repayment: base.repayment.unwrap_or(Money::ZERO),
            fee: None,
            offset: None,
            lump_sum: None,
            eff_extra_repayment: None,
        }
    }

    /// write every field the patch carries onto this context
    pub fn apply_patch(&mut self, patch: &ContextPatch) {
        if let Some(fee) = patch.fee {
            self.fee = Some(fee);
        }
        if let Some(offset) = patch.offset {
            self.offset = Some(offset);
        }
        if let Some(lump_sum) = patch.lump_sum {
            self.lump_sum = Some(lump_sum);
        }
        if let Some(extra) = patch.eff_extra_repayment {
            self.eff_extra_repayment = Some(extra);
        }
        if let Some(rate) = patch.eff_interest_rate {
            self.eff_interest_rate = rate;
        }
    }

    pub fn fee_or_zero(&self) -> Money {
        self.fee.unwrap_or(Money::ZERO)
    }

    pub fn offset_or_zero(&self) -> Money {
        self.offset.unwrap_or(Money::ZERO)
    }

    pub fn lump_sum_or_zero(&self) -> Money {
        self.lump_sum.unwrap_or(Money::ZERO)
    }

    pub fn extra_repayment_or_zero(&self) -> Money {
        self.eff_extra_repayment.unwrap_or(Money::ZERO)
    }
}

/// fields an operator contributes to a period context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextPatch {
    pub fee: Option<Money>,
    pub offset: Option<Money>,
    pub lump_sum: Option<Money>,
    pub eff_extra_repayment: Option<Money>,
    pub eff_interest_rate: Option<Rate>,
}

impl ContextPatch {
    pub fn is_empty(&self) -> bool {
        self == &ContextPatch::default()
    }

    /// fold a later patch into this one, last write wins. returns the fields
    /// that were already set and got overwritten.
    pub fn merge(&mut self, later: &ContextPatch) -> Vec<ContextField> {
        let mut overwritten = Vec::new();

        overwrite(&mut self.fee, later.fee, ContextField::Fee, &mut overwritten);
        overwrite(&mut self.offset, later.offset, ContextField::Offset, &mut overwritten);
        overwrite(&mut self.lump_sum, later.lump_sum, ContextField::LumpSum, &mut overwritten);
        overwrite(
            &mut self.eff_extra_repayment,
            later.eff_extra_repayment,
            ContextField::EffExtraRepayment,
            &mut overwritten,
        );
        overwrite(
            &mut self.eff_interest_rate,
            later.eff_interest_rate,
            ContextField::EffInterestRate,
            &mut overwritten,
        );

        overwritten
    }
}

fn overwrite<T>(slot: &mut Option<T>, value: Option<T>, field: ContextField, overwritten: &mut Vec<ContextField>) {
    if let Some(value) = value {
        if slot.is_some() {
            overwritten.push(field);
        }
        *slot = Some(value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextField {
    Fee,
    Offset,
    LumpSum,
    EffExtraRepayment,
    EffInterestRate,
}

/// validate a period coming from a loosely typed source
pub fn period_from_f64(value: f64) -> Result<u32> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(ScheduleError::InvalidPeriod {
            value: value.to_string(),
        });
    }
    Ok(value as u32)
}
