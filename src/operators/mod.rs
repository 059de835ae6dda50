pub mod set;
pub mod window;

use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::context::{BaseContext, ContextItem, ContextPatch};
use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::formula::{effective_amount, effective_rate};
use crate::types::Frequency;

pub use set::{OperatorProvider, OperatorSet, ScheduledOperator};
pub use window::PeriodWindow;

/// adjustment applied to every period inside its activation window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operator {
    /// charge added to the period's cash flow, outside the principal/interest split
    Fee { amount: Money },
    /// balance held against the loan, reduces the interest base only
    Offset { amount: Money },
    /// one-off payment on top of the scheduled repayment
    LumpSum { amount: Money },
    /// new nominal rate, quoted per `interest_rate_frequency` (base quote frequency when absent)
    InterestRateChange {
        interest_rate: Rate,
        #[serde(default)]
        interest_rate_frequency: Option<Frequency>,
    },
    /// recurring payment on top of the scheduled repayment, paid every
    /// `frequency` (the repayment frequency when absent)
    ExtraRepayment {
        amount: Money,
        #[serde(default)]
        frequency: Option<Frequency>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    Fee,
    Offset,
    LumpSum,
    InterestRateChange,
    ExtraRepayment,
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperatorKind::Fee => "fee",
            OperatorKind::Offset => "offset",
            OperatorKind::LumpSum => "lump_sum",
            OperatorKind::InterestRateChange => "interest_rate_change",
            OperatorKind::ExtraRepayment => "extra_repayment",
        };
        write!(f, "{}", name)
    }
}

impl Operator {
    pub fn kind(&self) -> OperatorKind {
        match self {
            Operator::Fee { .. } => OperatorKind::Fee,
            Operator::Offset { .. } => OperatorKind::Offset,
            Operator::LumpSum { .. } => OperatorKind::LumpSum,
            Operator::InterestRateChange { .. } => OperatorKind::InterestRateChange,
            Operator::ExtraRepayment { .. } => OperatorKind::ExtraRepayment,
        }
    }

    /// fields this operator contributes to `context` in `period`
    pub fn apply(&self, period: u32, context: &ContextItem, base: &BaseContext) -> ContextPatch {
        let patch = match self {
            Operator::Fee { amount } => ContextPatch {
                fee: Some(*amount),
                ..Default::default()
            },
            Operator::Offset { amount } => ContextPatch {
                offset: Some(*amount),
                ..Default::default()
            },
            Operator::LumpSum { amount } => ContextPatch {
                lump_sum: Some(*amount),
                ..Default::default()
            },
            Operator::InterestRateChange {
                interest_rate,
                interest_rate_frequency,
            } => {
                let quoted = interest_rate_frequency.unwrap_or(base.interest_rate_frequency);
                ContextPatch {
                    eff_interest_rate: Some(effective_rate(*interest_rate, quoted, base.repayment_frequency)),
                    ..Default::default()
                }
            }
            Operator::ExtraRepayment { amount, frequency } => {
                let paid_every = frequency.unwrap_or(base.repayment_frequency);
                ContextPatch {
                    eff_extra_repayment: Some(effective_amount(*amount, paid_every, base.repayment_frequency)),
                    ..Default::default()
                }
            }
        };

        trace!(
            "period {}: {} on opening balance {} -> {:?}",
            period,
            self.kind(),
            context.principal,
            patch
        );
        patch
    }

    /// amounts must not be negative; rates may be
    pub fn validate(&self) -> Result<()> {
        let (field, amount) = match self {
            Operator::Fee { amount } => ("fee", *amount),
            Operator::Offset { amount } => ("offset", *amount),
            Operator::LumpSum { amount } => ("lump_sum", *amount),
            Operator::ExtraRepayment { amount, .. } => ("extra_repayment", *amount),
            Operator::InterestRateChange { .. } => return Ok(()),
        };

        if amount.is_negative() {
            return Err(ScheduleError::InvalidAmount { field, amount });
        }
        Ok(())
    }
}
