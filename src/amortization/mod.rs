pub mod calculator;
pub mod totals;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::context::{BaseContext, ContextItem};
use crate::decimal::Money;
use crate::errors::Result;

pub use calculator::AmortizationCalculator;
pub use totals::{apply_interest_balance, compute_totals};

/// computed results for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationItem {
    pub period: u32,
    /// closing balance
    pub principal_balance: Money,
    /// interest still to pay (loan) or interest accrued so far (savings)
    pub interest_balance: Money,
    pub interest_paid: Money,
    pub principal_paid: Money,
    /// actual cash flow this period, adjustments and fee included
    pub repayment: Money,
    pub payment_date: Option<DateTime<Utc>>,
}

impl AmortizationItem {
    /// period 0: opening principal, nothing paid
    pub fn initial(base: &BaseContext) -> Result<Self> {
        Ok(Self {
            period: 0,
            principal_balance: base.principal,
            interest_balance: Money::ZERO,
            interest_paid: Money::ZERO,
            principal_paid: Money::ZERO,
            repayment: Money::ZERO,
            payment_date: base.payment_date(0)?,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub repayment: Money,
    pub interest_paid: Money,
}

/// full schedule; both lists are index aligned and start at period 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub totals: Totals,
    pub context_list: Vec<ContextItem>,
    pub amortization_list: Vec<AmortizationItem>,
}

impl AmortizationResult {
    /// repayment periods computed, period 0 excluded
    pub fn period_count(&self) -> u32 {
        self.amortization_list.len().saturating_sub(1) as u32
    }

    pub fn final_item(&self) -> Option<&AmortizationItem> {
        self.amortization_list.last()
    }

    pub fn final_balance(&self) -> Money {
        self.final_item()
            .map(|item| item.principal_balance)
            .unwrap_or(Money::ZERO)
    }

    pub fn item(&self, period: u32) -> Option<&AmortizationItem> {
        self.amortization_list.get(period as usize)
    }

    pub fn context(&self, period: u32) -> Option<&ContextItem> {
        self.context_list.get(period as usize)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
