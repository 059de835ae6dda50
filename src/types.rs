use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// how often something recurs within a year: rate quotes, terms, repayments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Fortnightly,
    Monthly,
    Quarterly,
    HalfYearly,
    Yearly,
}

impl Frequency {
    /// number of periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Daily => 365,
            Frequency::Weekly => 52,
            Frequency::Fortnightly => 26,
            Frequency::Monthly => 12,
            Frequency::Quarterly => 4,
            Frequency::HalfYearly => 2,
            Frequency::Yearly => 1,
        }
    }

    /// advance a date by `periods` intervals of this frequency.
    /// month based frequencies clamp to the last day of shorter months.
    pub fn advance(&self, date: DateTime<Utc>, periods: u32) -> Option<DateTime<Utc>> {
        match self {
            Frequency::Daily => date.checked_add_signed(Duration::days(periods as i64)),
            Frequency::Weekly => date.checked_add_signed(Duration::weeks(periods as i64)),
            Frequency::Fortnightly => date.checked_add_signed(Duration::weeks(2 * periods as i64)),
            Frequency::Monthly => date.checked_add_months(Months::new(periods)),
            Frequency::Quarterly => date.checked_add_months(Months::new(3 * periods)),
            Frequency::HalfYearly => date.checked_add_months(Months::new(6 * periods)),
            Frequency::Yearly => date.checked_add_months(Months::new(12 * periods)),
        }
    }
}

/// how the scheduled repayment is sized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepaymentType {
    /// pay interest only, principal untouched unless extra payments are made
    #[serde(rename = "IO")]
    InterestOnly,
    /// level annuity payment that fully amortizes the balance
    #[serde(rename = "PI")]
    PrincipalAndInterest,
}

impl Default for RepaymentType {
    fn default() -> Self {
        RepaymentType::PrincipalAndInterest
    }
}

/// loan repays a debt, savings grows a balance from deposits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationMode {
    Loan,
    Savings,
}

impl CalculationMode {
    pub fn from_savings_flag(is_savings_mode: bool) -> Self {
        if is_savings_mode {
            CalculationMode::Savings
        } else {
            CalculationMode::Loan
        }
    }

    pub fn is_savings(&self) -> bool {
        matches!(self, CalculationMode::Savings)
    }
}
