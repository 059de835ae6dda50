use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::operators::ScheduledOperator;
use crate::types::{Frequency, RepaymentType};

/// schedule configuration, the engine input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub principal: Money,
    /// nominal rate quoted per `interest_rate_frequency`
    pub interest_rate: Rate,
    #[serde(default = "default_interest_rate_frequency")]
    pub interest_rate_frequency: Frequency,
    pub term: Decimal,
    #[serde(default = "default_term_frequency")]
    pub term_frequency: Frequency,
    /// forced scheduled repayment; computed from the annuity formula when absent
    #[serde(default)]
    pub repayment: Option<Money>,
    #[serde(default)]
    pub repayment_type: RepaymentType,
    #[serde(default = "default_repayment_frequency")]
    pub repayment_frequency: Frequency,
    #[serde(default)]
    pub is_savings_mode: bool,
    /// date of period 0, enables payment dates on the schedule
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub operators: Vec<ScheduledOperator>,
}

fn default_interest_rate_frequency() -> Frequency {
    Frequency::Yearly
}

fn default_term_frequency() -> Frequency {
    Frequency::Yearly
}

fn default_repayment_frequency() -> Frequency {
    Frequency::Monthly
}

impl ScheduleConfig {
    /// principal and interest loan: yearly rate, term in years, monthly repayments
    pub fn loan(principal: Money, annual_rate: Rate, term_years: u32) -> Self {
        Self {
            principal,
            interest_rate: annual_rate,
            interest_rate_frequency: default_interest_rate_frequency(),
            term: Decimal::from(term_years),
            term_frequency: default_term_frequency(),
            repayment: None,
            repayment_type: RepaymentType::PrincipalAndInterest,
            repayment_frequency: default_repayment_frequency(),
            is_savings_mode: false,
            start_date: None,
            operators: Vec::new(),
        }
    }

    /// interest only loan with the same defaults as [`ScheduleConfig::loan`]
    pub fn interest_only_loan(principal: Money, annual_rate: Rate, term_years: u32) -> Self {
        Self {
            repayment_type: RepaymentType::InterestOnly,
            ..Self::loan(principal, annual_rate, term_years)
        }
    }

    /// savings plan: opening balance plus a fixed deposit every repayment period
    pub fn savings_plan(opening_balance: Money, annual_rate: Rate, term_years: u32, deposit: Money) -> Self {
        Self {
            repayment: Some(deposit),
            is_savings_mode: true,
            ..Self::loan(opening_balance, annual_rate, term_years)
        }
    }

    /// load from a JSON document, defaults applied to missing fields
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ScheduleConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_interest_rate_frequency(mut self, frequency: Frequency) -> Self {
        self.interest_rate_frequency = frequency;
        self
    }

    pub fn with_term(mut self, term: Decimal, frequency: Frequency) -> Self {
        self.term = term;
        self.term_frequency = frequency;
        self
    }

    pub fn with_repayment(mut self, repayment: Money) -> Self {
        self.repayment = Some(repayment);
        self
    }

    pub fn with_repayment_type(mut self, repayment_type: RepaymentType) -> Self {
        self.repayment_type = repayment_type;
        self
    }

    pub fn with_repayment_frequency(mut self, frequency: Frequency) -> Self {
        self.repayment_frequency = frequency;
        self
    }

    pub fn with_start_date(mut self, date: DateTime<Utc>) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn with_operator(mut self, operator: ScheduledOperator) -> Self {
        self.operators.push(operator);
        self
    }

    /// reject inputs no schedule can be built from.
    /// zero principal, zero term and zero or negative rates are allowed.
    pub fn validate(&self) -> Result<()> {
        if self.principal.is_negative() {
            return Err(ScheduleError::InvalidAmount {
                field: "principal",
                amount: self.principal,
            });
        }

        if self.term < Decimal::ZERO {
            return Err(ScheduleError::InvalidConfiguration {
                message: format!("term must not be negative, got {}", self.term),
            });
        }

        if let Some(repayment) = self.repayment {
            if repayment.is_negative() {
                return Err(ScheduleError::InvalidAmount {
                    field: "repayment",
                    amount: repayment,
                });
            }
        }

        for scheduled in &self.operators {
            scheduled.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::{Operator, PeriodWindow};
    use rust_decimal_macros::dec;

    #[test]
    fn test_loan_defaults() {
        let config = ScheduleConfig::loan(Money::from_major(100_000), Rate::from_percentage(10), 10);

        assert_eq!(config.interest_rate_frequency, Frequency::Yearly);
        assert_eq!(config.term_frequency, Frequency::Yearly);
        assert_eq!(config.repayment_frequency, Frequency::Monthly);
        assert_eq!(config.repayment_type, RepaymentType::PrincipalAndInterest);
        assert!(config.repayment.is_none());
        assert!(!config.is_savings_mode);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_savings_plan_preset() {
        let config = ScheduleConfig::savings_plan(
            Money::from_major(1_000),
            Rate::from_percentage(5),
            2,
            Money::from_major(100),
        );

        assert!(config.is_savings_mode);
        assert_eq!(config.repayment, Some(Money::from_major(100)));
    }

    #[test]
    fn test_from_json_applies_defaults() {
        let json = r#"{
            "principal": "250000",
            "interest_rate": "0.06",
            "term": "30",
            "repayment_type": "IO"
        }"#;

        let config = ScheduleConfig::from_json(json).unwrap();
        assert_eq!(config.principal, Money::from_major(250_000));
        assert_eq!(config.interest_rate.as_decimal(), dec!(0.06));
        assert_eq!(config.repayment_type, RepaymentType::InterestOnly);
        assert_eq!(config.repayment_frequency, Frequency::Monthly);
        assert!(config.operators.is_empty());
    }

    #[test]
    fn test_from_json_with_operators() {
        let json = r#"{
            "principal": "1000",
            "interest_rate": "0.12",
            "term": "12",
            "term_frequency": "monthly",
            "operators": [
                { "operator": { "kind": "lump_sum", "amount": "200" }, "window": { "start": 3, "end": 3 } },
                { "operator": { "kind": "fee", "amount": "5" }, "window": { "start": 1 } }
            ]
        }"#;

        let config = ScheduleConfig::from_json(json).unwrap();
        assert_eq!(config.operators.len(), 2);
        assert_eq!(
            config.operators[0].operator,
            Operator::LumpSum { amount: Money::from_major(200) }
        );
        assert_eq!(config.operators[1].window, PeriodWindow::from(1));
    }

    #[test]
    fn test_negative_principal_rejected() {
        let config = ScheduleConfig::loan(Money::from_major(-1), Rate::from_percentage(5), 1);
        assert!(matches!(
            config.validate(),
            Err(ScheduleError::InvalidAmount { field: "principal", .. })
        ));
    }

    #[test]
    fn test_negative_term_rejected() {
        let config = ScheduleConfig::loan(Money::from_major(1_000), Rate::from_percentage(5), 1)
            .with_term(dec!(-1), Frequency::Yearly);
        assert!(matches!(
            config.validate(),
            Err(ScheduleError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let json = r#"{
            "principal": "1000",
            "interest_rate": "0.12",
            "term": "1",
            "operators": [
                { "operator": { "kind": "fee", "amount": "5" }, "window": { "start": 6, "end": 2 } }
            ]
        }"#;

        assert!(ScheduleConfig::from_json(json).is_err());
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let result = ScheduleConfig::from_json("{ not json");
        assert!(matches!(result, Err(ScheduleError::Serialization(_))));
    }
}
