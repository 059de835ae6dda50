use crate::amortization::{AmortizationItem, Totals};
use crate::decimal::Money;
use crate::errors::{Result, ScheduleError};
use crate::types::CalculationMode;

/// sum repayments and interest over every item, period 0 included
pub fn compute_totals(items: &[AmortizationItem]) -> Result<Totals> {
    items.iter().try_fold(Totals::default(), |totals, item| -> Result<Totals> {
        Ok(Totals {
            repayment: totals
                .repayment
                .checked_add(item.repayment)
                .ok_or_else(|| ScheduleError::overflow("total repayment"))?,
            interest_paid: totals
                .interest_paid
                .checked_add(item.interest_paid)
                .ok_or_else(|| ScheduleError::overflow("total interest"))?,
        })
    })
}

/// fill in the running interest balance.
///
/// loan: starts at the total interest and counts down to zero.
/// savings: starts at zero and counts up by the interest credited.
pub fn apply_interest_balance(items: &mut [AmortizationItem], totals: &Totals, mode: CalculationMode) -> Result<()> {
    let mut running = match mode {
        CalculationMode::Loan => totals.interest_paid,
        CalculationMode::Savings => Money::ZERO,
    };

    for item in items.iter_mut() {
        let next = match mode {
            CalculationMode::Loan => running.checked_sub(item.interest_paid),
            CalculationMode::Savings => running.checked_add(item.interest_paid),
        };
        running = next.ok_or_else(|| ScheduleError::overflow("interest balance"))?;
        item.interest_balance = running;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(period: u32, interest_paid: i64, repayment: i64) -> AmortizationItem {
        AmortizationItem {
            period,
            principal_balance: Money::ZERO,
            interest_balance: Money::ZERO,
            interest_paid: Money::from_major(interest_paid),
            principal_paid: Money::ZERO,
            repayment: Money::from_major(repayment),
            payment_date: None,
        }
    }

    fn items() -> Vec<AmortizationItem> {
        vec![item(0, 0, 0), item(1, 30, 100), item(2, 20, 100), item(3, 10, 100)]
    }

    #[test]
    fn test_totals_sum_every_period() {
        let totals = compute_totals(&items()).unwrap();
        assert_eq!(totals.repayment, Money::from_major(300));
        assert_eq!(totals.interest_paid, Money::from_major(60));
    }

    #[test]
    fn test_loan_interest_balance_counts_down() {
        let mut items = items();
        let totals = compute_totals(&items).unwrap();
        apply_interest_balance(&mut items, &totals, CalculationMode::Loan).unwrap();

        let balances: Vec<Money> = items.iter().map(|i| i.interest_balance).collect();
        assert_eq!(
            balances,
            vec![
                Money::from_major(60),
                Money::from_major(30),
                Money::from_major(10),
                Money::ZERO
            ]
        );
    }

    #[test]
    fn test_savings_interest_balance_counts_up() {
        let mut items = items();
        let totals = compute_totals(&items).unwrap();
        apply_interest_balance(&mut items, &totals, CalculationMode::Savings).unwrap();

        assert_eq!(items[0].interest_balance, Money::ZERO);
        assert_eq!(items[3].interest_balance, Money::from_major(60));
    }

    #[test]
    fn test_pass_is_idempotent() {
        let mut once = items();
        let totals = compute_totals(&once).unwrap();
        apply_interest_balance(&mut once, &totals, CalculationMode::Loan).unwrap();

        let mut twice = once.clone();
        let totals_again = compute_totals(&twice).unwrap();
        apply_interest_balance(&mut twice, &totals_again, CalculationMode::Loan).unwrap();

        assert_eq!(totals, totals_again);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_totals_overflow_is_an_error() {
        let mut huge = item(1, 0, 0);
        huge.repayment = Money::from_decimal(rust_decimal::Decimal::MAX);
        let items = vec![huge.clone(), huge];

        assert!(matches!(
            compute_totals(&items),
            Err(ScheduleError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_empty_list() {
        let totals = compute_totals(&[]).unwrap();
        assert_eq!(totals, Totals::default());
    }
}
