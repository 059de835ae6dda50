//! Stateless rate, term and payment formulas.
//!
//! Rates are treated as nominal: a yearly 10% quote becomes 10%/12 per
//! monthly repayment period. Terms and periodic amounts are converted the
//! same way, by the ratio of periods per year.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::types::Frequency;

/// per-repayment-period rate for a nominal rate quoted per `rate_frequency`
pub fn effective_rate(nominal: Rate, rate_frequency: Frequency, payment_frequency: Frequency) -> Rate {
    let scaled = nominal.as_decimal() * Decimal::from(rate_frequency.periods_per_year());
    Rate::from_decimal(scaled / Decimal::from(payment_frequency.periods_per_year()))
}

/// number of repayment periods covered by `term` units of `term_frequency`.
/// may be fractional, see [`term_periods`] for the loop bound.
pub fn effective_term_count(term: Decimal, term_frequency: Frequency, payment_frequency: Frequency) -> Decimal {
    let scaled = term * Decimal::from(payment_frequency.periods_per_year());
    scaled / Decimal::from(term_frequency.periods_per_year())
}

/// whole repayment periods for an effective term, rounded half away from zero
pub fn term_periods(eff_term: Decimal) -> Result<u32> {
    if eff_term <= Decimal::ZERO {
        return Ok(0);
    }

    eff_term
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .ok_or_else(|| ScheduleError::CalculationError {
            message: format!("effective term {} does not fit a period count", eff_term),
        })
}

/// convert an amount paid every `amount_frequency` into its per-repayment-period equivalent
pub fn effective_amount(amount: Money, amount_frequency: Frequency, payment_frequency: Frequency) -> Money {
    if amount_frequency == payment_frequency {
        return amount;
    }

    let scaled = amount.as_decimal() * Decimal::from(amount_frequency.periods_per_year());
    Money::from_decimal(scaled / Decimal::from(payment_frequency.periods_per_year()))
}

/// level payment that fully amortizes `principal` over `periods` at `period_rate`.
///
/// `annuity_payment(p, 0, n) == p / n` and `annuity_payment(p, r, 1) == p * (1 + r)`.
pub fn annuity_payment(principal: Money, period_rate: Rate, periods: u32) -> Result<Money> {
    if periods == 0 {
        return Ok(principal);
    }

    let r = period_rate.as_decimal();
    if r.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let per_period_interest = principal
        .as_decimal()
        .checked_mul(r)
        .ok_or_else(|| ScheduleError::overflow("annuity interest"))?;

    // (1 + r)^n beyond the decimal range: the payment converges to P * r
    let Some(compound) = compound_factor(r, periods) else {
        return Ok(Money::from_decimal(per_period_interest));
    };

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        // rate too small to register over this horizon
        return Ok(principal / Decimal::from(periods));
    }

    // P * r * (1 + r)^n / ((1 + r)^n - 1)
    if let Some(payment) = per_period_interest
        .checked_mul(compound)
        .and_then(|numerator| numerator.checked_div(denominator))
    {
        return Ok(Money::from_decimal(payment));
    }

    // same payment as P * r / (1 - (1 + r)^-n), without the large numerator
    let discount = Decimal::ONE
        .checked_div(compound)
        .map(|inverse| Decimal::ONE - inverse)
        .ok_or_else(|| ScheduleError::overflow("annuity discount"))?;
    per_period_interest
        .checked_div(discount)
        .map(Money::from_decimal)
        .ok_or_else(|| ScheduleError::overflow("annuity payment"))
}

/// (1 + r)^n by repeated multiplication, `None` once it leaves the decimal range
fn compound_factor(r: Decimal, n: u32) -> Option<Decimal> {
    let base = Decimal::ONE + r;
    let mut factor = Decimal::ONE;
    for _ in 0..n {
        factor = factor.checked_mul(base)?;
    }
    Some(factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_effective_rate_yearly_to_monthly() {
        let rate = effective_rate(Rate::from_decimal(dec!(0.1)), Frequency::Yearly, Frequency::Monthly);
        assert_eq!(rate.as_decimal(), dec!(0.1) / dec!(12));
    }

    #[test]
    fn test_effective_rate_same_frequency_is_identity() {
        let rate = effective_rate(Rate::from_decimal(dec!(0.01)), Frequency::Monthly, Frequency::Monthly);
        assert_eq!(rate.as_decimal(), dec!(0.01));
    }

    #[test]
    fn test_effective_term_count() {
        assert_eq!(effective_term_count(dec!(10), Frequency::Yearly, Frequency::Monthly), dec!(120));
        assert_eq!(effective_term_count(dec!(1), Frequency::Yearly, Frequency::Fortnightly), dec!(26));
        assert_eq!(effective_term_count(dec!(24), Frequency::Monthly, Frequency::Quarterly), dec!(8));
    }

    #[test]
    fn test_term_periods_rounding() {
        assert_eq!(term_periods(dec!(120)).unwrap(), 120);
        assert_eq!(term_periods(dec!(21.5)).unwrap(), 22);
        assert_eq!(term_periods(dec!(21.49)).unwrap(), 21);
        assert_eq!(term_periods(Decimal::ZERO).unwrap(), 0);
        assert_eq!(term_periods(dec!(-3)).unwrap(), 0);
    }

    #[test]
    fn test_effective_amount() {
        let weekly = Money::from_major(100);
        let monthly = effective_amount(weekly, Frequency::Weekly, Frequency::Monthly);
        assert_eq!(monthly.round_dp(2), Money::from_str_exact("433.33").unwrap());
        assert_eq!(effective_amount(weekly, Frequency::Monthly, Frequency::Monthly), weekly);
    }

    #[test]
    fn test_annuity_zero_rate() {
        let payment = annuity_payment(Money::from_major(1_200), Rate::ZERO, 12).unwrap();
        assert_eq!(payment, Money::from_major(100));
    }

    #[test]
    fn test_annuity_single_period() {
        let rate = Rate::from_decimal(dec!(0.01));
        let payment = annuity_payment(Money::from_major(1_000), rate, 1).unwrap();
        assert_eq!(payment, Money::from_major(1_010));
    }

    #[test]
    fn test_annuity_standard_mortgage() {
        let rate = Rate::from_decimal(dec!(0.1) / dec!(12));
        let payment = annuity_payment(Money::from_major(100_000), rate, 120).unwrap();
        assert_eq!(payment.round_dp(2), Money::from_str_exact("1321.51").unwrap());
    }

    #[test]
    fn test_annuity_huge_compound_factor_tends_to_interest_only() {
        // (1 + 1)^120 does not fit a decimal
        let rate = Rate::from_decimal(dec!(1));
        let payment = annuity_payment(Money::from_major(1_000), rate, 120).unwrap();
        assert_eq!(payment, Money::from_major(1_000));
    }

    #[test]
    fn test_annuity_large_principal_avoids_numerator_overflow() {
        let principal = Money::from_decimal(dec!(10_000_000_000_000_000_000_000_000));
        let rate = Rate::from_decimal(dec!(0.5));
        let payment = annuity_payment(principal, rate, 100).unwrap();

        // P * r / ((1 + r)^n - 1) on top of the interest, about 1.23e10 here
        let excess = payment - principal.apply_rate(rate);
        assert!(excess > Money::from_major(10_000_000_000));
        assert!(excess < Money::from_major(20_000_000_000));
    }

    #[test]
    fn test_annuity_zero_periods_returns_principal() {
        let rate = Rate::from_decimal(dec!(0.01));
        let payment = annuity_payment(Money::from_major(500), rate, 0).unwrap();
        assert_eq!(payment, Money::from_major(500));
    }
}
