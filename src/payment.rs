//! Closed-form monthly installments for each repayment regime.
//!
//! All rates here are monthly (annual / 12). The level-installment formula is
//! the French one: PMT = P * [r(1 + r)^n] / [(1 + r)^n - 1].

use rust_decimal::{Decimal, MathematicalOps};

use crate::LoanResult;
use crate::error::LoanError;
use crate::regime::DeferralRegime;
use crate::types::{Money, Rate};

/// Level installment repaying `principal` over `months` at `monthly_rate`.
///
/// A zero rate repays the principal in equal slices.
///
/// # Arguments
///
/// * `principal` - The amount to repay.
/// * `monthly_rate` - The monthly rate as a fraction (annual / 12).
/// * `months` - The number of installments.
///
/// # Errors
///
/// Returns an error if `months` is zero or the computation overflows.
pub fn annuity_payment(principal: Money, monthly_rate: Rate, months: u32) -> LoanResult<Money> {
    if months == 0 {
        return Err(LoanError::invalid(
            "months",
            "Cannot amortize over zero months",
        ));
    }
    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(months));
    }

    let factor = growth_factor(monthly_rate, months)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "annuity payment".into(),
        });
    }

    principal
        .checked_mul(monthly_rate)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| LoanError::overflow("annuity payment"))
}

/// Balance reached after `months` of capitalized interest: P * (1 + r)^d.
pub fn capitalized_principal(principal: Money, monthly_rate: Rate, months: u32) -> LoanResult<Money> {
    principal
        .checked_mul(growth_factor(monthly_rate, months)?)
        .ok_or_else(|| LoanError::overflow("capitalized principal"))
}

/// Installment after a full deferral of `deferred` months: the grown
/// principal is amortized over the remaining months.
pub fn full_deferral_payment(
    principal: Money,
    monthly_rate: Rate,
    total_months: u32,
    deferred: u32,
) -> LoanResult<Money> {
    let grown = capitalized_principal(principal, monthly_rate, deferred)?;
    annuity_payment(grown, monthly_rate, remaining(total_months, deferred)?)
}

/// Installment after a partial deferral: interest was paid all along, so the
/// original principal is amortized over the remaining months.
pub fn partial_deferral_payment(
    principal: Money,
    monthly_rate: Rate,
    total_months: u32,
    deferred: u32,
) -> LoanResult<Money> {
    annuity_payment(principal, monthly_rate, remaining(total_months, deferred)?)
}

/// Installment after a full deferral followed by a partial one. Only the
/// full-deferral months grow the principal.
pub fn combined_deferral_payment(
    principal: Money,
    monthly_rate: Rate,
    total_months: u32,
    full_months: u32,
    partial_months: u32,
) -> LoanResult<Money> {
    let grown = capitalized_principal(principal, monthly_rate, full_months)?;
    let deferred = full_months.saturating_add(partial_months);
    annuity_payment(grown, monthly_rate, remaining(total_months, deferred)?)
}

/// Steady-state installment (insurance excluded) once every deferral is over.
pub fn steady_payment(
    principal: Money,
    monthly_rate: Rate,
    total_months: u32,
    regime: DeferralRegime,
) -> LoanResult<Money> {
    match regime {
        DeferralRegime::None => annuity_payment(principal, monthly_rate, total_months),
        DeferralRegime::FullOnly { months } => {
            full_deferral_payment(principal, monthly_rate, total_months, months)
        }
        DeferralRegime::PartialOnly { months } => {
            partial_deferral_payment(principal, monthly_rate, total_months, months)
        }
        DeferralRegime::Combined {
            full_months,
            partial_months,
        } => combined_deferral_payment(
            principal,
            monthly_rate,
            total_months,
            full_months,
            partial_months,
        ),
    }
}

/// Monthly insurance premium. It is charged on the borrowed amount every month
/// of the term and is never deferred.
pub fn insurance_payment(principal: Money, monthly_insurance_rate: Rate) -> Money {
    principal * monthly_insurance_rate
}

fn growth_factor(monthly_rate: Rate, months: u32) -> LoanResult<Decimal> {
    (Decimal::ONE + monthly_rate)
        .checked_powu(u64::from(months))
        .ok_or_else(|| LoanError::overflow("compound growth factor"))
}

fn remaining(total_months: u32, deferred: u32) -> LoanResult<u32> {
    total_months
        .checked_sub(deferred)
        .filter(|months| *months > 0)
        .ok_or_else(|| {
            LoanError::invalid(
                "deferral_months",
                "Deferral periods must leave at least one amortizing month",
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::assert_close;
    use rust_decimal_macros::dec;

    fn r() -> Rate {
        dec!(0.035) / dec!(12)
    }

    #[test]
    fn test_annuity_payment_reference_loan() {
        let payment = annuity_payment(dec!(200000), r(), 240).unwrap();
        assert_close(payment, dec!(1159.92), dec!(0.5));
    }

    #[test]
    fn test_annuity_payment_matches_price_table() {
        // 12000 over 12 months at 1% a month.
        let payment = annuity_payment(dec!(12000), dec!(0.01), 12).unwrap();
        assert_eq!(payment.round_dp(2), dec!(1066.19));
    }

    #[test]
    fn test_zero_rate_repays_in_equal_slices() {
        let payment = annuity_payment(dec!(120000), Decimal::ZERO, 240).unwrap();
        assert_eq!(payment, dec!(500));
    }

    #[test]
    fn test_zero_months_error() {
        assert!(annuity_payment(dec!(1000), r(), 0).is_err());
    }

    #[test]
    fn test_full_deferral_amortizes_grown_principal() {
        let grown = capitalized_principal(dec!(200000), r(), 12).unwrap();
        assert_close(grown, dec!(207092), dec!(50));

        let payment = full_deferral_payment(dec!(200000), r(), 240, 12).unwrap();
        assert_eq!(payment, annuity_payment(grown, r(), 228).unwrap());
    }

    #[test]
    fn test_partial_deferral_keeps_principal() {
        let payment = partial_deferral_payment(dec!(200000), r(), 240, 12).unwrap();
        assert_eq!(payment, annuity_payment(dec!(200000), r(), 228).unwrap());
    }

    #[test]
    fn test_combined_only_capitalizes_full_months() {
        let payment = combined_deferral_payment(dec!(200000), r(), 240, 6, 6).unwrap();
        let grown = capitalized_principal(dec!(200000), r(), 6).unwrap();
        assert_eq!(payment, annuity_payment(grown, r(), 228).unwrap());
    }

    #[test]
    fn test_combined_degenerates_to_single_deferrals() {
        let p = dec!(150000);
        assert_eq!(
            combined_deferral_payment(p, r(), 180, 0, 12).unwrap(),
            partial_deferral_payment(p, r(), 180, 12).unwrap()
        );
        assert_eq!(
            combined_deferral_payment(p, r(), 180, 12, 0).unwrap(),
            full_deferral_payment(p, r(), 180, 12).unwrap()
        );
        assert_eq!(
            combined_deferral_payment(p, r(), 180, 0, 0).unwrap(),
            annuity_payment(p, r(), 180).unwrap()
        );
    }

    #[test]
    fn test_deferral_consuming_whole_term_is_rejected() {
        assert!(full_deferral_payment(dec!(1000), r(), 12, 12).is_err());
        assert!(combined_deferral_payment(dec!(1000), r(), 12, 6, 7).is_err());
    }

    #[test]
    fn test_insurance_payment() {
        let premium = insurance_payment(dec!(200000), dec!(0.003) / dec!(12));
        assert_eq!(premium, dec!(50));
    }
}
