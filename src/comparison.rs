//! Side-by-side comparison of two loan offers.
//!
//! Every difference is loan 1 minus loan 2: a positive difference means the
//! first offer is the costlier (or longer) one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::LoanResult;
use crate::loan::LoanSummary;
use crate::types::Money;

/// One metric for both offers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub loan_1: Decimal,
    pub loan_2: Decimal,
    pub difference: Decimal,
}

impl MetricComparison {
    pub fn new(loan_1: Decimal, loan_2: Decimal) -> Self {
        Self {
            loan_1,
            loan_2,
            difference: loan_1 - loan_2,
        }
    }

    /// True when the first offer scores higher (worse) on this metric.
    pub fn first_is_costlier(&self) -> bool {
        self.difference > Decimal::ZERO
    }
}

/// Side-by-side view of two offers; every difference is loan 1 minus loan 2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub apr: MetricComparison,
    pub apr_with_insurance: MetricComparison,
    pub total_monthly_payment: MetricComparison,
    pub total_credit_cost: MetricComparison,
    pub debt_ratio: MetricComparison,
    /// In years.
    pub duration: MetricComparison,
}

/// Compares two summaries for a household earning `monthly_net_income`.
///
/// # Arguments
///
/// * `first` - Summary of the first offer, the minuend of every difference.
/// * `second` - Summary of the second offer.
/// * `monthly_net_income` - Household income the debt ratios are taken against.
///
/// # Errors
///
/// Returns an error if the income is zero, since the debt ratio is undefined.
pub fn compare_loans(
    first: &LoanSummary,
    second: &LoanSummary,
    monthly_net_income: Money,
) -> LoanResult<Comparison> {
    Ok(Comparison {
        apr: MetricComparison::new(first.apr.rate, second.apr.rate),
        apr_with_insurance: MetricComparison::new(
            first.apr_with_insurance.rate,
            second.apr_with_insurance.rate,
        ),
        total_monthly_payment: MetricComparison::new(
            first.total_monthly_payment,
            second.total_monthly_payment,
        ),
        total_credit_cost: MetricComparison::new(
            first.total_credit_cost,
            second.total_credit_cost,
        ),
        debt_ratio: MetricComparison::new(
            first.debt_ratio(monthly_net_income)?,
            second.debt_ratio(monthly_net_income)?,
        ),
        duration: MetricComparison::new(
            Decimal::from(first.duration_years),
            Decimal::from(second.duration_years),
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfig;
    use crate::error::LoanError;
    use crate::loan::summarize_loan;
    use crate::types::LoanTerms;
    use rust_decimal_macros::dec;

    fn summary(nominal_rate: Decimal, duration_years: u32) -> LoanSummary {
        let terms = LoanTerms {
            lender: "Bank".into(),
            application_fee: dec!(500),
            nominal_rate,
            insurance_rate: dec!(0.003),
            duration_years,
            ..LoanTerms::default()
        };
        summarize_loan(dec!(200000), &terms, &SolverConfig::default()).unwrap()
    }

    #[test]
    fn test_difference_is_first_minus_second() {
        let metric = MetricComparison::new(dec!(0.036), dec!(0.041));
        assert_eq!(metric.difference, dec!(-0.005));
        assert!(!metric.first_is_costlier());
    }

    #[test]
    fn test_compare_loans() {
        let cheap = summary(dec!(0.030), 20);
        let dear = summary(dec!(0.040), 25);
        let comparison = compare_loans(&cheap, &dear, dec!(4000)).unwrap();

        assert!(comparison.apr.difference < Decimal::ZERO);
        assert!(comparison.total_credit_cost.difference < Decimal::ZERO);
        assert_eq!(comparison.duration.difference, dec!(-5));
        assert_eq!(
            comparison.debt_ratio.difference,
            cheap.total_monthly_payment / dec!(4000) - dear.total_monthly_payment / dec!(4000)
        );
        assert_eq!(
            comparison.total_monthly_payment.loan_1,
            cheap.total_monthly_payment
        );
    }

    #[test]
    fn test_same_offer_has_no_difference() {
        let offer = summary(dec!(0.035), 20);
        let comparison = compare_loans(&offer, &offer, dec!(3000)).unwrap();

        assert_eq!(comparison.apr.difference, Decimal::ZERO);
        assert_eq!(comparison.debt_ratio.difference, Decimal::ZERO);
    }

    #[test]
    fn test_zero_income_is_rejected() {
        let offer = summary(dec!(0.035), 20);
        assert!(matches!(
            compare_loans(&offer, &offer, Decimal::ZERO),
            Err(LoanError::DivisionByZero { .. })
        ));
    }
}
