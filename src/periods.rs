//! Compact payment calendar: one averaged line per repayment phase.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::LoanResult;
use crate::error::LoanError;
use crate::regime::DeferralRegime;
use crate::schedule::AmortizationRow;
use crate::types::Money;

/// Average installments over a contiguous block of months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Human readable span, e.g. "month 1 to month 12".
    pub label: String,
    pub first_month: u32,
    pub last_month: u32,
    pub average_payment: Money,
    pub average_payment_with_insurance: Money,
}

/// Collapses a full ledger into one line per phase of `regime`: one line
/// without deferral, two with a single deferral, three with both.
///
/// # Arguments
///
/// * `rows` - The table built by [`crate::amortization_schedule`].
/// * `regime` - The regime the table was built under.
///
/// # Errors
///
/// Returns an error if `rows` is too short to hold the deferral months plus
/// at least one amortizing month.
pub fn summarize_schedule(
    rows: &[AmortizationRow],
    regime: DeferralRegime,
) -> LoanResult<Vec<PeriodSummary>> {
    let total_months = u32::try_from(rows.len()).map_err(|_| {
        LoanError::invalid("schedule", "Schedule is longer than any supported term")
    })?;
    if total_months <= regime.deferred_months() {
        return Err(LoanError::invalid(
            "schedule",
            "Schedule does not cover the deferral periods",
        ));
    }

    let periods = regime
        .phases(total_months)
        .into_iter()
        .map(|phase| {
            let block = &rows[(phase.first_month - 1) as usize..phase.last_month as usize];
            let count = Decimal::from(phase.months());
            let payments: Money = block.iter().map(|row| row.payment).sum();
            let installments: Money = block.iter().map(|row| row.total_installment).sum();

            PeriodSummary {
                label: format!("month {} to month {}", phase.first_month, phase.last_month),
                first_month: phase.first_month,
                last_month: phase.last_month,
                average_payment: payments / count,
                average_payment_with_insurance: installments / count,
            }
        })
        .collect();

    Ok(periods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::amortization_schedule;
    use crate::test_support::assert_close;
    use crate::types::LoanTerms;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    const EPSILON: Decimal = dec!(0.000001);

    fn schedule(full: u32, partial: u32) -> (Vec<AmortizationRow>, DeferralRegime) {
        let terms = LoanTerms {
            lender: "Bank".into(),
            nominal_rate: dec!(0.035),
            insurance_rate: dec!(0.003),
            duration_years: 20,
            full_deferral_months: full,
            partial_deferral_months: partial,
            ..LoanTerms::default()
        };
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let rows = amortization_schedule(dec!(200000), &terms, start).unwrap();
        (rows, DeferralRegime::from_terms(&terms))
    }

    #[rstest]
    #[case(0, 0, vec!["month 1 to month 240"])]
    #[case(12, 0, vec!["month 1 to month 12", "month 13 to month 240"])]
    #[case(0, 24, vec!["month 1 to month 24", "month 25 to month 240"])]
    #[case(6, 18, vec!["month 1 to month 6", "month 7 to month 24", "month 25 to month 240"])]
    fn test_period_labels(#[case] full: u32, #[case] partial: u32, #[case] labels: Vec<&str>) {
        let (rows, regime) = schedule(full, partial);
        let periods = summarize_schedule(&rows, regime).unwrap();
        let actual: Vec<&str> = periods.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(actual, labels);
    }

    #[test]
    fn test_no_deferral_average_is_the_installment() {
        let (rows, regime) = schedule(0, 0);
        let periods = summarize_schedule(&rows, regime).unwrap();

        assert_close(periods[0].average_payment, rows[0].payment, EPSILON);
        assert_close(
            periods[0].average_payment_with_insurance,
            rows[0].payment + dec!(50),
            EPSILON,
        );
    }

    #[test]
    fn test_full_deferral_block_pays_insurance_only() {
        let (rows, regime) = schedule(12, 0);
        let periods = summarize_schedule(&rows, regime).unwrap();

        assert_eq!(periods[0].average_payment, Decimal::ZERO);
        assert_eq!(periods[0].average_payment_with_insurance, dec!(50));
        assert_close(periods[1].average_payment, rows[12].payment, EPSILON);
    }

    #[test]
    fn test_partial_deferral_block_averages_interest() {
        let (rows, regime) = schedule(0, 12);
        let periods = summarize_schedule(&rows, regime).unwrap();

        assert_close(periods[0].average_payment, rows[0].interest, EPSILON);
        assert_eq!((periods[1].first_month, periods[1].last_month), (13, 240));
    }

    #[test]
    fn test_short_schedule_is_rejected() {
        let (rows, _) = schedule(0, 0);
        let regime = DeferralRegime::new(12, 0);
        assert!(summarize_schedule(&rows[..12], regime).is_err());
    }
}
