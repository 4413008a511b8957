//! Month-by-month amortization ledgers.
//!
//! Every regime runs through the same recurrence; only the per-month policy
//! changes (see [`MonthPolicy`]):
//!
//! | policy         | paid            | balance after          |
//! |----------------|-----------------|------------------------|
//! | `Capitalize`   | nothing         | balance + interest     |
//! | `InterestOnly` | interest        | balance                |
//! | `Amortize`     | steady payment  | balance - capital      |
//!
//! Insurance is paid every month whatever the policy.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::LoanResult;
use crate::error::LoanError;
use crate::payment::{insurance_payment, steady_payment};
use crate::regime::{DeferralRegime, MonthPolicy};
use crate::types::{LoanTerms, Money, monthly_rate};

/// One month of the amortization table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Installment number, starting at 1.
    pub number: u32,
    /// Due date of the installment.
    pub date: NaiveDate,
    /// Balance owed before this month.
    pub opening_balance: Money,
    /// Scheduled payment, insurance excluded.
    pub payment: Money,
    /// Extra prepayment. Always zero until prepayments are supported.
    pub extra_payment: Money,
    /// `payment` plus `extra_payment`.
    pub amount_paid: Money,
    pub capital_repaid: Money,
    pub interest: Money,
    pub cumulative_interest: Money,
    pub insurance: Money,
    /// Everything due this month: payment plus insurance.
    pub total_installment: Money,
    /// Balance owed after this month.
    pub closing_balance: Money,
    /// Loan year the installment falls in, starting at 1.
    pub year: u32,
}

/// Due date of the first installment: one calendar month after `today`.
pub fn first_payment_date(today: NaiveDate) -> LoanResult<NaiveDate> {
    add_months(today, 1)
}

/// Builds the full amortization table of a loan of `principal` under `terms`.
///
/// The regime is picked from the deferral fields of `terms`. The last closing
/// balance is left as computed: it is zero up to Decimal rounding drift.
///
/// # Arguments
///
/// * `principal` - The borrowed amount.
/// * `terms` - The offer: rates, duration and deferral months.
/// * `first_payment_date` - Due date of row 1; later rows follow monthly.
///
/// # Errors
///
/// Returns an error if `terms` fail validation or a due date cannot be
/// represented.
pub fn amortization_schedule(
    principal: Money,
    terms: &LoanTerms,
    first_payment_date: NaiveDate,
) -> LoanResult<Vec<AmortizationRow>> {
    terms.validate()?;
    regime_schedule(
        principal,
        terms,
        DeferralRegime::from_terms(terms),
        first_payment_date,
    )
}

fn regime_schedule(
    principal: Money,
    terms: &LoanTerms,
    regime: DeferralRegime,
    first_payment_date: NaiveDate,
) -> LoanResult<Vec<AmortizationRow>> {
    let total_months = terms.total_months();
    let rate = monthly_rate(terms.nominal_rate);
    let payment = steady_payment(principal, rate, total_months, regime)?;
    let insurance = insurance_payment(principal, monthly_rate(terms.insurance_rate));

    debug!(?regime, total_months, %payment, "building amortization schedule");

    let mut rows = Vec::with_capacity(total_months as usize);
    let mut balance = principal;
    let mut cumulative_interest = Decimal::ZERO;

    for phase in regime.phases(total_months) {
        for number in phase.first_month..=phase.last_month {
            let interest = balance * rate;
            cumulative_interest += interest;

            let (paid, capital_repaid, closing_balance) = match phase.policy {
                MonthPolicy::Capitalize => (Decimal::ZERO, Decimal::ZERO, balance + interest),
                MonthPolicy::InterestOnly => (interest, Decimal::ZERO, balance),
                MonthPolicy::Amortize => {
                    let capital = payment - interest;
                    (payment, capital, balance - capital)
                }
            };

            rows.push(AmortizationRow {
                number,
                date: add_months(first_payment_date, number - 1)?,
                opening_balance: balance,
                payment: paid,
                extra_payment: Decimal::ZERO,
                amount_paid: paid,
                capital_repaid,
                interest,
                cumulative_interest,
                insurance,
                total_installment: paid + insurance,
                closing_balance,
                year: number.div_ceil(12),
            });

            balance = closing_balance;
        }
    }

    Ok(rows)
}

fn add_months(date: NaiveDate, months: u32) -> LoanResult<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| LoanError::DateOutOfRange(format!("{date} + {months} months")))
}
