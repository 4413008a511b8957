//! Loan-level orchestration: from a property and an offer to the summary,
//! the amortization table and the payment calendar.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::LoanResult;
use crate::config::SolverConfig;
use crate::error::LoanError;
use crate::payment::{capitalized_principal, insurance_payment, steady_payment};
use crate::periods::{PeriodSummary, summarize_schedule};
use crate::rate::{AprEstimate, solve_apr};
use crate::regime::DeferralRegime;
use crate::schedule::{AmortizationRow, amortization_schedule};
use crate::types::{LoanTerms, Money, PropertyCost, Rate, monthly_rate};

/// Headline figures of one loan offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub lender: String,
    /// Amount borrowed.
    pub principal: Money,
    /// Steady-state installment once deferrals are over, insurance excluded.
    pub monthly_payment: Money,
    pub monthly_insurance: Money,
    /// `monthly_payment` plus `monthly_insurance`.
    pub total_monthly_payment: Money,
    /// Every payment made excluding insurance, minus the principal.
    pub total_interest: Money,
    pub total_insurance: Money,
    /// Interest, insurance and fees.
    pub total_credit_cost: Money,
    /// Effective annual rate, insurance excluded.
    pub apr: AprEstimate,
    /// Effective annual rate, insurance included.
    pub apr_with_insurance: AprEstimate,
    pub application_fee: Money,
    pub guarantee_fee: Money,
    pub nominal_rate: Rate,
    pub insurance_rate: Rate,
    pub duration_years: u32,
    pub regime: DeferralRegime,
}

impl LoanSummary {
    /// Share of `monthly_net_income` taken by the total monthly payment.
    pub fn debt_ratio(&self, monthly_net_income: Money) -> LoanResult<Rate> {
        debt_ratio(self.total_monthly_payment, monthly_net_income)
    }
}

/// Everything computed for one loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOutcome {
    pub summary: LoanSummary,
    pub schedule: Vec<AmortizationRow>,
    pub periods: Vec<PeriodSummary>,
}

/// Amount to borrow: the property's total cost minus the down payment.
pub fn borrowed_principal(property: &PropertyCost, terms: &LoanTerms) -> Money {
    property.total_cost() - terms.down_payment
}

/// Monthly payment divided by monthly income.
///
/// # Errors
///
/// Returns [`LoanError::DivisionByZero`] when the income is zero.
pub fn debt_ratio(monthly_payment: Money, monthly_net_income: Money) -> LoanResult<Rate> {
    if monthly_net_income.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "debt ratio".into(),
        });
    }
    Ok(monthly_payment / monthly_net_income)
}

/// Computes the headline figures of a loan of `principal` under `terms`.
///
/// # Arguments
///
/// * `principal` - The borrowed amount, see [`borrowed_principal`].
/// * `terms` - The lender's offer.
/// * `config` - Effective-rate solver settings.
///
/// # Errors
///
/// Returns an error if the terms are invalid or the principal is not positive.
pub fn summarize_loan(
    principal: Money,
    terms: &LoanTerms,
    config: &SolverConfig,
) -> LoanResult<LoanSummary> {
    terms.validate()?;
    if principal <= Decimal::ZERO {
        return Err(LoanError::invalid(
            "principal",
            "Borrowed amount must be positive",
        ));
    }

    let regime = DeferralRegime::from_terms(terms);
    let total_months = terms.total_months();
    let rate = monthly_rate(terms.nominal_rate);

    let monthly_payment = steady_payment(principal, rate, total_months, regime)?;
    let monthly_insurance = insurance_payment(principal, monthly_rate(terms.insurance_rate));

    // Interest-only months pay interest on the balance grown by the full
    // deferral; then the steady installment runs until the end of the term.
    let grown = capitalized_principal(principal, rate, regime.full_months())?;
    let interest_only_paid = grown * rate * Decimal::from(regime.partial_months());
    let amortizing_months = total_months - regime.deferred_months();
    let installments_paid = monthly_payment * Decimal::from(amortizing_months);
    // An interest-free loan repays exactly its principal; P / n * n can
    // drift by one unit of the last Decimal digit.
    let total_interest = if rate.is_zero() {
        Decimal::ZERO
    } else {
        interest_only_paid + installments_paid - principal
    };

    let total_insurance = monthly_insurance * Decimal::from(total_months);
    let total_credit_cost =
        total_interest + total_insurance + terms.application_fee + terms.guarantee_fee;

    let apr = solve_apr(
        principal,
        total_months,
        total_interest,
        terms.nominal_rate,
        config,
    )?;
    let apr_with_insurance = solve_apr(
        principal,
        total_months,
        total_interest + total_insurance,
        terms.nominal_rate + terms.insurance_rate,
        config,
    )?;

    debug!(
        lender = %terms.lender,
        %principal,
        %monthly_payment,
        apr = %apr.rate,
        apr_with_insurance = %apr_with_insurance.rate,
        "loan summarized"
    );

    Ok(LoanSummary {
        lender: terms.lender.clone(),
        principal,
        monthly_payment,
        monthly_insurance,
        total_monthly_payment: monthly_payment + monthly_insurance,
        total_interest,
        total_insurance,
        total_credit_cost,
        apr,
        apr_with_insurance,
        application_fee: terms.application_fee,
        guarantee_fee: terms.guarantee_fee,
        nominal_rate: terms.nominal_rate,
        insurance_rate: terms.insurance_rate,
        duration_years: terms.duration_years,
        regime,
    })
}

/// Runs the whole pipeline for one offer on `property`.
///
/// # Arguments
///
/// * `property` - The financed property and household income.
/// * `terms` - The lender's offer.
/// * `first_payment_date` - Due date of the first installment.
/// * `config` - Effective-rate solver settings.
///
/// # Errors
///
/// Returns an error if the offer is invalid; see [`summarize_loan`].
pub fn evaluate_loan(
    property: &PropertyCost,
    terms: &LoanTerms,
    first_payment_date: NaiveDate,
    config: &SolverConfig,
) -> LoanResult<LoanOutcome> {
    let principal = borrowed_principal(property, terms);
    let summary = summarize_loan(principal, terms, config)?;
    let schedule = amortization_schedule(principal, terms, first_payment_date)?;
    let periods = summarize_schedule(&schedule, summary.regime)?;

    Ok(LoanOutcome {
        summary,
        schedule,
        periods,
    })
}
