use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::LoanResult;

/// Monetary amounts, in the loan's single currency.
pub type Money = Decimal;

/// Rates expressed as fractions (0.035 = 3.5%). Never as percentages.
pub type Rate = Decimal;

/// The property being financed.
///
/// Missing fields deserialize to zero, so a partially filled form still
/// produces a record the engine can work with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyCost {
    /// Purchase price, agency fees included.
    pub purchase_price: Money,
    /// Agency fee, informational only: already part of `purchase_price`.
    pub agency_fee: Money,
    /// Renovation budget financed with the purchase.
    pub renovation_cost: Money,
    /// Notary fees.
    pub notary_fees: Money,
    /// Household monthly net income, used for the debt ratio.
    pub monthly_net_income: Money,
}

impl PropertyCost {
    /// Total amount to finance before any down payment.
    pub fn total_cost(&self) -> Money {
        self.purchase_price + self.renovation_cost + self.notary_fees
    }
}

/// One lender's offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanTerms {
    /// Lender name, a label only.
    pub lender: String,
    /// Personal contribution, subtracted from the property's total cost.
    pub down_payment: Money,
    /// One-off bank fee, counted in the credit cost.
    pub application_fee: Money,
    /// One-off guarantee or mortgage fee, counted in the credit cost.
    pub guarantee_fee: Money,
    /// Nominal annual rate as a fraction.
    pub nominal_rate: Rate,
    /// Annual borrower insurance rate as a fraction of the borrowed amount.
    pub insurance_rate: Rate,
    /// Whole term in years, deferral months included.
    pub duration_years: u32,
    /// Months with no payment at all; interest capitalizes.
    pub full_deferral_months: u32,
    /// Months paying interest only; the balance is left untouched.
    pub partial_deferral_months: u32,
}

impl LoanTerms {
    /// Number of monthly installments over the life of the loan.
    pub fn total_months(&self) -> u32 {
        self.duration_years.saturating_mul(12)
    }

    /// Rejects terms the amortization formulas cannot handle.
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::InvalidLoanTerms`] when the duration is zero, when
    /// a rate is negative, or when the deferral periods leave no amortizing
    /// month.
    pub fn validate(&self) -> LoanResult<()> {
        if self.duration_years == 0 {
            return Err(LoanError::invalid(
                "duration_years",
                "Duration must be at least one year",
            ));
        }
        if self.nominal_rate < Decimal::ZERO {
            return Err(LoanError::invalid(
                "nominal_rate",
                "Nominal rate cannot be negative",
            ));
        }
        if self.insurance_rate < Decimal::ZERO {
            return Err(LoanError::invalid(
                "insurance_rate",
                "Insurance rate cannot be negative",
            ));
        }
        let deferred = self
            .full_deferral_months
            .saturating_add(self.partial_deferral_months);
        if deferred >= self.total_months() {
            return Err(LoanError::invalid(
                "deferral_months",
                "Deferral periods must leave at least one amortizing month",
            ));
        }
        Ok(())
    }
}

/// Converts a percentage entry (3.5) into a rate fraction (0.035).
pub fn percent_to_rate(percent: Decimal) -> Rate {
    percent / dec!(100)
}

/// Proportional monthly rate of an annual nominal rate.
///
/// French lenders quote proportional rates: the monthly rate is simply the
/// annual rate divided by twelve, not its compounded twelfth root.
pub fn monthly_rate(annual: Rate) -> Rate {
    annual / dec!(12)
}
