//! `fr_mortgage` is a Rust library for simulating French real estate loans.
//!
//! It computes, for a property and one or two lender offers:
//! - **Summary**: borrowed amount, monthly installment with and without
//!   insurance, total interest, total credit cost and the effective annual
//!   rate (TAEG), with and without insurance.
//! - **Amortization table**: one row per month, under four repayment regimes:
//!   no deferral, full deferral (nothing paid, interest capitalizes), partial
//!   deferral (interest only), or a full deferral followed by a partial one.
//! - **Payment calendar**: the installments averaged over each phase.
//! - **Comparison** of two offers side by side.
//!
//! All amounts are `rust_decimal::Decimal`; rates are fractions (0.035 = 3.5%).
//!
//! ## Usage
//!
//! Add `fr_mortgage` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! fr_mortgage = "0.1.0"
//! chrono = "0.4"
//! rust_decimal = "1.39.0"
//! rust_decimal_macros = "1.39.0"
//! ```
//!
//! Then, use `evaluate_loan` to get the results for one offer:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fr_mortgage::{evaluate_loan, LoanTerms, PropertyCost, SolverConfig};
//! use rust_decimal_macros::dec;
//!
//! fn main() {
//!     let property = PropertyCost {
//!         purchase_price: dec!(210_000),
//!         notary_fees: dec!(15_000),
//!         monthly_net_income: dec!(4_500),
//!         ..PropertyCost::default()
//!     };
//!     let offer = LoanTerms {
//!         lender: "Bank".into(),
//!         down_payment: dec!(25_000),
//!         nominal_rate: dec!(0.035),
//!         insurance_rate: dec!(0.003),
//!         duration_years: 20,
//!         ..LoanTerms::default()
//!     };
//!     let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//!
//!     match evaluate_loan(&property, &offer, start, &SolverConfig::default()) {
//!         Ok(outcome) => {
//!             println!("Monthly payment: {:.2}", outcome.summary.monthly_payment);
//!             println!("Total interest:  {:.2}", outcome.summary.total_interest);
//!             println!("TAEG:            {:.4}", outcome.summary.apr.rate);
//!             println!("Installments:    {}", outcome.schedule.len());
//!         }
//!         Err(e) => {
//!             eprintln!("Error evaluating the loan: {}", e);
//!         }
//!     }
//! }
//! ```

pub mod comparison;
pub mod config;
pub mod error;
pub mod loan;
pub mod payment;
pub mod periods;
pub mod rate;
pub mod regime;
pub mod schedule;
pub mod simulation;
pub mod types;

#[cfg(test)]
mod test_support;

pub use comparison::{Comparison, MetricComparison, compare_loans};
pub use config::SolverConfig;
pub use error::LoanError;
pub use loan::{LoanOutcome, LoanSummary, borrowed_principal, debt_ratio, evaluate_loan, summarize_loan};
pub use periods::{PeriodSummary, summarize_schedule};
pub use rate::{AprEstimate, solve_apr};
pub use regime::DeferralRegime;
pub use schedule::{AmortizationRow, amortization_schedule, first_payment_date};
pub use simulation::{Simulation, SimulationReport};
pub use types::{LoanTerms, Money, PropertyCost, Rate, monthly_rate, percent_to_rate};

pub type LoanResult<T> = Result<T, LoanError>;
