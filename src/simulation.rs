//! A shareable simulation: one property and up to two competing offers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::LoanResult;
use crate::comparison::{Comparison, compare_loans};
use crate::config::SolverConfig;
use crate::error::LoanError;
use crate::loan::{LoanOutcome, evaluate_loan};
use crate::types::{LoanTerms, Money, PropertyCost};

/// Inputs of a simulation, as stored in a share link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub property: PropertyCost,
    pub first: LoanTerms,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<LoanTerms>,
}

/// Results of a simulation. Each offer succeeds or fails on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub first: LoanResult<LoanOutcome>,
    pub second: Option<LoanResult<LoanOutcome>>,
    pub monthly_net_income: Money,
}

impl Simulation {
    /// Evaluates every offer of the simulation.
    pub fn evaluate(&self, first_payment_date: NaiveDate, config: &SolverConfig) -> SimulationReport {
        let run = |terms: &LoanTerms| evaluate_loan(&self.property, terms, first_payment_date, config);

        SimulationReport {
            first: run(&self.first),
            second: self.second.as_ref().map(run),
            monthly_net_income: self.property.monthly_net_income,
        }
    }

    /// Compact JSON form of the simulation.
    pub fn to_share_json(&self) -> LoanResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Rebuilds a simulation from its share form.
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::Serialization`] if the blob is not JSON or lacks
    /// the property or the first offer.
    pub fn from_share_json(blob: &str) -> LoanResult<Self> {
        let value: Value = serde_json::from_str(blob)?;
        for required in ["property", "first"] {
            if value.get(required).is_none_or(Value::is_null) {
                return Err(LoanError::Serialization(format!(
                    "simulation is missing `{required}`"
                )));
            }
        }
        Ok(serde_json::from_value(value)?)
    }
}

impl SimulationReport {
    /// Comparison of both offers, when both were computed successfully.
    ///
    /// Debt ratios use the property's `monthly_net_income` captured at
    /// evaluation time.
    pub fn comparison(&self) -> Option<LoanResult<Comparison>> {
        match (&self.first, &self.second) {
            (Ok(first), Some(Ok(second))) => Some(compare_loans(
                &first.summary,
                &second.summary,
                self.monthly_net_income,
            )),
            _ => None,
        }
    }
}
