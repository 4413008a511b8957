//! Effective annual rate (TAEG) estimation.
//!
//! The solver looks for the annual rate at which a plain, deferral-free loan
//! of the same principal and term costs a given total. It walks the rate in
//! fixed steps toward the target instead of bisecting, and gives up after a
//! fixed number of iterations, returning the last rate reached. Far from the
//! starting rate the walk may run out of iterations before reaching the
//! target: the estimate is then only a lower or upper bound.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::LoanResult;
use crate::config::SolverConfig;
use crate::error::LoanError;
use crate::payment::annuity_payment;
use crate::types::{Money, Rate, monthly_rate};

/// Outcome of a rate search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AprEstimate {
    /// Annual rate, as a fraction.
    pub rate: Rate,
    /// Iterations spent; equal to the configured cap when not converged.
    pub iterations: u32,
    pub converged: bool,
}

/// Total interest paid on a deferral-free loan at `annual_rate`.
///
/// A zero rate costs exactly nothing, even when the principal does not split
/// evenly into `total_months` installments.
pub fn interest_cost(principal: Money, annual_rate: Rate, total_months: u32) -> LoanResult<Money> {
    if annual_rate.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let payment = annuity_payment(principal, monthly_rate(annual_rate), total_months)?;
    payment
        .checked_mul(Decimal::from(total_months))
        .map(|paid| paid - principal)
        .ok_or_else(|| LoanError::overflow("interest cost"))
}

/// Searches the annual rate whose [`interest_cost`] matches `target_cost`,
/// starting from `initial_rate`.
///
/// Non-convergence is not an error: the estimate carries `converged: false`.
///
/// # Arguments
///
/// * `principal` - The borrowed amount.
/// * `total_months` - The whole term, deferral months included.
/// * `target_cost` - Total cost to match, e.g. interest plus insurance.
/// * `initial_rate` - Annual rate the walk starts from.
/// * `config` - Step, tolerance and iteration cap.
///
/// # Errors
///
/// Returns an error only if a trial payment cannot be computed.
pub fn solve_apr(
    principal: Money,
    total_months: u32,
    target_cost: Money,
    initial_rate: Rate,
    config: &SolverConfig,
) -> LoanResult<AprEstimate> {
    let mut rate = initial_rate;

    for iteration in 0..config.max_iterations {
        let trial_cost = interest_cost(principal, rate, total_months)?;
        let gap = trial_cost - target_cost;

        if gap.abs() < config.tolerance {
            debug!(%rate, iteration, "effective rate converged");
            return Ok(AprEstimate {
                rate,
                iterations: iteration,
                converged: true,
            });
        }

        if gap > Decimal::ZERO {
            rate -= config.step;
        } else {
            rate += config.step;
        }
    }

    warn!(
        %rate,
        %initial_rate,
        max_iterations = config.max_iterations,
        "effective rate did not converge, keeping last estimate"
    );
    Ok(AprEstimate {
        rate,
        iterations: config.max_iterations,
        converged: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::assert_close;
    use rust_decimal_macros::dec;

    #[test]
    fn test_interest_cost_reference_loan() {
        let cost = interest_cost(dec!(200000), dec!(0.035), 240).unwrap();
        assert_close(cost, dec!(78383), dec!(50));
    }

    #[test]
    fn test_zero_rate_costs_nothing() {
        let cost = interest_cost(dec!(200000), Decimal::ZERO, 240).unwrap();
        assert_eq!(cost, Decimal::ZERO);
    }

    #[test]
    fn test_zero_rate_target_converges_immediately() {
        // 200000 / 240 does not terminate in Decimal.
        let estimate =
            solve_apr(dec!(200000), 240, Decimal::ZERO, Decimal::ZERO, &SolverConfig::default())
                .unwrap();
        assert!(estimate.converged);
        assert_eq!(estimate.iterations, 0);
    }

    #[test]
    fn test_converges_immediately_on_nominal_rate() {
        let target = interest_cost(dec!(200000), dec!(0.035), 240).unwrap();
        let estimate =
            solve_apr(dec!(200000), 240, target, dec!(0.035), &SolverConfig::default()).unwrap();

        assert!(estimate.converged);
        assert_eq!(estimate.iterations, 0);
        assert_eq!(estimate.rate, dec!(0.035));
    }

    #[test]
    fn test_walks_up_to_target_rate() {
        let target = interest_cost(dec!(200000), dec!(0.035), 240).unwrap();
        let estimate =
            solve_apr(dec!(200000), 240, target, dec!(0.0349), &SolverConfig::default()).unwrap();

        assert!(estimate.converged);
        assert_eq!(estimate.iterations, 100);
        assert_eq!(estimate.rate, dec!(0.035));
    }

    #[test]
    fn test_walks_down_to_target_rate() {
        let target = interest_cost(dec!(150000), dec!(0.042), 180).unwrap();
        let estimate =
            solve_apr(dec!(150000), 180, target, dec!(0.04225), &SolverConfig::default()).unwrap();

        assert!(estimate.converged);
        assert_eq!(estimate.iterations, 250);
        assert_close(estimate.rate, dec!(0.042), dec!(0.000001));
    }

    #[test]
    fn test_gives_up_after_iteration_cap() {
        // Nominal 3.5% plus 12000 of insurance: the matching rate is close to
        // 3.98%, further than 1000 steps away from the 3.8% starting point.
        let target = interest_cost(dec!(200000), dec!(0.035), 240).unwrap() + dec!(12000);
        let estimate =
            solve_apr(dec!(200000), 240, target, dec!(0.038), &SolverConfig::default()).unwrap();

        assert!(!estimate.converged);
        assert_eq!(estimate.iterations, 1000);
        assert_eq!(estimate.rate, dec!(0.039));
    }

    #[test]
    fn test_custom_iteration_cap() {
        let config = SolverConfig {
            max_iterations: 10,
            ..SolverConfig::default()
        };
        let target = interest_cost(dec!(200000), dec!(0.035), 240).unwrap();
        let estimate = solve_apr(dec!(200000), 240, target, dec!(0.034), &config).unwrap();

        assert!(!estimate.converged);
        assert_eq!(estimate.rate, dec!(0.03401));
    }
}
