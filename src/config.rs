use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Annual rate increment applied at each solver iteration.
pub const DEFAULT_STEP: Decimal = dec!(0.000001);

/// Accepted gap between the trial and target totals, in currency units.
pub const DEFAULT_TOLERANCE: Decimal = dec!(0.0000001);

/// Iterations after which the solver stops and reports the last rate reached.
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

/// Tuning knobs of the effective-rate solver.
///
/// Every field falls back to its default when absent from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// See [`DEFAULT_STEP`].
    pub step: Decimal,
    /// See [`DEFAULT_TOLERANCE`].
    pub tolerance: Decimal,
    /// See [`DEFAULT_MAX_ITERATIONS`].
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}
