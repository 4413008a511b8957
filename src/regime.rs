//! Repayment regimes: which months defer, and how.

use serde::{Deserialize, Serialize};

use crate::types::LoanTerms;

/// What happens to the balance during one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonthPolicy {
    /// Nothing is paid; the month's interest is added to the balance.
    Capitalize,
    /// Only the month's interest is paid; the balance is unchanged.
    InterestOnly,
    /// The steady-state installment is paid, repaying capital.
    Amortize,
}

/// A contiguous run of months sharing one policy. Month numbers are 1-based
/// and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub policy: MonthPolicy,
    pub first_month: u32,
    pub last_month: u32,
}

impl Phase {
    pub fn months(&self) -> u32 {
        self.last_month + 1 - self.first_month
    }
}

/// The repayment regime of a loan, chosen once from its deferral fields.
///
/// A full deferral always comes first, then the partial deferral, then normal
/// amortization until the end of the term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferralRegime {
    None,
    FullOnly { months: u32 },
    PartialOnly { months: u32 },
    Combined { full_months: u32, partial_months: u32 },
}

impl DeferralRegime {
    /// Picks the regime matching the two deferral lengths; zero means absent.
    pub fn new(full_months: u32, partial_months: u32) -> Self {
        match (full_months, partial_months) {
            (0, 0) => DeferralRegime::None,
            (full, 0) => DeferralRegime::FullOnly { months: full },
            (0, partial) => DeferralRegime::PartialOnly { months: partial },
            (full, partial) => DeferralRegime::Combined {
                full_months: full,
                partial_months: partial,
            },
        }
    }

    /// Regime of an offer, from its `full_deferral_months` and
    /// `partial_deferral_months`.
    pub fn from_terms(terms: &LoanTerms) -> Self {
        Self::new(terms.full_deferral_months, terms.partial_deferral_months)
    }

    /// Months during which interest capitalizes.
    pub fn full_months(&self) -> u32 {
        match *self {
            DeferralRegime::FullOnly { months } => months,
            DeferralRegime::Combined { full_months, .. } => full_months,
            _ => 0,
        }
    }

    /// Months during which only interest is paid.
    pub fn partial_months(&self) -> u32 {
        match *self {
            DeferralRegime::PartialOnly { months } => months,
            DeferralRegime::Combined { partial_months, .. } => partial_months,
            _ => 0,
        }
    }

    /// Months before the first amortizing installment.
    pub fn deferred_months(&self) -> u32 {
        self.full_months().saturating_add(self.partial_months())
    }

    /// Splits a term of `total_months` into its non-empty phases, in order.
    ///
    /// Deferrals longer than the term yield no amortizing phase.
    pub fn phases(&self, total_months: u32) -> Vec<Phase> {
        let full = self.full_months();
        let partial = self.partial_months();

        let mut phases = Vec::with_capacity(3);
        let mut next = 1;
        for (policy, months) in [
            (MonthPolicy::Capitalize, full),
            (MonthPolicy::InterestOnly, partial),
            (MonthPolicy::Amortize, total_months.saturating_sub(self.deferred_months())),
        ] {
            if months == 0 {
                continue;
            }
            phases.push(Phase {
                policy,
                first_month: next,
                last_month: next + months - 1,
            });
            next += months;
        }
        phases
    }
}
