//! # Change Solver
//!
//! Decides whether an amount can be paid out exactly from a till with
//! bounded counts, and if so which coins to use.
//!
//! ## Strategies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Change Strategies                                  │
//! │                                                                         │
//! │  DynamicProgramming (PRODUCTION)                                       │
//! │  ───────────────────────────────                                       │
//! │  • Bounded coin-change table over [0, amount]                          │
//! │  • Minimum coin count, always finds a solution when one exists         │
//! │  • Exact shortfall when none exists                                    │
//! │                                                                         │
//! │  Greedy                                                                │
//! │  ──────                                                                │
//! │  • Largest denomination first, as many as fit                          │
//! │  • Not optimal, not complete under limited supply                      │
//! │                                                                         │
//! │  GreedyFirst                                                           │
//! │  ───────────                                                           │
//! │  • Greedy, then DynamicProgramming when greedy leaves a remainder      │
//! │  • Always finds a solution when one exists, coin count not minimal     │
//! │                                                                         │
//! │  BruteForce (tests / `oracles` feature only)                           │
//! │  ──────────                                                            │
//! │  • Enumerates every usage vector; exponential                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vend_core::{solve, Denomination, Money, Till};
//!
//! let d = |v| Denomination::new(v).unwrap();
//! let till = Till::from_counts([(d(1), 5), (d(5), 2), (d(10), 1)]);
//!
//! let change = solve(&till, Money::from_units(16)).unwrap();
//! assert_eq!(change.coin_count(), 3); // 10 + 5 + 1
//! ```

mod dynamic;
mod greedy;
#[cfg(any(test, feature = "oracles"))]
mod oracle;

pub use dynamic::DynamicProgramming;
pub use greedy::{Greedy, GreedyFirst};
#[cfg(any(test, feature = "oracles"))]
pub use oracle::BruteForce;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::allocation::Allocation;
use crate::error::{SolveError, ValidationError};
use crate::money::Money;
use crate::till::Till;
use crate::DEFAULT_MAX_CHANGE_AMOUNT;

// =============================================================================
// Request / Shortfall
// =============================================================================

/// One change event: a read-only view of the till and the amount to pay.
#[derive(Debug, Clone, Copy)]
pub struct ChangeRequest<'a> {
    till: &'a Till,
    amount: Money,
    max_amount: Money,
}

impl<'a> ChangeRequest<'a> {
    /// Creates a request with the default amount ceiling.
    pub fn new(till: &'a Till, amount: Money) -> Self {
        ChangeRequest {
            till,
            amount,
            max_amount: Money::from_units(DEFAULT_MAX_CHANGE_AMOUNT),
        }
    }

    /// Overrides the amount ceiling.
    pub fn with_max_amount(mut self, max_amount: Money) -> Self {
        self.max_amount = max_amount;
        self
    }

    pub fn till(&self) -> &'a Till {
        self.till
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Checks the amount and returns it as a table index.
    pub(crate) fn target(&self) -> Result<usize, SolveError> {
        if self.amount.is_negative() {
            return Err(SolveError::InvalidAmount {
                amount: self.amount,
            });
        }
        let too_large = || SolveError::AmountTooLarge {
            amount: self.amount,
            max: self.max_amount,
        };
        if self.amount > self.max_amount {
            return Err(too_large());
        }
        usize::try_from(self.amount.units()).map_err(|_| too_large())
    }

    pub(crate) fn infeasible(&self, remainder: usize) -> SolveError {
        // remainder <= target, which already fit in an i64
        let remainder = Money::from_units(remainder as i64);
        SolveError::Infeasible(Shortfall::new(self.amount, remainder))
    }
}

/// What could not be paid out.
///
/// `remainder` is the part of `requested` that no combination of the
/// available coins can cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    requested: Money,
    remainder: Money,
}

impl Shortfall {
    pub fn new(requested: Money, remainder: Money) -> Self {
        Shortfall {
            requested,
            remainder,
        }
    }

    pub fn requested(&self) -> Money {
        self.requested
    }

    pub fn remainder(&self) -> Money {
        self.remainder
    }

    /// The closest amount the till can pay exactly.
    pub fn payable(&self) -> Money {
        self.requested - self.remainder
    }
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "remaining {} of {}", self.remainder, self.requested)
    }
}

// =============================================================================
// Strategy Seam
// =============================================================================

/// A change-making algorithm.
///
/// Implementations must be pure: the same request always yields the same
/// result, and the till is never modified.
pub trait ChangeStrategy: fmt::Debug + Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Computes the coins to pay out for `request`.
    fn make_change(&self, request: &ChangeRequest<'_>) -> Result<Allocation, SolveError>;
}

/// Computes minimum-coin change with the production algorithm.
///
/// ## Errors
/// - `InvalidAmount` for a negative amount
/// - `AmountTooLarge` above [`DEFAULT_MAX_CHANGE_AMOUNT`]
/// - `Infeasible` with the unavoidable remainder
pub fn solve(till: &Till, amount: Money) -> Result<Allocation, SolveError> {
    DynamicProgramming.make_change(&ChangeRequest::new(till, amount))
}

// =============================================================================
// Change Policy
// =============================================================================

/// Which production strategy the machine uses. Chosen by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangePolicy {
    /// Minimum coin count (dynamic programming).
    #[default]
    Optimal,

    /// Greedy fast path with dynamic-programming fallback.
    /// Finds change whenever it exists, but may use more coins.
    GreedyFirst,
}

impl ChangePolicy {
    /// Builds the strategy for this policy.
    pub fn strategy(&self) -> Box<dyn ChangeStrategy> {
        match self {
            ChangePolicy::Optimal => Box::new(DynamicProgramming),
            ChangePolicy::GreedyFirst => Box::new(GreedyFirst),
        }
    }
}

impl fmt::Display for ChangePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangePolicy::Optimal => write!(f, "optimal"),
            ChangePolicy::GreedyFirst => write!(f, "greedy-first"),
        }
    }
}

impl FromStr for ChangePolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "optimal" | "dp" => Ok(ChangePolicy::Optimal),
            "greedy-first" | "greedy" => Ok(ChangePolicy::GreedyFirst),
            other => Err(ValidationError::InvalidFormat {
                field: "change_policy".to_string(),
                reason: format!("unknown policy '{}', expected optimal or greedy-first", other),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
