//! # Error Types
//!
//! Domain-specific error types for vend-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vend-core errors (this file)                                          │
//! │  ├── SolveError       - Change computation failures                    │
//! │  ├── TillError        - Deposit / commit rejections                    │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── CoreError        - Everything above + purchase flow errors        │
//! │                                                                         │
//! │  vend-store errors (separate crate)                                    │
//! │  └── StoreError       - File load/save failures                        │
//! │                                                                         │
//! │  Flow: SolveError / TillError / ValidationError → CoreError → Shell    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is a returned value. None of these are raised as panics and
//! none leave the till half-updated.

use thiserror::Error;

use crate::denomination::Denomination;
use crate::money::Money;
use crate::solver::Shortfall;

// =============================================================================
// Solve Error
// =============================================================================

/// Reasons a change computation produced no allocation.
///
/// The till is never touched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Negative amount handed to the solver. Rejected before any work.
    #[error("Invalid change amount {amount}: must not be negative")]
    InvalidAmount { amount: Money },

    /// Amount beyond the configured ceiling for the DP table.
    #[error("Change amount {amount} exceeds the maximum of {max}")]
    AmountTooLarge { amount: Money, max: Money },

    /// No combination of available coins sums exactly to the amount.
    ///
    /// ## User Workflow
    /// ```text
    /// Credit: 7, Till: {1: 0, 5: 3}
    ///      │
    ///      ▼
    /// solve(7) → best approach is 5
    ///      │
    ///      ▼
    /// Infeasible(Shortfall { requested: 7, remainder: 2 })
    ///      │
    ///      ▼
    /// Shell: "Exact change is not possible. Remaining: 2 EGP"
    /// ```
    #[error("Exact change is not possible: {0}")]
    Infeasible(Shortfall),
}

impl SolveError {
    /// Returns the shortfall if this is an infeasibility error.
    pub fn shortfall(&self) -> Option<&Shortfall> {
        match self {
            SolveError::Infeasible(shortfall) => Some(shortfall),
            _ => None,
        }
    }
}

// =============================================================================
// Till Error
// =============================================================================

/// Rejections from the till mutator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TillError {
    /// Deposit of a face value the machine does not accept.
    #[error("Unknown denomination: {0}")]
    UnknownDenomination(Denomination),

    /// Commit of an allocation larger than the till holds.
    ///
    /// ## When This Occurs
    /// Only when the allocation was computed against a stale till snapshot.
    /// The solver never produces such an allocation for the till it was given.
    #[error("Overdraft: requested {requested} x {denomination}, till holds {available}")]
    OverdraftAttempt {
        denomination: Denomination,
        requested: u32,
        available: u32,
    },

    /// Deposit would overflow the per-denomination counter.
    #[error("Count overflow for denomination {denomination}")]
    CountOverflow { denomination: Denomination },
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent business rule violations in the purchase flow, plus the
/// solver, till and validation errors they wrap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Slot number does not name a product.
    #[error("Product not found in slot {slot}")]
    ProductNotFound { slot: usize },

    /// Product exists but has no stock left.
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// Credit does not cover the selected product.
    #[error("Insufficient credit: price {price}, credit {credit}, insert {needed} more")]
    InsufficientCredit {
        price: Money,
        credit: Money,
        needed: Money,
    },

    /// Change computation failed.
    #[error(transparent)]
    Solve(#[from] SolveError),

    /// Till mutation rejected.
    #[error(transparent)]
    Till(#[from] TillError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. non-numeric denomination).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: u32) -> Denomination {
        Denomination::new(value).unwrap()
    }

    #[test]
    fn test_error_messages() {
        let err = TillError::OverdraftAttempt {
            denomination: d(10),
            requested: 5,
            available: 2,
        };
        assert_eq!(err.to_string(), "Overdraft: requested 5 x 10, till holds 2");

        let err = SolveError::Infeasible(Shortfall::new(Money::from_units(7), Money::from_units(2)));
        assert_eq!(
            err.to_string(),
            "Exact change is not possible: remaining 2 of 7"
        );
    }

    #[test]
    fn test_shortfall_accessor() {
        let err = SolveError::InvalidAmount {
            amount: Money::from_units(-1),
        };
        assert!(err.shortfall().is_none());

        let shortfall = Shortfall::new(Money::from_units(3), Money::from_units(3));
        let err = SolveError::Infeasible(shortfall);
        assert_eq!(err.shortfall(), Some(&shortfall));
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let core_err: CoreError = TillError::UnknownDenomination(d(3)).into();
        assert!(matches!(core_err, CoreError::Till(_)));
        assert_eq!(core_err.to_string(), "Unknown denomination: 3");

        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
