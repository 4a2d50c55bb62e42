//! # Till Mutator
//!
//! The only two ways a till's counts change.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Till Mutations                                    │
//! │                                                                         │
//! │  User inserts a 10 ──────► deposit(10, 1) ────► till[10] += 1          │
//! │                              │                                          │
//! │                              └─ unknown face value? UnknownDenomination │
//! │                                                                         │
//! │  solve(till, credit) ─────► Allocation (read-only, no mutation)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  commit(&allocation) ─────► re-check every count, then till[d] -= n    │
//! │                              │                                          │
//! │                              └─ stale snapshot? OverdraftAttempt        │
//! │                                                                         │
//! │  Both operations validate first and mutate second: on error the        │
//! │  till is exactly as it was.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both take `&mut Till`, so the borrow checker guarantees a single writer
//! at a time.

use tracing::debug;

use crate::allocation::Allocation;
use crate::denomination::Denomination;
use crate::error::TillError;
use crate::till::Till;

impl Till {
    /// Adds `count` pieces of `denomination`.
    ///
    /// ## Errors
    /// - `UnknownDenomination` when the machine does not accept the face value
    /// - `CountOverflow` when the counter would wrap
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::{Denomination, Till, TillError};
    ///
    /// let d = |v| Denomination::new(v).unwrap();
    /// let mut till = Till::from_counts([(d(1), 0), (d(5), 2)]);
    ///
    /// till.deposit(d(5), 3).unwrap();
    /// assert_eq!(till.count(d(5)), 5);
    ///
    /// assert_eq!(till.deposit(d(3), 1), Err(TillError::UnknownDenomination(d(3))));
    /// ```
    pub fn deposit(&mut self, denomination: Denomination, count: u32) -> Result<(), TillError> {
        let slot = self
            .counts
            .get_mut(&denomination)
            .ok_or(TillError::UnknownDenomination(denomination))?;

        *slot = slot
            .checked_add(count)
            .ok_or(TillError::CountOverflow { denomination })?;

        debug!(%denomination, count, new_count = *slot, "Deposited into till");
        Ok(())
    }

    /// Pays out `allocation`, decrementing each count.
    ///
    /// The allocation is re-validated against the current counts before
    /// anything is changed; it is not trusted because it may have been
    /// computed against an older snapshot.
    ///
    /// ## Errors
    /// - `OverdraftAttempt` for the first denomination that does not fit
    pub fn commit(&mut self, allocation: &Allocation) -> Result<(), TillError> {
        for (denomination, requested) in allocation.iter() {
            let available = self.count(denomination);
            if requested > available {
                return Err(TillError::OverdraftAttempt {
                    denomination,
                    requested,
                    available,
                });
            }
        }

        for (denomination, used) in allocation.iter() {
            if let Some(slot) = self.counts.get_mut(&denomination) {
                *slot -= used;
            }
        }

        debug!(
            coins = allocation.coin_count(),
            value = %allocation.total_value(),
            "Committed allocation to till"
        );
        Ok(())
    }
}
