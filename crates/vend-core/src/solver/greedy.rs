//! Largest-denomination-first change.
//!
//! Greedy is only safe for canonical coin systems with unlimited supply.
//! A vending till has neither guarantee, so greedy can return more coins
//! than necessary or give up while an exact combination exists:
//!
//! ```text
//! Till {2: 3, 5: 1}, amount 6
//!   greedy: take 5 → 1 left, no 1s → remainder 1   ✗
//!   exact:  2 + 2 + 2                               ✓
//! ```

use tracing::debug;

use super::{ChangeRequest, ChangeStrategy, DynamicProgramming};
use crate::allocation::Allocation;
use crate::error::SolveError;

/// Takes as many of each denomination as fit, largest first.
///
/// The remainder it reports on failure is greedy's own leftover, which can
/// be larger than the true unavoidable remainder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl ChangeStrategy for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn make_change(&self, request: &ChangeRequest<'_>) -> Result<Allocation, SolveError> {
        let mut remaining = request.target()?;
        let mut allocation = Allocation::new();

        for (denomination, available) in request.till().available().rev() {
            if remaining == 0 {
                break;
            }
            let face = denomination.value() as usize;
            // available <= u32::MAX, so the min fits back into u32
            let used = (remaining / face).min(available as usize) as u32;
            allocation.add(denomination, used);
            remaining -= used as usize * face;
        }

        if remaining > 0 {
            return Err(request.infeasible(remaining));
        }
        Ok(allocation)
    }
}

/// Greedy fast path, dynamic programming when greedy leaves a remainder.
///
/// Complete (finds change whenever any exists) but not minimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyFirst;

impl ChangeStrategy for GreedyFirst {
    fn name(&self) -> &'static str {
        "greedy-first"
    }

    fn make_change(&self, request: &ChangeRequest<'_>) -> Result<Allocation, SolveError> {
        match Greedy.make_change(request) {
            Err(SolveError::Infeasible(shortfall)) => {
                debug!(
                    amount = %request.amount(),
                    greedy_remainder = %shortfall.remainder(),
                    "Greedy fast path failed, falling back"
                );
                DynamicProgramming.make_change(request)
            }
            other => other,
        }
    }
}
