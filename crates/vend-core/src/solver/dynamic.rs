//! Bounded coin-change by dynamic programming.
//!
//! ## Table Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Till {1: 5, 5: 2, 10: 1}, amount 16                                    │
//! │                                                                         │
//! │  best[v] = fewest coins reaching exactly v (None = unreachable)        │
//! │                                                                         │
//! │  stage   0  1  2  3  4  5  6  7 ...  15  16                            │
//! │  start   0  -  -  -  -  -  -  -       -   -                            │
//! │  +1 ×5   0  1  2  3  4  5  -  -       -   -                            │
//! │  +5 ×2   0  1  2  3  4  1  2  3 ...   -   -                            │
//! │  +10 ×1  0  1  2  3  4  1  2  3 ...   2   3   ← answer: 3 coins        │
//! │                                                                         │
//! │  taken[stage][v] = copies of that stage's denomination used to reach v │
//! │  Walking the stages backwards from v = 16 rebuilds 10 + 5 + 1.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Bounded Update
//! For one denomination `d` with cap `c`, values that share a residue modulo
//! `d` form a chain `r, r + d, r + 2d, ...`. Writing `v = r + j·d`:
//!
//! ```text
//! next[v] = min over i in [j − c, j] of (best[r + i·d] − i) + j
//! ```
//!
//! The inner minimum is a sliding window over the chain, kept in a monotone
//! queue, so each denomination costs `O(amount)` no matter how many coins the
//! till holds. The whole table is `O(amount × denominations)`.

use std::collections::VecDeque;

use tracing::debug;

use super::{ChangeRequest, ChangeStrategy};
use crate::allocation::Allocation;
use crate::denomination::Denomination;
use crate::error::SolveError;
use crate::till::Till;

/// Minimum-coin change. The production strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicProgramming;

impl ChangeStrategy for DynamicProgramming {
    fn name(&self) -> &'static str {
        "dynamic-programming"
    }

    fn make_change(&self, request: &ChangeRequest<'_>) -> Result<Allocation, SolveError> {
        let target = request.target()?;
        if target == 0 {
            return Ok(Allocation::new());
        }

        let table = CoinTable::build(request.till(), target);

        match table.best[target] {
            Some(coins) => {
                let allocation = table.reconstruct(target);
                debug!(
                    amount = %request.amount(),
                    coins,
                    strategy = self.name(),
                    "Exact change found"
                );
                Ok(allocation)
            }
            None => {
                let closest = table.largest_reachable();
                debug!(
                    amount = %request.amount(),
                    closest,
                    strategy = self.name(),
                    "Exact change not possible"
                );
                Err(request.infeasible(target - closest))
            }
        }
    }
}

/// The DP state after processing every available denomination.
struct CoinTable {
    /// One entry per processed denomination, ascending.
    stages: Vec<Stage>,
    /// Fewest coins per value after the last stage.
    best: Vec<Option<u32>>,
}

struct Stage {
    denomination: Denomination,
    taken: Vec<u32>,
}

impl CoinTable {
    fn build(till: &Till, target: usize) -> Self {
        let mut best: Vec<Option<u32>> = vec![None; target + 1];
        best[0] = Some(0);
        let mut stages = Vec::new();

        for (denomination, available) in till.available() {
            let face = denomination.value() as usize;
            if face > target {
                continue;
            }
            let cap = (available as usize).min(target / face);

            let mut next: Vec<Option<u32>> = vec![None; target + 1];
            let mut taken = vec![0u32; target + 1];
            // (chain index, coins) with non-decreasing `coins - index`
            let mut window: VecDeque<(usize, u32)> = VecDeque::with_capacity(cap + 1);

            for residue in 0..face {
                window.clear();
                let chain = (residue..=target).step_by(face);

                for (j, value) in chain.enumerate() {
                    if let Some(coins) = best[value] {
                        let key = i64::from(coins) - j as i64;
                        // Strict comparison keeps the older entry on ties:
                        // on equal coin counts the larger denomination wins.
                        while window
                            .back()
                            .is_some_and(|&(i, c)| i64::from(c) - i as i64 > key)
                        {
                            window.pop_back();
                        }
                        window.push_back((j, coins));
                    }
                    while window.front().is_some_and(|&(i, _)| i + cap < j) {
                        window.pop_front();
                    }
                    if let Some(&(i, coins)) = window.front() {
                        let k = (j - i) as u32;
                        next[value] = Some(coins + k);
                        taken[value] = k;
                    }
                }
            }

            best = next;
            stages.push(Stage {
                denomination,
                taken,
            });
        }

        CoinTable { stages, best }
    }

    fn reconstruct(&self, target: usize) -> Allocation {
        let mut allocation = Allocation::new();
        let mut value = target;

        for stage in self.stages.iter().rev() {
            let count = stage.taken[value];
            allocation.add(stage.denomination, count);
            value -= count as usize * stage.denomination.value() as usize;
        }

        debug_assert_eq!(value, 0, "reconstruction must land on zero");
        allocation
    }

    fn largest_reachable(&self) -> usize {
        // best[0] is always reachable
        self.best.iter().rposition(Option::is_some).unwrap_or(0)
    }
}
