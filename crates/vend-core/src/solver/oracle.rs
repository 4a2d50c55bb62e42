//! Exhaustive search, kept as a reference to check the other strategies.
//!
//! Every usage vector `(k_1, ..., k_n)` with `k_i <= cap_i` is visited, so the
//! cost is `Π (cap_i + 1)`. Only usable on small tills.

use super::{ChangeRequest, ChangeStrategy};
use crate::allocation::Allocation;
use crate::denomination::Denomination;
use crate::error::SolveError;

/// Brute-force minimum-coin change.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl ChangeStrategy for BruteForce {
    fn name(&self) -> &'static str {
        "brute-force"
    }

    fn make_change(&self, request: &ChangeRequest<'_>) -> Result<Allocation, SolveError> {
        let target = request.target()?;

        let coins: Vec<(Denomination, usize)> = request
            .till()
            .available()
            .filter(|(d, _)| d.value() as usize <= target)
            .map(|(d, c)| (d, c as usize))
            .collect();

        let mut search = Search {
            coins: &coins,
            used: vec![0; coins.len()],
            best: None,
            closest_remainder: target,
        };
        search.visit(0, target, 0);

        match search.best {
            Some((_, used)) => Ok(Allocation::from_counts(
                coins.iter().zip(used).map(|((d, _), k)| (*d, k as u32)),
            )),
            None => Err(request.infeasible(search.closest_remainder)),
        }
    }
}

struct Search<'a> {
    coins: &'a [(Denomination, usize)],
    used: Vec<usize>,
    best: Option<(usize, Vec<usize>)>,
    closest_remainder: usize,
}

impl Search<'_> {
    fn visit(&mut self, index: usize, remaining: usize, coins_so_far: usize) {
        if index == self.coins.len() {
            self.closest_remainder = self.closest_remainder.min(remaining);
            let better = self
                .best
                .as_ref()
                .map_or(true, |(fewest, _)| coins_so_far < *fewest);
            if remaining == 0 && better {
                self.best = Some((coins_so_far, self.used.clone()));
            }
            return;
        }

        let (denomination, cap) = self.coins[index];
        let face = denomination.value() as usize;
        for k in 0..=cap.min(remaining / face) {
            self.used[index] = k;
            self.visit(index + 1, remaining - k * face, coins_so_far + k);
        }
        self.used[index] = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::till::Till;

    fn d(value: u32) -> Denomination {
        Denomination::new(value).unwrap()
    }

    #[test]
    fn test_finds_minimum() {
        let till = Till::from_counts([(d(1), 10), (d(3), 2), (d(4), 1)]);
        let change = BruteForce
            .make_change(&ChangeRequest::new(&till, Money::from_units(6)))
            .unwrap();
        assert_eq!(change, Allocation::from_counts([(d(3), 2)]));
    }

    #[test]
    fn test_reports_closest_remainder() {
        let till = Till::from_counts([(d(4), 2), (d(10), 1)]);
        let err = BruteForce
            .make_change(&ChangeRequest::new(&till, Money::from_units(17)))
            .unwrap_err();
        // 10 + 4 = 14 is the closest from below
        assert_eq!(err.shortfall().unwrap().remainder(), Money::from_units(3));
    }
}
