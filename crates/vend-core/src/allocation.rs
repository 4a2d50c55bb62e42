//! # Allocation
//!
//! The result of a successful change computation: how many pieces of each
//! denomination to pay out.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::denomination::Denomination;
use crate::money::Money;
use crate::till::{CoinCount, Till};

/// Denomination → count used.
///
/// Only positive counts are stored, so two allocations paying out the same
/// coins always compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CoinCount>", into = "Vec<CoinCount>")]
pub struct Allocation {
    used: BTreeMap<Denomination, u32>,
}

impl Allocation {
    /// The empty allocation (zero coins, zero value).
    pub fn new() -> Self {
        Allocation::default()
    }

    /// Builds an allocation from `(denomination, count)` pairs.
    ///
    /// Zero counts are dropped; repeated denominations are summed.
    pub fn from_counts(counts: impl IntoIterator<Item = (Denomination, u32)>) -> Self {
        let mut allocation = Allocation::new();
        for (denomination, count) in counts {
            allocation.add(denomination, count);
        }
        allocation
    }

    pub(crate) fn add(&mut self, denomination: Denomination, count: u32) {
        if count == 0 {
            return;
        }
        let slot = self.used.entry(denomination).or_insert(0);
        *slot = slot.saturating_add(count);
    }

    /// Pieces of `denomination` used (0 when absent).
    pub fn count(&self, denomination: Denomination) -> u32 {
        self.used.get(&denomination).copied().unwrap_or(0)
    }

    /// `(denomination, count)` pairs, ascending.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Denomination, u32)> + '_ {
        self.used.iter().map(|(d, c)| (*d, *c))
    }

    /// Total number of pieces paid out.
    pub fn coin_count(&self) -> u64 {
        self.used.values().map(|c| u64::from(*c)).sum()
    }

    /// Sum of `denomination × count`.
    pub fn total_value(&self) -> Money {
        self.iter().map(|(d, c)| d.times(c)).sum()
    }

    /// True when nothing is paid out.
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Whether every count fits within `till`.
    pub fn fits(&self, till: &Till) -> bool {
        self.iter().all(|(d, c)| c <= till.count(d))
    }
}

/// `2 x 10, 1 x 5` (count x face value), largest first, as a receipt lists it.
impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "nothing");
        }
        let parts: Vec<String> = self
            .used
            .iter()
            .rev()
            .map(|(d, c)| format!("{} x {}", c, d))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

impl From<Vec<CoinCount>> for Allocation {
    fn from(entries: Vec<CoinCount>) -> Self {
        Allocation::from_counts(entries.into_iter().map(|e| (e.denomination, e.count)))
    }
}

impl From<Allocation> for Vec<CoinCount> {
    fn from(allocation: Allocation) -> Self {
        allocation
            .iter()
            .map(|(d, c)| CoinCount::new(d, c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: u32) -> Denomination {
        Denomination::new(value).unwrap()
    }

    #[test]
    fn test_zero_counts_are_dropped() {
        let allocation = Allocation::from_counts([(d(1), 0), (d(5), 2)]);
        assert_eq!(allocation, Allocation::from_counts([(d(5), 2)]));
        assert_eq!(allocation.coin_count(), 2);
        assert_eq!(allocation.total_value().units(), 10);
    }

    #[test]
    fn test_fits() {
        let till = Till::from_counts([(d(10), 2), (d(5), 1)]);
        assert!(Allocation::from_counts([(d(10), 2)]).fits(&till));
        assert!(!Allocation::from_counts([(d(10), 5)]).fits(&till));
        assert!(!Allocation::from_counts([(d(20), 1)]).fits(&till));
        assert!(Allocation::new().fits(&Till::new()));
    }

    #[test]
    fn test_display_largest_first() {
        let allocation = Allocation::from_counts([(d(1), 3), (d(10), 1), (d(5), 2)]);
        assert_eq!(allocation.to_string(), "1 x 10, 2 x 5, 3 x 1");
        assert_eq!(Allocation::new().to_string(), "nothing");
    }
}
