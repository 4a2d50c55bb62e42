//! # Till
//!
//! The machine's coin and note inventory: denomination → available count.
//!
//! ## Known vs. Exhausted
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Till { 1: 0, 5: 3, 10: 1 }                                             │
//! │                                                                         │
//! │   1  ── known, exhausted   → accepted on deposit, never paid out       │
//! │   5  ── known, 3 pieces    → accepted on deposit, paid out up to 3     │
//! │   10 ── known, 1 piece     → accepted on deposit, paid out up to 1     │
//! │   3  ── unknown            → deposit rejected (UnknownDenomination)    │
//! │                                                                         │
//! │  For the solver an exhausted denomination and an absent one are the    │
//! │  same thing: neither can contribute a coin.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reading a till is free for everyone. Changing it goes through
//! [`Till::deposit`] and [`Till::commit`] in the [`mutator`](crate::mutator)
//! module.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::denomination::Denomination;
use crate::money::Money;

/// One `(denomination, count)` record.
///
/// Used for serialization and for the persisted till format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinCount {
    pub denomination: Denomination,
    pub count: u32,
}

impl CoinCount {
    pub fn new(denomination: Denomination, count: u32) -> Self {
        CoinCount {
            denomination,
            count,
        }
    }
}

/// Denomination → available count.
///
/// Keys are kept in ascending order. The set of keys is the set of face
/// values the machine recognizes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CoinCount>", into = "Vec<CoinCount>")]
pub struct Till {
    pub(crate) counts: BTreeMap<Denomination, u32>,
}

impl Till {
    /// Creates a till that recognizes no denominations.
    pub fn new() -> Self {
        Till::default()
    }

    /// Creates a till recognizing `denominations`, all with count 0.
    pub fn with_denominations(denominations: impl IntoIterator<Item = Denomination>) -> Self {
        Till {
            counts: denominations.into_iter().map(|d| (d, 0)).collect(),
        }
    }

    /// Creates a till from `(denomination, count)` pairs.
    ///
    /// Repeated denominations are summed.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::{Denomination, Till};
    ///
    /// let d = |v| Denomination::new(v).unwrap();
    /// let till = Till::from_counts([(d(1), 5), (d(5), 2), (d(10), 1)]);
    /// assert_eq!(till.total_value().units(), 25);
    /// ```
    pub fn from_counts(counts: impl IntoIterator<Item = (Denomination, u32)>) -> Self {
        let mut till = Till::new();
        for (denomination, count) in counts {
            let slot = till.counts.entry(denomination).or_insert(0);
            *slot = slot.saturating_add(count);
        }
        till
    }

    /// Available count for `denomination` (0 when unknown).
    #[inline]
    pub fn count(&self, denomination: Denomination) -> u32 {
        self.counts.get(&denomination).copied().unwrap_or(0)
    }

    /// Whether the machine accepts this face value.
    #[inline]
    pub fn recognizes(&self, denomination: Denomination) -> bool {
        self.counts.contains_key(&denomination)
    }

    /// Recognized denominations, ascending.
    pub fn denominations(&self) -> impl Iterator<Item = Denomination> + '_ {
        self.counts.keys().copied()
    }

    /// All `(denomination, count)` pairs, ascending, including zero counts.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Denomination, u32)> + '_ {
        self.counts.iter().map(|(d, c)| (*d, *c))
    }

    /// Pairs with a positive count, ascending.
    pub fn available(&self) -> impl DoubleEndedIterator<Item = (Denomination, u32)> + '_ {
        self.iter().filter(|(_, count)| *count > 0)
    }

    /// Smallest denomination with a positive count.
    pub fn smallest_available(&self) -> Option<Denomination> {
        self.available().map(|(d, _)| d).next()
    }

    /// Number of recognized denominations.
    pub fn denomination_count(&self) -> usize {
        self.counts.len()
    }

    /// True when the till holds no coins at all.
    pub fn is_empty(&self) -> bool {
        self.available().next().is_none()
    }

    /// Sum of `denomination × count`.
    pub fn total_value(&self) -> Money {
        self.iter().map(|(d, c)| d.times(c)).sum()
    }

    /// Total number of pieces.
    pub fn total_coins(&self) -> u64 {
        self.counts.values().map(|c| u64::from(*c)).sum()
    }

    /// Records in ascending order.
    pub fn entries(&self) -> Vec<CoinCount> {
        self.iter().map(|(d, c)| CoinCount::new(d, c)).collect()
    }
}

impl From<Vec<CoinCount>> for Till {
    fn from(entries: Vec<CoinCount>) -> Self {
        Till::from_counts(entries.into_iter().map(|e| (e.denomination, e.count)))
    }
}

impl From<Till> for Vec<CoinCount> {
    fn from(till: Till) -> Self {
        till.entries()
    }
}

impl FromIterator<(Denomination, u32)> for Till {
    fn from_iter<I: IntoIterator<Item = (Denomination, u32)>>(iter: I) -> Self {
        Till::from_counts(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: u32) -> Denomination {
        Denomination::new(value).unwrap()
    }

    #[test]
    fn test_counts_and_totals() {
        let till = Till::from_counts([(d(10), 1), (d(1), 5), (d(5), 2)]);

        assert_eq!(till.count(d(5)), 2);
        assert_eq!(till.count(d(20)), 0);
        assert_eq!(till.total_value().units(), 25);
        assert_eq!(till.total_coins(), 8);
        assert_eq!(till.denomination_count(), 3);

        let order: Vec<u32> = till.denominations().map(|d| d.value()).collect();
        assert_eq!(order, vec![1, 5, 10]);
    }

    #[test]
    fn test_zero_count_is_known_but_unavailable() {
        let till = Till::from_counts([(d(1), 0), (d(5), 3)]);

        assert!(till.recognizes(d(1)));
        assert!(!till.recognizes(d(3)));
        assert_eq!(till.smallest_available(), Some(d(5)));
        assert_eq!(till.available().count(), 1);
    }

    #[test]
    fn test_empty_till() {
        let till = Till::with_denominations([d(1), d(5)]);
        assert!(till.is_empty());
        assert_eq!(till.denomination_count(), 2);
        assert_eq!(till.smallest_available(), None);
        assert!(till.total_value().is_zero());
    }

    #[test]
    fn test_duplicates_are_summed() {
        let till = Till::from_counts([(d(5), 2), (d(5), 3)]);
        assert_eq!(till.count(d(5)), 5);
    }

    #[test]
    fn test_serializes_as_entry_list() {
        let till = Till::from_counts([(d(5), 2), (d(1), 0)]);
        let json = serde_json::to_value(&till).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "denomination": 1, "count": 0 },
                { "denomination": 5, "count": 2 }
            ])
        );

        let back: Till = serde_json::from_value(json).unwrap();
        assert_eq!(back, till);
    }
}
