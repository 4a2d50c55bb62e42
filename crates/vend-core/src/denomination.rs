//! # Denominations
//!
//! A denomination is a positive face value (1, 5, 10, ...). Zero is not a
//! coin; it is rejected at construction so no downstream code has to guard
//! against division by zero.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

/// A positive integer face value.
///
/// Ordered by value; the solver relies on this for its processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Denomination(u32);

impl Denomination {
    /// Creates a denomination, rejecting zero.
    ///
    /// ## Example
    /// ```rust
    /// use vend_core::Denomination;
    ///
    /// assert_eq!(Denomination::new(50).unwrap().value(), 50);
    /// assert!(Denomination::new(0).is_err());
    /// ```
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::MustBePositive {
                field: "denomination".to_string(),
            });
        }
        Ok(Denomination(value))
    }

    /// Returns the face value.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Returns the face value as money.
    #[inline]
    pub fn as_money(&self) -> Money {
        Money::from(self.0)
    }

    /// Value of `count` pieces of this denomination.
    #[inline]
    pub fn times(&self, count: u32) -> Money {
        Money::from_units(i64::from(self.0) * i64::from(count))
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Denomination {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Denomination::new(value)
    }
}

impl From<Denomination> for u32 {
    fn from(denomination: Denomination) -> Self {
        denomination.0
    }
}

impl FromStr for Denomination {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|e| ValidationError::InvalidFormat {
                field: "denomination".to_string(),
                reason: e.to_string(),
            })?;
        Denomination::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero() {
        assert!(matches!(
            Denomination::new(0),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_ordering() {
        let mut values: Vec<Denomination> = [20, 1, 5]
            .into_iter()
            .map(|v| Denomination::new(v).unwrap())
            .collect();
        values.sort();
        let raw: Vec<u32> = values.iter().map(Denomination::value).collect();
        assert_eq!(raw, vec![1, 5, 20]);
    }

    #[test]
    fn test_parse() {
        assert_eq!(" 10 ".parse::<Denomination>().unwrap().value(), 10);
        assert!("ten".parse::<Denomination>().is_err());
        assert!("0".parse::<Denomination>().is_err());
        assert!("-5".parse::<Denomination>().is_err());
    }

    #[test]
    fn test_times() {
        let ten = Denomination::new(10).unwrap();
        assert_eq!(ten.times(3).units(), 30);
        assert_eq!(ten.as_money().units(), 10);
    }

    #[test]
    fn test_serde_validates() {
        let five: Denomination = serde_json::from_str("5").unwrap();
        assert_eq!(five.value(), 5);
        assert!(serde_json::from_str::<Denomination>("0").is_err());
    }
}
