//! # Validation Module
//!
//! Input validation for values that enter the core from outside: stock
//! records, configuration, console input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console / config parsing (vend-cli)                          │
//! │  ├── Numeric parsing, re-prompt on garbage                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Names, prices, ceilings                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Types                                                        │
//! │  ├── Denomination::new rejects 0, counts are unsigned                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_PRODUCT_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_PRODUCT_NAME_LEN`] characters
/// - No line breaks (one product per line in the stock file)
/// - Must not start with `#`, which marks a comment line in the stock file
///
/// ## Example
/// ```rust
/// use vend_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Chipsy Cheese").is_ok());
/// assert!(validate_product_name("  ").is_err());
/// assert!(validate_product_name("two\nlines").is_err());
/// assert!(validate_product_name("#1 Cola").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::OutOfRange {
            field: "name length".to_string(),
            min: 1,
            max: MAX_PRODUCT_NAME_LEN as i64,
        });
    }

    if name.contains(['\n', '\r']) {
        return Err(ValidationError::InvalidFormat {
            field: "name".to_string(),
            reason: "must not contain line breaks".to_string(),
        });
    }

    if name.starts_with('#') {
        return Err(ValidationError::InvalidFormat {
            field: "name".to_string(),
            reason: "must not start with '#'".to_string(),
        });
    }

    Ok(())
}

/// Validates a price. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates the ceiling on a single change computation.
///
/// Must be positive; the DP table has one row entry per unit up to it.
pub fn validate_max_change_amount(max: Money) -> ValidationResult<()> {
    if !max.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "max_change_amount".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Pepsi").is_ok());
        assert!(validate_product_name("Molto Magnum").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(MAX_PRODUCT_NAME_LEN + 1)).is_err());
        assert!(validate_product_name("bad\rname").is_err());
        assert!(validate_product_name("#1 Cola").is_err());
        assert!(validate_product_name("  #1 Cola").is_err());
        assert!(validate_product_name("Cola #1").is_ok());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_units(15)).is_ok());
        assert!(validate_price(Money::from_units(-1)).is_err());
    }

    #[test]
    fn test_validate_max_change_amount() {
        assert!(validate_max_change_amount(Money::from_units(500)).is_ok());
        assert!(validate_max_change_amount(Money::zero()).is_err());
    }
}
