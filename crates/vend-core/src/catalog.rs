//! # Catalog
//!
//! Products on sale and their stock levels. Slots are numbered from 1, the
//! way the machine's keypad shows them.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_price, validate_product_name};

/// A product in one slot of the machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Display name.
    pub name: String,

    /// Price in whole currency units.
    pub price: Money,

    /// Pieces left in the slot.
    pub stock: u32,
}

impl Product {
    /// Creates a validated product. The name is trimmed.
    pub fn new(name: impl Into<String>, price: Money, stock: u32) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_product_name(&name)?;
        validate_price(price)?;

        Ok(Product {
            name: name.trim().to_string(),
            price,
            stock,
        })
    }

    #[inline]
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Ordered list of products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// All products, including sold-out ones.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// `(slot, product)` for every product with stock left.
    pub fn in_stock(&self) -> impl Iterator<Item = (usize, &Product)> + '_ {
        self.products
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_in_stock())
            .map(|(index, p)| (index + 1, p))
    }

    /// Looks up a slot regardless of stock.
    pub fn product(&self, slot: usize) -> CoreResult<&Product> {
        slot.checked_sub(1)
            .and_then(|index| self.products.get(index))
            .ok_or(CoreError::ProductNotFound { slot })
    }

    /// Looks up a slot that can be sold from right now.
    pub fn ensure_available(&self, slot: usize) -> CoreResult<&Product> {
        let product = self.product(slot)?;
        if !product.is_in_stock() {
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            });
        }
        Ok(product)
    }

    /// Removes one piece from `slot`.
    pub fn dispense(&mut self, slot: usize) -> CoreResult<()> {
        self.ensure_available(slot)?;
        // ensure_available proved the index exists
        if let Some(product) = self.products.get_mut(slot - 1) {
            product.stock -= 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new("Pepsi", Money::from_units(15), 2).unwrap(),
            Product::new("Chipsy", Money::from_units(10), 0).unwrap(),
            Product::new("Water", Money::from_units(7), 1).unwrap(),
        ])
    }

    #[test]
    fn test_product_validation() {
        assert!(Product::new("", Money::from_units(5), 1).is_err());
        assert!(Product::new("Tea", Money::from_units(-5), 1).is_err());
        assert_eq!(Product::new("  Tea ", Money::zero(), 0).unwrap().name, "Tea");
    }

    #[test]
    fn test_in_stock_uses_one_based_slots() {
        let catalog = catalog();
        let slots: Vec<(usize, &str)> = catalog
            .in_stock()
            .map(|(slot, p)| (slot, p.name.as_str()))
            .collect();
        assert_eq!(slots, vec![(1, "Pepsi"), (3, "Water")]);
    }

    #[test]
    fn test_lookup_errors() {
        let catalog = catalog();
        assert_eq!(
            catalog.product(0).unwrap_err(),
            CoreError::ProductNotFound { slot: 0 }
        );
        assert_eq!(
            catalog.product(4).unwrap_err(),
            CoreError::ProductNotFound { slot: 4 }
        );
        assert_eq!(
            catalog.ensure_available(2).unwrap_err(),
            CoreError::OutOfStock {
                name: "Chipsy".to_string()
            }
        );
        assert_eq!(catalog.ensure_available(1).unwrap().name, "Pepsi");
    }

    #[test]
    fn test_dispense_until_empty() {
        let mut catalog = catalog();
        catalog.dispense(3).unwrap();
        assert_eq!(catalog.product(3).unwrap().stock, 0);
        assert!(matches!(
            catalog.dispense(3),
            Err(CoreError::OutOfStock { .. })
        ));
        assert_eq!(catalog.in_stock().count(), 1);
    }
}
