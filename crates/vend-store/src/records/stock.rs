//! `Stock.txt`: one `name price count` record per line.
//!
//! The name may contain spaces; price and count are always the last two
//! tokens. Runs of whitespace inside a name collapse to one space.

use std::fmt::Write as _;
use std::path::Path;

use vend_core::{Catalog, Money, Product};

use super::records;
use crate::error::{StoreError, StoreResult};

/// Parses a stock list in file order. `path` is only used for error messages.
pub fn parse_catalog(text: &str, path: &Path) -> StoreResult<Catalog> {
    let mut products = Vec::new();

    for (line, record) in records(text) {
        let tokens: Vec<&str> = record.split_whitespace().collect();
        let [name @ .., price, count] = tokens.as_slice() else {
            return Err(StoreError::parse(path, line, "expected 'name price count'"));
        };
        if name.is_empty() {
            return Err(StoreError::parse(path, line, "expected 'name price count'"));
        }

        let price: i64 = price
            .parse()
            .map_err(|_| StoreError::parse(path, line, format!("invalid price '{}'", price)))?;
        let count: u32 = count
            .parse()
            .map_err(|_| StoreError::parse(path, line, format!("invalid count '{}'", count)))?;

        let product = Product::new(name.join(" "), Money::from_units(price), count)
            .map_err(|e| StoreError::invalid(path, line, e))?;
        products.push(product);
    }

    Ok(Catalog::new(products))
}

/// Renders a stock list, one product per line, in catalog order.
pub fn format_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    for product in catalog.products() {
        let _ = writeln!(out, "{} {} {}", product.name, product.price, product.stock);
    }
    out
}
