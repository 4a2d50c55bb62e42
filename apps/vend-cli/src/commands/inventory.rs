//! `vend till`, `vend stock` and `vend deposit`.

use anyhow::{Context, Result};
use serde_json::json;
use vend_core::Denomination;

use super::{load_till, open_store, print_json};
use crate::config::VendConfig;
use crate::report::{product_line, till_lines};

/// Shows the stored till.
pub fn till(config: &VendConfig, json: bool) -> Result<()> {
    let till = load_till(&open_store(config))?;

    if json {
        return print_json(&json!({
            "till": till,
            "total": till.total_value(),
            "currency": config.machine.currency,
        }));
    }

    println!("Currency in the vending machine:");
    for line in till_lines(&till, &config.machine.currency) {
        println!("{}", line);
    }
    Ok(())
}

/// Shows the stored stock list, sold-out products included.
pub fn stock(config: &VendConfig, json: bool) -> Result<()> {
    let catalog = open_store(config)
        .load_catalog()
        .context("cannot load the stock list")?;

    if json {
        return print_json(&catalog);
    }

    println!("Products:");
    for (index, product) in catalog.products().iter().enumerate() {
        println!("{}", product_line(index + 1, product, &config.machine.currency));
    }
    Ok(())
}

/// Loads `count` pieces of `denomination` into the stored till.
pub fn deposit(config: &VendConfig, denomination: Denomination, count: u32) -> Result<()> {
    let store = open_store(config);
    let mut till = load_till(&store)?;

    till.deposit(denomination, count)?;
    store.save_till(&till)?;

    println!(
        "Deposited {} x {} {}. Till now holds {} of them.",
        count,
        denomination,
        config.machine.currency,
        till.count(denomination)
    );
    Ok(())
}
