//! Human-readable lines shared by the console session and the one-shot
//! commands.

use vend_core::{Allocation, Catalog, Product, Till};

/// `2 x 10 EGP, 1 x 5 EGP`, largest first.
pub fn change_line(change: &Allocation, currency: &str) -> String {
    if change.is_empty() {
        return "nothing".to_string();
    }
    change
        .iter()
        .rev()
        .map(|(denomination, count)| format!("{} x {} {}", count, denomination, currency))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `3. Pepsi - 15 EGP (Stock: 4)`
pub fn product_line(slot: usize, product: &Product, currency: &str) -> String {
    format!(
        "{}. {} - {} {} (Stock: {})",
        slot, product.name, product.price, currency, product.stock
    )
}

/// One line per denomination, ascending, then the total.
pub fn till_lines(till: &Till, currency: &str) -> Vec<String> {
    let mut lines: Vec<String> = till
        .iter()
        .map(|(denomination, count)| format!("{} x {} {}", count, denomination, currency))
        .collect();
    lines.push(format!(
        "Total: {} {} in {} pieces",
        till.total_value(),
        currency,
        till.total_coins()
    ));
    lines
}

/// `Pepsi: 4` for every product, sold-out ones included.
pub fn stock_lines(catalog: &Catalog) -> Vec<String> {
    catalog
        .products()
        .iter()
        .map(|p| format!("{}: {}", p.name, p.stock))
        .collect()
}
