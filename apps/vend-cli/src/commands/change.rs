//! `vend change <amount>`: compute change against the stored till.

use anyhow::{bail, Result};
use serde_json::json;
use tracing::info;
use vend_core::{ChangeRequest, Money, SolveError};

use super::{load_till, open_store, print_json};
use crate::config::VendConfig;
use crate::report::change_line;

/// Prints the allocation for `amount`. With `commit` the coins are taken
/// out of the stored till.
///
/// Fails (non-zero exit) when exact change is impossible.
pub fn run(config: &VendConfig, amount: i64, commit: bool, json: bool) -> Result<()> {
    let store = open_store(config);
    let mut till = load_till(&store)?;
    let currency = &config.machine.currency;
    let amount = Money::from_units(amount);

    let strategy = config.machine.change_policy.strategy();
    let request = ChangeRequest::new(&till, amount).with_max_amount(config.max_change_amount());

    let allocation = match strategy.make_change(&request) {
        Ok(allocation) => allocation,
        Err(SolveError::Infeasible(shortfall)) => {
            if json {
                print_json(&json!({ "amount": amount, "shortfall": shortfall }))?;
            }
            bail!(
                "Exact change is not possible. Remaining: {} {}",
                shortfall.remainder(),
                currency
            );
        }
        Err(e) => return Err(e.into()),
    };

    if commit {
        till.commit(&allocation)?;
        store.save_till(&till)?;
        info!(%amount, coins = allocation.coin_count(), "Change committed to till");
    }

    if json {
        print_json(&json!({
            "amount": amount,
            "policy": config.machine.change_policy,
            "change": allocation,
            "coins": allocation.coin_count(),
            "committed": commit,
        }))
    } else {
        println!("Change for {} {}: {}", amount, currency, change_line(&allocation, currency));
        println!("Coins: {}", allocation.coin_count());
        Ok(())
    }
}
