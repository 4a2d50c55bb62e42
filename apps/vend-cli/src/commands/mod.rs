//! # Commands Module
//!
//! One function per `vend` subcommand.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (shared helpers)
//! ├── session.rs    ◄─── `run`: interactive purchase loop
//! ├── change.rs     ◄─── `change`: one-shot change computation
//! └── inventory.rs  ◄─── `till`, `stock`, `deposit`
//! ```
//!
//! Every command loads what it needs through [`vend_store::Store`] and saves
//! only what it changed.

pub mod change;
pub mod inventory;
pub mod session;

use anyhow::{Context, Result};
use serde::Serialize;
use vend_core::Till;
use vend_store::Store;

use crate::config::VendConfig;

pub(crate) fn open_store(config: &VendConfig) -> Store {
    Store::new(config.store_config())
}

pub(crate) fn load_till(store: &Store) -> Result<Till> {
    store.load_till().with_context(|| {
        format!(
            "cannot load the till from {} (run the `seed` tool to create it)",
            store.config().data_dir.display()
        )
    })
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
