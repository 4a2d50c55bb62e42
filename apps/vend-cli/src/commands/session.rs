//! `vend run`: a console session against the stored till and stock.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing::{info, info_span};
use uuid::Uuid;
use vend_core::VendingMachine;

use super::{load_till, open_store};
use crate::config::VendConfig;
use crate::console::Console;

pub fn run(config: &VendConfig) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(config, stdin.lock(), stdout.lock())
}

/// Runs a session over the given console streams.
///
/// The till and stock are saved even when the console fails part-way, so
/// coins already taken and products already dispensed are never lost.
pub fn run_with<R: BufRead, W: Write>(config: &VendConfig, input: R, output: W) -> Result<()> {
    let store = open_store(config);
    let till = load_till(&store)?;
    let catalog = store
        .load_catalog()
        .context("cannot load the stock list")?;

    let session_id = Uuid::new_v4();
    let span = info_span!("session", %session_id);
    let _guard = span.enter();

    let mut vm = VendingMachine::new(catalog, till)
        .with_policy(config.machine.change_policy)
        .with_max_change_amount(config.max_change_amount());
    info!(
        policy = %config.machine.change_policy,
        till_total = %vm.till().total_value(),
        "Session started"
    );

    let outcome = Console::new(input, output, config.machine.currency.as_str()).run(&mut vm);

    let (catalog, till) = vm.into_parts();
    store.save_catalog(&catalog)?;
    store.save_till(&till)?;

    let summary = outcome.context("console I/O failed")?;
    info!(
        sold = summary.receipts.len(),
        till_total = %till.total_value(),
        "Session saved"
    );
    Ok(())
}
