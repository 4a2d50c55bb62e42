//! # Vend Entry Point
//!
//! ```text
//! vend [--config PATH] [--data-dir PATH] [-v] <command>
//!
//!   run                          interactive purchase session (default)
//!   change <amount> [--commit]   compute change against the stored till
//!   till | stock                 show the stored till / stock list
//!   deposit <denomination> [n]   load coins into the till
//! ```
//!
//! The actual setup is in lib.rs so it can be tested.

fn main() -> anyhow::Result<()> {
    vend_cli::run()
}
