//! # Seed Data Generator
//!
//! Writes a starter till and stock list into a data directory.
//!
//! ## Usage
//! ```bash
//! # Seed ./data
//! cargo run -p vend-store --bin seed
//!
//! # Seed another directory, 20 pieces of every coin
//! cargo run -p vend-store --bin seed -- --dir /srv/vend --coins 20
//!
//! # Overwrite existing files
//! cargo run -p vend-store --bin seed -- --force
//! ```
//!
//! ## Generated Data
//! - Till: EGP 1, 5, 10, 20, 50, 100, 200. Coins (up to 10) start with
//!   `--coins` pieces, notes start empty.
//! - Stock: a handful of snacks and drinks, 10 of each.

use std::env;
use std::process::ExitCode;

use vend_core::{Catalog, Denomination, Money, Product, Till, DEFAULT_DENOMINATIONS};
use vend_store::Store;

/// Starter products: name, price in EGP.
const PRODUCTS: &[(&str, i64)] = &[
    ("Pepsi", 15),
    ("Mirinda", 15),
    ("Water", 7),
    ("Chipsy Cheese", 10),
    ("Molto", 12),
    ("Corona Chocolate", 20),
    ("Todo", 5),
];

const STOCK_PER_PRODUCT: u32 = 10;

/// Highest face value that is still a coin rather than a note.
const LARGEST_COIN: u32 = 10;

/// Parsed command line.
#[derive(Debug, PartialEq, Eq)]
struct Options {
    data_dir: String,
    coins: u32,
    force: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            data_dir: String::from("./data"),
            coins: 10,
            force: false,
        }
    }
}

/// `Ok(None)` means help was printed.
fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dir" | "-d" => {
                let value = args.get(i + 1).ok_or("--dir needs a path")?;
                options.data_dir = value.clone();
                i += 1;
            }
            "--coins" | "-c" => {
                let value = args.get(i + 1).ok_or("--coins needs a number")?;
                options.coins = value
                    .parse()
                    .map_err(|_| format!("Invalid --coins value: {}", value))?;
                i += 1;
            }
            "--force" | "-f" => options.force = true,
            "--help" | "-h" => {
                println!("Vending Machine Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --dir <PATH>   Data directory (default: ./data)");
                println!("  -c, --coins <N>    Pieces of each coin in the till (default: 10)");
                println!("  -f, --force        Overwrite existing data files");
                println!("  -h, --help         Show this help message");
                return Ok(None);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(Some(options))
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let Options {
        data_dir,
        coins,
        force,
    } = match parse_args(&args) {
        Ok(Some(options)) => options,
        Ok(None) => return ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    println!("Vending Machine Seed Data Generator");
    println!("===================================");
    println!("Directory: {}", data_dir);
    println!();

    let store = Store::open(&data_dir);
    if store.is_seeded() && !force {
        println!("Data files already exist, skipping.");
        println!("Pass --force to overwrite them.");
        return ExitCode::SUCCESS;
    }

    match seed(&store, coins) {
        Ok((till, catalog)) => {
            println!(
                "✓ Till: {} denominations, {} EGP",
                till.denomination_count(),
                till.total_value()
            );
            println!("✓ Stock: {} products", catalog.len());
            println!();
            println!("✓ Seed complete!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Seed failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn seed(store: &Store, coins: u32) -> Result<(Till, Catalog), Box<dyn std::error::Error>> {
    let mut pairs = Vec::with_capacity(DEFAULT_DENOMINATIONS.len());
    for &face in DEFAULT_DENOMINATIONS {
        let count = if face <= LARGEST_COIN { coins } else { 0 };
        pairs.push((Denomination::new(face)?, count));
    }
    let till = Till::from_counts(pairs);

    let mut products = Vec::with_capacity(PRODUCTS.len());
    for &(name, price) in PRODUCTS {
        products.push(Product::new(name, Money::from_units(price), STOCK_PER_PRODUCT)?);
    }
    let catalog = Catalog::new(products);

    store.save_till(&till)?;
    store.save_catalog(&catalog)?;

    Ok((till, catalog))
}
