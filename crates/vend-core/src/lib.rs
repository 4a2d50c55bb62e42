//! # vend-core: Pure Vending Logic
//!
//! Till bookkeeping, change computation and the purchase session of a coin
//! vending machine. Nothing in here touches the file system or the console.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Vending Machine Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    vend-cli (console shell)                     │   │
//! │  │    menu ──► insert coins ──► pick slot ──► change ──► save      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vend-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   till    │  │  solver   │  │  machine  │  │  catalog  │  │   │
//! │  │   │ Till      │  │ DP/Greedy │  │ session   │  │ Product   │  │   │
//! │  │   │ mutator   │  │ Shortfall │  │ Receipt   │  │ stock     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CONSOLE                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 vend-store (flat-file persistence)              │   │
//! │  │              Currency.txt, Stock.txt, seed binary               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Whole-unit money amounts
//! - [`denomination`] - Face values the machine accepts
//! - [`till`] - Coin and note counts per denomination
//! - [`mutator`] - Deposit and commit, the only till mutations
//! - [`allocation`] - Coins chosen for one payout
//! - [`solver`] - Change strategies
//! - [`catalog`] - Products and stock
//! - [`machine`] - One customer session
//! - [`error`] - Domain error types
//! - [`validation`] - Input checks
//!
//! ## Example Usage
//!
//! ```rust
//! use vend_core::{Catalog, Denomination, Money, Product, Till, VendingMachine};
//!
//! let d = |v| Denomination::new(v).unwrap();
//! let catalog = Catalog::new(vec![Product::new("Pepsi", Money::from_units(15), 2).unwrap()]);
//! let till = Till::from_counts([(d(1), 5), (d(5), 2), (d(10), 0), (d(20), 0)]);
//!
//! let mut vm = VendingMachine::new(catalog, till);
//! vm.insert_coin(d(20)).unwrap();
//! vm.purchase(1).unwrap();
//!
//! let change = vm.return_change().unwrap();
//! assert_eq!(change.total_value(), Money::from_units(5));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocation;
pub mod catalog;
pub mod denomination;
pub mod error;
pub mod machine;
pub mod money;
pub mod mutator;
pub mod solver;
pub mod till;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use allocation::Allocation;
pub use catalog::{Catalog, Product};
pub use denomination::Denomination;
pub use error::{CoreError, CoreResult, SolveError, TillError, ValidationError};
pub use machine::{Receipt, VendingMachine};
pub use money::Money;
pub use solver::{
    solve, ChangePolicy, ChangeRequest, ChangeStrategy, DynamicProgramming, Greedy, GreedyFirst,
    Shortfall,
};
#[cfg(any(test, feature = "oracles"))]
pub use solver::BruteForce;
pub use till::{CoinCount, Till};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest amount a single change computation accepts.
///
/// The DP table holds one entry per unit up to the amount, so this also caps
/// its memory.
pub const DEFAULT_MAX_CHANGE_AMOUNT: i64 = 100_000;

/// Longest product name, in characters.
pub const MAX_PRODUCT_NAME_LEN: usize = 100;

/// Face values of a freshly seeded machine.
pub const DEFAULT_DENOMINATIONS: &[u32] = &[1, 5, 10, 20, 50, 100, 200];

/// Currency label used in messages when none is configured.
pub const DEFAULT_CURRENCY: &str = "EGP";
