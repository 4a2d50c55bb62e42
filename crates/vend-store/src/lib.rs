//! # vend-store: Flat-File Persistence
//!
//! Keeps the till and the stock list in two plain-text files so they
//! survive between runs of the machine.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vending Machine Data Flow                        │
//! │                                                                         │
//! │  vend-cli (session start / session end)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    vend-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store      │    │   records     │    │    seed      │  │   │
//! │  │   │  (store.rs)   │    │ till / stock  │    │   (bin)      │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ load / save   │───►│ parse/format  │    │ default data │  │   │
//! │  │   │ atomic writes │    │ line errors   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  <data_dir>/Currency.txt   <data_dir>/Stock.txt                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Data directory handle and atomic saves
//! - [`records`] - Line formats of both files
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vend_store::Store;
//!
//! let store = Store::open("./data");
//! let till = store.load_till()?;
//! // ... run a session ...
//! store.save_till(&till)?;
//! # Ok::<(), vend_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod records;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use store::{Store, StoreConfig, DEFAULT_STOCK_FILE, DEFAULT_TILL_FILE};
