//! # stars-ledger
//!
//! Per-user Telegram Star balances.
//!
//! ```text
//! ┌───────────────────┐  credit(user, n)  ┌──────────────────────┐
//! │  Payment flow     │──────────────────▶│  Ledger (trait)      │
//! │  (successful pay) │                   │   └─ MemoryLedger    │
//! └───────────────────┘                   │      RwLock<HashMap> │
//! ┌───────────────────┐  balance(user)    │                      │
//! │  GET /get-balance │──────────────────▶│                      │
//! └───────────────────┘                   └──────────────────────┘
//! ```
//!
//! Balances only ever grow: the single write operation is `credit`. The
//! in-memory store lives for the process lifetime and is lost on restart.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stars_ledger::{Ledger, MemoryLedger, UserId};
//!
//! let ledger = MemoryLedger::new();
//! ledger.credit(UserId(42), 1).await?;
//! assert_eq!(ledger.balance(UserId(42)).await?, 1);
//! ```

mod error;
mod ledger;
mod memory;

pub use error::{LedgerError, Result};
pub use ledger::{Ledger, UserId};
pub use memory::MemoryLedger;
