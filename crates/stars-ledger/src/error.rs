//! Ledger Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Ledger errors
///
/// The in-memory ledger never fails; this exists for backends that can.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Backing storage failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
