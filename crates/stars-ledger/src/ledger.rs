//! Ledger Interface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Telegram user identifier (platform-assigned, stable per user)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Star balance store
///
/// Implementations must serialise every read-modify-write of a user's
/// balance: concurrent `credit` calls for the same user may never lose an
/// update. There is no debit operation.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Add `amount` stars to `user`, returning the new balance.
    ///
    /// A zero amount leaves the balance unchanged.
    async fn credit(&self, user: UserId, amount: u64) -> Result<u64>;

    /// Current balance for `user`, 0 if the user has never been credited
    async fn balance(&self, user: UserId) -> Result<u64>;

    /// Number of users holding an entry
    async fn len(&self) -> Result<usize>;

    /// Whether no user has been credited yet
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}
