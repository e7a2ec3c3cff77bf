//! In-memory ledger

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::ledger::{Ledger, UserId};

/// Thread-safe in-memory ledger.
///
/// Entries are created on first credit and never removed, so the map grows
/// with the number of distinct paying users for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    balances: RwLock<HashMap<UserId, u64>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn credit(&self, user: UserId, amount: u64) -> Result<u64> {
        let mut balances = self.balances.write().await;

        if amount == 0 {
            return Ok(balances.get(&user).copied().unwrap_or(0));
        }

        let entry = balances.entry(user).or_insert(0);
        *entry = entry.saturating_add(amount);

        tracing::debug!(user_id = %user, amount, balance = *entry, "Credited stars");
        Ok(*entry)
    }

    async fn balance(&self, user: UserId) -> Result<u64> {
        let balances = self.balances.read().await;
        Ok(balances.get(&user).copied().unwrap_or(0))
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.balances.read().await.len())
    }
}
