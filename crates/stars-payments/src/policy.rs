//! Pre-checkout Policies
//!
//! Telegram asks the bot to approve every charge before capturing funds.
//! The answer must arrive within Telegram's own deadline, so policies are
//! synchronous and must not perform I/O.

use serde::{Deserialize, Serialize};

use crate::invoice::InvoiceSpec;
use crate::types::PreCheckoutQuery;

/// Answer to a pre-checkout query
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreCheckoutDecision {
    pub ok: bool,

    /// Shown to the user when `ok` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl PreCheckoutDecision {
    pub const fn approve() -> Self {
        Self {
            ok: true,
            error_message: None,
        }
    }

    pub fn reject(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error_message: Some(message.into()),
        }
    }
}

/// Decides whether a charge may proceed
pub trait PreCheckoutPolicy: Send + Sync {
    fn evaluate(&self, query: &PreCheckoutQuery) -> PreCheckoutDecision;
}

/// Approves every query without inspecting it (the demo bot's behaviour)
#[derive(Clone, Copy, Debug, Default)]
pub struct ApproveAll;

impl PreCheckoutPolicy for ApproveAll {
    fn evaluate(&self, _query: &PreCheckoutQuery) -> PreCheckoutDecision {
        PreCheckoutDecision::approve()
    }
}

/// Approves only queries matching the invoice this bot issues
#[derive(Clone, Debug)]
pub struct MatchInvoice {
    invoice: InvoiceSpec,
}

impl MatchInvoice {
    pub const fn new(invoice: InvoiceSpec) -> Self {
        Self { invoice }
    }
}

impl PreCheckoutPolicy for MatchInvoice {
    fn evaluate(&self, query: &PreCheckoutQuery) -> PreCheckoutDecision {
        if query.invoice_payload != self.invoice.payload {
            return PreCheckoutDecision::reject("Unknown invoice.");
        }
        if query.currency != self.invoice.currency {
            return PreCheckoutDecision::reject("Unsupported currency.");
        }
        if query.total_amount != self.invoice.total_amount() {
            return PreCheckoutDecision::reject("Price has changed, please request a new invoice.");
        }
        PreCheckoutDecision::approve()
    }
}
