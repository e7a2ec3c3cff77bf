//! Star Invoices
//!
//! The offer sent to users on both purchase paths: the `/buy` command
//! (`sendInvoice`) and the HTTP link endpoint (`createInvoiceLink`).

use serde::{Deserialize, Serialize};

use crate::types::LabeledPrice;

/// Telegram Stars currency code
pub const STARS_CURRENCY: &str = "XTR";

/// Opaque payload attached to every invoice
pub const INVOICE_PAYLOAD: &str = "payload";

/// Stars credited per completed payment
pub const STARS_PER_PAYMENT: u64 = 1;

/// Invoice parameters, serialised with Bot API field names
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSpec {
    pub title: String,
    pub description: String,
    pub payload: String,

    /// Empty for payments in Telegram Stars
    pub provider_token: String,

    pub currency: String,
    pub prices: Vec<LabeledPrice>,
}

impl InvoiceSpec {
    /// One Telegram Star for one star
    pub fn single_star() -> Self {
        Self {
            title: "Purchase 1 Telegram Star".into(),
            description: "Invoice for Telegram Star".into(),
            payload: INVOICE_PAYLOAD.into(),
            provider_token: String::new(),
            currency: STARS_CURRENCY.into(),
            prices: vec![LabeledPrice::new("Telegram Star", 1)],
        }
    }

    /// Sum of all price portions, in the currency's smallest unit
    pub fn total_amount(&self) -> i64 {
        self.prices.iter().map(|p| p.amount).sum()
    }
}
