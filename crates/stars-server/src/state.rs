//! Application State

use std::sync::Arc;

use stars_ledger::Ledger;
use stars_payments::PaymentFlow;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment flow (bot transport + ledger)
    pub flow: Arc<PaymentFlow>,

    /// Star balances, shared with the flow
    pub ledger: Arc<dyn Ledger>,

    /// Bot token, expected in the webhook path and used for Web App validation
    pub token: Arc<str>,

    /// Secret Telegram echoes in the webhook header
    pub webhook_secret: Arc<str>,

    /// Public URL of the Web App
    pub webapp_url: Arc<str>,
}
