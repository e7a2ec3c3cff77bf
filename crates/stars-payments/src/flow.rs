//! Payment Flow
//!
//! Bridges Telegram's payment callbacks into ledger updates:
//!
//! ```text
//! Requested ──▶ PreCheckout ──▶ Completed
//! (/buy, link)   (policy)        (credit ledger, acknowledge)
//! ```
//!
//! No state is kept per purchase. A completion is attributed to the user
//! who sent the `successful_payment` message, nothing more.

use std::sync::Arc;

use stars_ledger::Ledger;

use crate::bot::{BotApi, SendMessage};
use crate::error::{PaymentError, Result};
use crate::invoice::{InvoiceSpec, STARS_PER_PAYMENT};
use crate::policy::{ApproveAll, PreCheckoutDecision, PreCheckoutPolicy};
use crate::types::{InlineKeyboardButton, InlineKeyboardMarkup, Message, PreCheckoutQuery, Update};
use crate::webhook::{BotEvent, Command};

/// Acknowledgment sent once a payment has been credited
pub const PAYMENT_COMPLETE_TEXT: &str = "Payment complete - in a real bot, this is where you would provision the product that has been paid for.";

/// Payment flow over a bot transport and a ledger
pub struct PaymentFlow {
    bot: Arc<dyn BotApi>,
    ledger: Arc<dyn Ledger>,
    policy: Arc<dyn PreCheckoutPolicy>,
    invoice: InvoiceSpec,
    webapp_url: String,
    bot_username: String,
}

impl PaymentFlow {
    /// Create a flow that approves every pre-checkout query and sells
    /// single-star invoices
    pub fn new(
        bot: Arc<dyn BotApi>,
        ledger: Arc<dyn Ledger>,
        webapp_url: impl Into<String>,
        bot_username: impl Into<String>,
    ) -> Self {
        Self {
            bot,
            ledger,
            policy: Arc::new(ApproveAll),
            invoice: InvoiceSpec::single_star(),
            webapp_url: webapp_url.into(),
            bot_username: bot_username.into(),
        }
    }

    /// Replace the pre-checkout policy
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn PreCheckoutPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Handle an update, logging handler errors instead of returning them.
    ///
    /// A failing handler never stops later updates from being processed.
    pub async fn dispatch(&self, update: Update) {
        let update_id = update.update_id;
        let event = BotEvent::from_update(update, &self.bot_username);
        let kind = event.kind();

        if let Err(e) = self.handle(event).await {
            tracing::error!(update_id, kind, error = %e, "an error occurred while handling update");
        }
    }

    /// Handle a classified event
    pub async fn handle(&self, event: BotEvent) -> Result<()> {
        match event {
            BotEvent::PreCheckout(query) => self.on_pre_checkout(&query).await.map(|_| ()),
            BotEvent::PaymentCompleted(message) => {
                self.on_payment_complete(&message).await.map(|_| ())
            }
            BotEvent::Command { command: Command::Start, message } => self.on_start(&message).await,
            BotEvent::Command { command: Command::Buy, message } => self.on_buy(&message).await,
            BotEvent::Other { update_id } => {
                tracing::debug!(update_id, "Ignoring update");
                Ok(())
            }
        }
    }

    /// `/start`: introduce the bot and offer the Web App
    pub async fn on_start(&self, message: &Message) -> Result<()> {
        let text = format!(
            "Hello, I'm @{}.\nYou can use me to run a (very) simple telegram webapp demo!",
            self.bot_username
        );
        let markup = InlineKeyboardMarkup {
            inline_keyboard: vec![vec![InlineKeyboardButton::web_app(
                "Press me",
                self.webapp_url.clone(),
            )]],
        };

        let reply = SendMessage::reply_to(message, text).html().with_markup(markup);
        self.bot
            .send_message(&reply)
            .await
            .map_err(|e| PaymentError::notify("start message", e))?;
        Ok(())
    }

    /// `/buy`: post the invoice into the chat
    pub async fn on_buy(&self, message: &Message) -> Result<()> {
        self.bot
            .send_invoice(message.chat.id, &self.invoice)
            .await
            .map_err(|e| PaymentError::notify("invoice", e))?;

        tracing::info!(chat_id = message.chat.id, "Sent invoice");
        Ok(())
    }

    /// Create a shareable link for the fixed invoice.
    ///
    /// Always sells exactly one unit, whatever amount a caller asked for.
    pub async fn create_invoice_link(&self) -> Result<String> {
        let url = self.bot.create_invoice_link(&self.invoice).await?;
        tracing::info!(invoice_url = %url, "Created invoice link");
        Ok(url)
    }

    /// Answer a pre-checkout query with the configured policy's decision
    pub async fn on_pre_checkout(&self, query: &PreCheckoutQuery) -> Result<PreCheckoutDecision> {
        let decision = self.policy.evaluate(query);

        tracing::info!(
            user_id = query.from.id,
            total_amount = query.total_amount,
            currency = %query.currency,
            approved = decision.ok,
            "Answering pre-checkout query"
        );

        self.bot
            .answer_pre_checkout_query(&query.id, &decision)
            .await
            .map_err(|e| PaymentError::notify("pre-checkout answer", e))?;

        Ok(decision)
    }

    /// Credit the payer, then acknowledge.
    ///
    /// The credit is applied before the reply is sent; a failed reply is
    /// returned as an error but the stars stay credited.
    pub async fn on_payment_complete(&self, message: &Message) -> Result<u64> {
        let payer = message
            .from
            .as_ref()
            .ok_or_else(|| PaymentError::Parse("successful payment without sender".into()))?;

        let balance = self.ledger.credit(payer.user_id(), STARS_PER_PAYMENT).await?;

        tracing::info!(
            user_id = payer.id,
            credited = STARS_PER_PAYMENT,
            balance,
            charge_id = message
                .successful_payment
                .as_ref()
                .map(|p| p.telegram_payment_charge_id.as_str()),
            "Payment complete"
        );

        self.bot
            .send_message(&SendMessage::reply_to(message, PAYMENT_COMPLETE_TEXT))
            .await
            .map_err(|e| PaymentError::notify("payment complete message", e))?;

        Ok(balance)
    }
}
