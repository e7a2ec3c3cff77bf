//! Bot API Strategy
//!
//! The payment flow talks to Telegram exclusively through [`BotApi`], so the
//! HTTP client can be swapped for a recording double in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::invoice::InvoiceSpec;
use crate::policy::PreCheckoutDecision;
use crate::types::{InlineKeyboardMarkup, Message, User};

/// Reply target for an outgoing message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyParameters {
    pub message_id: i64,
}

/// `sendMessage` parameters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessage {
    pub chat_id: i64,
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_parameters: Option<ReplyParameters>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl SendMessage {
    /// Reply to `message` in its chat
    pub fn reply_to(message: &Message, text: impl Into<String>) -> Self {
        Self {
            chat_id: message.chat.id,
            text: text.into(),
            parse_mode: None,
            reply_parameters: Some(ReplyParameters {
                message_id: message.message_id,
            }),
            reply_markup: None,
        }
    }

    pub fn html(mut self) -> Self {
        self.parse_mode = Some("HTML".into());
        self
    }

    pub fn with_markup(mut self, markup: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(markup);
        self
    }
}

/// `setWebhook` parameters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetWebhook {
    pub url: String,
    pub secret_token: String,
    pub max_connections: u32,
    pub drop_pending_updates: bool,
}

/// Telegram Bot API operations used by the payment flow
#[async_trait]
pub trait BotApi: Send + Sync {
    /// Identity of the bot behind the token
    async fn get_me(&self) -> Result<User>;

    async fn send_message(&self, request: &SendMessage) -> Result<Message>;

    /// Post an invoice message into a chat
    async fn send_invoice(&self, chat_id: i64, invoice: &InvoiceSpec) -> Result<Message>;

    /// Create a shareable invoice link
    async fn create_invoice_link(&self, invoice: &InvoiceSpec) -> Result<String>;

    async fn answer_pre_checkout_query(
        &self,
        query_id: &str,
        decision: &PreCheckoutDecision,
    ) -> Result<bool>;

    async fn set_webhook(&self, request: &SetWebhook) -> Result<bool>;
}
