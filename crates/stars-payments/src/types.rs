//! Bot API Objects
//!
//! The subset of Telegram Bot API types the payment flow reads or sends.
//! Unknown fields in inbound JSON are ignored.

use serde::{Deserialize, Serialize};
use stars_ledger::UserId;

/// Incoming update delivered to the webhook
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_checkout_query: Option<PreCheckoutQuery>,
}

/// Telegram user or bot
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    #[serde(default)]
    pub is_bot: bool,

    pub first_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl User {
    /// Ledger key for this user
    pub const fn user_id(&self) -> UserId {
        UserId(self.id)
    }
}

/// Chat a message belongs to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,

    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Chat message
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,

    pub chat: Chat,

    #[serde(default)]
    pub date: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful_payment: Option<SuccessfulPayment>,
}

impl Message {
    /// Parse a leading bot command.
    ///
    /// `"/buy@shop_bot 3"` yields `("buy", Some("shop_bot"))`.
    pub fn command(&self) -> Option<(&str, Option<&str>)> {
        let text = self.text.as_deref()?;
        let token = text.split_whitespace().next()?.strip_prefix('/')?;

        match token.split_once('@') {
            Some((name, mention)) if !name.is_empty() => Some((name, Some(mention))),
            Some(_) => None,
            None if token.is_empty() => None,
            None => Some((token, None)),
        }
    }
}

/// Confirmation that Telegram captured a payment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessfulPayment {
    pub currency: String,
    pub total_amount: i64,
    pub invoice_payload: String,
    pub telegram_payment_charge_id: String,

    #[serde(default)]
    pub provider_payment_charge_id: String,
}

/// Approval request sent before funds are captured
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreCheckoutQuery {
    pub id: String,
    pub from: User,
    pub currency: String,
    pub total_amount: i64,
    pub invoice_payload: String,
}

/// Price portion of an invoice
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledPrice {
    pub label: String,
    pub amount: i64,
}

impl LabeledPrice {
    pub fn new(label: impl Into<String>, amount: i64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Web App launched from a button
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAppInfo {
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_app: Option<WebAppInfo>,
}

impl InlineKeyboardButton {
    /// Button that opens a Web App
    pub fn web_app(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            web_app: Some(WebAppInfo { url: url.into() }),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_message(text: &str) -> Message {
        Message {
            message_id: 1,
            from: None,
            chat: Chat { id: 1, kind: "private".into() },
            date: 0,
            text: Some(text.into()),
            successful_payment: None,
        }
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(text_message("/start").command(), Some(("start", None)));
        assert_eq!(text_message("/buy 3").command(), Some(("buy", None)));
        assert_eq!(
            text_message("/buy@shop_bot").command(),
            Some(("buy", Some("shop_bot")))
        );
        assert_eq!(text_message("hello /start").command(), None);
        assert_eq!(text_message("/").command(), None);
        assert_eq!(text_message("/@shop_bot").command(), None);
    }

    #[test]
    fn test_decode_successful_payment_update() {
        let raw = r#"{
            "update_id": 900,
            "message": {
                "message_id": 17,
                "from": {"id": 42, "is_bot": false, "first_name": "Ann", "language_code": "en"},
                "chat": {"id": 42, "type": "private", "first_name": "Ann"},
                "date": 1700000000,
                "successful_payment": {
                    "currency": "XTR",
                    "total_amount": 1,
                    "invoice_payload": "payload",
                    "telegram_payment_charge_id": "stxAbc",
                    "provider_payment_charge_id": ""
                }
            }
        }"#;

        let update: Update = serde_json::from_str(raw).unwrap();
        let message = update.message.unwrap();
        assert_eq!(message.from.unwrap().user_id(), UserId(42));
        let payment = message.successful_payment.unwrap();
        assert_eq!(payment.currency, "XTR");
        assert_eq!(payment.total_amount, 1);
        assert!(update.pre_checkout_query.is_none());
    }

    #[test]
    fn test_decode_pre_checkout_update() {
        let raw = r#"{
            "update_id": 901,
            "pre_checkout_query": {
                "id": "q-1",
                "from": {"id": 42, "is_bot": false, "first_name": "Ann"},
                "currency": "XTR",
                "total_amount": 1,
                "invoice_payload": "payload"
            }
        }"#;

        let update: Update = serde_json::from_str(raw).unwrap();
        let query = update.pre_checkout_query.unwrap();
        assert_eq!(query.id, "q-1");
        assert_eq!(query.from.id, 42);
        assert!(update.message.is_none());
    }

    #[test]
    fn test_web_app_button_serialization() {
        let markup = InlineKeyboardMarkup {
            inline_keyboard: vec![vec![InlineKeyboardButton::web_app(
                "Press me",
                "https://example.com",
            )]],
        };
        let json = serde_json::to_value(&markup).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "inline_keyboard": [[{"text": "Press me", "web_app": {"url": "https://example.com"}}]]
            })
        );
    }
}
