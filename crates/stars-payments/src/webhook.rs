//! Telegram Webhook Handling
//!
//! Authenticates webhook deliveries and classifies updates into the events
//! the payment flow reacts to.

use crate::error::{PaymentError, Result};
use crate::types::{Message, PreCheckoutQuery, Update};

/// Header Telegram sets to the secret registered with `setWebhook`
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Bot command understood by the flow
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Buy,
}

impl Command {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Self::Start),
            "buy" => Some(Self::Buy),
            _ => None,
        }
    }
}

/// Parsed webhook event
#[derive(Clone, Debug)]
pub enum BotEvent {
    /// Telegram wants approval before capturing funds
    PreCheckout(PreCheckoutQuery),

    /// Funds were captured; message carries `successful_payment`
    PaymentCompleted(Message),

    /// Recognised bot command
    Command { command: Command, message: Message },

    /// Anything the flow ignores
    Other { update_id: i64 },
}

impl BotEvent {
    /// Classify an update.
    ///
    /// Commands addressed to another bot (`/buy@other_bot`) are ignored.
    pub fn from_update(update: Update, bot_username: &str) -> Self {
        if let Some(query) = update.pre_checkout_query {
            return Self::PreCheckout(query);
        }

        let Some(message) = update.message else {
            return Self::Other { update_id: update.update_id };
        };

        if message.successful_payment.is_some() {
            return Self::PaymentCompleted(message);
        }

        let command = message.command().and_then(|(name, mention)| {
            let addressed_here = mention.is_none_or(|m| m.eq_ignore_ascii_case(bot_username));
            if addressed_here { Command::from_name(name) } else { None }
        });

        match command {
            Some(command) => Self::Command { command, message },
            None => Self::Other { update_id: update.update_id },
        }
    }

    /// Short label for logs
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PreCheckout(_) => "pre_checkout_query",
            Self::PaymentCompleted(_) => "successful_payment",
            Self::Command { .. } => "command",
            Self::Other { .. } => "other",
        }
    }
}

/// Decode a webhook body
pub fn parse_update(body: &[u8]) -> Result<Update> {
    serde_json::from_slice(body).map_err(|e| PaymentError::Parse(e.to_string()))
}

/// Check the secret header against the configured secret in constant time
pub fn verify_secret_token(expected: &str, provided: Option<&str>) -> bool {
    let Some(provided) = provided else {
        return false;
    };
    let (a, b) = (expected.as_bytes(), provided.as_bytes());
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chat, SuccessfulPayment, User};

    fn user() -> User {
        User {
            id: 42,
            is_bot: false,
            first_name: "Ann".into(),
            username: Some("ann".into()),
        }
    }

    fn message(text: Option<&str>) -> Message {
        Message {
            message_id: 5,
            from: Some(user()),
            chat: Chat { id: 42, kind: "private".into() },
            date: 0,
            text: text.map(Into::into),
            successful_payment: None,
        }
    }

    fn update(message: Message) -> Update {
        Update {
            update_id: 1,
            message: Some(message),
            pre_checkout_query: None,
        }
    }

    #[test]
    fn test_classify_pre_checkout() {
        let update = Update {
            update_id: 1,
            message: None,
            pre_checkout_query: Some(PreCheckoutQuery {
                id: "q".into(),
                from: user(),
                currency: "XTR".into(),
                total_amount: 1,
                invoice_payload: "payload".into(),
            }),
        };
        assert!(matches!(BotEvent::from_update(update, "shop_bot"), BotEvent::PreCheckout(_)));
    }

    #[test]
    fn test_classify_successful_payment() {
        let mut msg = message(None);
        msg.successful_payment = Some(SuccessfulPayment {
            currency: "XTR".into(),
            total_amount: 1,
            invoice_payload: "payload".into(),
            telegram_payment_charge_id: "c".into(),
            provider_payment_charge_id: String::new(),
        });
        let event = BotEvent::from_update(update(msg), "shop_bot");
        assert_eq!(event.kind(), "successful_payment");
    }

    #[test]
    fn test_classify_commands() {
        let event = BotEvent::from_update(update(message(Some("/start"))), "shop_bot");
        assert!(matches!(event, BotEvent::Command { command: Command::Start, .. }));

        let event = BotEvent::from_update(update(message(Some("/buy@Shop_Bot"))), "shop_bot");
        assert!(matches!(event, BotEvent::Command { command: Command::Buy, .. }));

        let event = BotEvent::from_update(update(message(Some("/buy@other_bot"))), "shop_bot");
        assert!(matches!(event, BotEvent::Other { .. }));

        let event = BotEvent::from_update(update(message(Some("/help"))), "shop_bot");
        assert!(matches!(event, BotEvent::Other { .. }));

        let event = BotEvent::from_update(update(message(Some("buy"))), "shop_bot");
        assert!(matches!(event, BotEvent::Other { .. }));
    }

    #[test]
    fn test_parse_update_rejects_garbage() {
        assert!(matches!(parse_update(b"not json"), Err(PaymentError::Parse(_))));
        assert!(parse_update(br#"{"update_id": 3}"#).is_ok());
    }

    #[test]
    fn test_secret_token() {
        assert!(verify_secret_token("s3cret", Some("s3cret")));
        assert!(!verify_secret_token("s3cret", Some("s3creT")));
        assert!(!verify_secret_token("s3cret", Some("s3cret-longer")));
        assert!(!verify_secret_token("s3cret", None));
    }
}
