//! # stars-payments
//!
//! Telegram Stars payments for a demo bot.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────┐ /buy or link  ┌──────────────┐ pre_checkout_query ┌───────────┐
//! │   User   │──────────────▶│   Telegram   │───────────────────▶│PaymentFlow│
//! │          │               │ (invoice UI) │◀── approve/reject ─│  policy   │
//! └──────────┘               └──────────────┘                    └───────────┘
//!                                   │ successful_payment               │
//!                                   └─────────────────────────────────▶│
//!                                                     Ledger::credit(user, 1)
//!                                                     reply "Payment complete"
//! ```
//!
//! Telegram owns the payment state machine. This crate only answers its
//! callbacks and records the resulting star balance. Pricing is fixed: every
//! invoice sells one star, paid in `XTR` with no external provider token.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stars_ledger::MemoryLedger;
//! use stars_payments::{PaymentFlow, TelegramClient, TelegramConfig};
//!
//! let bot = Arc::new(TelegramClient::from_config(TelegramConfig::new(token))?);
//! let flow = PaymentFlow::new(bot, Arc::new(MemoryLedger::new()), webapp_url, "my_bot");
//!
//! // For each webhook delivery:
//! flow.dispatch(stars_payments::parse_update(&body)?).await;
//! ```

mod bot;
mod error;
mod flow;
mod invoice;
mod mock;
mod policy;
mod telegram;
mod types;
mod webapp;
mod webhook;

pub use bot::{BotApi, ReplyParameters, SendMessage, SetWebhook};
pub use error::{PaymentError, Result};
pub use flow::{PAYMENT_COMPLETE_TEXT, PaymentFlow};
pub use invoice::{INVOICE_PAYLOAD, InvoiceSpec, STARS_CURRENCY, STARS_PER_PAYMENT};
pub use mock::{BotCall, RecordingBot};
pub use policy::{ApproveAll, MatchInvoice, PreCheckoutDecision, PreCheckoutPolicy};
pub use telegram::{TelegramClient, TelegramConfig};
pub use types::{
    Chat, InlineKeyboardButton, InlineKeyboardMarkup, LabeledPrice, Message, PreCheckoutQuery,
    SuccessfulPayment, Update, User, WebAppInfo,
};
pub use webapp::validate_init_data;
pub use webhook::{BotEvent, Command, SECRET_TOKEN_HEADER, parse_update, verify_secret_token};
