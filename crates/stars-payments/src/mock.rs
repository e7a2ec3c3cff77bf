//! Recording Bot
//!
//! In-process [`BotApi`] for tests and local demos. Records every call and
//! can be switched into a failing mode to simulate transport errors.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::bot::{BotApi, SendMessage, SetWebhook};
use crate::error::{PaymentError, Result};
use crate::invoice::InvoiceSpec;
use crate::policy::PreCheckoutDecision;
use crate::types::{Chat, Message, User};

/// A call made against the recording bot
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BotCall {
    GetMe,
    SendMessage(SendMessage),
    SendInvoice { chat_id: i64, invoice: InvoiceSpec },
    CreateInvoiceLink(InvoiceSpec),
    AnswerPreCheckout { query_id: String, decision: PreCheckoutDecision },
    SetWebhook(SetWebhook),
}

/// Bot double that records calls instead of contacting Telegram
pub struct RecordingBot {
    me: User,
    calls: Mutex<Vec<BotCall>>,
    fail_sends: AtomicBool,
    fail_invoices: AtomicBool,
    next_message_id: AtomicI64,
}

impl RecordingBot {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            me: User {
                id: 1,
                is_bot: true,
                first_name: "Stars Demo".into(),
                username: Some(username.into()),
            },
            calls: Mutex::new(Vec::new()),
            fail_sends: AtomicBool::new(false),
            fail_invoices: AtomicBool::new(false),
            next_message_id: AtomicI64::new(1000),
        }
    }

    /// Make `send_message` fail with a transport error
    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    /// Make invoice creation fail with an API error
    pub fn fail_invoices(&self, fail: bool) {
        self.fail_invoices.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of recorded calls
    pub fn calls(&self) -> Vec<BotCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages sent with `send_message`
    pub fn sent_messages(&self) -> Vec<SendMessage> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                BotCall::SendMessage(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: BotCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    fn outgoing(&self, chat_id: i64, text: Option<String>) -> Message {
        Message {
            message_id: self.next_message_id.fetch_add(1, Ordering::SeqCst),
            from: Some(self.me.clone()),
            chat: Chat {
                id: chat_id,
                kind: "private".into(),
            },
            date: 0,
            text,
            successful_payment: None,
        }
    }

    fn invoice_error(&self) -> Option<PaymentError> {
        self.fail_invoices.load(Ordering::SeqCst).then(|| PaymentError::Api {
            code: Some(400),
            description: "Bad Request: CURRENCY_TOTAL_AMOUNT_INVALID".into(),
        })
    }
}

#[async_trait]
impl BotApi for RecordingBot {
    async fn get_me(&self) -> Result<User> {
        self.record(BotCall::GetMe);
        Ok(self.me.clone())
    }

    async fn send_message(&self, request: &SendMessage) -> Result<Message> {
        self.record(BotCall::SendMessage(request.clone()));
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(PaymentError::Transport("connection reset by peer".into()));
        }
        Ok(self.outgoing(request.chat_id, Some(request.text.clone())))
    }

    async fn send_invoice(&self, chat_id: i64, invoice: &InvoiceSpec) -> Result<Message> {
        self.record(BotCall::SendInvoice {
            chat_id,
            invoice: invoice.clone(),
        });
        if let Some(err) = self.invoice_error() {
            return Err(err);
        }
        Ok(self.outgoing(chat_id, None))
    }

    async fn create_invoice_link(&self, invoice: &InvoiceSpec) -> Result<String> {
        self.record(BotCall::CreateInvoiceLink(invoice.clone()));
        if let Some(err) = self.invoice_error() {
            return Err(err);
        }
        let id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://t.me/$invoice{id}"))
    }

    async fn answer_pre_checkout_query(
        &self,
        query_id: &str,
        decision: &PreCheckoutDecision,
    ) -> Result<bool> {
        self.record(BotCall::AnswerPreCheckout {
            query_id: query_id.to_string(),
            decision: decision.clone(),
        });
        Ok(true)
    }

    async fn set_webhook(&self, request: &SetWebhook) -> Result<bool> {
        self.record(BotCall::SetWebhook(request.clone()));
        Ok(true)
    }
}
