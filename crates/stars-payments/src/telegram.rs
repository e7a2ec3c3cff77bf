//! Telegram Bot API Client
//!
//! Implementation of [`BotApi`] over HTTPS with reqwest. Every method is a
//! JSON `POST {api_url}/bot{token}/{method}` answered by the standard
//! `{ok, result, description, error_code}` envelope.

use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::bot::{BotApi, SendMessage, SetWebhook};
use crate::error::{PaymentError, Result};
use crate::invoice::InvoiceSpec;
use crate::policy::PreCheckoutDecision;
use crate::types::{Message, User};

/// Telegram client configuration
#[derive(Clone, Debug)]
pub struct TelegramConfig {
    /// Bot token issued by @BotFather
    pub token: String,

    /// Bot API base URL
    pub api_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: "https://api.telegram.org".into(),
            timeout_secs: 30,
        }
    }
}

impl TelegramConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Default::default()
        }
    }
}

/// Bot API response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<i32>,
}

impl<T> ApiResponse<T> {
    fn into_result(self, method: &str) -> Result<T> {
        if !self.ok {
            return Err(PaymentError::Api {
                code: self.error_code,
                description: self.description.unwrap_or_else(|| format!("{method} failed")),
            });
        }
        self.result
            .ok_or_else(|| PaymentError::Parse(format!("{method} returned no result")))
    }
}

#[derive(Serialize)]
struct SendInvoice<'a> {
    chat_id: i64,
    #[serde(flatten)]
    invoice: &'a InvoiceSpec,
}

#[derive(Serialize)]
struct AnswerPreCheckoutQuery<'a> {
    pre_checkout_query_id: &'a str,
    #[serde(flatten)]
    decision: &'a PreCheckoutDecision,
}

#[derive(Serialize)]
struct NoParams {}

/// Telegram Bot API client
pub struct TelegramClient {
    http: reqwest::Client,
    config: TelegramConfig,
}

impl TelegramClient {
    /// Create from configuration
    pub fn from_config(config: TelegramConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PaymentError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.token,
            method
        )
    }

    async fn call<P, R>(&self, method: &str, params: &P) -> Result<R>
    where
        P: Serialize + Sync + ?Sized,
        R: DeserializeOwned + Send,
    {
        tracing::debug!(method, "Calling Bot API");

        // Errors carry the request URL, which embeds the token.
        let response = self
            .http
            .post(self.method_url(method))
            .json(params)
            .send()
            .await
            .map_err(|e| PaymentError::Transport(e.without_url().to_string()))?;

        let envelope: ApiResponse<R> = response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.without_url().to_string()))?;

        envelope.into_result(method)
    }
}

#[async_trait]
impl BotApi for TelegramClient {
    async fn get_me(&self) -> Result<User> {
        self.call("getMe", &NoParams {}).await
    }

    async fn send_message(&self, request: &SendMessage) -> Result<Message> {
        self.call("sendMessage", request).await
    }

    async fn send_invoice(&self, chat_id: i64, invoice: &InvoiceSpec) -> Result<Message> {
        self.call("sendInvoice", &SendInvoice { chat_id, invoice }).await
    }

    async fn create_invoice_link(&self, invoice: &InvoiceSpec) -> Result<String> {
        self.call("createInvoiceLink", invoice).await
    }

    async fn answer_pre_checkout_query(
        &self,
        query_id: &str,
        decision: &PreCheckoutDecision,
    ) -> Result<bool> {
        let params = AnswerPreCheckoutQuery {
            pre_checkout_query_id: query_id,
            decision,
        };
        self.call("answerPreCheckoutQuery", &params).await
    }

    async fn set_webhook(&self, request: &SetWebhook) -> Result<bool> {
        self.call("setWebhook", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = TelegramConfig::default();
        assert_eq!(config.api_url, "https://api.telegram.org");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_method_url() {
        let mut config = TelegramConfig::new("123:abc");
        config.api_url = "http://localhost:8081/".into();
        let client = TelegramClient::from_config(config).unwrap();

        assert_eq!(
            client.method_url("sendInvoice"),
            "http://localhost:8081/bot123:abc/sendInvoice"
        );
    }

    #[test]
    fn test_envelope_ok() {
        let envelope: ApiResponse<String> = serde_json::from_str(
            r#"{"ok": true, "result": "https://t.me/$abc"}"#,
        )
        .unwrap();
        assert_eq!(envelope.into_result("createInvoiceLink").unwrap(), "https://t.me/$abc");
    }

    #[test]
    fn test_envelope_error() {
        let envelope: ApiResponse<bool> = serde_json::from_str(
            r#"{"ok": false, "error_code": 400, "description": "Bad Request: query is too old"}"#,
        )
        .unwrap();

        match envelope.into_result("answerPreCheckoutQuery") {
            Err(PaymentError::Api { code, description }) => {
                assert_eq!(code, Some(400));
                assert_eq!(description, "Bad Request: query is too old");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_envelope_missing_result() {
        let envelope: ApiResponse<User> = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(matches!(envelope.into_result("getMe"), Err(PaymentError::Parse(_))));
    }

    #[test]
    fn test_invoice_params_flatten() {
        let invoice = InvoiceSpec::single_star();
        let json = serde_json::to_value(SendInvoice { chat_id: 42, invoice: &invoice }).unwrap();
        assert_eq!(json["chat_id"], 42);
        assert_eq!(json["currency"], "XTR");
        assert_eq!(json["prices"][0]["amount"], 1);

        let decision = PreCheckoutDecision::approve();
        let json = serde_json::to_value(AnswerPreCheckoutQuery {
            pre_checkout_query_id: "q-1",
            decision: &decision,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"pre_checkout_query_id": "q-1", "ok": true}));
    }
}
