//! Payment Error Types

use stars_ledger::LedgerError;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Request to the Bot API could not be delivered or read
    #[error("Transport error: {0}")]
    Transport(String),

    /// Bot API answered with `ok: false`
    #[error("Telegram API error ({}): {description}", code_label(.code))]
    Api {
        code: Option<i32>,
        description: String,
    },

    /// A user-facing reply failed after the underlying action succeeded
    #[error("failed to send {action}: {source}")]
    Notify {
        action: &'static str,
        #[source]
        source: Box<PaymentError>,
    },

    /// Ledger backend failed
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unexpected payload shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Web App init data could not be checked
    #[error("Invalid init data: {0}")]
    InitData(String),
}

fn code_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "?".to_string(), |c| c.to_string())
}

impl PaymentError {
    /// Wrap a failed reply with what was being sent
    pub fn notify(action: &'static str, source: Self) -> Self {
        Self::Notify {
            action,
            source: Box::new(source),
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Api { code, .. } => matches!(code, Some(429) | Some(500..=599)),
            Self::Notify { source, .. } => source.is_retryable(),
            Self::Ledger(e) => e.is_retryable(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = PaymentError::Api {
            code: Some(400),
            description: "Bad Request: chat not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "Telegram API error (400): Bad Request: chat not found"
        );
    }

    #[test]
    fn test_notify_wraps_source() {
        let err = PaymentError::notify(
            "payment complete message",
            PaymentError::Transport("connection reset".into()),
        );
        assert_eq!(
            err.to_string(),
            "failed to send payment complete message: Transport error: connection reset"
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn test_retryable() {
        let throttled = PaymentError::Api {
            code: Some(429),
            description: "Too Many Requests".into(),
        };
        let forbidden = PaymentError::Api {
            code: Some(403),
            description: "Forbidden".into(),
        };
        assert!(throttled.is_retryable());
        assert!(!forbidden.is_retryable());
        assert!(!PaymentError::Config("TOKEN not set".into()).is_retryable());
    }
}
