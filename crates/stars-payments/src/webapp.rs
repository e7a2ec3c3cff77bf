//! Web App init data validation
//!
//! Telegram signs the query string it hands to a Web App:
//!
//! ```text
//! secret = HMAC_SHA256(key = "WebAppData", msg = bot_token)
//! hash   = hex(HMAC_SHA256(key = secret, msg = data_check_string))
//! ```
//!
//! where `data_check_string` is every `key=value` pair except `hash`, sorted
//! by key and joined with `\n`.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;

use crate::error::{PaymentError, Result};

type HmacSha256 = Hmac<Sha256>;

fn hmac(key: &[u8]) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(key).map_err(|e| PaymentError::InitData(e.to_string()))
}

fn data_check_string(params: &HashMap<String, String>) -> String {
    let mut pairs: Vec<_> = params
        .iter()
        .filter(|(key, _)| key.as_str() != "hash")
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    pairs
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check decoded init data parameters against the bot token.
///
/// Returns `Ok(false)` for data that is present but not signed by this bot,
/// and an error when there is no `hash` to check.
pub fn validate_init_data(params: &HashMap<String, String>, token: &str) -> Result<bool> {
    let hash = params
        .get("hash")
        .ok_or_else(|| PaymentError::InitData("missing hash".into()))?;

    let Ok(expected) = hex::decode(hash) else {
        return Ok(false);
    };

    let mut secret = hmac(b"WebAppData")?;
    secret.update(token.as_bytes());
    let secret = secret.finalize().into_bytes();

    let mut mac = hmac(&secret)?;
    mac.update(data_check_string(params).as_bytes());

    Ok(mac.verify_slice(&expected).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "123456:TEST-token";
    const SIGNED_HASH: &str = "52407c82c620cc43263aa26aaad1a36a526424d10a760a4adb02c8b5caefe70d";

    fn signed_params() -> HashMap<String, String> {
        HashMap::from([
            ("auth_date".to_string(), "1700000000".to_string()),
            ("query_id".to_string(), "AAHdF6IQAAAAAN0XohDhrOrc".to_string()),
            ("user".to_string(), r#"{"id":42,"first_name":"Ann"}"#.to_string()),
            ("hash".to_string(), SIGNED_HASH.to_string()),
        ])
    }

    #[test]
    fn test_data_check_string_sorted_without_hash() {
        assert_eq!(
            data_check_string(&signed_params()),
            "auth_date=1700000000\nquery_id=AAHdF6IQAAAAAN0XohDhrOrc\nuser={\"id\":42,\"first_name\":\"Ann\"}"
        );
    }

    #[test]
    fn test_valid_signature() {
        assert!(validate_init_data(&signed_params(), TOKEN).unwrap());
    }

    #[test]
    fn test_tampered_data() {
        let mut params = signed_params();
        params.insert("user".into(), r#"{"id":43,"first_name":"Ann"}"#.into());
        assert!(!validate_init_data(&params, TOKEN).unwrap());
    }

    #[test]
    fn test_wrong_token() {
        assert!(!validate_init_data(&signed_params(), "654321:other").unwrap());
    }

    #[test]
    fn test_malformed_hash() {
        let mut params = signed_params();
        params.insert("hash".into(), "zz-not-hex".into());
        assert!(!validate_init_data(&params, TOKEN).unwrap());
    }

    #[test]
    fn test_missing_hash() {
        let mut params = signed_params();
        params.remove("hash");
        assert!(matches!(
            validate_init_data(&params, TOKEN),
            Err(PaymentError::InitData(_))
        ));
    }
}
