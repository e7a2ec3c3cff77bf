//! HTTP Handlers

use std::collections::HashMap;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Html,
};
use serde::{Deserialize, Serialize};

use stars_ledger::{Ledger, UserId};
use stars_payments::{SECRET_TOKEN_HEADER, parse_update, validate_init_data, verify_secret_token};

use crate::pages;
use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>, code: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub balance: u64,
}

/// Body of `POST /create-invoice`.
///
/// `amount` is accepted but not used: every invoice sells one star.
#[derive(Debug, Default, Deserialize)]
pub struct CreateInvoiceRequest {
    #[serde(default)]
    pub amount: i64,

    #[serde(default)]
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct CreateInvoiceResponse {
    #[serde(rename = "invoiceUrl")]
    pub invoice_url: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Home page hosting the Web App
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(pages::render_index(&state.webapp_url))
}

/// Check Web App init data sent back by the page
pub async fn validate(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> &'static str {
    match validate_init_data(&params, &state.token) {
        Ok(true) => "validation success; user is authenticated.",
        Ok(false) => "validation failed; data cannot be trusted.",
        Err(e) => {
            tracing::debug!(error = %e, "Web App validation failed");
            "validation failed; init data is incomplete."
        }
    }
}

/// Telegram webhook receiver
pub async fn telegram_webhook(
    State(state): State<AppState>,
    Path(token): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    if !verify_secret_token(&state.token, Some(token.as_str())) {
        return Err(api_error(StatusCode::NOT_FOUND, "Unknown bot", "UNKNOWN_BOT"));
    }

    let secret = headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());
    if !verify_secret_token(&state.webhook_secret, secret) {
        tracing::warn!("Webhook request with missing or wrong secret token");
        return Err(api_error(
            StatusCode::UNAUTHORIZED,
            "Invalid secret token",
            "INVALID_SECRET",
        ));
    }

    let update = parse_update(&body).map_err(|e| {
        tracing::warn!(error = %e, "Undecodable update");
        api_error(StatusCode::BAD_REQUEST, e.to_string(), "INVALID_UPDATE")
    })?;

    tracing::debug!(update_id = update.update_id, "Received update");
    state.flow.dispatch(update).await;

    Ok(StatusCode::OK)
}

/// Star balance for a user
pub async fn get_balance(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let user_id = params
        .get("user_id")
        .and_then(|raw| raw.parse::<i64>().ok())
        .map(UserId)
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Invalid user ID", "INVALID_USER_ID"))?;

    let balance = state.ledger.balance(user_id).await.map_err(|e| {
        tracing::error!(user_id = %user_id, error = %e, "Balance lookup failed");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), "LEDGER_ERROR")
    })?;

    Ok(Json(BalanceResponse { balance }))
}

/// Create a shareable single-star invoice link
pub async fn create_invoice(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CreateInvoiceResponse>, ApiError> {
    // First JSON value only: trailing bytes are ignored and `null` means defaults
    let request = serde_json::Deserializer::from_slice(&body)
        .into_iter::<Option<CreateInvoiceRequest>>()
        .next()
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "empty request body", "INVALID_BODY"))?
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string(), "INVALID_BODY"))?
        .unwrap_or_default();

    tracing::info!(
        user_id = request.user_id,
        requested_amount = request.amount,
        "Creating invoice link"
    );

    let invoice_url = state.flow.create_invoice_link().await.map_err(|e| {
        tracing::error!(error = %e, "Invoice creation failed");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), "INVOICE_ERROR")
    })?;

    Ok(Json(CreateInvoiceResponse { invoice_url }))
}
