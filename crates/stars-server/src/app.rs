//! Router

use axum::{
    Router,
    extract::{MatchedPath, Request},
    routing::any,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::Span;

use crate::handlers::{create_invoice, get_balance, index, telegram_webhook, validate};
use crate::state::AppState;

/// Build the application router
///
/// Routes answer every method, and unknown paths fall back to the home page.
pub fn router(state: AppState) -> Router {
    // The Web App page may be served from another origin during development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Web App
        .route("/", any(index))
        .route("/validate", any(validate))
        // Telegram
        .route("/bots/{token}", any(telegram_webhook))
        // Stars API
        .route("/get-balance", any(get_balance))
        .route("/create-invoice", any(create_invoice))
        .fallback(index)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

/// Request span keyed by route template.
///
/// The raw URI is never recorded: the webhook path carries the bot token.
fn request_span(request: &Request) -> Span {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or("<fallback>", MatchedPath::as_str);

    tracing::info_span!("request", method = %request.method(), route = %route)
}
