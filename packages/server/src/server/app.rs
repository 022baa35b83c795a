//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use listing::ListingFetcher;
use resend::{ResendOptions, ResendService};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::routes::{health_handler, invoice_handler, send_email_handler};

/// Shared application state
///
/// Requests are independent: the fetcher holds no cross-request state beyond
/// its connection pool, and nothing here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<ListingFetcher>,
    /// `None` when no Resend API key is configured.
    pub resend: Option<Arc<ResendService>>,
}

/// Build the Axum application router
pub fn build_app(config: &Config) -> Router {
    let fetcher = Arc::new(ListingFetcher::new());

    let resend = config.resend_api_key.clone().map(|api_key| {
        Arc::new(ResendService::new(ResendOptions {
            api_key,
            from_email: config.resend_from_email.clone(),
        }))
    });

    let app_state = AppState { fetcher, resend };

    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/invoice", post(invoice_handler))
        .route("/api/send-email", post(send_email_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
