use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::handler::quote_handler::submit_quote_handler;
use crate::service::quote_service::QuoteServiceImpl;

pub fn quote_router(service: Arc<QuoteServiceImpl>) -> Router {
    let body_limit = service.upload_policy().body_limit();
    Router::new()
        .route("/api/quote", post(submit_quote_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(service)
}
