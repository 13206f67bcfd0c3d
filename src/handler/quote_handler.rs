use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::dto::quote_dto::QuoteResponse;
use crate::service::quote_service::{QuoteService, QuoteServiceImpl};
use crate::util::error::HandlerError;

/// POST /api/quote
///
/// Upload validation runs before any business logic; its typed errors
/// become 400s carrying their message. Everything past validation that
/// fails is logged in full and reported with the route's generic message.
pub async fn submit_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HandlerError> {
    info!("New quote request");

    let form = service
        .upload_policy()
        .receive(multipart)
        .await
        .map_err(HandlerError::from)?;

    QuoteService::register_quote(&*service, form)
        .await
        .map_err(|e| {
            error!("Error processing quote: {}", e);
            HandlerError::internal("Error procesando la cotización")
        })?;

    Ok(Json(QuoteResponse::received()))
}
