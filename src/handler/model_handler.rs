use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::error;

use crate::dto::model_dto::{ModelListResponse, ModelUploadResponse};
use crate::service::model_service::ModelServiceImpl;
use crate::util::error::HandlerError;
use crate::util::host::RequestHost;

/// POST /api/models
pub async fn upload_model_handler(
    State(service): State<Arc<ModelServiceImpl>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<impl IntoResponse, HandlerError> {
    let form = service
        .upload_policy()
        .receive(multipart)
        .await
        .map_err(HandlerError::from)?;

    let file = form
        .files
        .first()
        .ok_or_else(|| HandlerError::bad_request("No file uploaded"))?;

    let host = RequestHost::from_headers(&headers);
    let model = service.register_model(file, &host);

    Ok(Json(ModelUploadResponse::uploaded(model)))
}

/// GET /api/models
pub async fn list_models_handler(
    State(service): State<Arc<ModelServiceImpl>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, HandlerError> {
    let host = RequestHost::from_headers(&headers);
    let models = service.list_models(&host).await.map_err(|e| {
        error!("Error listing models: {}", e);
        HandlerError::internal("Error reading models folder")
    })?;

    Ok(Json(ModelListResponse {
        success: true,
        models,
    }))
}
