use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::handler::model_handler::{list_models_handler, upload_model_handler};
use crate::service::model_service::ModelServiceImpl;

pub fn model_router(service: Arc<ModelServiceImpl>) -> Router {
    let body_limit = service.upload_policy().body_limit();
    Router::new()
        .route(
            "/api/models",
            post(upload_model_handler).get(list_models_handler),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(service)
}
