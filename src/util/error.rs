use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::util::email::EmailError;
use crate::util::storage::StorageError;
use crate::util::upload::UploadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerErrorKind {
    BadRequest,
    CorsRejected,
    Internal,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::BadRequest => "BadRequest",
            HandlerErrorKind::CorsRejected => "CorsRejected",
            HandlerErrorKind::Internal => "Internal",
        };
        write!(f, "{}", s)
    }
}

/// Route-level error. `IntoResponse` renders the wire shape
/// `{success:false, message}` with the status mapped from the kind.
/// Validation messages travel to the client verbatim; everything else is
/// logged server-side and carries the route's generic message.
#[derive(Debug)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
}

impl HandlerError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        HandlerError {
            error: HandlerErrorKind::BadRequest,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        HandlerError {
            error: HandlerErrorKind::Internal,
            message: message.into(),
        }
    }

    pub fn cors_rejected(origin: &str) -> Self {
        HandlerError {
            error: HandlerErrorKind::CorsRejected,
            message: format!("Not allowed by CORS: {}", origin),
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = match self.error {
            HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::CorsRejected => StatusCode::FORBIDDEN,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorBody {
            success: false,
            message: self.message,
        });
        (status, body).into_response()
    }
}

/// Upload validation errors become 400s carrying the original message;
/// a failed disk write is not the client's fault and stays generic.
impl From<UploadError> for HandlerError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Io(e) => HandlerError::internal(format!("File upload error: {}", e)),
            other => HandlerError::bad_request(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ServiceError {
    InvalidInput(String),
    InternalError(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::InvalidInput(msg) => write!(f, "Invalid Input: {}", msg),
            ServiceError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<EmailError> for ServiceError {
    fn from(err: EmailError) -> Self {
        ServiceError::InternalError(err.to_string())
    }
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::InternalError(err.to_string())
    }
}
