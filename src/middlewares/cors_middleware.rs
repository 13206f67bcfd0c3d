use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

use crate::util::error::HandlerError;

/// Origins allowed to call the API from a browser
const ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "https://novafortesas.com",
    "https://www.novafortesas.com",
];

/// Preview deployments on the trusted hosting platform
const TRUSTED_ORIGIN_SUFFIX: &str = ".vercel.app";

#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
    trusted_suffix: String,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        CorsPolicy {
            allowed_origins: ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
            trusted_suffix: TRUSTED_ORIGIN_SUFFIX.to_string(),
        }
    }
}

impl CorsPolicy {
    pub fn allows(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin) || origin.ends_with(&self.trusted_suffix)
    }
}

/// Origin guard applied ahead of every route, static serving included.
///
/// Requests without an Origin header (server-to-server clients) pass
/// through untouched; allowed origins get the CORS response headers and
/// preflights are answered here; anything else is rejected before the
/// handler runs.
pub async fn cors_guard(
    State(policy): State<Arc<CorsPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = match request.headers().get(header::ORIGIN) {
        None => return next.run(request).await,
        Some(value) => match value.to_str() {
            Ok(v) => v.to_string(),
            Err(_) => return HandlerError::cors_rejected("<invalid>").into_response(),
        },
    };

    if !policy.allows(&origin) {
        warn!("Rejected origin: {}", origin);
        return HandlerError::cors_rejected(&origin).into_response();
    }

    let origin_value = match HeaderValue::from_str(&origin) {
        Ok(v) => v,
        Err(_) => return HandlerError::cors_rejected(&origin).into_response(),
    };

    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        let headers = response.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin_value);
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );
        headers.insert(header::VARY, HeaderValue::from_static("Origin"));
        return response;
    }

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin_value);
    headers.append(header::VARY, HeaderValue::from_static("Origin"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list_origins() {
        let policy = CorsPolicy::default();
        assert!(policy.allows("http://localhost:3000"));
        assert!(policy.allows("https://novafortesas.com"));
        assert!(policy.allows("https://www.novafortesas.com"));
    }

    #[test]
    fn test_trusted_suffix_origins() {
        let policy = CorsPolicy::default();
        assert!(policy.allows("https://preview-123.vercel.app"));
        assert!(!policy.allows("https://vercel.app.evil.example"));
    }

    #[test]
    fn test_other_origins_rejected() {
        let policy = CorsPolicy::default();
        assert!(!policy.allows("https://evil.example"));
        assert!(!policy.allows("http://novafortesas.com.evil.example"));
    }
}
