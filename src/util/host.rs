use axum::http::{header, HeaderMap};

/// Hostname suffix of the HTTPS-terminating hosting platform
const TLS_PROXY_SUFFIX: &str = "onrender.com";

/// The scheme and host a client should use to reach this service, derived
/// from the inbound request headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHost {
    pub scheme: String,
    pub host: String,
}

impl RequestHost {
    /// Host comes from the `Host` header (fallback `localhost`). Scheme is
    /// forced to `https` behind the known TLS-terminating platform, else
    /// taken from `x-forwarded-proto`, else `http`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("localhost")
            .to_string();

        let scheme = if host.contains(TLS_PROXY_SUFFIX) {
            "https".to_string()
        } else {
            headers
                .get("x-forwarded-proto")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| "http".to_string())
        };

        RequestHost { scheme, host }
    }

    /// Retrieval URL for a stored model file. The filename is
    /// percent-encoded so spaces and special characters survive.
    pub fn model_url(&self, filename: &str) -> String {
        format!(
            "{}://{}/models/{}",
            self.scheme,
            self.host,
            urlencoding::encode(filename)
        )
    }
}
