use serde::{Deserialize, Serialize};

/// Wire response for POST /api/quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub success: bool,
    pub message: String,
}

impl QuoteResponse {
    pub fn received() -> Self {
        QuoteResponse {
            success: true,
            message: "Solicitud recibida y correo enviado".to_string(),
        }
    }
}
