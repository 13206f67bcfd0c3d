use serde::{Deserialize, Serialize};

/// A freshly registered viewer model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Name supplied by the client
    pub name: String,
    /// Generated on-disk filename
    pub filename: String,
    /// Fully qualified retrieval URL
    pub url: String,
}

/// One entry of the model listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEntry {
    pub filename: String,
    pub url: String,
}

/// Wire response for POST /api/models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelUploadResponse {
    pub success: bool,
    pub message: String,
    pub model: ModelInfo,
}

impl ModelUploadResponse {
    pub fn uploaded(model: ModelInfo) -> Self {
        ModelUploadResponse {
            success: true,
            message: "Model uploaded successfully".to_string(),
            model,
        }
    }
}

/// Wire response for GET /api/models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelListResponse {
    pub success: bool,
    pub models: Vec<ModelEntry>,
}
