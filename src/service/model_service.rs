use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::StorageConfig;
use crate::dto::model_dto::{ModelEntry, ModelInfo};
use crate::model::UploadedFile;
use crate::util::error::ServiceError;
use crate::util::host::RequestHost;
use crate::util::storage::ModelStore;
use crate::util::upload::UploadPolicy;

pub struct ModelServiceImpl {
    uploads: UploadPolicy,
    store: Arc<ModelStore>,
}

impl ModelServiceImpl {
    pub fn new(storage: &StorageConfig, store: Arc<ModelStore>) -> Self {
        ModelServiceImpl {
            uploads: UploadPolicy::viewer_models(storage),
            store,
        }
    }

    pub fn upload_policy(&self) -> &UploadPolicy {
        &self.uploads
    }

    /// Turn one validated upload into its public catalog entry.
    #[instrument(skip(self, file, host), fields(stored = %file.stored_name))]
    pub fn register_model(&self, file: &UploadedFile, host: &RequestHost) -> ModelInfo {
        let url = host.model_url(&file.stored_name);
        info!("New 3D model uploaded: {}", url);
        ModelInfo {
            name: file.original_name.clone(),
            filename: file.stored_name.clone(),
            url,
        }
    }

    /// Directory snapshot paired with retrieval URLs.
    #[instrument(skip(self, host))]
    pub async fn list_models(&self, host: &RequestHost) -> Result<Vec<ModelEntry>, ServiceError> {
        let names = self.store.list_models().await?;
        info!("Listing {} models", names.len());
        Ok(names
            .into_iter()
            .map(|filename| {
                let url = host.model_url(&filename);
                ModelEntry { filename, url }
            })
            .collect())
    }
}
