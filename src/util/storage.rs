use tracing::{debug, error, info, instrument};

use crate::config::StorageConfig;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Extensions recognized as viewer models
const MODEL_EXTENSIONS: &[&str] = &[".glb", ".gltf"];

/// Local-disk storage for quote attachments and viewer models.
///
/// Directory scans are self-contained snapshots; generated upload names
/// avoid collisions, so no locking is needed across requests.
#[derive(Debug, Clone)]
pub struct ModelStore {
    pub config: StorageConfig,
}

impl ModelStore {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Idempotent directory bootstrap. Awaited during startup, strictly
    /// before the HTTP listener binds.
    #[instrument(skip(self))]
    pub async fn ensure_directories(&self) -> Result<(), StorageError> {
        for dir in [&self.config.upload_dir, &self.config.models_dir] {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                error!("Failed to create directory {}: {}", dir.display(), e);
                StorageError::Unavailable(format!("Failed to create {}: {}", dir.display(), e))
            })?;
            debug!("Directory ready: {}", dir.display());
        }
        info!("Storage directories ready");
        Ok(())
    }

    pub fn is_model_file(name: &str) -> bool {
        MODEL_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
    }

    /// Snapshot of the model filenames currently on disk, recognized
    /// extensions only.
    #[instrument(skip(self))]
    pub async fn list_models(&self) -> Result<Vec<String>, StorageError> {
        let mut entries = tokio::fs::read_dir(&self.config.models_dir)
            .await
            .map_err(|e| {
                error!("Error reading models folder: {}", e);
                StorageError::Unavailable(format!("Error reading models folder: {}", e))
            })?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            if Self::is_model_file(&name) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_file_recognition() {
        assert!(ModelStore::is_model_file("scene.glb"));
        assert!(ModelStore::is_model_file("scene.gltf"));
        assert!(!ModelStore::is_model_file("scene.png"));
        assert!(!ModelStore::is_model_file("scene.glb.txt"));
        assert!(!ModelStore::is_model_file("readme"));
    }
}
