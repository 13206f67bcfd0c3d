use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::debug;

use crate::config::ConfigError;

/// On-disk layout: one directory for quote attachments, one for viewer models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding quote attachment uploads
    pub upload_dir: PathBuf,
    /// Directory holding 3D viewer models, served under /models
    pub models_dir: PathBuf,
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let upload_dir = PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()));
        let models_dir = PathBuf::from(env::var("MODELS_DIR").unwrap_or_else(|_| "models".to_string()));
        debug!("Upload dir: {}", upload_dir.display());
        debug!("Models dir: {}", models_dir.display());

        let config = StorageConfig {
            upload_dir,
            models_dir,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upload_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "Upload directory cannot be empty".to_string(),
            ));
        }
        if self.models_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "Models directory cannot be empty".to_string(),
            ));
        }
        if self.upload_dir == self.models_dir {
            return Err(ConfigError::ValidationError(
                "Upload and models directories must differ".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            upload_dir: PathBuf::from("uploads"),
            models_dir: PathBuf::from("models"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StorageConfig::default();
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.models_dir, PathBuf::from("models"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_same_directories() {
        let config = StorageConfig {
            upload_dir: PathBuf::from("files"),
            models_dir: PathBuf::from("files"),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_directory() {
        let config = StorageConfig {
            upload_dir: PathBuf::new(),
            models_dir: PathBuf::from("models"),
        };
        assert!(config.validate().is_err());
    }
}
