use axum::extract::Multipart;
use bytes::BytesMut;
use rand::Rng;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::StorageConfig;
use crate::model::UploadedFile;

/// Upload validation errors. The messages are part of the wire contract:
/// they travel verbatim in 400 responses.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("{0}")]
    DisallowedExtension(String),

    #[error("File too large: the limit is {limit_mb} MB per file")]
    FileTooLarge { limit_mb: u64 },

    #[error("Too many files: at most {max} allowed")]
    TooManyFiles { max: usize },

    #[error("Unexpected file field: {0}")]
    UnexpectedFile(String),

    #[error("Malformed multipart body: {0}")]
    Multipart(String),

    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything one multipart submission carried: the plain text fields plus
/// the files accepted and persisted by the policy.
#[derive(Debug, Default)]
pub struct ReceivedForm {
    pub fields: HashMap<String, String>,
    pub files: Vec<UploadedFile>,
}

/// Per-route upload validation configuration.
///
/// The two instances (quote attachments, viewer models) are independent
/// values sharing no state; both may be exercised concurrently.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    /// Multipart field name carrying file parts
    pub field: &'static str,
    /// Permitted filename extensions, lowercase with leading dot
    pub allowed_exts: &'static [&'static str],
    /// Per-file size ceiling in bytes
    pub max_file_bytes: u64,
    /// Maximum accepted file parts per request
    pub max_files: usize,
    /// Message returned when the extension check fails
    rejection: &'static str,
    /// Destination directory
    dest: PathBuf,
}

impl UploadPolicy {
    /// Quote attachments: up to five `.obj`/`.stl` design files of 25MB each.
    pub fn quote_attachments(storage: &StorageConfig) -> Self {
        UploadPolicy {
            field: "files",
            allowed_exts: &[".obj", ".stl"],
            max_file_bytes: 25 * 1024 * 1024,
            max_files: 5,
            rejection: "Only .obj and .stl files are allowed",
            dest: storage.upload_dir.clone(),
        }
    }

    /// Viewer models: a single `.glb`/`.gltf` file of up to 50MB.
    pub fn viewer_models(storage: &StorageConfig) -> Self {
        UploadPolicy {
            field: "model",
            allowed_exts: &[".glb", ".gltf"],
            max_file_bytes: 50 * 1024 * 1024,
            max_files: 1,
            rejection: "Only .glb and .gltf files are allowed for 3D viewer",
            dest: storage.models_dir.clone(),
        }
    }

    /// Whole-request body budget for the route, with headroom for the
    /// text fields and multipart framing.
    pub fn body_limit(&self) -> usize {
        self.max_file_bytes as usize * self.max_files + 1024 * 1024
    }

    /// Validate the client filename against the allow-list. Matching is
    /// case-insensitive; returns the normalized (lowercased) extension.
    pub fn check_extension(&self, original_name: &str) -> Result<String, UploadError> {
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();
        if self.allowed_exts.contains(&ext.as_str()) {
            Ok(ext)
        } else {
            Err(UploadError::DisallowedExtension(self.rejection.to_string()))
        }
    }

    /// Generate a stored filename: millisecond timestamp, random numeric
    /// suffix, original extension. Uploads landing in the same millisecond
    /// differ in the suffix.
    pub fn generate_filename(&self, ext: &str) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
        format!("{}-{}{}", millis, suffix, ext)
    }

    /// Walk a multipart stream, collecting text fields and persisting file
    /// parts that pass validation. The first violation fails the whole
    /// request; parts already written stay on disk, nothing cleans them up.
    pub async fn receive(&self, mut multipart: Multipart) -> Result<ReceivedForm, UploadError> {
        let mut form = ReceivedForm::default();

        while let Some(mut field) = multipart
            .next_field()
            .await
            .map_err(|e| UploadError::Multipart(e.to_string()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if field.file_name().is_none() {
                let value = field
                    .text()
                    .await
                    .map_err(|e| UploadError::Multipart(e.to_string()))?;
                form.fields.insert(name, value);
                continue;
            }

            if name != self.field {
                warn!("Rejecting file part under unexpected field '{}'", name);
                return Err(UploadError::UnexpectedFile(name));
            }

            if form.files.len() >= self.max_files {
                return Err(UploadError::TooManyFiles {
                    max: self.max_files,
                });
            }

            let original_name = field.file_name().unwrap_or_default().to_string();
            let ext = self.check_extension(&original_name)?;

            let mut buf = BytesMut::new();
            while let Some(chunk) = field
                .chunk()
                .await
                .map_err(|e| UploadError::Multipart(e.to_string()))?
            {
                buf.extend_from_slice(&chunk);
                if buf.len() as u64 > self.max_file_bytes {
                    return Err(UploadError::FileTooLarge {
                        limit_mb: self.max_file_bytes / (1024 * 1024),
                    });
                }
            }

            let stored_name = self.generate_filename(&ext);
            let path = self.dest.join(&stored_name);
            tokio::fs::write(&path, &buf).await?;
            info!(
                "Stored upload '{}' as {} ({} bytes)",
                original_name,
                path.display(),
                buf.len()
            );

            form.files.push(UploadedFile {
                original_name,
                stored_name,
                size: buf.len() as u64,
                path,
            });
        }

        Ok(form)
    }
}
