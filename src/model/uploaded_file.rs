use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A file accepted by an upload route and persisted to disk.
///
/// Invariant: the original name's extension belongs to the accepting
/// route's allow-list and the size is within the route's ceiling. Nothing
/// deletes these files; retention is manual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Name supplied by the client
    pub original_name: String,
    /// Generated on-disk filename
    pub stored_name: String,
    /// Size in bytes
    pub size: u64,
    /// Storage path
    pub path: PathBuf,
}
