// SPDX-License-Identifier: GPL-3.0-only

//! Photo library registration
//!
//! Registering a durable file is what makes it visible as a gallery photo.

use crate::constants::photo_files;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Opaque handle the photo library assigned to a registered photo
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GalleryRef(String);

impl GalleryRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GalleryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Platform photo library
#[async_trait]
pub trait PhotoLibrary: Send + Sync {
    /// Register a durable photo file
    ///
    /// # Returns
    /// * `Ok(GalleryRef)` - Handle of the registered photo
    /// * `Err(String)` - Why the library refused it
    async fn register(&self, path: &Path) -> Result<GalleryRef, String>;
}

/// One line of the library index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub gallery_ref: GalleryRef,
    pub path: PathBuf,
    /// RFC 3339 registration time
    pub registered_at: String,
}

/// Library backed by a JSON-lines index file next to the photos
#[derive(Debug, Clone)]
pub struct IndexedLibrary {
    index_path: PathBuf,
}

impl IndexedLibrary {
    /// Library whose index lives inside `photo_dir`
    pub fn in_directory(photo_dir: &Path) -> Self {
        Self::new(photo_dir.join(photo_files::LIBRARY_INDEX))
    }

    pub fn new(index_path: impl Into<PathBuf>) -> Self {
        Self {
            index_path: index_path.into(),
        }
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// All registered photos, oldest first
    pub async fn entries(&self) -> Result<Vec<LibraryEntry>, String> {
        let content = match tokio::fs::read_to_string(&self.index_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(format!("Failed to read library index: {}", e)),
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .map_err(|e| format!("Corrupt library index entry: {}", e))
            })
            .collect()
    }
}

#[async_trait]
impl PhotoLibrary for IndexedLibrary {
    async fn register(&self, path: &Path) -> Result<GalleryRef, String> {
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|e| format!("Photo not accessible: {}", e))?;
        if !meta.is_file() {
            return Err(format!("Not a photo file: {}", path.display()));
        }

        let entry = LibraryEntry {
            gallery_ref: GalleryRef::new(uuid::Uuid::new_v4().to_string()),
            path: path.to_path_buf(),
            registered_at: chrono::Local::now().to_rfc3339(),
        };
        let mut line = serde_json::to_string(&entry)
            .map_err(|e| format!("Failed to serialize library entry: {}", e))?;
        line.push('\n');

        let mut index = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.index_path)
            .await
            .map_err(|e| format!("Failed to open library index: {}", e))?;
        index
            .write_all(line.as_bytes())
            .await
            .map_err(|e| format!("Failed to write library index: {}", e))?;
        index
            .flush()
            .await
            .map_err(|e| format!("Failed to write library index: {}", e))?;

        info!(path = %path.display(), gallery_ref = %entry.gallery_ref, "Photo registered with library");
        Ok(entry.gallery_ref)
    }
}
