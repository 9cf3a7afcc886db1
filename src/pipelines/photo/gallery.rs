// SPDX-License-Identifier: GPL-3.0-only

//! Gallery persistence
//!
//! Moves a transient capture into durable storage and registers it with the
//! photo library. The photo only becomes the session's last photo once both
//! steps succeeded.

use super::gate::CapabilityGate;
use super::last_photo::LastPhotoSlot;
use crate::backends::camera::CapturedPhoto;
use crate::backends::library::{GalleryRef, PhotoLibrary};
use crate::errors::PersistError;
use crate::storage::{create_photo_file, ensure_photo_directory};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};

/// A photo that lives in durable storage and is known to the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPhoto {
    pub durable_path: PathBuf,
    pub gallery_ref: GalleryRef,
}

/// Copies captures into the photo directory and registers them
pub struct GalleryPersistence {
    gate: CapabilityGate,
    library: Arc<dyn PhotoLibrary>,
    photo_dir: PathBuf,
    last_photo: LastPhotoSlot,
}

impl GalleryPersistence {
    /// # Arguments
    /// * `gate` - Storage permission gate checked before every write
    /// * `library` - Photo library the durable file is registered with
    /// * `photo_dir` - Durable photo directory
    /// * `last_photo` - Slot updated on full success
    pub fn new(
        gate: CapabilityGate,
        library: Arc<dyn PhotoLibrary>,
        photo_dir: PathBuf,
        last_photo: LastPhotoSlot,
    ) -> Self {
        Self {
            gate,
            library,
            photo_dir,
            last_photo,
        }
    }

    pub fn photo_dir(&self) -> &Path {
        &self.photo_dir
    }

    /// Persist a captured photo
    ///
    /// 1. Storage permission
    /// 2. Unique durable path
    /// 3. Copy
    /// 4. Library registration
    /// 5. Last photo update
    ///
    /// A failure at any step leaves the last photo untouched. After a
    /// registration failure the durable copy stays on disk.
    pub async fn persist(&self, photo: &CapturedPhoto) -> Result<PersistedPhoto, PersistError> {
        if !self.gate.ensure_storage_permission().await {
            return Err(PersistError::PermissionDenied);
        }

        let copy_error = |to: &Path, source: std::io::Error| PersistError::Copy {
            from: photo.transient_path.clone(),
            to: to.to_path_buf(),
            source,
        };

        ensure_photo_directory(&self.photo_dir)
            .await
            .map_err(|e| copy_error(&self.photo_dir, e))?;
        let (durable_path, mut durable) =
            create_photo_file(&self.photo_dir, photo.captured_at.timestamp_millis())
                .await
                .map_err(|e| copy_error(&self.photo_dir, e))?;

        if let Err(e) = copy_into(&photo.transient_path, &mut durable).await {
            error!(error = %e, from = %photo.transient_path.display(), "Error copying photo");
            drop(durable);
            if let Err(cleanup) = tokio::fs::remove_file(&durable_path).await {
                warn!(
                    path = %durable_path.display(),
                    error = %cleanup,
                    "Failed to remove partial photo"
                );
            }
            return Err(copy_error(&durable_path, e));
        }

        let gallery_ref = match self.library.register(&durable_path).await {
            Ok(gallery_ref) => gallery_ref,
            Err(reason) => {
                warn!(
                    path = %durable_path.display(),
                    reason = %reason,
                    "Photo copied but library registration failed"
                );
                return Err(PersistError::Registration {
                    path: durable_path,
                    reason,
                });
            }
        };

        let persisted = PersistedPhoto {
            durable_path,
            gallery_ref,
        };
        self.last_photo.replace(persisted.clone());

        info!(path = %persisted.durable_path.display(), "Photo saved to gallery");
        Ok(persisted)
    }
}

async fn copy_into(from: &Path, durable: &mut tokio::fs::File) -> std::io::Result<()> {
    let mut transient = tokio::fs::File::open(from).await?;
    tokio::io::copy(&mut transient, durable).await?;
    durable.flush().await?;
    durable.sync_all().await
}
