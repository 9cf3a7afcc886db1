// SPDX-License-Identifier: GPL-3.0-only

//! Capture orchestration
//!
//! One "take photo" transaction:
//!
//! ```text
//! Ready? → CameraSession::capture → GalleryPersistence::persist → last photo
//! ```
//!
//! Every failure comes back to the caller as a [`PipelineError`]; nothing is
//! retried automatically.

pub mod gallery;
pub mod gate;
pub mod last_photo;

pub use gallery::{GalleryPersistence, PersistedPhoto};
pub use gate::CapabilityGate;
pub use last_photo::LastPhotoSlot;

use crate::backends::camera::CameraSession;
use crate::backends::library::PhotoLibrary;
use crate::backends::permission::StorageCapability;
use crate::errors::{CaptureError, ErrorKind, PipelineError, PipelineResult};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Drives capture → persist for one camera session
pub struct CaptureOrchestrator {
    session: Arc<CameraSession>,
    gallery: GalleryPersistence,
    last_photo: LastPhotoSlot,
    stage_timeout: Option<Duration>,
}

impl CaptureOrchestrator {
    /// # Arguments
    /// * `session` - Camera session captures are taken from
    /// * `storage` - Storage permission provider
    /// * `library` - Photo library persisted photos are registered with
    /// * `photo_dir` - Durable photo directory
    pub fn new(
        session: Arc<CameraSession>,
        storage: Arc<dyn StorageCapability>,
        library: Arc<dyn PhotoLibrary>,
        photo_dir: PathBuf,
    ) -> Self {
        let last_photo = LastPhotoSlot::new();
        let gallery = GalleryPersistence::new(
            CapabilityGate::new(storage),
            library,
            photo_dir,
            last_photo.clone(),
        );

        Self {
            session,
            gallery,
            last_photo,
            stage_timeout: None,
        }
    }

    /// Bound each stage; `None` waits as long as the platform takes
    pub fn with_stage_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.stage_timeout = timeout;
        self
    }

    pub fn session(&self) -> &Arc<CameraSession> {
        &self.session
    }

    pub fn gallery(&self) -> &GalleryPersistence {
        &self.gallery
    }

    /// Handle to the session's last photo, for the handoff dispatcher
    pub fn last_photo(&self) -> LastPhotoSlot {
        self.last_photo.clone()
    }

    /// Capture a photo and persist it to the gallery
    ///
    /// On success the returned photo is already the session's last photo.
    pub async fn take_photo(&self) -> PipelineResult<PersistedPhoto> {
        if !self.session.is_ready() {
            warn!(state = %self.session.state(), "Camera not ready yet");
            return Err(CaptureError::NotReady.into());
        }

        let result = async {
            let captured = bounded("capture", self.stage_timeout, self.session.capture()).await?;
            info!(path = %captured.transient_path.display(), "Photo captured");
            bounded("persist", self.stage_timeout, self.gallery.persist(&captured)).await
        }
        .await;

        match &result {
            Ok(photo) => info!(path = %photo.durable_path.display(), "Capture complete"),
            Err(e) => match e.kind() {
                ErrorKind::PermissionDenied | ErrorKind::Busy | ErrorKind::NotReady => {
                    warn!(error = %e, "Capture not completed")
                }
                _ => error!(error = %e, "Capture failed"),
            },
        }
        result
    }
}

/// Run a stage, optionally bounded by a timeout
async fn bounded<T, E>(
    stage: &'static str,
    limit: Option<Duration>,
    stage_future: impl Future<Output = Result<T, E>>,
) -> PipelineResult<T>
where
    PipelineError: From<E>,
{
    let outcome = match limit {
        Some(timeout) => tokio::time::timeout(timeout, stage_future)
            .await
            .map_err(|_| PipelineError::TimedOut { stage, timeout })?,
        None => stage_future.await,
    };
    Ok(outcome?)
}
