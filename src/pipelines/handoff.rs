// SPDX-License-Identifier: GPL-3.0-only

//! Editor handoff
//!
//! Opens the session's last photo in an external editor through a scoped
//! content reference.

use crate::backends::launcher::{AppLauncher, ContentReference};
use crate::constants::PHOTO_MIME_TYPE;
use crate::errors::{HandoffError, LaunchFailure};
use crate::pipelines::photo::LastPhotoSlot;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Launches external editors on the last photo
pub struct HandoffDispatcher {
    last_photo: LastPhotoSlot,
    launcher: Arc<dyn AppLauncher>,
    authority: String,
}

impl HandoffDispatcher {
    /// # Arguments
    /// * `last_photo` - The orchestrator's last photo slot
    /// * `launcher` - Platform launch primitive
    /// * `authority` - Content provider authority for shared files
    pub fn new(
        last_photo: LastPhotoSlot,
        launcher: Arc<dyn AppLauncher>,
        authority: impl Into<String>,
    ) -> Self {
        Self {
            last_photo,
            launcher,
            authority: authority.into(),
        }
    }

    /// Open the last persisted photo in `target_app`
    ///
    /// # Returns
    /// * `Ok(ContentReference)` - What was handed to the editor
    /// * `Err(HandoffError::NoPhotoAvailable)` - Nothing persisted yet
    /// * `Err(HandoffError::Launch)` - The editor could not be started
    pub async fn open_last_photo_in_editor(
        &self,
        target_app: &str,
    ) -> Result<ContentReference, HandoffError> {
        let Some(photo) = self.last_photo.get() else {
            info!("No photo available to open");
            return Err(HandoffError::NoPhotoAvailable);
        };

        let content =
            ContentReference::for_file(&self.authority, &photo.durable_path, PHOTO_MIME_TYPE);

        match self.launcher.launch(target_app, &content).await {
            Ok(()) => {
                info!(app = target_app, uri = %content.uri, "Opened photo in editor");
                Ok(content)
            }
            Err(reason) => {
                match &reason {
                    LaunchFailure::NotInstalled => {
                        warn!(app = target_app, "Editor not installed")
                    }
                    LaunchFailure::Rejected(msg) => {
                        error!(app = target_app, error = %msg, "Error opening editor")
                    }
                }
                Err(HandoffError::Launch {
                    target: target_app.to_string(),
                    reason,
                })
            }
        }
    }
}
