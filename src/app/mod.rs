// SPDX-License-Identifier: GPL-3.0-only

//! User-facing application surface
//!
//! Wires the platform providers into a camera session, the capture
//! orchestrator and the handoff dispatcher, and routes user [`Message`]s to
//! the matching handler.

mod handlers;
mod state;

pub use state::{AppModel, Event, Message};

use crate::backends::Platform;
use crate::backends::camera::{BoundCamera, CameraSession};
use crate::config::Config;
use crate::errors::AppError;
use crate::overlays::OverlaySelection;
use crate::pipelines::handoff::HandoffDispatcher;
use crate::pipelines::photo::{CaptureOrchestrator, LastPhotoSlot};
use std::sync::{Arc, Mutex};
use tracing::info;

impl AppModel {
    /// Build an app session on top of `platform`
    pub fn new(config: Config, platform: Platform) -> Self {
        let session = Arc::new(CameraSession::new(
            platform.camera,
            config.target_aspect_ratio,
            config.aspect_ratio_tolerance,
        ));
        let orchestrator = CaptureOrchestrator::new(
            session,
            platform.storage,
            platform.library,
            config.photo_directory(),
        )
        .with_stage_timeout(config.stage_timeout());
        let handoff = HandoffDispatcher::new(
            orchestrator.last_photo(),
            platform.launcher,
            config.file_provider_authority.clone(),
        );

        Self {
            config,
            overlays: Mutex::new(OverlaySelection::new()),
            orchestrator,
            handoff,
        }
    }

    /// Bind the configured camera and wait until it is ready
    pub async fn start(&self) -> Result<BoundCamera, AppError> {
        let session = self.session();
        session.bind(self.config.facing).await?;
        let bound = session.wait_ready().await?;
        info!(device = %bound.device.name, format = %bound.format, "App session started");
        Ok(bound)
    }

    /// Handle one user action
    pub async fn update(&self, message: Message) -> Result<Event, AppError> {
        match message {
            Message::ToggleOverlay(id) => Ok(self.handle_toggle_overlay(&id)),
            Message::Capture => self.handle_capture().await,
            Message::OpenInEditor(app) => self.handle_open_in_editor(app).await,
        }
    }

    pub fn session(&self) -> &Arc<CameraSession> {
        self.orchestrator.session()
    }

    pub fn last_photo(&self) -> LastPhotoSlot {
        self.orchestrator.last_photo()
    }
}
