// SPDX-License-Identifier: GPL-3.0-only

//! Capture operations handlers

use crate::app::state::{AppModel, Event};
use crate::errors::AppError;
use tracing::info;

impl AppModel {
    pub(crate) async fn handle_capture(&self) -> Result<Event, AppError> {
        info!(overlays = ?self.active_overlay_ids(), "Capture requested");
        let photo = self.orchestrator.take_photo().await?;
        Ok(Event::PhotoSaved(photo))
    }
}
