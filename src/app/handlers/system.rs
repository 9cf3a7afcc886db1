// SPDX-License-Identifier: GPL-3.0-only

//! Editor handoff handlers

use crate::app::state::{AppModel, Event};
use crate::errors::AppError;

impl AppModel {
    pub(crate) async fn handle_open_in_editor(
        &self,
        target_app: Option<String>,
    ) -> Result<Event, AppError> {
        let target_app = target_app.unwrap_or_else(|| self.config.editor_app.clone());
        let content = self.handoff.open_last_photo_in_editor(&target_app).await?;
        Ok(Event::EditorOpened(content))
    }
}
