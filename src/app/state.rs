// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::backends::launcher::ContentReference;
use crate::config::Config;
use crate::overlays::OverlaySelection;
use crate::pipelines::handoff::HandoffDispatcher;
use crate::pipelines::photo::{CaptureOrchestrator, PersistedPhoto};
use std::collections::HashSet;
use std::sync::Mutex;

/// User actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Flip a composition guide on or off
    ToggleOverlay(String),
    /// Take a photo
    Capture,
    /// Open the last photo in an editor (`None` uses the configured editor)
    OpenInEditor(Option<String>),
}

/// Outcome of a handled [`Message`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Active overlays after a toggle
    OverlaysChanged(HashSet<&'static str>),
    /// A photo was captured and persisted
    PhotoSaved(PersistedPhoto),
    /// The editor was launched with this reference
    EditorOpened(ContentReference),
}

/// The application model
///
/// Overlay state is independent of the capture pipeline, so toggles are
/// served even while a capture is in flight.
pub struct AppModel {
    /// Configuration this session was started with
    pub config: Config,
    pub(crate) overlays: Mutex<OverlaySelection>,
    pub(crate) orchestrator: CaptureOrchestrator,
    pub(crate) handoff: HandoffDispatcher,
}
