// SPDX-License-Identifier: GPL-3.0-only

//! Overlay toggle handlers

use crate::app::state::{AppModel, Event};
use crate::overlays::{OverlayDescriptor, OverlaySelection};
use std::collections::HashSet;
use std::sync::MutexGuard;

impl AppModel {
    fn overlays(&self) -> MutexGuard<'_, OverlaySelection> {
        self.overlays
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn handle_toggle_overlay(&self, id: &str) -> Event {
        let mut overlays = self.overlays();
        overlays.toggle(id);
        Event::OverlaysChanged(overlays.active_set())
    }

    /// Active overlay ids
    pub fn active_overlay_ids(&self) -> HashSet<&'static str> {
        self.overlays().active_set()
    }

    /// Active overlays in the order the render pass draws them
    pub fn active_overlays(&self) -> Vec<&'static OverlayDescriptor> {
        self.overlays().active_overlays().collect()
    }
}
