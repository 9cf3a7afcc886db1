// SPDX-License-Identifier: GPL-3.0-only

//! Set of overlays currently drawn over the viewfinder

use super::catalog::{OverlayDescriptor, find_overlay, list_overlays};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Active overlay ids
///
/// Starts empty and only changes through [`OverlaySelection::toggle`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlaySelection {
    active: HashSet<&'static str>,
}

impl OverlaySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip an overlay on or off
    ///
    /// Ids missing from the catalog are ignored.
    pub fn toggle(&mut self, id: &str) {
        let Some(overlay) = find_overlay(id) else {
            warn!(id, "Ignoring toggle for unknown overlay");
            return;
        };

        if !self.active.remove(overlay.id) {
            self.active.insert(overlay.id);
        }
        debug!(id = overlay.id, active = self.is_active(overlay.id), "Overlay toggled");
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.contains(id)
    }

    /// Snapshot of the active ids
    pub fn active_set(&self) -> HashSet<&'static str> {
        self.active.clone()
    }

    /// Active overlays in catalog order, for the render pass
    pub fn active_overlays(&self) -> impl Iterator<Item = &'static OverlayDescriptor> + '_ {
        list_overlays()
            .iter()
            .filter(|overlay| self.active.contains(overlay.id))
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_original_set() {
        let mut selection = OverlaySelection::new();
        selection.toggle("diagonal");
        let before = selection.active_set();

        selection.toggle("leftSpiral");
        selection.toggle("leftSpiral");

        assert_eq!(selection.active_set(), before);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut selection = OverlaySelection::new();
        selection.toggle("ruleOfThirds");
        let before = selection.clone();

        selection.toggle("centerCircle");

        assert_eq!(selection, before);
        assert!(!selection.is_active("centerCircle"));
    }

    #[test]
    fn test_toggle_sequence() {
        let mut selection = OverlaySelection::new();
        selection.toggle("ruleOfThirds");
        selection.toggle("goldenRatio");
        selection.toggle("ruleOfThirds");

        assert_eq!(selection.active_set(), HashSet::from(["goldenRatio"]));
    }

    #[test]
    fn test_active_overlays_follow_catalog_order() {
        let mut selection = OverlaySelection::new();
        selection.toggle("diagonal");
        selection.toggle("ruleOfThirds");

        let ids: Vec<_> = selection.active_overlays().map(|o| o.id).collect();
        assert_eq!(ids, ["ruleOfThirds", "diagonal"]);
    }
}
