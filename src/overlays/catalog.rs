// SPDX-License-Identifier: GPL-3.0-only

//! Built-in overlay registry

use rust_embed::RustEmbed;
use std::borrow::Cow;

#[derive(RustEmbed)]
#[folder = "assets/overlays/"]
struct OverlayAssets;

/// A composition guide the viewfinder can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayDescriptor {
    /// Stable identifier used by toggles
    pub id: &'static str,
    /// Menu label
    pub label: &'static str,
    /// Bundled guide image, relative to the overlay asset folder
    pub asset_ref: &'static str,
}

impl OverlayDescriptor {
    /// Raw bytes of the bundled guide image
    pub fn asset(&self) -> Option<Cow<'static, [u8]>> {
        OverlayAssets::get(self.asset_ref).map(|file| file.data)
    }
}

/// Every overlay shipped in this build, in menu order
const OVERLAYS: &[OverlayDescriptor] = &[
    OverlayDescriptor {
        id: "ruleOfThirds",
        label: "Rule of Thirds",
        asset_ref: "ruleofthirds.svg",
    },
    OverlayDescriptor {
        id: "leftSpiral",
        label: "Left Spiral",
        asset_ref: "spiral_left.svg",
    },
    OverlayDescriptor {
        id: "rightSpiral",
        label: "Right Spiral",
        asset_ref: "spiral_right.svg",
    },
    OverlayDescriptor {
        id: "goldenRatio",
        label: "Golden Ratio",
        asset_ref: "golden_ratio.svg",
    },
    OverlayDescriptor {
        id: "goldenTriangle",
        label: "Golden Triangle",
        asset_ref: "golden_triangle.svg",
    },
    OverlayDescriptor {
        id: "diagonal",
        label: "Diagonal",
        asset_ref: "diagonal.svg",
    },
];

/// All overlays in declared order
pub fn list_overlays() -> &'static [OverlayDescriptor] {
    OVERLAYS
}

/// Look up an overlay by id
pub fn find_overlay(id: &str) -> Option<&'static OverlayDescriptor> {
    OVERLAYS.iter().find(|overlay| overlay.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_order_is_declared_order() {
        let ids: Vec<_> = list_overlays().iter().map(|o| o.id).collect();
        assert_eq!(
            ids,
            [
                "ruleOfThirds",
                "leftSpiral",
                "rightSpiral",
                "goldenRatio",
                "goldenTriangle",
                "diagonal"
            ]
        );
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = list_overlays().iter().map(|o| o.id).collect();
        assert_eq!(ids.len(), list_overlays().len());
    }

    #[test]
    fn test_every_overlay_has_an_asset() {
        for overlay in list_overlays() {
            let asset = overlay.asset();
            assert!(asset.is_some(), "Missing asset for {}", overlay.id);
            assert!(asset.unwrap().starts_with(b"<svg"));
        }
    }

    #[test]
    fn test_find_overlay() {
        assert_eq!(find_overlay("diagonal").map(|o| o.label), Some("Diagonal"));
        assert!(find_overlay("centerCircle").is_none());
    }
}
