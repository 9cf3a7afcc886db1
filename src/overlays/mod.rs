// SPDX-License-Identifier: GPL-3.0-only

//! Composition guide overlays
//!
//! The [`catalog`] is fixed at build time; the [`selection`] tracks which
//! guides the viewfinder currently draws.

pub mod catalog;
pub mod selection;

pub use catalog::{OverlayDescriptor, find_overlay, list_overlays};
pub use selection::OverlaySelection;
