// SPDX-License-Identifier: GPL-3.0-only

//! Platform capability providers
//!
//! Everything the capture pipeline needs from the operating system sits
//! behind a trait here, so the pipeline never branches on the platform:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │        Capture pipeline / Handoff           │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                   │
//! │  ┌──────────────┐   ┌───────────────────┐   │
//! │  │    Camera    │   │ StorageCapability │   │
//! │  └──────────────┘   └───────────────────┘   │
//! │  ┌──────────────┐   ┌───────────────────┐   │
//! │  │ PhotoLibrary │   │    AppLauncher    │   │
//! │  └──────────────┘   └───────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```

pub mod camera;
pub mod launcher;
pub mod library;
pub mod permission;

use camera::{BackendResult, CameraBackend, VirtualCamera};
use launcher::{AppLauncher, DesktopLauncher};
use library::{IndexedLibrary, PhotoLibrary};
use permission::{DirectoryAccess, StorageCapability};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The set of providers one app session runs against
#[derive(Clone)]
pub struct Platform {
    pub camera: Arc<dyn CameraBackend>,
    pub storage: Arc<dyn StorageCapability>,
    pub library: Arc<dyn PhotoLibrary>,
    pub launcher: Arc<dyn AppLauncher>,
}

impl Platform {
    /// Desktop providers with a virtual camera serving `source`
    pub fn desktop(source: impl Into<PathBuf>, photo_dir: &Path) -> BackendResult<Self> {
        Ok(Self {
            camera: Arc::new(VirtualCamera::from_source(source)?),
            storage: Arc::new(DirectoryAccess::new(photo_dir)),
            library: Arc::new(IndexedLibrary::in_directory(photo_dir)),
            launcher: Arc::new(DesktopLauncher),
        })
    }
}
