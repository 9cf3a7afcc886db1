// SPDX-License-Identifier: GPL-3.0-only

//! Camera backend abstraction
//!
//! ```text
//! ┌─────────────────────┐
//! │ Capture Orchestrator│
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │    CameraSession    │  ← Readiness state machine, capture gating
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ CameraBackend Trait │  ← Device access
//! └──────────┬──────────┘
//!            │
//!            ▼
//!     ┌──────────────┐
//!     │VirtualCamera │  ← File-backed implementation
//!     └──────────────┘
//! ```

pub mod format_selection;
pub mod session;
pub mod types;
pub mod virtual_camera;

pub use session::CameraSession;
pub use types::*;
pub use virtual_camera::VirtualCamera;

use async_trait::async_trait;
use std::path::PathBuf;

/// Device-level camera access
///
/// Implementations only talk to the hardware. Readiness tracking and capture
/// serialization live in [`CameraSession`].
#[async_trait]
pub trait CameraBackend: Send + Sync {
    /// Enumerate available cameras on this backend
    fn enumerate_cameras(&self) -> Vec<CameraDevice>;

    /// Capture formats supported by a device
    fn get_formats(&self, device: &CameraDevice) -> Vec<CameraFormat>;

    /// Open the device with the given format
    ///
    /// Resolves once the hardware reports it is initialized.
    async fn initialize(&self, device: &CameraDevice, format: &CameraFormat)
    -> BackendResult<()>;

    /// Take a single photo and return where the hardware wrote it
    async fn capture_photo(&self) -> BackendResult<PathBuf>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}
