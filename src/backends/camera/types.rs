// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Which side of the device a camera points to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    #[default]
    Back,
    Front,
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Facing::Back => write!(f, "back"),
            Facing::Front => write!(f, "front"),
        }
    }
}

impl FromStr for Facing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "back" | "rear" => Ok(Facing::Back),
            "front" | "selfie" => Ok(Facing::Front),
            other => Err(format!("unknown camera facing '{}'", other)),
        }
    }
}

/// Represents a camera device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    /// Backend-specific device identifier
    pub id: String,
    pub name: String,
    pub facing: Facing,
}

/// Capture resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraFormat {
    pub width: u32,
    pub height: u32,
}

impl CameraFormat {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; zero-height formats report 0
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            0.0
        } else {
            self.width as f64 / self.height as f64
        }
    }

    pub fn pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl std::fmt::Display for CameraFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Lifecycle of a camera session
///
/// ```text
/// Unbound ──bind──▶ Binding ──initialized──▶ Ready
///    ▲                 │                       │
///    └──no device──────┘        fault          │
///                      ▼                       ▼
///                    Error ◀───────────────────┘
/// ```
///
/// Error is left only through a new bind attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraSessionState {
    #[default]
    Unbound,
    Binding,
    Ready,
    Error,
}

impl std::fmt::Display for CameraSessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraSessionState::Unbound => write!(f, "unbound"),
            CameraSessionState::Binding => write!(f, "binding"),
            CameraSessionState::Ready => write!(f, "ready"),
            CameraSessionState::Error => write!(f, "error"),
        }
    }
}

/// Device and format a session is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundCamera {
    pub device: CameraDevice,
    pub format: CameraFormat,
}

/// A photo as produced by the hardware, before it is persisted
///
/// The transient file belongs to the platform and may disappear once the
/// photo has been handed to gallery persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPhoto {
    pub transient_path: PathBuf,
    pub captured_at: DateTime<Local>,
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// Backend is not available on this system
    #[error("Backend not available: {0}")]
    NotAvailable(String),
    /// Failed to initialize the device
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),
    /// Operation needs an initialized device
    #[error("Camera not initialized")]
    NotInitialized,
    /// Device went away; the session has to be rebound
    #[error("Camera disconnected: {0}")]
    Disconnected(String),
    /// Single capture failed, device still usable
    #[error("Capture failed: {0}")]
    CaptureFailed(String),
    /// General I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

impl BackendError {
    /// Whether this error means the device itself faulted
    pub fn is_device_fault(&self) -> bool {
        matches!(
            self,
            BackendError::Disconnected(_) | BackendError::NotInitialized
        )
    }
}

impl From<std::io::Error> for BackendError {
    fn from(err: std::io::Error) -> Self {
        BackendError::IoError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_parses_aliases() {
        assert_eq!("back".parse::<Facing>(), Ok(Facing::Back));
        assert_eq!("Rear".parse::<Facing>(), Ok(Facing::Back));
        assert_eq!("selfie".parse::<Facing>(), Ok(Facing::Front));
        assert!("side".parse::<Facing>().is_err());
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(CameraFormat::new(6000, 4000).aspect_ratio(), 1.5);
        assert_eq!(CameraFormat::new(640, 0).aspect_ratio(), 0.0);
    }
}
