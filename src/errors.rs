// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the capture-and-handoff pipeline
//!
//! Each stage reports its own error enum. [`PipelineError`] is what the
//! capture orchestrator returns, and [`ErrorKind`] flattens any of them into
//! the user-facing failure taxonomy.

use crate::backends::camera::Facing;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for the capture orchestrator
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Flat classification of every failure a caller can observe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    PermissionDenied,
    NotReady,
    Busy,
    CaptureError,
    CopyError,
    RegistrationError,
    NoPhotoAvailable,
    LaunchError,
    TimedOut,
}

/// Camera binding errors
#[derive(Debug, Clone, Error)]
pub enum BindError {
    /// No device with the requested facing was enumerated
    #[error("No {0} camera available")]
    NoDevice(Facing),
    /// The device exposes no capture formats at all
    #[error("Camera {0} exposes no capture formats")]
    NoFormat(String),
    /// Another bind is still waiting for the hardware
    #[error("Camera binding already in progress")]
    AlreadyBinding,
    /// Hardware initialization reported a fault
    #[error("Camera initialization failed: {0}")]
    Initialization(String),
}

/// Photo capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    /// Session is not in the Ready state
    #[error("Camera is not ready")]
    NotReady,
    /// Another capture is in flight on this session
    #[error("A capture is already in progress")]
    Busy,
    /// The hardware failed to produce a photo
    #[error("Capture failed: {0}")]
    Hardware(String),
}

impl CaptureError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CaptureError::NotReady => ErrorKind::NotReady,
            CaptureError::Busy => ErrorKind::Busy,
            CaptureError::Hardware(_) => ErrorKind::CaptureError,
        }
    }
}

/// Gallery persistence errors
#[derive(Debug, Error)]
pub enum PersistError {
    /// Storage write permission was not granted
    #[error("Storage permission not granted")]
    PermissionDenied,
    /// Copying the transient photo to durable storage failed
    #[error("Failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The durable file exists but the photo library refused it
    #[error("Failed to register {} with the photo library: {reason}", .path.display())]
    Registration { path: PathBuf, reason: String },
}

impl PersistError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PersistError::PermissionDenied => ErrorKind::PermissionDenied,
            PersistError::Copy { .. } => ErrorKind::CopyError,
            PersistError::Registration { .. } => ErrorKind::RegistrationError,
        }
    }
}

/// Why an external application could not be launched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchFailure {
    /// The target application is not installed
    #[error("application is not installed")]
    NotInstalled,
    /// The OS refused or failed the launch
    #[error("{0}")]
    Rejected(String),
}

/// Editor handoff errors
#[derive(Debug, Clone, Error)]
pub enum HandoffError {
    /// No photo has been persisted in this session yet
    #[error("No photo available to open")]
    NoPhotoAvailable,
    /// Launching the editor failed
    #[error("Failed to open {target}: {reason}")]
    Launch {
        target: String,
        reason: LaunchFailure,
    },
}

impl HandoffError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HandoffError::NoPhotoAvailable => ErrorKind::NoPhotoAvailable,
            HandoffError::Launch { .. } => ErrorKind::LaunchError,
        }
    }
}

/// Errors surfaced by one "take photo" transaction
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    /// A stage did not resolve within the configured bound
    #[error("{stage} timed out after {timeout:?}")]
    TimedOut {
        stage: &'static str,
        timeout: Duration,
    },
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Capture(e) => e.kind(),
            PipelineError::Persist(e) => e.kind(),
            PipelineError::TimedOut { .. } => ErrorKind::TimedOut,
        }
    }
}

/// Errors surfaced to the user-facing surface
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Bind(#[from] BindError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Handoff(#[from] HandoffError),
}

impl AppError {
    /// Failure kind for capture and handoff errors; bind errors have none
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            AppError::Bind(_) => None,
            AppError::Pipeline(e) => Some(e.kind()),
            AppError::Handoff(e) => Some(e.kind()),
        }
    }
}
