// SPDX-License-Identifier: GPL-3.0-only

//! Storage permission providers
//!
//! Each platform answers "may photos be written to durable storage?" its own
//! way. Providers never cache the answer; the platform is the source of truth.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Current answer of the platform for durable-storage writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user has not been asked yet
    Undetermined,
}

/// Platform storage permission API
#[async_trait]
pub trait StorageCapability: Send + Sync {
    /// Current status, without prompting
    async fn status(&self) -> PermissionStatus;

    /// Prompt the user (where the platform supports prompting)
    async fn request(&self) -> PermissionStatus;
}

/// Platforms without a storage permission model
#[derive(Debug, Clone, Copy, Default)]
pub struct Unrestricted;

#[async_trait]
impl StorageCapability for Unrestricted {
    async fn status(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn request(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }
}

/// Desktop provider: granted while the photo directory is writable
///
/// There is nothing to prompt for, so `request` re-checks the directory.
#[derive(Debug, Clone)]
pub struct DirectoryAccess {
    dir: PathBuf,
}

impl DirectoryAccess {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn check(&self) -> PermissionStatus {
        if let Err(e) = tokio::fs::create_dir_all(&self.dir).await {
            warn!(path = %self.dir.display(), error = %e, "Photo directory not creatable");
            return PermissionStatus::Denied;
        }

        match tokio::fs::metadata(&self.dir).await {
            Ok(meta) if meta.is_dir() && !meta.permissions().readonly() => {
                debug!(path = %self.dir.display(), "Photo directory writable");
                PermissionStatus::Granted
            }
            Ok(_) => PermissionStatus::Denied,
            Err(e) => {
                warn!(path = %self.dir.display(), error = %e, "Photo directory not accessible");
                PermissionStatus::Denied
            }
        }
    }
}

#[async_trait]
impl StorageCapability for DirectoryAccess {
    async fn status(&self) -> PermissionStatus {
        self.check().await
    }

    async fn request(&self) -> PermissionStatus {
        self.check().await
    }
}
