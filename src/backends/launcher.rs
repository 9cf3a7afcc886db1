// SPDX-License-Identifier: GPL-3.0-only

//! Launching external applications with a shared photo

use crate::errors::LaunchFailure;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Scoped reference to a single file handed to another application
///
/// The receiving app gets read access to this file only, not to the
/// directory it lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentReference {
    /// `content://<authority>/<path>`
    pub uri: String,
    /// File the reference resolves to
    pub path: PathBuf,
    /// MIME hint for the receiver
    pub mime_type: String,
}

impl ContentReference {
    /// Build a reference for `path` served by the provider `authority`
    pub fn for_file(authority: &str, path: &Path, mime_type: &str) -> Self {
        let path_str = path.to_string_lossy();
        let uri = format!(
            "content://{}/{}",
            authority,
            path_str.trim_start_matches('/')
        );
        Self {
            uri,
            path: path.to_path_buf(),
            mime_type: mime_type.to_string(),
        }
    }
}

/// Platform inter-application launch primitive
#[async_trait]
pub trait AppLauncher: Send + Sync {
    /// Open `content` in the application identified by `target_app`
    async fn launch(&self, target_app: &str, content: &ContentReference)
    -> Result<(), LaunchFailure>;
}

/// Desktop launcher built on the system opener
///
/// Desktops have no content provider to resolve `content://` URIs, so the
/// editor receives the plain file path from [`ContentReference::path`]. The
/// URI is only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopLauncher;

#[async_trait]
impl AppLauncher for DesktopLauncher {
    async fn launch(
        &self,
        target_app: &str,
        content: &ContentReference,
    ) -> Result<(), LaunchFailure> {
        info!(app = target_app, uri = %content.uri, "Launching editor");

        match open::with_detached(&content.path, target_app) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                error!(app = target_app, "Editor is not installed");
                Err(LaunchFailure::NotInstalled)
            }
            Err(e) => {
                error!(app = target_app, error = %e, "Failed to launch editor");
                Err(LaunchFailure::Rejected(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_reference_contains_exact_path() {
        let path = Path::new("/home/user/Pictures/composing-camera/photo_42.jpg");
        let reference =
            ContentReference::for_file("com.composingcam.fileprovider", path, "image/*");

        assert_eq!(
            reference.uri,
            "content://com.composingcam.fileprovider/home/user/Pictures/composing-camera/photo_42.jpg"
        );
        assert!(reference.uri.contains(path.to_str().unwrap()));
        assert_eq!(reference.path, path);
        assert_eq!(reference.mime_type, "image/*");
    }
}
