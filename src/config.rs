// SPDX-License-Identifier: GPL-3.0-only

use crate::backends::camera::Facing;
use crate::constants;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for one app session
///
/// Nothing here is written to disk; the CLI overrides fields per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Folder under the Pictures directory where photos are persisted
    pub save_folder_name: String,
    /// Explicit photo directory, overriding `save_folder_name`
    pub photo_directory: Option<PathBuf>,
    /// Camera facing bound at startup
    pub facing: Facing,
    /// Preferred capture aspect ratio (width / height)
    pub target_aspect_ratio: f64,
    /// Accepted deviation from `target_aspect_ratio`
    pub aspect_ratio_tolerance: f64,
    /// Content provider authority for shared photos
    pub file_provider_authority: String,
    /// Editor used when "open in editor" names no app
    pub editor_app: String,
    /// Bound on each capture/persist stage in milliseconds (None waits forever)
    pub stage_timeout_ms: Option<u64>,
}

impl Config {
    /// Directory photos are persisted into
    pub fn photo_directory(&self) -> PathBuf {
        self.photo_directory
            .clone()
            .unwrap_or_else(|| crate::storage::get_photo_directory(&self.save_folder_name))
    }

    pub fn stage_timeout(&self) -> Option<Duration> {
        self.stage_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_folder_name: constants::DEFAULT_PHOTO_FOLDER.to_string(),
            photo_directory: None,
            facing: Facing::Back,
            target_aspect_ratio: constants::TARGET_ASPECT_RATIO,
            aspect_ratio_tolerance: constants::ASPECT_RATIO_TOLERANCE,
            file_provider_authority: constants::FILE_PROVIDER_AUTHORITY.to_string(),
            editor_app: constants::DEFAULT_EDITOR_APP.to_string(),
            stage_timeout_ms: Some(constants::DEFAULT_STAGE_TIMEOUT.as_millis() as u64),
        }
    }
}
