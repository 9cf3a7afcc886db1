// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Target capture aspect ratio (width / height), 3:2 like a 35mm frame
pub const TARGET_ASPECT_RATIO: f64 = 3.0 / 2.0;

/// Accepted deviation from [`TARGET_ASPECT_RATIO`] before falling back to the
/// closest available format
pub const ASPECT_RATIO_TOLERANCE: f64 = 0.01;

/// Default upper bound for a single capture or persist stage
pub const DEFAULT_STAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Directory name under the user's Pictures directory
pub const DEFAULT_PHOTO_FOLDER: &str = "composing-camera";

/// Content provider authority used when sharing photos with other apps
pub const FILE_PROVIDER_AUTHORITY: &str = "com.composingcam.fileprovider";

/// Editor launched by "open in editor" when the user does not pick one
pub const DEFAULT_EDITOR_APP: &str = "com.niksoftware.snapseed";

/// MIME hint passed along with shared photos
pub const PHOTO_MIME_TYPE: &str = "image/*";

/// Durable photo file naming
pub mod photo_files {
    /// Prefix of every persisted photo
    pub const PREFIX: &str = "photo_";
    /// Extension of every persisted photo
    pub const EXTENSION: &str = "jpg";
    /// Library index kept next to the photos
    pub const LIBRARY_INDEX: &str = ".library.jsonl";
}

/// Image files the virtual camera accepts as a source
pub mod file_formats {
    /// Supported image file extensions
    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "webp"];

    /// Check if a file extension is a supported image format
    pub fn is_image_extension(ext: &str) -> bool {
        IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str())
    }

    /// Check if a file extension already denotes JPEG data
    pub fn is_jpeg_extension(ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "jpg" | "jpeg")
    }
}

/// Virtual camera spool settings
pub mod virtual_camera {
    /// Spool directory name under the system temp dir
    pub const SPOOL_DIR: &str = "composing-camera-spool";

    /// Sensor modes the virtual camera advertises in addition to the source
    /// image's own resolution
    pub const SENSOR_MODES: &[(u32, u32)] = &[
        (6000, 4000),
        (4032, 3024),
        (3840, 2160),
        (1920, 1080),
        (1280, 720),
    ];
}

/// Get the application version string (includes git commit hash for dev builds)
pub fn app_version() -> &'static str {
    env!("GIT_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_modes_include_a_three_by_two_mode() {
        assert!(
            virtual_camera::SENSOR_MODES.iter().any(|(w, h)| {
                (*w as f64 / *h as f64 - TARGET_ASPECT_RATIO).abs() <= ASPECT_RATIO_TOLERANCE
            })
        );
    }
}
