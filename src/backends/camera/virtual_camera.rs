// SPDX-License-Identifier: GPL-3.0-only

//! File-backed virtual camera
//!
//! Serves a still image as if it came off a sensor. Each capture writes a
//! fresh JPEG into a spool directory, mimicking the transient file a real
//! camera stack hands back.

use super::CameraBackend;
use super::types::*;
use crate::constants::{file_formats, virtual_camera as vc};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// Virtual camera exposing one back and one front device
pub struct VirtualCamera {
    source: PathBuf,
    source_format: CameraFormat,
    spool_dir: PathBuf,
    active: Mutex<Option<(CameraDevice, CameraFormat)>>,
}

impl VirtualCamera {
    /// Create a virtual camera spooling into the system temp directory
    pub fn from_source(source: impl Into<PathBuf>) -> BackendResult<Self> {
        Self::new(source, std::env::temp_dir().join(vc::SPOOL_DIR))
    }

    /// Create a virtual camera from a still image
    ///
    /// # Arguments
    /// * `source` - Image served for every capture
    /// * `spool_dir` - Where transient captures are written
    pub fn new(source: impl Into<PathBuf>, spool_dir: impl Into<PathBuf>) -> BackendResult<Self> {
        let source = source.into();

        if !is_supported_source(&source) {
            return Err(BackendError::NotAvailable(format!(
                "Unsupported source image: {}",
                source.display()
            )));
        }

        let (width, height) = image::image_dimensions(&source).map_err(|e| {
            BackendError::NotAvailable(format!(
                "Failed to read source image '{}': {}",
                source.display(),
                e
            ))
        })?;

        info!(path = %source.display(), width, height, "Virtual camera source loaded");

        Ok(Self {
            source,
            source_format: CameraFormat::new(width, height),
            spool_dir: spool_dir.into(),
            active: Mutex::new(None),
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    fn active(&self) -> Option<(CameraDevice, CameraFormat)> {
        self.active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

fn is_supported_source(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(file_formats::is_image_extension)
}

#[async_trait]
impl CameraBackend for VirtualCamera {
    fn enumerate_cameras(&self) -> Vec<CameraDevice> {
        vec![
            CameraDevice {
                id: "virtual:back".to_string(),
                name: "Virtual Camera (back)".to_string(),
                facing: Facing::Back,
            },
            CameraDevice {
                id: "virtual:front".to_string(),
                name: "Virtual Camera (front)".to_string(),
                facing: Facing::Front,
            },
        ]
    }

    fn get_formats(&self, _device: &CameraDevice) -> Vec<CameraFormat> {
        let mut formats = vec![self.source_format];
        for &(width, height) in vc::SENSOR_MODES {
            let format = CameraFormat::new(width, height);
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        formats
    }

    async fn initialize(
        &self,
        device: &CameraDevice,
        format: &CameraFormat,
    ) -> BackendResult<()> {
        tokio::fs::metadata(&self.source).await.map_err(|e| {
            BackendError::InitializationFailed(format!(
                "Source image '{}' unavailable: {}",
                self.source.display(),
                e
            ))
        })?;
        tokio::fs::create_dir_all(&self.spool_dir).await.map_err(|e| {
            BackendError::InitializationFailed(format!(
                "Failed to create spool directory '{}': {}",
                self.spool_dir.display(),
                e
            ))
        })?;

        *self
            .active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some((device.clone(), *format));

        info!(device = %device.name, format = %format, "Virtual camera initialized");
        Ok(())
    }

    async fn capture_photo(&self) -> BackendResult<PathBuf> {
        let (device, _format) = self.active().ok_or(BackendError::NotInitialized)?;

        let target = self
            .spool_dir
            .join(format!("capture_{}.jpg", uuid::Uuid::new_v4()));
        let source = self.source.clone();
        let already_jpeg = source
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(file_formats::is_jpeg_extension);

        if already_jpeg {
            tokio::fs::copy(&source, &target).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    BackendError::Disconnected(format!("Source image vanished: {}", e))
                } else {
                    BackendError::CaptureFailed(e.to_string())
                }
            })?;
        } else {
            // Re-encode so the transient file is always JPEG
            let target_clone = target.clone();
            tokio::task::spawn_blocking(move || {
                let img = image::open(&source)
                    .map_err(|e| BackendError::CaptureFailed(format!("Decode failed: {}", e)))?;
                img.to_rgb8()
                    .save_with_format(&target_clone, image::ImageFormat::Jpeg)
                    .map_err(|e| BackendError::CaptureFailed(format!("Encode failed: {}", e)))
            })
            .await
            .map_err(|e| BackendError::CaptureFailed(format!("Capture task error: {}", e)))??;
        }

        debug!(device = %device.name, path = %target.display(), "Virtual capture written");
        Ok(target)
    }

    fn backend_name(&self) -> &'static str {
        "virtual"
    }
}
