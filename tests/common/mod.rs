// SPDX-License-Identifier: GPL-3.0-only

//! Scripted platform providers shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use composing_camera::Platform;
use composing_camera::backends::camera::{
    BackendError, BackendResult, CameraBackend, CameraDevice, CameraFormat, Facing,
};
use composing_camera::backends::launcher::{AppLauncher, ContentReference};
use composing_camera::backends::library::IndexedLibrary;
use composing_camera::backends::permission::Unrestricted;
use composing_camera::errors::LaunchFailure;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Back-facing camera whose captures can be held or faulted
pub struct ScriptedCamera {
    spool: PathBuf,
    hold: AtomicBool,
    disconnect: AtomicBool,
    captures: AtomicUsize,
    pub entered: Notify,
    pub release: Notify,
}

impl ScriptedCamera {
    pub fn new(spool: &Path) -> Arc<Self> {
        std::fs::create_dir_all(spool).unwrap();
        Arc::new(Self {
            spool: spool.to_path_buf(),
            hold: AtomicBool::new(false),
            disconnect: AtomicBool::new(false),
            captures: AtomicUsize::new(0),
            entered: Notify::new(),
            release: Notify::new(),
        })
    }

    /// Park the next captures until `release` is notified
    pub fn hold(&self, on: bool) {
        self.hold.store(on, Ordering::SeqCst);
    }

    /// Make the next capture report a lost device
    pub fn disconnect(&self) {
        self.disconnect.store(true, Ordering::SeqCst);
    }

    pub fn captures(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CameraBackend for ScriptedCamera {
    fn enumerate_cameras(&self) -> Vec<CameraDevice> {
        vec![CameraDevice {
            id: "scripted:0".to_string(),
            name: "Scripted Rear".to_string(),
            facing: Facing::Back,
        }]
    }

    fn get_formats(&self, _device: &CameraDevice) -> Vec<CameraFormat> {
        vec![CameraFormat::new(1920, 1080), CameraFormat::new(4500, 3000)]
    }

    async fn initialize(
        &self,
        _device: &CameraDevice,
        _format: &CameraFormat,
    ) -> BackendResult<()> {
        Ok(())
    }

    async fn capture_photo(&self) -> BackendResult<PathBuf> {
        let n = self.captures.fetch_add(1, Ordering::SeqCst);

        if self.hold.load(Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        if self.disconnect.swap(false, Ordering::SeqCst) {
            return Err(BackendError::Disconnected("sensor unplugged".to_string()));
        }

        let path = self.spool.join(format!("transient_{}.jpg", n));
        tokio::fs::write(&path, b"scripted jpeg").await?;
        Ok(path)
    }

    fn backend_name(&self) -> &'static str {
        "scripted"
    }
}

/// Launcher that records every handoff instead of starting anything
#[derive(Default)]
pub struct RecordingLauncher {
    launches: Mutex<Vec<(String, ContentReference)>>,
}

impl RecordingLauncher {
    pub fn launches(&self) -> Vec<(String, ContentReference)> {
        self.launches.lock().unwrap().clone()
    }
}

#[async_trait]
impl AppLauncher for RecordingLauncher {
    async fn launch(
        &self,
        target_app: &str,
        content: &ContentReference,
    ) -> Result<(), LaunchFailure> {
        self.launches
            .lock()
            .unwrap()
            .push((target_app.to_string(), content.clone()));
        Ok(())
    }
}

/// Launcher for a device where no editor is installed
pub struct MissingEditor;

#[async_trait]
impl AppLauncher for MissingEditor {
    async fn launch(
        &self,
        _target_app: &str,
        _content: &ContentReference,
    ) -> Result<(), LaunchFailure> {
        Err(LaunchFailure::NotInstalled)
    }
}

/// Unrestricted storage with a file-indexed library in `photo_dir`
pub fn platform(
    camera: Arc<dyn CameraBackend>,
    launcher: Arc<dyn AppLauncher>,
    photo_dir: &Path,
) -> Platform {
    Platform {
        camera,
        storage: Arc::new(Unrestricted),
        library: Arc::new(IndexedLibrary::in_directory(photo_dir)),
        launcher,
    }
}

/// Write a small solid JPEG to use as a virtual camera source
pub fn write_source_image(path: &Path, width: u32, height: u32) {
    image::RgbImage::from_pixel(width, height, image::Rgb([90, 140, 200]))
        .save(path)
        .unwrap();
}
