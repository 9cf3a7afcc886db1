// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! This module provides command-line functionality for:
//! - Listing composition overlays
//! - Listing cameras
//! - Taking photos and handing them to an editor

use composing_camera::backends::Platform;
use composing_camera::backends::camera::{CameraBackend, VirtualCamera};
use composing_camera::overlays::{self, OverlaySelection};
use composing_camera::{AppModel, Config, Event, Message};
use std::path::PathBuf;

/// List all overlays, marking the active ones
pub fn list_overlays(active: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    println!("Available overlays:");
    println!();
    for line in overlay_lines(active) {
        println!("{}", line);
    }

    Ok(())
}

fn overlay_lines(active: &[String]) -> Vec<String> {
    let mut selection = OverlaySelection::new();
    for id in active {
        selection.toggle(id);
    }

    overlays::list_overlays()
        .iter()
        .map(|overlay| {
            let marker = if selection.is_active(overlay.id) { "*" } else { " " };
            format!("  [{}] {:<16} {}", marker, overlay.id, overlay.label)
        })
        .collect()
}

/// List the virtual cameras served from `source`
pub fn list_cameras(source: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let camera = VirtualCamera::from_source(source)?;

    println!("Available cameras:");
    println!();
    for (index, device) in camera.enumerate_cameras().iter().enumerate() {
        println!("  [{}] {} ({})", index, device.name, device.facing);

        let formats: Vec<String> = camera
            .get_formats(device)
            .iter()
            .map(|f| f.to_string())
            .collect();
        println!("      Formats: {}", formats.join(", "));
        println!();
    }

    Ok(())
}

/// Bind, capture, persist, and optionally open the result in an editor
pub fn take_photo(
    config: Config,
    source: PathBuf,
    open: Option<Option<String>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let platform = Platform::desktop(source, &config.photo_directory())?;
    let app = AppModel::new(config, platform);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let bound = app.start().await?;
        println!("Using camera: {} ({})", bound.device.name, bound.format);

        println!("Capturing...");
        if let Event::PhotoSaved(photo) = app.update(Message::Capture).await? {
            println!("Photo saved: {}", photo.durable_path.display());
        }

        if let Some(target) = open
            && let Event::EditorOpened(content) = app.update(Message::OpenInEditor(target)).await?
        {
            println!("Opened in editor: {}", content.uri);
        }

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

/// Print the effective configuration
pub fn print_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_lines_mark_active_ids() {
        let lines = overlay_lines(&["goldenRatio".to_string(), "unknownGuide".to_string()]);

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("  [ ] ruleOfThirds"));
        assert!(lines[3].starts_with("  [*] goldenRatio"));
        assert_eq!(lines.iter().filter(|l| l.contains("[*]")).count(), 1);
    }
}
