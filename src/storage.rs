// SPDX-License-Identifier: GPL-3.0-only

//! Storage utilities for managing photo files

use crate::constants::photo_files;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::{debug, info};

/// Last stamp handed out by [`allocate_photo_path`] in this process
static LAST_STAMP: AtomicI64 = AtomicI64::new(0);

/// Get the photo save directory (~/Pictures/<folder_name>)
pub fn get_photo_directory(folder_name: &str) -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(folder_name)
}

/// Ensure a photo directory exists, creating it if necessary
pub async fn ensure_photo_directory(dir: &Path) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    debug!(path = %dir.display(), "Photo directory ready");
    Ok(())
}

/// Durable path for a photo taken at `now_ms`
///
/// Names are derived from the wall clock in milliseconds. Stamps are strictly
/// increasing across the whole process: when two requests land in the same
/// millisecond (or the clock steps backwards) the stamp is bumped past the
/// last one issued.
pub fn allocate_photo_path(dir: &Path, now_ms: i64) -> PathBuf {
    let stamp = match LAST_STAMP.fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
        Some(now_ms.max(last.saturating_add(1)))
    }) {
        Ok(last) | Err(last) => now_ms.max(last.saturating_add(1)),
    };

    dir.join(format!(
        "{}{}.{}",
        photo_files::PREFIX,
        stamp,
        photo_files::EXTENSION
    ))
}

/// Create a new, empty photo file in `dir`
///
/// Never opens an existing file: a name already taken on disk (by another
/// process, or a file left from an earlier run) is skipped for the next
/// stamp.
pub async fn create_photo_file(
    dir: &Path,
    now_ms: i64,
) -> std::io::Result<(PathBuf, tokio::fs::File)> {
    loop {
        let path = allocate_photo_path(dir, now_ms);
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => {
                info!(path = %path.display(), "Allocated durable photo path");
                return Ok((path, file));
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "Photo path taken, trying the next stamp");
            }
            Err(e) => return Err(e),
        }
    }
}
