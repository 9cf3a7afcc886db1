// SPDX-License-Identifier: GPL-3.0-only

//! Capture format selection

use super::types::CameraFormat;
use tracing::{info, warn};

/// Select the capture format for photos
///
/// Formats whose width/height ratio lies within `tolerance` of `target_ratio`
/// win, largest resolution first. When nothing matches, the format with the
/// closest ratio is used instead (again preferring the larger resolution on
/// ties), so binding never fails just because the sensor lacks the ratio.
pub fn select_photo_format(
    formats: &[CameraFormat],
    target_ratio: f64,
    tolerance: f64,
) -> Option<CameraFormat> {
    let deviation = |format: &CameraFormat| (format.aspect_ratio() - target_ratio).abs();

    let matching = formats
        .iter()
        .filter(|f| deviation(f) <= tolerance)
        .max_by_key(|f| f.pixels());

    if let Some(format) = matching {
        info!(format = %format, target_ratio, "Selected format matching target aspect ratio");
        return Some(*format);
    }

    let closest = formats.iter().min_by(|a, b| {
        deviation(a)
            .total_cmp(&deviation(b))
            .then_with(|| b.pixels().cmp(&a.pixels()))
    })?;

    warn!(
        format = %closest,
        ratio = closest.aspect_ratio(),
        target_ratio,
        "No format within aspect ratio tolerance, using closest"
    );
    Some(*closest)
}
