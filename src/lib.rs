// SPDX-License-Identifier: GPL-3.0-only

//! Composing Camera - frame shots with composition guides, capture them,
//! and hand them to an editor
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`overlays`]: Composition guide catalog and the active selection
//! - [`backends`]: Camera, storage permission, photo library and launcher providers
//! - [`pipelines`]: Capture orchestration, gallery persistence and editor handoff
//! - [`app`]: User-facing message handling
//! - [`config`]: Session configuration
//! - [`storage`]: Photo directory and durable file naming
//!
//! # Example
//!
//! ```ignore
//! let platform = Platform::desktop("scene.jpg", &config.photo_directory())?;
//! let app = AppModel::new(config, platform);
//! app.start().await?;
//! app.update(Message::ToggleOverlay("ruleOfThirds".into())).await?;
//! app.update(Message::Capture).await?;
//! app.update(Message::OpenInEditor(None)).await?;
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod overlays;
pub mod pipelines;
pub mod storage;

// Re-export commonly used types
pub use app::{AppModel, Event, Message};
pub use backends::Platform;
pub use config::Config;
pub use errors::{AppError, ErrorKind};
