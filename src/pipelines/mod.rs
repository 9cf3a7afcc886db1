// SPDX-License-Identifier: GPL-3.0-only

//! Capture-and-handoff pipelines
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ CameraSession│ ──▶ │  Photo Pipeline   │ ──▶ │  Last Photo  │
//! │  (Ready)     │     │  - Capture        │     │    Slot      │
//! │              │     │  - Permission     │     │              │
//! │              │     │  - Copy           │     │              │
//! │              │     │  - Register       │     │              │
//! └──────────────┘     └───────────────────┘     └──────┬───────┘
//!                                                       │
//!                      ┌───────────────────┐            │
//!                      │ Handoff Dispatcher│ ◀──────────┘
//!                      │  - content:// ref │
//!                      │  - launch editor  │
//!                      └───────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`photo`]: Capture orchestration and gallery persistence
//! - [`handoff`]: Opening the last photo in an external editor

pub mod handoff;
pub mod photo;
