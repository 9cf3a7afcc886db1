// SPDX-License-Identifier: GPL-3.0-only

//! Message handlers for the application
//!
//! - `capture`: Photo capture
//! - `system`: Editor handoff
//! - `ui`: Overlay toggles

mod capture;
mod system;
mod ui;
