// SPDX-License-Identifier: GPL-3.0-only

//! Storage permission gate

use crate::backends::permission::{PermissionStatus, StorageCapability};
use std::sync::Arc;
use tracing::{debug, info};

/// Single entry point for "may we write photos?"
///
/// Holds no state of its own: every call asks the provider, so a grant that
/// was revoked in system settings is noticed on the next capture.
#[derive(Clone)]
pub struct CapabilityGate {
    provider: Arc<dyn StorageCapability>,
}

impl CapabilityGate {
    pub fn new(provider: Arc<dyn StorageCapability>) -> Self {
        Self { provider }
    }

    /// Make sure storage writes are permitted
    ///
    /// Prompts only when the platform does not already report a grant.
    /// Denial is reported as `false`.
    pub async fn ensure_storage_permission(&self) -> bool {
        if self.provider.status().await == PermissionStatus::Granted {
            debug!("Storage permission already granted");
            return true;
        }

        let granted = self.provider.request().await == PermissionStatus::Granted;
        if !granted {
            info!("Storage permission not granted");
        }
        granted
    }
}
