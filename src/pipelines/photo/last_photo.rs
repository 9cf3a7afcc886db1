// SPDX-License-Identifier: GPL-3.0-only

//! Most recent persisted photo of a session

use super::gallery::PersistedPhoto;
use std::sync::{Arc, RwLock};

/// Shared "last photo" slot
///
/// Owned by the capture orchestrator and cloned into whoever needs to read
/// it. Starts empty; every successful persist overwrites it whole.
#[derive(Debug, Clone, Default)]
pub struct LastPhotoSlot {
    inner: Arc<RwLock<Option<PersistedPhoto>>>,
}

impl LastPhotoSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<PersistedPhoto> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the current photo, returning the previous one
    pub fn replace(&self, photo: PersistedPhoto) -> Option<PersistedPhoto> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .replace(photo)
    }

    pub fn is_empty(&self) -> bool {
        self.get().is_none()
    }
}
