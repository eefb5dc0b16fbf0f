//! Live in-memory resources backing document previews.
//!
//! A [`ResourceRegistry`] is a table of binary blobs addressed by
//! [`ResourceId`]. Each entry is owned by exactly one [`ResourceHandle`],
//! which removes it when released or dropped.

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use deepscript_core::logging::targets;

new_key_type! {
    /// Identifier of a live preview resource.
    pub struct ResourceId;
}

#[derive(Debug)]
struct ResourceEntry {
    bytes: Bytes,
    mime_type: String,
}

/// Shared table of live preview resources.
#[derive(Clone, Default)]
pub struct ResourceRegistry {
    entries: Arc<Mutex<SlotMap<ResourceId, ResourceEntry>>>,
}

impl ResourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` and return the handle that owns the entry.
    pub fn create(&self, bytes: Bytes, mime_type: impl Into<String>) -> ResourceHandle {
        let id = self.entries.lock().insert(ResourceEntry {
            bytes,
            mime_type: mime_type.into(),
        });
        tracing::debug!(target: targets::PREVIEW, ?id, "resource created");
        ResourceHandle {
            id,
            registry: self.clone(),
            released: false,
        }
    }

    /// The bytes behind `id`, if it is still live.
    pub fn resolve(&self, id: ResourceId) -> Option<Bytes> {
        self.entries.lock().get(id).map(|entry| entry.bytes.clone())
    }

    /// The MIME type behind `id`, if it is still live.
    pub fn mime_type(&self, id: ResourceId) -> Option<String> {
        self.entries.lock().get(id).map(|entry| entry.mime_type.clone())
    }

    /// Whether `id` is still live.
    pub fn contains(&self, id: ResourceId) -> bool {
        self.entries.lock().contains_key(id)
    }

    /// Number of live resources.
    pub fn live_count(&self) -> usize {
        self.entries.lock().len()
    }

    fn release(&self, id: ResourceId) {
        if self.entries.lock().remove(id).is_some() {
            tracing::debug!(target: targets::PREVIEW, ?id, "resource released");
        }
    }
}

impl std::fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceRegistry")
            .field("live", &self.live_count())
            .finish()
    }
}

/// Owner of one registry entry. The entry is removed exactly once, by
/// [`release`](Self::release) or on drop.
#[derive(Debug)]
pub struct ResourceHandle {
    id: ResourceId,
    registry: ResourceRegistry,
    released: bool,
}

impl ResourceHandle {
    /// The resource's identifier.
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// The resource's bytes.
    pub fn bytes(&self) -> Option<Bytes> {
        self.registry.resolve(self.id)
    }

    /// Remove the entry now.
    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if !self.released {
            self.released = true;
            self.registry.release(self.id);
        }
    }
}

impl Drop for ResourceHandle {
    fn drop(&mut self) {
        self.release_once();
    }
}
