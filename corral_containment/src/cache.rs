// Copyright 2025 the Corral Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Durable membership records.
//!
//! One [`MembershipCache`] belongs to one canvas. It maps each container to
//! the member list it last computed, its header flag, and a one-shot
//! `initialized` flag, so a container rebuilt after an undo or a document
//! reload can restore its membership without a spatial query.
//!
//! Storage sits behind [`CacheStore`]. [`MemoryStore`] keeps entries in a hash
//! map and can snapshot them to JSON for hosts that persist documents.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use corral_canvas::ElementId;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CacheError, CacheResult};

/// Format version written by [`MemoryStore::to_json`].
pub const SNAPSHOT_VERSION: u32 = 1;

/// Persisted grouping state of one container.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Member ids in recorded order.
    pub members: Vec<ElementId>,
    /// Header flag.
    pub header: bool,
    /// Set once, the first time the container was initialized.
    pub initialized: bool,
}

/// Key-value storage for cache entries.
///
/// Implementations decide where entries live. Errors are reported, never
/// panicked on; [`MembershipCache`] treats a failed load as a miss.
pub trait CacheStore {
    /// Read the entry for `container`.
    fn load(&self, container: ElementId) -> CacheResult<Option<CacheEntry>>;
    /// Write the entry for `container`, replacing any previous one.
    fn save(&mut self, container: ElementId, entry: CacheEntry) -> CacheResult<()>;
    /// Drop the entry for `container`.
    fn remove(&mut self, container: ElementId) -> CacheResult<()>;
    /// Drop every entry.
    fn clear(&mut self) -> CacheResult<()>;
}

/// In-memory [`CacheStore`].
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<ElementId, CacheEntry>,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    entries: Vec<Record>,
}

#[derive(Serialize, Deserialize)]
struct Record {
    container: ElementId,
    members: Vec<ElementId>,
    header: bool,
    initialized: bool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize every entry, sorted by container id.
    pub fn to_json(&self) -> CacheResult<String> {
        let mut entries: Vec<Record> = self
            .entries
            .iter()
            .map(|(id, e)| Record {
                container: *id,
                members: e.members.clone(),
                header: e.header,
                initialized: e.initialized,
            })
            .collect();
        entries.sort_by_key(|r| r.container);
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            entries,
        };
        serde_json::to_string(&snapshot).map_err(|e| CacheError::Encode(e.to_string()))
    }

    /// Rebuild a store from [`MemoryStore::to_json`] output.
    pub fn from_json(json: &str) -> CacheResult<Self> {
        let snapshot: Snapshot =
            serde_json::from_str(json).map_err(|e| CacheError::Decode(e.to_string()))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(CacheError::UnsupportedVersion(snapshot.version));
        }
        let entries = snapshot
            .entries
            .into_iter()
            .map(|r| {
                (
                    r.container,
                    CacheEntry {
                        members: r.members,
                        header: r.header,
                        initialized: r.initialized,
                    },
                )
            })
            .collect();
        Ok(Self { entries })
    }
}

impl CacheStore for MemoryStore {
    fn load(&self, container: ElementId) -> CacheResult<Option<CacheEntry>> {
        Ok(self.entries.get(&container).cloned())
    }

    fn save(&mut self, container: ElementId, entry: CacheEntry) -> CacheResult<()> {
        self.entries.insert(container, entry);
        Ok(())
    }

    fn remove(&mut self, container: ElementId) -> CacheResult<()> {
        self.entries.remove(&container);
        Ok(())
    }

    fn clear(&mut self) -> CacheResult<()> {
        self.entries.clear();
        Ok(())
    }
}

/// Membership cache for one canvas.
#[derive(Clone, Debug, Default)]
pub struct MembershipCache<S: CacheStore = MemoryStore> {
    store: S,
}

impl<S: CacheStore> MembershipCache<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The backing store, mutably.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Unwrap the backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Load the entry for `container`, dropping members for which `is_live`
    /// is false. A store error is logged and treated as a miss.
    pub fn load(
        &self,
        container: ElementId,
        is_live: impl Fn(ElementId) -> bool,
    ) -> Option<CacheEntry> {
        let mut entry = match self.store.load(container) {
            Ok(entry) => entry?,
            Err(err) => {
                warn!(?container, %err, "membership cache load failed; treating as miss");
                return None;
            }
        };
        let before = entry.members.len();
        entry.members.retain(|m| is_live(*m));
        if entry.members.len() != before {
            debug!(
                ?container,
                dropped = before - entry.members.len(),
                "dropped dangling cached members"
            );
        }
        Some(entry)
    }

    /// Record the members and header flag of `container`.
    ///
    /// The `initialized` flag is carried over from any existing entry.
    /// Returns `false` if the store refused the write.
    pub fn save(&mut self, container: ElementId, members: &[ElementId], header: bool) -> bool {
        let initialized = self.is_initialized(container);
        self.write(
            container,
            CacheEntry {
                members: members.to_vec(),
                header,
                initialized,
            },
        )
    }

    /// Set the `initialized` flag, creating an empty entry if needed.
    ///
    /// Returns `true` only the first time it is set for this entry.
    pub fn mark_initialized(&mut self, container: ElementId) -> bool {
        let mut entry = match self.store.load(container) {
            Ok(entry) => entry.unwrap_or_default(),
            Err(err) => {
                warn!(?container, %err, "membership cache load failed");
                CacheEntry::default()
            }
        };
        if entry.initialized {
            return false;
        }
        entry.initialized = true;
        self.write(container, entry)
    }

    /// Returns `true` if the entry for `container` carries the `initialized` flag.
    pub fn is_initialized(&self, container: ElementId) -> bool {
        matches!(self.store.load(container), Ok(Some(e)) if e.initialized)
    }

    /// Returns `true` if the entry for `container` carries the header flag.
    pub fn is_header(&self, container: ElementId) -> bool {
        matches!(self.store.load(container), Ok(Some(e)) if e.header)
    }

    /// Drop the entry for a permanently removed container.
    pub fn prune(&mut self, container: ElementId) {
        if let Err(err) = self.store.remove(container) {
            warn!(?container, %err, "failed to prune membership cache entry");
        }
    }

    /// Drop every entry, e.g. when the canvas closes.
    pub fn clear(&mut self) {
        if let Err(err) = self.store.clear() {
            warn!(%err, "failed to clear membership cache");
        }
    }

    fn write(&mut self, container: ElementId, entry: CacheEntry) -> bool {
        match self.store.save(container, entry) {
            Ok(()) => true,
            Err(err) => {
                warn!(?container, %err, "membership cache write failed");
                false
            }
        }
    }
}
