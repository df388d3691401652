//! Read-through handle→DID resolution cache.
//!
//! Handles are mutable aliases; the DID is the stable identity. Resolved
//! pairs are persisted through a [`HandleStore`] collaborator and looked
//! up before any network call. Entries carry no TTL: a cached DID is
//! served indefinitely, and a failed remote resolution is never cached,
//! so transient API failures cannot calcify into permanent misses.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::client::BlueskyClient;
use crate::error::{Error, Result};

/// One persisted resolution, keyed by handle.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedHandle {
    pub handle: String,
    pub did: String,
    pub last_checked: DateTime<Utc>,
}

/// Persistence surface for resolved handles. `upsert` must be an
/// idempotent insert-or-replace: two concurrent resolutions of the same
/// handle may both write, and the second write must not fail.
pub trait HandleStore: Send + Sync {
    fn get(&self, handle: &str) -> Result<Option<CachedHandle>>;
    fn upsert(&self, handle: &str, did: &str, now: DateTime<Utc>) -> Result<()>;
}

/// In-memory [`HandleStore`], for hosts without durable storage and for
/// tests.
#[derive(Debug, Default)]
pub struct MemoryHandleStore {
    entries: RwLock<BTreeMap<String, CachedHandle>>,
}

impl MemoryHandleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HandleStore for MemoryHandleStore {
    fn get(&self, handle: &str) -> Result<Option<CachedHandle>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| Error::Store("handle store lock poisoned".to_string()))?;
        Ok(entries.get(handle).cloned())
    }

    fn upsert(&self, handle: &str, did: &str, now: DateTime<Utc>) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::Store("handle store lock poisoned".to_string()))?;
        entries.insert(
            handle.to_string(),
            CachedHandle {
                handle: handle.to_string(),
                did: did.to_string(),
                last_checked: now,
            },
        );
        Ok(())
    }
}

/// Read-through resolver combining the store with the remote
/// resolveHandle endpoint.
#[derive(Clone)]
pub struct HandleResolver {
    client: BlueskyClient,
    store: Arc<dyn HandleStore>,
}

impl HandleResolver {
    pub fn new(client: BlueskyClient, store: Arc<dyn HandleStore>) -> Self {
        Self { client, store }
    }

    /// Resolve a handle to its DID.
    ///
    /// A cache hit returns the stored DID with no network call. On a
    /// miss the remote endpoint is consulted and a success is persisted;
    /// a remote failure yields `Ok(None)` without a store write. Store
    /// failures propagate.
    pub async fn resolve(&self, handle: &str) -> Result<Option<String>> {
        let handle = handle.trim_start_matches('@');

        if let Some(entry) = self.store.get(handle)? {
            debug!(handle, did = %entry.did, "handle resolved from cache");
            return Ok(Some(entry.did));
        }

        match self.client.resolve_handle(handle).await {
            Ok(did) => {
                self.store.upsert(handle, &did, Utc::now())?;
                debug!(handle, %did, "handle resolved remotely and cached");
                Ok(Some(did))
            }
            Err(err) => {
                warn!(handle, %err, "remote handle resolution failed");
                Ok(None)
            }
        }
    }
}
