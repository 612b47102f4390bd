//! Lifetime caches

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use svd_domain::error::Result;
use svd_domain::ports::AnyInstance;
use svd_domain::TypeMeta;

use super::waits::{CellKey, WaitGraph};

static NEXT_CACHE_ID: AtomicU64 = AtomicU64::new(0);

/// Once-per-key instance cache
///
/// Concurrent first resolutions of a key run the producer once; the other
/// callers block until the value is stored. A failed production leaves the
/// key empty so the next resolution retries. Caches sharing a [`WaitGraph`]
/// report a circular dependency instead of blocking on each other forever.
#[derive(Debug)]
pub struct InstanceCache {
    id: u64,
    cells: DashMap<TypeMeta, Arc<OnceCell<AnyInstance>>>,
    waits: Arc<WaitGraph>,
}

impl Default for InstanceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl InstanceCache {
    /// Empty cache with its own wait graph
    pub fn new() -> Self {
        Self::with_wait_graph(Arc::new(WaitGraph::default()))
    }

    /// Empty cache tracking waits in `waits`
    pub fn with_wait_graph(waits: Arc<WaitGraph>) -> Self {
        Self {
            id: NEXT_CACHE_ID.fetch_add(1, Ordering::Relaxed),
            cells: DashMap::new(),
            waits,
        }
    }

    /// Cached value for `service`, producing it with `produce` if absent
    pub fn get_or_try_init<F>(&self, service: TypeMeta, produce: F) -> Result<AnyInstance>
    where
        F: FnOnce() -> Result<AnyInstance>,
    {
        // The map guard must be released before producing: the producer may
        // resolve other services stored in the same shard.
        let cell = Arc::clone(self.cells.entry(service).or_default().value());
        if let Some(value) = cell.get() {
            return Ok(Arc::clone(value));
        }

        let key = CellKey {
            cache: self.id,
            service,
        };
        let _waiting = self.waits.wait_for(key)?;
        cell.get_or_try_init(|| {
            let _producing = self.waits.produce(key);
            produce()
        })
        .cloned()
    }

    /// Whether a value for `service` has been produced
    pub fn contains(&self, service: TypeMeta) -> bool {
        self.cells
            .get(&service)
            .is_some_and(|cell| cell.value().get().is_some())
    }

    /// Number of produced values
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|cell| cell.value().get().is_some()).count()
    }

    /// Whether nothing has been produced yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
