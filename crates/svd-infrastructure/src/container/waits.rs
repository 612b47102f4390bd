//! Cross-thread wait tracking for lifetime caches
//!
//! A cache cell being produced on one thread blocks every other thread that
//! asks for it. Two threads producing singletons that depend on each other
//! would wait forever, so before blocking a thread records what it waits
//! for and follows the chain of producers and their own waits. Reaching
//! itself means the wait can never finish.

use std::collections::HashMap;
use std::thread::{self, ThreadId};

use parking_lot::Mutex;
use svd_domain::TypeMeta;
use svd_domain::error::{Error, Result};

/// One cell of one cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CellKey {
    pub(crate) cache: u64,
    pub(crate) service: TypeMeta,
}

#[derive(Debug, Default)]
struct WaitState {
    producers: HashMap<CellKey, ThreadId>,
    waiting: HashMap<ThreadId, CellKey>,
}

/// Producers and waiters of every cache of one container
#[derive(Debug, Default)]
pub struct WaitGraph {
    state: Mutex<WaitState>,
}

impl WaitGraph {
    /// Record that the current thread is about to block on `key`
    ///
    /// Fails with a circular dependency when the producer of `key` is,
    /// directly or through other threads, waiting on a cell this thread is
    /// producing.
    pub(crate) fn wait_for(&self, key: CellKey) -> Result<WaitGuard<'_>> {
        let me = thread::current().id();
        let mut state = self.state.lock();

        let mut chain = vec![key.service];
        let mut next = key;
        while let Some(&producer) = state.producers.get(&next) {
            if producer == me {
                return Err(circular(&chain));
            }
            match state.waiting.get(&producer) {
                Some(&blocked_on) if chain.len() <= state.producers.len() => {
                    chain.push(blocked_on.service);
                    next = blocked_on;
                }
                _ => break,
            }
        }

        state.waiting.insert(me, key);
        Ok(WaitGuard {
            graph: self,
            thread: me,
            key,
        })
    }

    /// Record that the current thread now produces `key`
    pub(crate) fn produce(&self, key: CellKey) -> ProduceGuard<'_> {
        let me = thread::current().id();
        let mut state = self.state.lock();
        state.producers.insert(key, me);
        state.waiting.remove(&me);
        ProduceGuard { graph: self, key }
    }
}

/// `chain` lists the awaited services; the last one is produced by the caller
fn circular(chain: &[TypeMeta]) -> Error {
    match chain.split_last() {
        Some((&owned, awaited)) => {
            let path: Vec<TypeMeta> = std::iter::once(owned).chain(awaited.iter().copied()).collect();
            Error::circular(owned, &path)
        }
        None => Error::internal("Empty wait chain"),
    }
}

/// Clears the wait record of a thread once it stops blocking
pub(crate) struct WaitGuard<'a> {
    graph: &'a WaitGraph,
    thread: ThreadId,
    key: CellKey,
}

impl Drop for WaitGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.graph.state.lock();
        if state.waiting.get(&self.thread) == Some(&self.key) {
            state.waiting.remove(&self.thread);
        }
    }
}

/// Clears the producer record of a cell once production ends
pub(crate) struct ProduceGuard<'a> {
    graph: &'a WaitGraph,
    key: CellKey,
}

impl Drop for ProduceGuard<'_> {
    fn drop(&mut self) {
        self.graph.state.lock().producers.remove(&self.key);
    }
}
