//! Block Store: the single source of truth for page structure.
//!
//! The store owns an `Arc<BlockMap>` snapshot and only ever replaces it
//! wholesale. Readers that grabbed a snapshot earlier keep seeing exactly
//! what they read; nothing mutates a map in place.

use crate::models::BlockMap;
use std::fmt;
use std::sync::Arc;

/// Handle returned by [`BlockStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn Fn(&BlockMap)>;

pub struct BlockStore {
    current: Arc<BlockMap>,
    version: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl BlockStore {
    pub fn new(map: BlockMap) -> Self {
        Self {
            current: Arc::new(map),
            version: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current snapshot. Cheap: clones the `Arc`.
    pub fn read(&self) -> Arc<BlockMap> {
        Arc::clone(&self.current)
    }

    /// Number of successful updates since creation
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replace the map with `f(current)` and notify subscribers
    pub fn update(&mut self, f: impl FnOnce(&BlockMap) -> BlockMap) {
        let next = f(&self.current);
        self.replace(next);
    }

    /// Like [`BlockStore::update`] but leaves the store untouched (and
    /// subscribers un-notified) when `f` fails
    pub fn try_update<E>(
        &mut self,
        f: impl FnOnce(&BlockMap) -> Result<BlockMap, E>,
    ) -> Result<(), E> {
        let next = f(&self.current)?;
        self.replace(next);
        Ok(())
    }

    fn replace(&mut self, next: BlockMap) {
        self.current = Arc::new(next);
        self.version += 1;
        log::debug!("block store updated to version {}", self.version);
        for (_, subscriber) in &self.subscribers {
            subscriber(&self.current);
        }
    }

    pub fn subscribe(&mut self, subscriber: impl Fn(&BlockMap) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false when `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }
}

impl Default for BlockStore {
    fn default() -> Self {
        Self::new(BlockMap::new())
    }
}

impl fmt::Debug for BlockStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockStore")
            .field("version", &self.version)
            .field("blocks", &self.current.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Stores compare by snapshot identity and version, which is what a UI
/// needs to decide whether to re-render
impl PartialEq for BlockStore {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version && Arc::ptr_eq(&self.current, &other.current)
    }
}
