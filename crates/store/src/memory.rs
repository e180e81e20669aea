use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::{Keyed, Store};

#[derive(Debug)]
struct Entries<V> {
    order: Vec<String>,
    values: HashMap<String, V>,
}

impl<V> Default for Entries<V> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            values: HashMap::new(),
        }
    }
}

/// In-memory store implementation.
///
/// Values live in a map guarded by an async read/write lock; a separate key
/// list remembers first-insertion order so listings are deterministic. Clones
/// share the same underlying data.
#[derive(Debug)]
pub struct InMemoryStore<V> {
    entries: Arc<RwLock<Entries<V>>>,
}

impl<V> Clone for InMemoryStore<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<V> Default for InMemoryStore<V> {
    fn default() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Entries::default())),
        }
    }
}

impl<V> InMemoryStore<V> {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every value.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.order.clear();
        entries.values.clear();
    }
}

#[async_trait]
impl<V> Store<V> for InMemoryStore<V>
where
    V: Keyed + Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<V> {
        self.entries.read().await.values.get(key).cloned()
    }

    async fn all(&self) -> Vec<V> {
        let entries = self.entries.read().await;
        entries
            .order
            .iter()
            .filter_map(|key| entries.values.get(key))
            .cloned()
            .collect()
    }

    async fn put(&self, value: V) -> V {
        let key = value.key().to_string();
        let mut entries = self.entries.write().await;

        if entries.values.insert(key.clone(), value.clone()).is_none() {
            tracing::trace!(%key, "inserted new key");
            entries.order.push(key);
        }

        value
    }

    async fn remove(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.write().await;
        let removed = entries.values.remove(key);
        if removed.is_some() {
            entries.order.retain(|k| k != key);
        }
        removed
    }

    async fn len(&self) -> usize {
        self.entries.read().await.values.len()
    }
}
