use async_trait::async_trait;

/// A value that knows the key it is stored under.
pub trait Keyed {
    /// Returns the storage key. Must be stable for the lifetime of the value.
    fn key(&self) -> &str;
}

/// Core trait for key/value store implementations.
///
/// Implementations must guarantee:
/// - `put` is last-write-wins per key (putting the same value twice leaves
///   the store unchanged)
/// - a `get` after a `put` observes the written value
/// - `all` yields values in first-insertion order of their keys
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Store<V>: Send + Sync
where
    V: Keyed + Clone + Send + Sync + 'static,
{
    /// Retrieves the value stored under `key`.
    async fn get(&self, key: &str) -> Option<V>;

    /// Retrieves every stored value in insertion order.
    async fn all(&self) -> Vec<V>;

    /// Inserts or replaces the value under its own key, returning it.
    ///
    /// Replacing keeps the key's original insertion position.
    async fn put(&self, value: V) -> V;

    /// Removes the value under `key`, returning it if present.
    async fn remove(&self, key: &str) -> Option<V>;

    /// Returns the number of stored values.
    async fn len(&self) -> usize;
}

/// Extension trait providing convenience methods for stores.
#[async_trait]
pub trait StoreExt<V>: Store<V>
where
    V: Keyed + Clone + Send + Sync + 'static,
{
    /// Checks if a value exists under `key`.
    async fn contains(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }

    /// Returns true if the store holds no values.
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

// Blanket implementation for all Store implementations
impl<V, T> StoreExt<V> for T
where
    V: Keyed + Clone + Send + Sync + 'static,
    T: Store<V> + ?Sized,
{
}
