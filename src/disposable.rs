//! Ownership handles for spawned tasks.
//!
//! Every subscription a row or coordinator starts is held by exactly one of
//! these; dropping the holder aborts the task.

use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Mutex;
use tokio::task::JoinHandle;

/// Owns one task and aborts it on `dispose` or drop.
#[derive(Debug)]
pub struct Disposable {
    handle: Option<JoinHandle<()>>,
}

impl Disposable {
    pub fn new(handle: JoinHandle<()>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    pub fn dispose(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Still owns a task that has not run to completion.
    pub fn is_live(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl From<JoinHandle<()>> for Disposable {
    fn from(handle: JoinHandle<()>) -> Self {
        Self::new(handle)
    }
}

impl Drop for Disposable {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// An unordered bag of disposables.
#[derive(Debug, Default)]
pub struct DisposableSet {
    items: Mutex<Vec<Disposable>>,
}

impl DisposableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, disposable: impl Into<Disposable>) {
        if let Ok(mut items) = self.items.lock() {
            items.retain(Disposable::is_live);
            items.push(disposable.into());
        }
    }

    pub fn dispose(&self) {
        let drained: Vec<Disposable> = match self.items.lock() {
            Ok(mut items) => items.drain(..).collect(),
            Err(_) => return,
        };
        drop(drained);
    }

    pub fn live_count(&self) -> usize {
        self.items
            .lock()
            .map(|items| items.iter().filter(|d| d.is_live()).count())
            .unwrap_or(0)
    }
}

/// Disposables keyed by `K`; setting a key cancels what it held before.
#[derive(Debug)]
pub struct DisposableDict<K: Eq + Hash> {
    items: DashMap<K, Disposable>,
}

impl<K: Eq + Hash> Default for DisposableDict<K> {
    fn default() -> Self {
        Self {
            items: DashMap::new(),
        }
    }
}

impl<K: Eq + Hash> DisposableDict<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a still-running task for `key` was replaced.
    /// Entries whose task already finished are pruned.
    pub fn set(&self, key: K, disposable: impl Into<Disposable>) -> bool {
        self.items.retain(|_, d| d.is_live());
        self.items.insert(key, disposable.into()).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn remove(&self, key: &K) {
        self.items.remove(key);
    }

    pub fn dispose(&self) {
        self.items.clear();
    }

    pub fn live_count(&self) -> usize {
        self.items.iter().filter(|d| d.value().is_live()).count()
    }
}

/// A single replaceable slot.
#[derive(Debug, Default)]
pub struct MetaDisposable {
    current: Mutex<Option<Disposable>>,
}

impl MetaDisposable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, disposable: impl Into<Disposable>) {
        let previous = match self.current.lock() {
            Ok(mut current) => current.replace(disposable.into()),
            Err(_) => None,
        };
        drop(previous);
    }

    pub fn dispose(&self) {
        let previous = match self.current.lock() {
            Ok(mut current) => current.take(),
            Err(_) => None,
        };
        drop(previous);
    }

    pub fn is_live(&self) -> bool {
        self.current
            .lock()
            .map(|c| c.as_ref().is_some_and(Disposable::is_live))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::pending;
    use std::time::Duration;

    fn forever() -> JoinHandle<()> {
        tokio::spawn(pending::<()>())
    }

    #[tokio::test]
    async fn test_drop_aborts_task() {
        let handle = forever();
        let abort = handle.abort_handle();
        drop(Disposable::new(handle));
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(abort.is_finished());
    }

    #[tokio::test]
    async fn test_dict_replaces_previous() {
        let dict = DisposableDict::new();
        let first = forever();
        let first_abort = first.abort_handle();
        assert!(!dict.set(1, first));
        assert!(dict.set(1, forever()));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(first_abort.is_finished());
        assert_eq!(dict.live_count(), 1);
        dict.dispose();
        assert_eq!(dict.live_count(), 0);
    }

    #[tokio::test]
    async fn test_dict_prunes_finished_entries() {
        let dict = DisposableDict::new();
        dict.set(1, tokio::spawn(async {}));
        dict.set(2, tokio::spawn(async {}));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!dict.set(3, forever()));
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.live_count(), 1);
    }

    #[tokio::test]
    async fn test_set_dispose_clears_everything() {
        let set = DisposableSet::new();
        set.add(forever());
        set.add(forever());
        assert_eq!(set.live_count(), 2);
        set.dispose();
        assert_eq!(set.live_count(), 0);
    }

    #[tokio::test]
    async fn test_meta_disposable_swaps() {
        let meta = MetaDisposable::new();
        let first = forever();
        let first_abort = first.abort_handle();
        meta.set(first);
        meta.set(forever());
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(first_abort.is_finished());
        assert!(meta.is_live());
        meta.dispose();
        assert!(!meta.is_live());
    }
}
