//! Path-keyed mutual exclusion for catalog mutations.
//!
//! Serializes all mutating operations against the same backing file within
//! one process, so no two updates race on stale in-memory state. Unrelated
//! paths proceed independently. Queued callers acquire in
//! first-come-first-served order, and a key with no holder and no waiters
//! is dropped from the table so it carries no memory overhead.
//!
//! This is an in-process primitive only. Multiple server processes sharing
//! one data file get no protection from it; that requires a storage-level
//! transactional primitive instead.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

type WaitQueue = VecDeque<oneshot::Sender<()>>;
type LockTable = HashMap<PathBuf, WaitQueue>;

/// Path-keyed FIFO lock table.
///
/// Cloning is cheap and shares the underlying table.
///
/// # Example
///
/// ```ignore
/// let locks = PathLocks::new();
/// let guard = locks.acquire(Path::new("data/store.json")).await;
/// // ... read, mutate, persist ...
/// drop(guard); // next queued caller acquires
/// ```
#[derive(Clone, Debug, Default)]
pub struct PathLocks {
    table: Arc<Mutex<LockTable>>,
}

impl PathLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `path`, queuing behind earlier callers.
    ///
    /// Resolves immediately when no holder is registered for the path;
    /// otherwise the caller suspends until every earlier queued caller has
    /// acquired and released. The returned guard releases the lock when
    /// dropped, on every exit path.
    pub async fn acquire(&self, path: &Path) -> PathGuard {
        let waiter = {
            let mut table = lock_table(&self.table);
            match table.get_mut(path) {
                None => {
                    // No holder: the caller takes the lock immediately and
                    // the empty queue marks the path as held.
                    table.insert(path.to_path_buf(), VecDeque::new());
                    None
                }
                Some(queue) => {
                    let (handover, pending) = oneshot::channel();
                    queue.push_back(handover);
                    Some(pending)
                }
            }
        };

        if let Some(pending) = waiter {
            // Resolved by the releasing guard. The sender is dropped
            // without sending only when this receiver is already gone, so
            // an error here is unreachable while we are awaiting.
            let _ = pending.await;
        }

        PathGuard {
            key: path.to_path_buf(),
            table: Arc::clone(&self.table),
        }
    }

    /// True while a holder is registered for `path`.
    #[must_use]
    pub fn is_held(&self, path: &Path) -> bool {
        lock_table(&self.table).contains_key(path)
    }
}

/// RAII handle for a held path lock.
///
/// Dropping the guard hands the lock to the next queued caller, or forgets
/// the key entirely when no callers are waiting.
#[derive(Debug)]
pub struct PathGuard {
    key: PathBuf,
    table: Arc<Mutex<LockTable>>,
}

impl Drop for PathGuard {
    fn drop(&mut self) {
        let mut table = lock_table(&self.table);
        let Some(queue) = table.get_mut(&self.key) else {
            return;
        };

        // Hand the lock to the first waiter still listening. A waiter whose
        // future was dropped while queued left a dead receiver behind; skip
        // it and try the next.
        while let Some(next) = queue.pop_front() {
            if next.send(()).is_ok() {
                return;
            }
        }

        // No waiters left: forget the key.
        table.remove(&self.key);
    }
}

/// The table is a plain map; it stays structurally sound even if a holder
/// panicked, so poisoning is ignored.
fn lock_table(table: &Mutex<LockTable>) -> MutexGuard<'_, LockTable> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn uncontended_acquire_is_immediate() {
        let locks = PathLocks::new();
        let path = Path::new("a.json");

        let guard = tokio::time::timeout(Duration::from_millis(50), locks.acquire(path))
            .await
            .unwrap();
        assert!(locks.is_held(path));

        drop(guard);
        assert!(!locks.is_held(path), "released key must be forgotten");
    }

    #[tokio::test]
    async fn unrelated_paths_do_not_block() {
        let locks = PathLocks::new();
        let _guard_a = locks.acquire(Path::new("a.json")).await;

        // Acquiring a different key must not queue behind the first.
        let guard_b = tokio::time::timeout(
            Duration::from_millis(50),
            locks.acquire(Path::new("b.json")),
        )
        .await
        .unwrap();
        drop(guard_b);
    }

    #[tokio::test]
    async fn waiters_acquire_in_fifo_order() {
        let locks = PathLocks::new();
        let path = PathBuf::from("store.json");
        let order = Arc::new(Mutex::new(Vec::new()));

        let first = locks.acquire(&path).await;

        let mut handles = Vec::new();
        for i in 0..5 {
            let locks = locks.clone();
            let path = path.clone();
            let order = Arc::clone(&order);
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire(&path).await;
                order.lock().unwrap().push(i);
            }));
            // Let each task reach the queue before spawning the next, so
            // queue order matches spawn order.
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        drop(first);
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
        assert!(!locks.is_held(&path));
    }

    #[tokio::test]
    async fn cancelled_waiter_is_skipped_at_release() {
        let locks = PathLocks::new();
        let path = PathBuf::from("store.json");

        let first = locks.acquire(&path).await;

        // Queue a waiter, then drop its future before it can acquire.
        let cancelled = {
            let locks = locks.clone();
            let path = path.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(&path).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        cancelled.abort();
        let _ = cancelled.await;

        // A live waiter behind the cancelled one must still get the lock.
        let live = {
            let locks = locks.clone();
            let path = path.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(&path).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        drop(first);
        tokio::time::timeout(Duration::from_millis(200), live)
            .await
            .unwrap()
            .unwrap();
        assert!(!locks.is_held(&path));
    }
}
