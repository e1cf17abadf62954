//! In-flight request coalescing (singleflight).
//!
//! # Responsibilities
//! - Guarantee at most one underlying call per key at any instant
//! - Fan one settled outcome out to every concurrent waiter
//! - Drop the in-flight entry the moment the call settles, so the next
//!   caller starts a fresh read instead of reusing a settled one
//!
//! # Design Decisions
//! - The pending work itself (a shared future) is stored in the map, not a
//!   flag; late joiners attach to the same future
//! - Entry removal runs inside the wrapped future, before any waiter
//!   observes the result
//! - No caching: only in-flight status is held, never the read's content

use std::future::Future;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::future::{BoxFuture, Shared};
use futures_util::FutureExt;

use crate::error::ReadResult;
use crate::observability::metrics;

type SharedRead<T> = Shared<BoxFuture<'static, ReadResult<T>>>;

/// Keyed table of in-flight reads.
///
/// Clones share the same table.
pub struct InFlightTable<T: Clone> {
    inner: Arc<DashMap<String, SharedRead<T>>>,
}

impl<T: Clone> std::fmt::Debug for InFlightTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InFlightTable")
            .field("in_flight", &self.inner.len())
            .finish()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for InFlightTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for InFlightTable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> InFlightTable<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }

    /// Join the in-flight read for `key`, or start one via `perform`.
    ///
    /// `perform` must be a pure read: idempotent and side-effect-free from
    /// the caller's perspective. It is invoked only when no read for `key`
    /// is already in flight.
    pub async fn get_or_create<F, Fut>(&self, key: &str, perform: F) -> ReadResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ReadResult<T>> + Send + 'static,
    {
        let shared = match self.inner.entry(key.to_string()) {
            Entry::Occupied(existing) => {
                tracing::debug!(key, "joining in-flight read");
                metrics::record_coalesced_join(key);
                existing.get().clone()
            }
            Entry::Vacant(slot) => {
                let table = Arc::clone(&self.inner);
                let owned_key = key.to_string();
                let fut = perform();
                // Remove the entry before any waiter sees the result, so a
                // call issued right after settlement starts a fresh read.
                let shared = async move {
                    let result = fut.await;
                    table.remove(&owned_key);
                    result
                }
                .boxed()
                .shared();
                slot.insert(shared.clone());
                shared
            }
        };

        shared.await
    }

    /// Number of reads currently in flight.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True if no read is in flight.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReadError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn counted_read(
        calls: &Arc<AtomicU32>,
        value: &str,
    ) -> impl Future<Output = ReadResult<String>> + Send + 'static {
        let calls = calls.clone();
        let value = value.to_string();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(25)).await;
            Ok(value)
        }
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_call() {
        let table: InFlightTable<String> = InFlightTable::new();
        let calls = Arc::new(AtomicU32::new(0));

        let (a, b, c) = tokio::join!(
            table.get_or_create("sp_1", || counted_read(&calls, "ok")),
            table.get_or_create("sp_1", || counted_read(&calls, "ok")),
            table.get_or_create("sp_1", || counted_read(&calls, "ok")),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a.unwrap(), "ok");
        assert_eq!(b.unwrap(), "ok");
        assert_eq!(c.unwrap(), "ok");
        assert!(table.is_empty(), "entry must be gone after settlement");
    }

    #[tokio::test]
    async fn distinct_keys_do_not_coalesce() {
        let table: InFlightTable<String> = InFlightTable::new();
        let calls = Arc::new(AtomicU32::new(0));

        let (a, b) = tokio::join!(
            table.get_or_create("sp_1", || counted_read(&calls, "one")),
            table.get_or_create("sp_2", || counted_read(&calls, "two")),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(a.unwrap(), "one");
        assert_eq!(b.unwrap(), "two");
    }

    #[tokio::test]
    async fn sequential_calls_each_invoke_the_read() {
        let table: InFlightTable<String> = InFlightTable::new();
        let calls = Arc::new(AtomicU32::new(0));

        table
            .get_or_create("sp_1", || counted_read(&calls, "ok"))
            .await
            .unwrap();
        table
            .get_or_create("sp_1", || counted_read(&calls, "ok"))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2, "no caching of results");
    }

    #[tokio::test]
    async fn failure_is_fanned_out_to_all_waiters() {
        let table: InFlightTable<String> = InFlightTable::new();
        let calls = Arc::new(AtomicU32::new(0));

        let failing = |calls: &Arc<AtomicU32>| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                Err::<String, _>(ReadError::Transport("connection refused".into()))
            }
        };

        let (a, b) = tokio::join!(
            table.get_or_create("sp_1", || failing(&calls)),
            table.get_or_create("sp_1", || failing(&calls)),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(a.unwrap_err(), ReadError::Transport(_)));
        assert!(matches!(b.unwrap_err(), ReadError::Transport(_)));
        assert!(table.is_empty());
    }
}
