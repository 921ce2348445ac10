//! Shared read-through cache for hosted-table queries.
//!
//! Entries are keyed by (table, filter). Concurrent callers asking for the
//! same key share a single in-flight fetch. A failed fetch drops its slot
//! so the next caller tries again. Expired entries are swept whenever a new
//! key is inserted, so the map holds at most the keys fetched within one TTL.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use metrics::counter;
use tokio::sync::{Mutex, OnceCell};

pub mod tables {
    pub const DIVIDEND_EVENTS: &str = "dividend_events";
    pub const COMPANY_LOGOS: &str = "company_logos";
    pub const SAVED_STOCKS: &str = "saved_stocks";
    pub const SIMILAR_COMPANIES: &str = "similar_companies";
    pub const RANKING_SNAPSHOTS: &str = "ranking_snapshots";
    pub const DIVIDEND_HISTORY: &str = "dividend_history";
    pub const STOCKS: &str = "stocks";
    pub const STOCK_METRICS: &str = "stock_metrics";
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub table: &'static str,
    pub filter: String,
}

impl QueryKey {
    pub fn new(table: &'static str, filter: impl Into<String>) -> Self {
        Self {
            table,
            filter: filter.into(),
        }
    }

    /// Key for an unfiltered read of the whole table.
    pub fn all(table: &'static str) -> Self {
        Self::new(table, "*")
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}?{}", self.table, self.filter)
    }
}

type Shared = Arc<dyn Any + Send + Sync>;
type Slot = Arc<OnceCell<(Instant, Shared)>>;

pub struct QueryCache {
    ttl: Duration,
    slots: Mutex<HashMap<QueryKey, Slot>>,
}

impl fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache").field("ttl", &self.ttl).finish()
    }
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached value for `key`, running `fetch` on a miss.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: QueryKey, fetch: F) -> anyhow::Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let slot = {
            let mut slots = self.slots.lock().await;
            let fresh = slots
                .get(&key)
                .filter(|s| !self.is_expired(s))
                .cloned();
            match fresh {
                Some(slot) => slot,
                None => {
                    self.sweep_expired(&mut slots);
                    Arc::clone(slots.entry(key.clone()).or_default())
                }
            }
        };

        if slot.initialized() {
            counter!("cache_hits_total").increment(1);
        } else {
            counter!("cache_misses_total").increment(1);
            tracing::debug!(key = %key, "Cache miss");
        }

        let fetched = slot
            .get_or_try_init(|| async {
                let value = fetch().await?;
                Ok::<_, anyhow::Error>((Instant::now(), Arc::new(value) as Shared))
            })
            .await;

        let value = match fetched {
            Ok((_, value)) => Arc::clone(value),
            Err(e) => {
                self.discard_failed(&key, &slot).await;
                return Err(e);
            }
        };

        value
            .downcast::<T>()
            .map_err(|_| anyhow::anyhow!("cached value for {key} has a different type"))
    }

    fn is_expired(&self, slot: &Slot) -> bool {
        slot.get().is_some_and(|(at, _)| at.elapsed() >= self.ttl)
    }

    /// In-flight slots are never expired and stay put.
    fn sweep_expired(&self, slots: &mut HashMap<QueryKey, Slot>) {
        let before = slots.len();
        slots.retain(|_, s| !self.is_expired(s));
        let swept = before - slots.len();
        if swept > 0 {
            tracing::debug!(swept, "Swept expired cache entries");
        }
    }

    /// Remove `slot` if it is still the entry for `key` and never filled.
    async fn discard_failed(&self, key: &QueryKey, slot: &Slot) {
        let mut slots = self.slots.lock().await;
        if slots
            .get(key)
            .is_some_and(|s| Arc::ptr_eq(s, slot) && !s.initialized())
        {
            slots.remove(key);
        }
    }

    /// Drop every entry for `table`. Returns how many were removed.
    pub async fn invalidate_table(&self, table: &str) -> usize {
        let mut slots = self.slots.lock().await;
        let before = slots.len();
        slots.retain(|k, _| k.table != table);
        let removed = before - slots.len();
        tracing::debug!(table, removed, "Cache invalidated");
        removed
    }

    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn counted_fetch(calls: &AtomicUsize, value: u32) -> anyhow::Result<u32> {
        calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok(value)
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_fetch() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);
        let key = QueryKey::new(tables::SIMILAR_COMPANIES, "KO");

        let (a, b) = tokio::join!(
            cache.get_or_fetch(key.clone(), || counted_fetch(&calls, 7)),
            cache.get_or_fetch(key.clone(), || counted_fetch(&calls, 8)),
        );

        assert_eq!(*a.unwrap(), 7);
        assert_eq!(*b.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_distinct_filters_are_distinct_entries() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        let ko = cache
            .get_or_fetch(QueryKey::new(tables::SIMILAR_COMPANIES, "KO"), || counted_fetch(&calls, 1))
            .await
            .unwrap();
        let pep = cache
            .get_or_fetch(QueryKey::new(tables::SIMILAR_COMPANIES, "PEP"), || counted_fetch(&calls, 2))
            .await
            .unwrap();

        assert_eq!((*ko, *pep), (1, 2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_invalidate_table_forces_refetch() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);
        let key = QueryKey::new(tables::SAVED_STOCKS, "user-1");

        cache.get_or_fetch(key.clone(), || counted_fetch(&calls, 1)).await.unwrap();
        cache.get_or_fetch(key.clone(), || counted_fetch(&calls, 1)).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cache
            .get_or_fetch(QueryKey::all(tables::STOCKS), || counted_fetch(&calls, 9))
            .await
            .unwrap();
        assert_eq!(cache.invalidate_table(tables::SAVED_STOCKS).await, 1);
        assert_eq!(cache.len().await, 1);

        let refreshed = cache.get_or_fetch(key, || counted_fetch(&calls, 2)).await.unwrap();
        assert_eq!(*refreshed, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_expired_entries_refetch() {
        let cache = QueryCache::new(Duration::ZERO);
        let calls = AtomicUsize::new(0);
        let key = QueryKey::all(tables::COMPANY_LOGOS);

        cache.get_or_fetch(key.clone(), || counted_fetch(&calls, 1)).await.unwrap();
        cache.get_or_fetch(key, || counted_fetch(&calls, 1)).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let key = QueryKey::all(tables::STOCKS);

        let failed = cache
            .get_or_fetch::<u32, _, _>(key.clone(), || async { Err(anyhow::anyhow!("offline")) })
            .await;
        assert!(failed.is_err());

        let ok = cache.get_or_fetch(key, || async { Ok(5u32) }).await.unwrap();
        assert_eq!(*ok, 5);
    }

    #[tokio::test]
    async fn test_failed_and_expired_entries_do_not_accumulate() {
        let cache = QueryCache::new(Duration::from_millis(1));

        for i in 0..100 {
            cache
                .get_or_fetch(QueryKey::new(tables::DIVIDEND_HISTORY, format!("OK{i}")), || async { Ok(i) })
                .await
                .unwrap();
            let failed = cache
                .get_or_fetch::<u32, _, _>(QueryKey::new(tables::DIVIDEND_HISTORY, format!("BAD{i}")), || async {
                    Err(anyhow::anyhow!("offline"))
                })
                .await;
            assert!(failed.is_err());
        }
        assert!(cache.len().await <= 100);

        tokio::time::sleep(Duration::from_millis(20)).await;
        cache
            .get_or_fetch(QueryKey::all(tables::STOCKS), || async { Ok(1u32) })
            .await
            .unwrap();
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_type_mismatch_is_an_error() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let key = QueryKey::all(tables::STOCKS);

        cache.get_or_fetch(key.clone(), || async { Ok(5u32) }).await.unwrap();
        let wrong = cache.get_or_fetch(key, || async { Ok(String::new()) }).await;
        assert!(wrong.is_err());
    }
}
