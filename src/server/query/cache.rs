use std::{
    future::Future,
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;
use futures::{
    future::{BoxFuture, Shared},
    FutureExt,
};
use sea_orm::JsonValue;
use serde::Serialize;

use crate::server::query::Table;

/// Default freshness window of cached results
pub const DEFAULT_DEDUP_INTERVAL: Duration = Duration::from_millis(2000);

/// Default age after which a cached result is evicted
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(300);

type SharedRequest = Shared<BoxFuture<'static, Result<Arc<JsonValue>, String>>>;

struct InFlight {
    request: SharedRequest,
    tables: Vec<Table>,
}

struct CacheEntry {
    data: Option<Arc<JsonValue>>,
    error: Option<String>,
    fetched_at: Instant,
    tables: Vec<Table>,
}

/// Snapshot of a cached query.
#[derive(Clone, Debug, Default, PartialEq, Serialize, utoipa::ToSchema)]
pub struct QueryState {
    #[schema(value_type = Option<Object>)]
    pub data: Option<JsonValue>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Keyed result cache with request deduplication.
///
/// Results younger than the dedup interval are served without calling the fetcher.
/// Callers arriving while a request for the same key is in flight await that request
/// instead of starting another one. Results older than the retention window are evicted
/// on the next fetch that reaches the database.
///
/// Every table carries a generation that [`QueryCache::invalidate_table`] bumps. A
/// request only stores its result when the generations of the tables it read are
/// unchanged since it started.
pub struct QueryCache {
    entries: DashMap<String, CacheEntry>,
    in_flight: DashMap<String, InFlight>,
    generations: DashMap<Table, u64>,
    dedup_interval: Duration,
    retention: Duration,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_DEDUP_INTERVAL)
    }
}

impl QueryCache {
    pub fn new(dedup_interval: Duration) -> Self {
        Self::with_retention(dedup_interval, DEFAULT_RETENTION.max(dedup_interval))
    }

    pub fn with_retention(dedup_interval: Duration, retention: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            in_flight: DashMap::new(),
            generations: DashMap::new(),
            dedup_interval,
            retention,
        }
    }

    /// Returns the result for `key`, calling `fetcher` only when no fresh result or
    /// in-flight request exists.
    ///
    /// `tables` lists every table the fetcher reads, used by [`QueryCache::invalidate_table`].
    pub async fn fetch<F, Fut>(
        &self,
        key: &str,
        tables: Vec<Table>,
        fetcher: F,
    ) -> Result<Arc<JsonValue>, String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<JsonValue, String>> + Send + 'static,
    {
        if let Some(data) = self.fresh(key) {
            return Ok(data);
        }

        self.evict_expired(key);

        let generation = self.generation(&tables);
        let request = self
            .in_flight
            .entry(key.to_string())
            .or_insert_with(|| InFlight {
                request: fetcher().map(|result| result.map(Arc::new)).boxed().shared(),
                tables: tables.clone(),
            })
            .request
            .clone();

        let result = request.clone().await;

        self.in_flight
            .remove_if(key, |_, current| current.request.ptr_eq(&request));

        if self.generation(&tables) != generation {
            tracing::debug!("Query {} was invalidated while in flight", key);

            return result;
        }

        let fetched_at = Instant::now();
        match &result {
            Ok(data) => {
                self.entries.insert(
                    key.to_string(),
                    CacheEntry {
                        data: Some(data.clone()),
                        error: None,
                        fetched_at,
                        tables,
                    },
                );
            }
            Err(error) => {
                tracing::debug!("Query {} failed: {}", key, error);

                let mut entry = self.entries.entry(key.to_string()).or_insert(CacheEntry {
                    data: None,
                    error: None,
                    fetched_at,
                    tables,
                });
                entry.error = Some(error.clone());
                entry.fetched_at = fetched_at;
            }
        }

        result
    }

    /// Sum of the generations of `tables`, generations only grow
    fn generation(&self, tables: &[Table]) -> u64 {
        tables
            .iter()
            .map(|table| self.generations.get(table).map_or(0, |generation| *generation))
            .sum()
    }

    /// Drops results older than the retention window, `keep` is left for its own fetch
    fn evict_expired(&self, keep: &str) {
        self.entries
            .retain(|key, entry| key == keep || entry.fetched_at.elapsed() < self.retention);
    }

    fn fresh(&self, key: &str) -> Option<Arc<JsonValue>> {
        let entry = self.entries.get(key)?;
        if entry.error.is_some() || entry.fetched_at.elapsed() >= self.dedup_interval {
            return None;
        }

        entry.data.clone()
    }

    pub fn state(&self, key: &str) -> QueryState {
        let loading = self.in_flight.contains_key(key);

        match self.entries.get(key) {
            Some(entry) => QueryState {
                data: entry.data.as_deref().cloned(),
                loading,
                error: entry.error.clone(),
            },
            None => QueryState {
                loading,
                ..Default::default()
            },
        }
    }

    /// Replaces the cached data for `key`, or drops it when `data` is `None` so the next
    /// fetch revalidates.
    pub fn mutate(&self, key: &str, data: Option<JsonValue>) {
        match data {
            Some(data) => {
                let mut entry = self.entries.entry(key.to_string()).or_insert(CacheEntry {
                    data: None,
                    error: None,
                    fetched_at: Instant::now(),
                    tables: Vec::new(),
                });
                entry.data = Some(Arc::new(data));
                entry.error = None;
                entry.fetched_at = Instant::now();
            }
            None => {
                self.entries.remove(key);
            }
        }
    }

    /// Drops every cached result and in-flight request that read `table`.
    ///
    /// Requests already running finish for their current callers but their results are
    /// not stored.
    pub fn invalidate_table(&self, table: Table) {
        self.in_flight
            .retain(|_, in_flight| !in_flight.tables.contains(&table));
        *self.generations.entry(table).or_insert(0) += 1;
        self.entries.retain(|_, entry| !entry.tables.contains(&table));
    }
}
