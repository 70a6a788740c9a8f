use std::sync::{Arc, RwLock};
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::application::repos::{CollectionSource, RepoError};

use super::config::CacheConfig;
use super::lock::{rw_read, rw_write};
use super::snapshot::CachedSnapshot;
use super::{
    METRIC_CACHE_HIT, METRIC_CACHE_INVALIDATE, METRIC_CACHE_ITEMS, METRIC_CACHE_LOAD_FAILURE,
    METRIC_CACHE_LOAD_MS, METRIC_CACHE_MISS, METRIC_CACHE_REFRESH,
};

const SOURCE: &str = "cache::collection";

struct Slot<T, A> {
    current: Option<Arc<CachedSnapshot<T, A>>>,
    /// Bumped by every invalidation. A load only installs its result when the
    /// epoch it observed at start is still current.
    epoch: u64,
    generation: u64,
    last_loaded_at: Option<OffsetDateTime>,
}

/// Lazily loaded, invalidate-on-write cache for one collection.
///
/// Concurrent readers that all miss may each load from the source; every
/// load produces a complete snapshot and installation swaps the whole `Arc`,
/// so readers never observe a mix of two loads.
pub struct CollectionCache<T, A> {
    name: &'static str,
    config: CacheConfig,
    source: Arc<dyn CollectionSource<T, A>>,
    slot: RwLock<Slot<T, A>>,
}

impl<T, A> CollectionCache<T, A>
where
    T: Send + Sync + 'static,
    A: Send + Sync + 'static,
{
    pub fn new(
        name: &'static str,
        source: Arc<dyn CollectionSource<T, A>>,
        config: CacheConfig,
    ) -> Self {
        Self {
            name,
            config,
            source,
            slot: RwLock::new(Slot {
                current: None,
                epoch: 0,
                generation: 0,
                last_loaded_at: None,
            }),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Return the held snapshot, loading a new one when the slot is empty or
    /// `force_refresh` is set.
    ///
    /// Load failures propagate and leave the slot as it was.
    pub async fn get_snapshot(
        &self,
        force_refresh: bool,
    ) -> Result<Arc<CachedSnapshot<T, A>>, RepoError> {
        if force_refresh || !self.config.enabled {
            counter!(METRIC_CACHE_REFRESH, "collection" => self.name).increment(1);
            return self.load().await;
        }

        if let Some(snapshot) = self.peek() {
            counter!(METRIC_CACHE_HIT, "collection" => self.name).increment(1);
            return Ok(snapshot);
        }

        counter!(METRIC_CACHE_MISS, "collection" => self.name).increment(1);
        self.load().await
    }

    /// Current snapshot without touching the backing store.
    pub fn peek(&self) -> Option<Arc<CachedSnapshot<T, A>>> {
        rw_read(&self.slot, SOURCE, "peek").current.clone()
    }

    /// Drop the held snapshot so the next read reloads. Idempotent.
    pub fn invalidate(&self) {
        let dropped = {
            let mut slot = rw_write(&self.slot, SOURCE, "invalidate");
            slot.epoch += 1;
            slot.current.take()
        };

        counter!(METRIC_CACHE_INVALIDATE, "collection" => self.name).increment(1);
        gauge!(METRIC_CACHE_ITEMS, "collection" => self.name).set(0.0);
        debug!(
            target: "realm_admin::cache",
            collection = self.name,
            dropped_generation = dropped.as_ref().map(|snapshot| snapshot.generation()),
            "collection snapshot invalidated"
        );
    }

    async fn load(&self) -> Result<Arc<CachedSnapshot<T, A>>, RepoError> {
        let started_epoch = rw_read(&self.slot, SOURCE, "load.epoch").epoch;
        let started_at = Instant::now();

        let (items, auxiliary) = match self.source.load_all().await {
            Ok(loaded) => loaded,
            Err(err) => {
                counter!(METRIC_CACHE_LOAD_FAILURE, "collection" => self.name).increment(1);
                warn!(
                    target: "realm_admin::cache",
                    collection = self.name,
                    error = %err,
                    "collection load failed; keeping previous snapshot"
                );
                return Err(err);
            }
        };

        let elapsed_ms = started_at.elapsed().as_secs_f64() * 1000.0;
        histogram!(METRIC_CACHE_LOAD_MS, "collection" => self.name).record(elapsed_ms);

        let mut slot = rw_write(&self.slot, SOURCE, "load.install");
        slot.generation += 1;
        let loaded_at = next_loaded_at(slot.last_loaded_at);
        slot.last_loaded_at = Some(loaded_at);

        let snapshot = Arc::new(CachedSnapshot::new(
            items,
            auxiliary,
            loaded_at,
            slot.generation,
        ));

        let installed = slot.epoch == started_epoch;
        if installed {
            slot.current = Some(snapshot.clone());
            gauge!(METRIC_CACHE_ITEMS, "collection" => self.name).set(snapshot.len() as f64);
        }
        drop(slot);

        info!(
            target: "realm_admin::cache",
            collection = self.name,
            generation = snapshot.generation(),
            items = snapshot.len(),
            auxiliary = snapshot.auxiliary().len(),
            elapsed_ms,
            installed,
            "collection snapshot loaded"
        );

        Ok(snapshot)
    }
}

fn next_loaded_at(previous: Option<OffsetDateTime>) -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    match previous {
        Some(previous) if now <= previous => previous + Duration::nanoseconds(1),
        _ => now,
    }
}
