//! In-process snapshot cache for whole-collection reads.
//!
//! A [`CollectionCache`] owns a single slot holding the latest
//! [`CachedSnapshot`] of a collection and its lookup table. Reads are served
//! from the slot; the slot is filled lazily from a
//! [`CollectionSource`](crate::application::repos::CollectionSource), replaced
//! whole on forced refresh, and cleared by [`CollectionCache::invalidate`]
//! after writes.
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! enabled = true
//! warm_on_startup = true
//! ```

mod collection;
mod config;
mod lock;
mod snapshot;

pub use collection::CollectionCache;
pub use config::CacheConfig;
pub use snapshot::CachedSnapshot;

pub const METRIC_CACHE_HIT: &str = "realm_admin_catalog_cache_hit_total";
pub const METRIC_CACHE_MISS: &str = "realm_admin_catalog_cache_miss_total";
pub const METRIC_CACHE_REFRESH: &str = "realm_admin_catalog_cache_refresh_total";
pub const METRIC_CACHE_INVALIDATE: &str = "realm_admin_catalog_cache_invalidate_total";
pub const METRIC_CACHE_LOAD_FAILURE: &str = "realm_admin_catalog_cache_load_failure_total";
pub const METRIC_CACHE_LOAD_MS: &str = "realm_admin_catalog_cache_load_ms";
pub const METRIC_CACHE_ITEMS: &str = "realm_admin_catalog_cache_items";
