use std::sync::Once;

use metrics::{Unit, describe_counter, describe_gauge, describe_histogram};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::cache::{
    METRIC_CACHE_HIT, METRIC_CACHE_INVALIDATE, METRIC_CACHE_ITEMS, METRIC_CACHE_LOAD_FAILURE,
    METRIC_CACHE_LOAD_MS, METRIC_CACHE_MISS, METRIC_CACHE_REFRESH,
};
use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
///
/// `RUST_LOG` directives take precedence over the configured level.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            METRIC_CACHE_HIT,
            Unit::Count,
            "Catalog reads served from the held snapshot."
        );
        describe_counter!(
            METRIC_CACHE_MISS,
            Unit::Count,
            "Catalog reads that found the slot empty and loaded from the database."
        );
        describe_counter!(
            METRIC_CACHE_REFRESH,
            Unit::Count,
            "Catalog reads that forced a reload."
        );
        describe_counter!(
            METRIC_CACHE_INVALIDATE,
            Unit::Count,
            "Snapshot invalidations triggered by writes."
        );
        describe_counter!(
            METRIC_CACHE_LOAD_FAILURE,
            Unit::Count,
            "Catalog loads that failed and left the slot untouched."
        );
        describe_histogram!(
            METRIC_CACHE_LOAD_MS,
            Unit::Milliseconds,
            "Catalog load latency in milliseconds."
        );
        describe_gauge!(
            METRIC_CACHE_ITEMS,
            Unit::Count,
            "Records held by the current snapshot."
        );
    });
}
