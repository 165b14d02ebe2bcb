//! Query resolution engine: classify an incoming free-text query, route it to
//! one intent handler, and answer from the in-memory price snapshot. No
//! network I/O on this path beyond the read-through cache refresh.

pub mod cache;
pub mod format;
pub mod handlers;
pub mod intent;
pub mod lexicon;
pub mod normalize;
pub mod source;

use crate::domain::price::{QueryIntent, Resolution, SnapshotInfo};
use cache::PriceCache;
use source::PriceRecordSource;

pub struct QueryEngine<S> {
    cache: PriceCache<S>,
}

impl<S: PriceRecordSource> QueryEngine<S> {
    pub fn new(source: S, ttl: chrono::Duration) -> Self {
        Self {
            cache: PriceCache::new(source, ttl),
        }
    }

    /// Resolve one query. `Unresolved` carries the translated query for a
    /// heavier resolver; this engine never invokes one itself.
    pub async fn process(&self, query: &str) -> Resolution {
        let intent = intent::classify(query);
        let snapshot = self.cache.snapshot_fresh().await;

        let result = match intent {
            QueryIntent::Single => handlers::single::handle(&snapshot, query),
            QueryIntent::Multi => handlers::multi::handle(&snapshot, query),
            QueryIntent::Comparison => handlers::comparison::handle(&snapshot, query),
            QueryIntent::Budget => handlers::budget::handle(&snapshot, query),
            QueryIntent::Category => handlers::category::handle(&snapshot, query),
        };

        tracing::debug!(
            intent = intent.as_str(),
            success = result.success,
            method = result.method,
            "query handled"
        );

        if result.success {
            Resolution::Resolved(result)
        } else {
            Resolution::Unresolved {
                translated_query: normalize::translate(query),
                result,
            }
        }
    }

    pub async fn refresh(&self) {
        self.cache.refresh().await;
    }

    pub fn snapshot_info(&self) -> SnapshotInfo {
        self.cache.snapshot().info()
    }
}
