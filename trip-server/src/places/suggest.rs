//! Debounced, cached place suggestions.
//!
//! Keystroke-driven lookups arrive faster than the remote API should be hit.
//! Each lookup takes a ticket from a monotonic counter, waits out a short
//! quiet window, and proceeds only if no newer lookup has started since.
//! Superseded lookups resolve to `None`; only the newest in-flight query
//! ever reaches the network or the caller.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use super::client::{PlaceClient, PlaceDto, PlaceError};

/// Configuration for the suggestion service.
#[derive(Debug, Clone)]
pub struct SuggestConfig {
    /// Quiet window before a lookup is allowed to hit the network.
    pub debounce: Duration,

    /// TTL for cached query results.
    pub cache_ttl: Duration,

    /// Maximum number of cached queries.
    pub cache_capacity: u64,

    /// Queries shorter than this (after trimming) return no suggestions.
    pub min_query_len: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            cache_ttl: Duration::from_secs(600),
            cache_capacity: 500,
            min_query_len: 2,
        }
    }
}

/// Place suggestions with a TTL cache and cancellation by staleness.
pub struct Suggestions {
    client: PlaceClient,
    cache: MokaCache<String, Arc<Vec<PlaceDto>>>,
    seq: AtomicU64,
    config: SuggestConfig,
}

impl Suggestions {
    pub fn new(client: PlaceClient, config: SuggestConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.cache_ttl)
            .max_capacity(config.cache_capacity)
            .build();

        Self {
            client,
            cache,
            seq: AtomicU64::new(0),
            config,
        }
    }

    /// Look up suggestions for a query.
    ///
    /// Returns `Ok(None)` when a newer lookup superseded this one during
    /// the debounce window or the network fetch; that is the expected
    /// outcome for most keystrokes, not an error.
    pub async fn lookup(&self, query: &str) -> Result<Option<Arc<Vec<PlaceDto>>>, PlaceError> {
        let normalized = normalize(query);
        if normalized.len() < self.config.min_query_len {
            return Ok(Some(Arc::new(Vec::new())));
        }

        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::time::sleep(self.config.debounce).await;
        if self.is_stale(ticket) {
            debug!(query = %normalized, "lookup superseded during debounce");
            return Ok(None);
        }

        if let Some(cached) = self.cache.get(&normalized).await {
            return Ok(Some(cached));
        }

        let places = self.client.search(&normalized).await?;
        let entry = Arc::new(places);
        self.cache.insert(normalized.clone(), entry.clone()).await;

        // A newer query may have started while we were on the network. The
        // result is cached either way, but a stale caller gets nothing.
        if self.is_stale(ticket) {
            debug!(query = %normalized, "lookup superseded during fetch");
            return Ok(None);
        }
        Ok(Some(entry))
    }

    fn is_stale(&self, ticket: u64) -> bool {
        self.seq.load(Ordering::SeqCst) != ticket
    }

    /// Number of cached queries (for monitoring).
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::places::PlaceClientConfig;

    fn service(debounce: Duration) -> Suggestions {
        // Unroutable base URL: any lookup that survives debouncing and
        // misses the cache fails fast instead of hanging.
        let client = PlaceClient::new(
            PlaceClientConfig {
                timeout_secs: 1,
                ..Default::default()
            }
            .with_base_url("http://127.0.0.1:1"),
        )
        .unwrap();
        Suggestions::new(client, SuggestConfig {
            debounce,
            ..Default::default()
        })
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  LiSbOn "), "lisbon");
    }

    #[tokio::test]
    async fn short_queries_return_empty_without_network() {
        let s = service(Duration::from_millis(1));
        let result = s.lookup("L").await.unwrap().unwrap();
        assert!(result.is_empty());
        let result = s.lookup("   ").await.unwrap().unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn superseded_lookup_returns_none() {
        let s = Arc::new(service(Duration::from_millis(50)));

        let older = {
            let s = s.clone();
            tokio::spawn(async move { s.lookup("lisb").await })
        };
        // Let the first lookup take its ticket before the second starts.
        tokio::time::sleep(Duration::from_millis(10)).await;
        let newer = {
            let s = s.clone();
            tokio::spawn(async move { s.lookup("lisbon").await })
        };

        let older = older.await.unwrap().unwrap();
        assert!(older.is_none());
        // The newer lookup proceeds to the network and fails fast against
        // the unroutable endpoint, proving it was not debounced away.
        assert!(newer.await.unwrap().is_err());
    }

    #[tokio::test]
    async fn cached_queries_skip_the_network() {
        let s = service(Duration::from_millis(1));
        s.cache
            .insert(
                "lisbon".to_string(),
                Arc::new(vec![PlaceDto {
                    name: "Lisbon".to_string(),
                    country: Some("Portugal".to_string()),
                    latitude: 38.7,
                    longitude: -9.1,
                }]),
            )
            .await;

        let result = s.lookup("  Lisbon ").await.unwrap().unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Lisbon");
    }
}
