//! A time-bounded cache for fetched quote data.
//!
//! The cache is an explicit component injected into the fetch path (see
//! [`CachedMarketData`]), keyed by the full request identity. Nothing else
//! in the system caches: the metrics engine stays pure.

use crate::error::ApiError;
use crate::{MarketData, Quote};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    symbol: String,
    range: String,
    interval: String,
}

impl CacheKey {
    fn new(symbol: &str, range: &str, interval: &str) -> Self {
        Self {
            symbol: symbol.to_owned(),
            range: range.to_owned(),
            interval: interval.to_owned(),
        }
    }
}

/// Quotes fetched within the last `ttl` are served from memory; older
/// entries are refetched on demand.
pub struct QuoteCache {
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, (Instant, Quote)>>,
}

impl QuoteCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    async fn get(&self, key: &CacheKey) -> Option<Quote> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|(stored, _)| stored.elapsed() < self.ttl)
            .map(|(_, quote)| quote.clone())
    }

    async fn insert(&self, key: CacheKey, quote: Quote) {
        self.entries.write().await.insert(key, (Instant::now(), quote));
    }
}

/// Wraps any [`MarketData`] implementation with a [`QuoteCache`].
pub struct CachedMarketData<C> {
    inner: C,
    cache: QuoteCache,
}

impl<C> CachedMarketData<C> {
    pub fn new(inner: C, ttl: Duration) -> Self {
        Self {
            inner,
            cache: QuoteCache::new(ttl),
        }
    }
}

#[async_trait]
impl<C: MarketData> MarketData for CachedMarketData<C> {
    async fn fetch_history(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<Quote, ApiError> {
        let key = CacheKey::new(symbol, range, interval);
        if let Some(quote) = self.cache.get(&key).await {
            tracing::debug!(%symbol, %range, %interval, "serving quote from cache");
            return Ok(quote);
        }

        let quote = self.inner.fetch_history(symbol, range, interval).await?;
        self.cache.insert(key, quote.clone()).await;
        Ok(quote)
    }
}
