//! Part price resolution
//!
//! Resolves a (part, vehicle) pair to a price quote through three tiers:
//! cache, live marketplace, static table. The chain never fails: a
//! marketplace outage degrades transparently to static pricing and the only
//! externally visible difference is the quote's source tag.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::db::repository::PriceCacheRepository;
use crate::db::DbError;
use crate::marketplace::{ebay, MarketQuote, PartPriceSource};
use crate::model::price::{CacheEntry, PriceQuote, PricingSource};
use crate::model::VehicleDescriptor;
use crate::pricing::{normalize_key, tables};

use super::cache_key::price_cache_key;

/// Seam over the durable price cache so resolution logic can be tested
/// against an in-memory store.
#[async_trait]
pub trait PriceCacheStore: Send + Sync {
    async fn get(&self, cache_key: &str) -> Result<Option<CacheEntry>, DbError>;
    async fn put(&self, entry: &CacheEntry) -> Result<(), DbError>;
}

#[async_trait]
impl PriceCacheStore for PriceCacheRepository {
    async fn get(&self, cache_key: &str) -> Result<Option<CacheEntry>, DbError> {
        PriceCacheRepository::get(self, cache_key).await
    }

    async fn put(&self, entry: &CacheEntry) -> Result<(), DbError> {
        self.upsert(entry).await
    }
}

/// Orchestrates cache -> marketplace -> static fallback for one part.
pub struct PartPriceResolver {
    marketplace: Arc<dyn PartPriceSource>,
    cache: Option<Arc<dyn PriceCacheStore>>,
    cache_ttl: Duration,
}

impl PartPriceResolver {
    pub fn new(
        marketplace: Arc<dyn PartPriceSource>,
        cache: Option<Arc<dyn PriceCacheStore>>,
        cache_ttl_days: i64,
    ) -> Self {
        Self {
            marketplace,
            cache,
            cache_ttl: Duration::days(cache_ttl_days),
        }
    }

    /// Resolve a price quote. Always succeeds; the static table is the floor.
    pub async fn resolve(&self, part_name: &str, vehicle: &VehicleDescriptor) -> PriceQuote {
        let cache_key = price_cache_key(part_name, vehicle.year, &vehicle.make, &vehicle.model);

        // 1. Live cache entry
        if let Some(cache) = &self.cache {
            match cache.get(&cache_key).await {
                Ok(Some(entry)) => {
                    tracing::debug!(key = %cache_key, "Price cache hit");
                    return entry.to_quote();
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(key = %cache_key, error = %e, "Price cache read failed");
                }
            }
        }

        // 2. Live marketplace quote
        match self.marketplace.search_part_prices(part_name, vehicle).await {
            Ok(Some(quote)) => {
                self.cache_quote(&cache_key, part_name, vehicle, &quote).await;
                return PriceQuote {
                    source: PricingSource::Marketplace,
                    price_low: quote.price_low,
                    price_median: quote.price_median,
                    price_high: quote.price_high,
                    purchase_link: quote.purchase_link,
                };
            }
            Ok(None) => {
                tracing::debug!(part = %part_name, "No valid marketplace quote, using static pricing");
            }
            Err(e) => {
                tracing::warn!(part = %part_name, error = %e, "Marketplace unavailable, using static pricing");
            }
        }

        // 3. Static table floor
        static_quote(part_name, vehicle)
    }

    /// Best-effort cache write; failure only affects future hit rate.
    async fn cache_quote(
        &self,
        cache_key: &str,
        part_name: &str,
        vehicle: &VehicleDescriptor,
        quote: &MarketQuote,
    ) {
        let Some(cache) = &self.cache else {
            return;
        };

        let now = Utc::now();
        let raw_payload = serde_json::to_value(&quote.sample_listings)
            .unwrap_or_else(|_| serde_json::json!([]));

        let entry = CacheEntry {
            cache_key: cache_key.to_string(),
            part_name: normalize_key(part_name),
            year: vehicle.year,
            make: normalize_key(&vehicle.make),
            model: normalize_key(&vehicle.model),
            source: PricingSource::Marketplace,
            price_low: quote.price_low,
            price_median: quote.price_median,
            price_high: quote.price_high,
            purchase_link: quote.purchase_link.clone(),
            raw_payload,
            fetched_at: now,
            expires_at: now + self.cache_ttl,
        };

        if let Err(e) = cache.put(&entry).await {
            tracing::warn!(key = %cache_key, error = %e, "Price cache write failed");
        }
    }
}

/// Quote from the static part price table, with a generic marketplace search
/// link in place of a listing URL.
fn static_quote(part_name: &str, vehicle: &VehicleDescriptor) -> PriceQuote {
    let range = tables::static_part_price(part_name);
    let search_query = format!(
        "{} {} {} {}",
        vehicle.year, vehicle.make, vehicle.model, part_name
    );

    PriceQuote {
        source: PricingSource::Static,
        price_low: range.low,
        price_median: (range.low + range.high) / 2.0,
        price_high: range.high,
        purchase_link: ebay::search_page_url(&search_query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{FixedPriceSource, InMemoryPriceCache};

    fn vehicle() -> VehicleDescriptor {
        VehicleDescriptor {
            year: 2018,
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            trim: None,
        }
    }

    fn market_quote(low: f64, median: f64, high: f64) -> MarketQuote {
        MarketQuote {
            price_low: low,
            price_median: median,
            price_high: high,
            purchase_link: url::Url::parse("https://www.ebay.com/itm/1").ok(),
            sample_listings: vec![],
        }
    }

    #[tokio::test]
    async fn test_marketplace_quote_is_returned_and_cached() {
        let cache = Arc::new(InMemoryPriceCache::default());
        let source = Arc::new(FixedPriceSource::with_quote(market_quote(90.0, 110.0, 150.0)));
        let resolver = PartPriceResolver::new(source, Some(cache.clone()), 7);

        let quote = resolver.resolve("front_bumper_cover", &vehicle()).await;
        assert_eq!(quote.source, PricingSource::Marketplace);
        assert_eq!(quote.price_low, 90.0);
        assert_eq!(quote.price_median, 110.0);
        assert_eq!(quote.price_high, 150.0);

        let key = price_cache_key("front_bumper_cover", 2018, "Honda", "Civic");
        let entry = cache.get(&key).await.unwrap().expect("entry cached");
        assert_eq!(entry.price_median, 110.0);
        assert!(entry.expires_at > entry.fetched_at);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_marketplace() {
        let cache = Arc::new(InMemoryPriceCache::default());
        let source = Arc::new(FixedPriceSource::with_quote(market_quote(90.0, 110.0, 150.0)));
        let resolver = PartPriceResolver::new(source.clone(), Some(cache.clone()), 7);

        let first = resolver.resolve("front_bumper_cover", &vehicle()).await;

        // Second resolution must not touch the marketplace
        source.fail_from_now_on();
        let second = resolver.resolve("front_bumper_cover", &vehicle()).await;

        assert_eq!(second.source, PricingSource::Marketplace);
        assert_eq!(second.price_low, first.price_low);
        assert_eq!(second.price_median, first.price_median);
        assert_eq!(second.price_high, first.price_high);
        assert_eq!(source.search_count(), 1);
    }

    #[tokio::test]
    async fn test_marketplace_failure_falls_back_to_static() {
        let source = Arc::new(FixedPriceSource::failing());
        let resolver = PartPriceResolver::new(source, None, 7);

        let quote = resolver.resolve("front_bumper_cover", &vehicle()).await;
        let range = tables::static_part_price("front_bumper_cover");
        assert_eq!(quote.source, PricingSource::Static);
        assert_eq!(quote.price_low, range.low);
        assert_eq!(quote.price_high, range.high);
        assert!(quote
            .purchase_link
            .as_ref()
            .is_some_and(|u| u.as_str().contains("ebay.com/sch")));
    }

    #[tokio::test]
    async fn test_marketplace_no_result_falls_back_to_static() {
        let source = Arc::new(FixedPriceSource::empty());
        let resolver = PartPriceResolver::new(source, None, 7);

        let quote = resolver.resolve("fender", &vehicle()).await;
        assert_eq!(quote.source, PricingSource::Static);
    }

    #[tokio::test]
    async fn test_unknown_part_gets_generic_default() {
        let source = Arc::new(FixedPriceSource::empty());
        let resolver = PartPriceResolver::new(source, None, 7);

        let quote = resolver.resolve("exotic_spoiler", &vehicle()).await;
        assert_eq!(quote.price_low, tables::DEFAULT_PART_PRICE.low);
        assert_eq!(quote.price_high, tables::DEFAULT_PART_PRICE.high);
    }

    #[tokio::test]
    async fn test_cache_write_failure_does_not_fail_resolution() {
        let cache = Arc::new(InMemoryPriceCache::broken());
        let source = Arc::new(FixedPriceSource::with_quote(market_quote(90.0, 110.0, 150.0)));
        let resolver = PartPriceResolver::new(source, Some(cache), 7);

        let quote = resolver.resolve("front_bumper_cover", &vehicle()).await;
        assert_eq!(quote.source, PricingSource::Marketplace);
        assert_eq!(quote.price_median, 110.0);
    }

    #[tokio::test]
    async fn test_expired_entry_is_invisible() {
        let cache = Arc::new(InMemoryPriceCache::default());
        let source = Arc::new(FixedPriceSource::with_quote(market_quote(90.0, 110.0, 150.0)));
        // Zero-day TTL expires entries immediately
        let resolver = PartPriceResolver::new(source.clone(), Some(cache), 0);

        resolver.resolve("front_bumper_cover", &vehicle()).await;
        resolver.resolve("front_bumper_cover", &vehicle()).await;

        assert_eq!(source.search_count(), 2);
    }
}
