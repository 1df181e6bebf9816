pub mod cache_key;
pub mod estimate;
pub mod resolver;

pub use estimate::EstimateService;
pub use resolver::{PartPriceResolver, PriceCacheStore};

#[cfg(test)]
pub mod testing {
    //! In-memory doubles for the resolver and estimate builder tests.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use crate::db::DbError;
    use crate::marketplace::{MarketQuote, MarketplaceError, PartPriceSource};
    use crate::model::price::CacheEntry;
    use crate::model::VehicleDescriptor;

    use super::resolver::PriceCacheStore;

    /// Map-backed cache store with the same lazy-expiry semantics as the
    /// Postgres repository.
    #[derive(Default)]
    pub struct InMemoryPriceCache {
        entries: Mutex<HashMap<String, CacheEntry>>,
        broken: bool,
    }

    impl InMemoryPriceCache {
        /// A cache whose writes always fail, for best-effort-write tests.
        pub fn broken() -> Self {
            Self {
                entries: Mutex::new(HashMap::new()),
                broken: true,
            }
        }
    }

    #[async_trait]
    impl PriceCacheStore for InMemoryPriceCache {
        async fn get(&self, cache_key: &str) -> Result<Option<CacheEntry>, DbError> {
            let entries = self.entries.lock().unwrap();
            Ok(entries
                .get(cache_key)
                .filter(|e| e.expires_at > Utc::now())
                .cloned())
        }

        async fn put(&self, entry: &CacheEntry) -> Result<(), DbError> {
            if self.broken {
                return Err(DbError::Serialization("broken cache".to_string()));
            }
            let mut entries = self.entries.lock().unwrap();
            entries.insert(entry.cache_key.clone(), entry.clone());
            Ok(())
        }
    }

    /// Price source returning a canned quote, nothing, or an error.
    pub struct FixedPriceSource {
        quote: Option<MarketQuote>,
        failing: AtomicBool,
        searches: AtomicUsize,
    }

    impl FixedPriceSource {
        pub fn with_quote(quote: MarketQuote) -> Self {
            Self {
                quote: Some(quote),
                failing: AtomicBool::new(false),
                searches: AtomicUsize::new(0),
            }
        }

        /// Searches run but never find a valid quote.
        pub fn empty() -> Self {
            Self {
                quote: None,
                failing: AtomicBool::new(false),
                searches: AtomicUsize::new(0),
            }
        }

        /// Every search errors, as in a marketplace outage.
        pub fn failing() -> Self {
            Self {
                quote: None,
                failing: AtomicBool::new(true),
                searches: AtomicUsize::new(0),
            }
        }

        pub fn fail_from_now_on(&self) {
            self.failing.store(true, Ordering::SeqCst);
        }

        pub fn search_count(&self) -> usize {
            self.searches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PartPriceSource for FixedPriceSource {
        async fn search_part_prices(
            &self,
            _part_name: &str,
            _vehicle: &VehicleDescriptor,
        ) -> Result<Option<MarketQuote>, MarketplaceError> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(MarketplaceError::Auth("stub outage".to_string()));
            }
            Ok(self.quote.clone())
        }
    }
}
