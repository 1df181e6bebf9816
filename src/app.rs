//! Application state and service initialization
//!
//! Centralizes service wiring so the binary entry point stays small and the
//! dependency graph is visible in one place.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::repository::PriceCacheRepository;
use crate::marketplace::EbayBrowseClient;
use crate::model::Config;
use crate::service::{EstimateService, PartPriceResolver, PriceCacheStore};

/// Application state containing all services and shared resources
pub struct AppState {
    /// Price cache database pool; None when Postgres is unavailable
    pub db_pool: Option<PgPool>,
    /// Estimate pipeline entry point
    pub estimate_service: Arc<EstimateService>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// Postgres backs only the price cache; if it is unreachable the service
    /// starts anyway and every resolution skips straight to the marketplace
    /// or the static tables.
    pub async fn new(config: &Config) -> Self {
        let db_pool = match crate::db::create_pool().await {
            Ok(pool) => match crate::db::init_schema(&pool).await {
                Ok(()) => Some(pool),
                Err(e) => {
                    tracing::warn!(error = %e, "Schema init failed, running without price cache");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Price cache database unavailable, running without cache");
                None
            }
        };

        let cache: Option<Arc<dyn PriceCacheStore>> = db_pool
            .clone()
            .map(|pool| Arc::new(PriceCacheRepository::new(pool)) as Arc<dyn PriceCacheStore>);

        let marketplace = Arc::new(EbayBrowseClient::new(config));
        let resolver = PartPriceResolver::new(marketplace, cache, config.cache_ttl_days);
        let estimate_service = Arc::new(EstimateService::new(
            resolver,
            config.default_labor_tier.clone(),
        ));

        Self {
            db_pool,
            estimate_service,
        }
    }
}
