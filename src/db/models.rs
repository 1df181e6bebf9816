//! Database models for the price cache

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use url::Url;

use crate::model::price::{CacheEntry, PricingSource};

/// Database representation of a cached price resolution
#[derive(Debug, Clone, FromRow)]
pub struct PriceCacheRow {
    pub cache_key: String,
    pub part_name: String,
    pub year: i32,
    pub make: String,
    pub model: String,
    pub source: String,
    pub price_low: f64,
    pub price_median: f64,
    pub price_high: f64,
    pub purchase_link: Option<String>,
    pub raw_payload: serde_json::Value,
    pub fetched_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl PriceCacheRow {
    /// Convert database row to domain model
    pub fn into_domain(self) -> CacheEntry {
        let source = pricing_source_from_str(&self.source);
        let purchase_link = self.purchase_link.as_deref().and_then(|u| Url::parse(u).ok());

        CacheEntry {
            cache_key: self.cache_key,
            part_name: self.part_name,
            year: self.year.clamp(0, u16::MAX as i32) as u16,
            make: self.make,
            model: self.model,
            source,
            price_low: self.price_low,
            price_median: self.price_median,
            price_high: self.price_high,
            purchase_link,
            raw_payload: self.raw_payload,
            fetched_at: self.fetched_at,
            expires_at: self.expires_at,
        }
    }
}

/// Helper to convert a stored source string back to the enum.
/// Unrecognized values read back as marketplace, the common stored source.
pub fn pricing_source_from_str(source: &str) -> PricingSource {
    match source {
        "cache" => PricingSource::Cache,
        "static" => PricingSource::Static,
        _ => PricingSource::Marketplace,
    }
}
