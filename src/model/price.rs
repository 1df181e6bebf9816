use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

/// Provenance of a price quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PricingSource {
    Cache,
    Marketplace,
    Static,
}

impl PricingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingSource::Cache => "cache",
            PricingSource::Marketplace => "marketplace",
            PricingSource::Static => "static",
        }
    }
}

/// Resolved price range for a (part, vehicle) pair.
///
/// Invariant: `0 <= price_low <= price_median <= price_high`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub source: PricingSource,
    pub price_low: f64,
    pub price_median: f64,
    pub price_high: f64,
    pub purchase_link: Option<Url>,
}

/// Durable record of a marketplace price resolution.
///
/// Valid only while `now < expires_at`; expired entries are treated as absent
/// by readers (lazy expiry, no background sweep).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Deterministic composite of normalized part name + year + make + model
    pub cache_key: String,
    pub part_name: String,
    pub year: u16,
    pub make: String,
    pub model: String,
    pub source: PricingSource,
    pub price_low: f64,
    pub price_median: f64,
    pub price_high: f64,
    pub purchase_link: Option<Url>,
    /// Opaque diagnostics payload (e.g. sample listings from the search)
    pub raw_payload: serde_json::Value,
    pub fetched_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// View the stored prices as a quote, reporting the originally stored
    /// source (typically marketplace).
    pub fn to_quote(&self) -> PriceQuote {
        PriceQuote {
            source: self.source,
            price_low: self.price_low,
            price_median: self.price_median,
            price_high: self.price_high,
            purchase_link: self.purchase_link.clone(),
        }
    }
}
