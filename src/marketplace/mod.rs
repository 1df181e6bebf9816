//! Live marketplace price source
//!
//! Queries an external parts marketplace for listings compatible with a
//! specific vehicle and reduces them to a low/median/high price summary.
//! Marketplace unavailability is routine, not exceptional: every failure mode
//! here reduces to "no result" by the time it reaches the price resolver.

pub mod ebay;
pub mod token;

pub use ebay::EbayBrowseClient;
pub use token::TokenCache;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::model::VehicleDescriptor;

/// Cheapest listings retained on a quote for diagnostics and purchase links.
pub const SAMPLE_LISTING_COUNT: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    #[error("Marketplace credentials not configured")]
    MissingCredentials,

    #[error("Token request failed: {0}")]
    Auth(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// How the seller marked this listing against the compatibility filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityMatch {
    Exact,
    Compatible,
    Inexact,
}

/// One marketplace listing, already priced in USD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartListing {
    pub title: String,
    pub price: f64,
    pub item_url: Option<Url>,
    pub compatibility: CompatibilityMatch,
}

/// Reduced price summary for a part search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketQuote {
    pub price_low: f64,
    pub price_median: f64,
    pub price_high: f64,
    /// Web URL of the cheapest qualifying listing
    pub purchase_link: Option<Url>,
    /// Up to [`SAMPLE_LISTING_COUNT`] cheapest listings
    pub sample_listings: Vec<PartListing>,
}

/// Seam for the live price source so the resolver and estimate builder can be
/// exercised against in-memory fakes.
#[async_trait]
pub trait PartPriceSource: Send + Sync {
    /// Search for compatible new-condition listings and reduce to a quote.
    ///
    /// `Ok(None)` means the search ran but produced no trustworthy quote
    /// (thin results, no compatible listings, missing credentials). `Err`
    /// means the attempt itself failed; callers treat both as a miss.
    async fn search_part_prices(
        &self,
        part_name: &str,
        vehicle: &VehicleDescriptor,
    ) -> Result<Option<MarketQuote>, MarketplaceError>;
}

/// Reduce listings to a price summary.
///
/// Inexact matches are discarded even when the marketplace returns them.
/// Fewer than `min_listings` qualifying listings is not a quote: small
/// samples are too easily skewed by a single outlier. The median is the
/// lower-middle element of the sorted price list rather than a mean, for the
/// same reason.
pub fn reduce_listings(listings: Vec<PartListing>, min_listings: usize) -> Option<MarketQuote> {
    let mut qualifying: Vec<PartListing> = listings
        .into_iter()
        .filter(|l| {
            matches!(
                l.compatibility,
                CompatibilityMatch::Exact | CompatibilityMatch::Compatible
            )
        })
        .collect();

    if qualifying.len() < min_listings.max(1) {
        return None;
    }

    qualifying.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(std::cmp::Ordering::Equal));

    let prices: Vec<f64> = qualifying.iter().map(|l| l.price).collect();
    let price_low = prices[0];
    let price_high = prices[prices.len() - 1];
    let price_median = prices[(prices.len() - 1) / 2];

    let purchase_link = qualifying[0].item_url.clone();
    let sample_listings: Vec<PartListing> =
        qualifying.into_iter().take(SAMPLE_LISTING_COUNT).collect();

    Some(MarketQuote {
        price_low,
        price_median,
        price_high,
        purchase_link,
        sample_listings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(price: f64, compatibility: CompatibilityMatch) -> PartListing {
        PartListing {
            title: format!("part at {}", price),
            price,
            item_url: Url::parse(&format!("https://www.ebay.com/itm/{}", price as u64)).ok(),
            compatibility,
        }
    }

    fn compatible(prices: &[f64]) -> Vec<PartListing> {
        prices
            .iter()
            .map(|&p| listing(p, CompatibilityMatch::Compatible))
            .collect()
    }

    #[test]
    fn test_reduction_low_median_high() {
        let quote = reduce_listings(compatible(&[130.0, 90.0, 150.0, 100.0, 110.0]), 3).unwrap();
        assert_eq!(quote.price_low, 90.0);
        assert_eq!(quote.price_median, 110.0);
        assert_eq!(quote.price_high, 150.0);
    }

    #[test]
    fn test_median_is_lower_middle_for_even_counts() {
        let quote = reduce_listings(compatible(&[100.0, 200.0, 300.0, 400.0]), 3).unwrap();
        assert_eq!(quote.price_median, 200.0);
    }

    #[test]
    fn test_thin_results_are_not_a_quote() {
        assert!(reduce_listings(compatible(&[90.0, 100.0]), 3).is_none());
        assert!(reduce_listings(vec![], 3).is_none());
    }

    #[test]
    fn test_inexact_matches_are_discarded() {
        let mut listings = compatible(&[90.0, 100.0]);
        listings.push(listing(10.0, CompatibilityMatch::Inexact));
        // Only two qualify after the filter
        assert!(reduce_listings(listings, 3).is_none());
    }

    #[test]
    fn test_purchase_link_is_cheapest_listing() {
        let quote = reduce_listings(compatible(&[150.0, 90.0, 110.0]), 3).unwrap();
        assert_eq!(
            quote.purchase_link.unwrap().as_str(),
            "https://www.ebay.com/itm/90"
        );
    }

    #[test]
    fn test_samples_are_five_cheapest() {
        let quote =
            reduce_listings(compatible(&[70.0, 10.0, 50.0, 30.0, 60.0, 20.0, 40.0]), 3).unwrap();
        let sample_prices: Vec<f64> = quote.sample_listings.iter().map(|l| l.price).collect();
        assert_eq!(sample_prices, vec![10.0, 20.0, 30.0, 40.0, 50.0]);
    }
}
