//! eBay Browse API client
//!
//! Searches the parts category for new-condition listings compatible with a
//! specific vehicle. Authenticates via the client-credentials grant; the
//! bearer token is shared through [`TokenCache`].

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::model::{Config, VehicleDescriptor};

use super::token::{BearerToken, TokenCache};
use super::{
    reduce_listings, CompatibilityMatch, MarketQuote, MarketplaceError, PartListing,
    PartPriceSource,
};

const EBAY_API_BASE_URL: &str = "https://api.ebay.com/buy/browse/v1";
const EBAY_TOKEN_URL: &str = "https://api.ebay.com/identity/v1/oauth2/token";
const ENV_EBAY_BASE_URL: &str = "RECON_EBAY_BASE_URL";
const ENV_EBAY_TOKEN_URL: &str = "RECON_EBAY_TOKEN_URL";

const OAUTH_SCOPE: &str = "https://api.ebay.com/oauth/api_scope";

/// eBay Motors "Car & Truck Parts & Accessories"
const PARTS_CATEGORY_ID: &str = "6030";
const SEARCH_LIMIT: u32 = 15;
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Client for the eBay Browse API
pub struct EbayBrowseClient {
    client: Client,
    base_url: String,
    token_url: String,
    credentials: Option<(String, String)>,
    token_cache: TokenCache,
    min_listings: usize,
}

// Response models - only the fields we need

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    item_summaries: Vec<ItemSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemSummary {
    #[serde(default)]
    title: String,
    price: Option<ListingPrice>,
    item_web_url: Option<String>,
    compatibility_match: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingPrice {
    value: String,
}

impl EbayBrowseClient {
    /// Create a new Browse API client
    ///
    /// Base and token URLs are overridable via `RECON_EBAY_BASE_URL` and
    /// `RECON_EBAY_TOKEN_URL`. Missing credentials are not an error at
    /// construction time; searches simply report no result.
    pub fn new(config: &Config) -> Self {
        let base_url =
            env::var(ENV_EBAY_BASE_URL).unwrap_or_else(|_| EBAY_API_BASE_URL.to_string());
        let token_url =
            env::var(ENV_EBAY_TOKEN_URL).unwrap_or_else(|_| EBAY_TOKEN_URL.to_string());

        let credentials = config
            .ebay_client_id
            .clone()
            .zip(config.ebay_client_secret.clone());

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url,
            token_url,
            credentials,
            token_cache: TokenCache::new(),
            min_listings: config.pricing.min_marketplace_listings,
        }
    }

    async fn access_token(&self) -> Result<String, MarketplaceError> {
        let (client_id, client_secret) = self
            .credentials
            .as_ref()
            .ok_or(MarketplaceError::MissingCredentials)?;

        let client = &self.client;
        let token_url = &self.token_url;

        self.token_cache
            .get_or_refresh(move || fetch_token(client, token_url, client_id, client_secret))
            .await
    }

    /// Compatibility filter string of the form
    /// `Year:<y>;Make:<m>;Model:<model>[;Trim:<t>]`.
    fn compatibility_filter(vehicle: &VehicleDescriptor) -> String {
        let mut filter = format!(
            "Year:{};Make:{};Model:{}",
            vehicle.year, vehicle.make, vehicle.model
        );
        if let Some(trim) = vehicle.trim.as_deref().filter(|t| !t.is_empty()) {
            filter.push_str(&format!(";Trim:{}", trim));
        }
        filter
    }

    async fn search(
        &self,
        part_name: &str,
        vehicle: &VehicleDescriptor,
    ) -> Result<Option<MarketQuote>, MarketplaceError> {
        let token = self.access_token().await?;
        let url = format!("{}/item_summary/search", self.base_url);
        let compatibility = Self::compatibility_filter(vehicle);

        tracing::debug!(
            part = %part_name,
            compatibility = %compatibility,
            "Searching marketplace listings"
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .header("X-EBAY-C-MARKETPLACE-ID", "EBAY_US")
            .query(&[
                ("q", part_name),
                ("category_ids", PARTS_CATEGORY_ID),
                ("filter", "conditions:{NEW}"),
                ("compatibility_filter", compatibility.as_str()),
                ("sort", "price"),
                ("limit", &SEARCH_LIMIT.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketplaceError::UnexpectedStatus { status, body });
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| MarketplaceError::ParseError(format!("Failed to deserialize search response: {}", e)))?;

        let listings: Vec<PartListing> = search
            .item_summaries
            .into_iter()
            .filter_map(into_listing)
            .collect();

        let quote = reduce_listings(listings, self.min_listings);

        tracing::debug!(
            part = %part_name,
            valid = quote.is_some(),
            "Marketplace search complete"
        );

        Ok(quote)
    }
}

fn into_listing(item: ItemSummary) -> Option<PartListing> {
    let price: f64 = item.price?.value.parse().ok()?;

    let compatibility = match item.compatibility_match.as_deref() {
        Some("EXACT") => CompatibilityMatch::Exact,
        Some("COMPATIBLE") => CompatibilityMatch::Compatible,
        _ => CompatibilityMatch::Inexact,
    };

    Some(PartListing {
        title: item.title,
        price,
        item_url: item.item_web_url.and_then(|u| Url::parse(&u).ok()),
        compatibility,
    })
}

async fn fetch_token(
    client: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
) -> Result<BearerToken, MarketplaceError> {
    tracing::debug!("Requesting marketplace access token");

    let response = client
        .post(token_url)
        .basic_auth(client_id, Some(client_secret))
        .form(&[
            ("grant_type", "client_credentials"),
            ("scope", OAUTH_SCOPE),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(MarketplaceError::Auth(format!(
            "Token endpoint returned {}: {}",
            status, body
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| MarketplaceError::Auth(format!("Failed to deserialize token response: {}", e)))?;

    Ok(BearerToken::with_lifetime(
        token.access_token,
        token.expires_in,
    ))
}

#[async_trait]
impl PartPriceSource for EbayBrowseClient {
    async fn search_part_prices(
        &self,
        part_name: &str,
        vehicle: &VehicleDescriptor,
    ) -> Result<Option<MarketQuote>, MarketplaceError> {
        match self.search(part_name, vehicle).await {
            // Unconfigured credentials are a deployment state, not a failure
            Err(MarketplaceError::MissingCredentials) => {
                tracing::debug!(part = %part_name, "No marketplace credentials, skipping search");
                Ok(None)
            }
            other => other,
        }
    }
}

/// Consumer-facing search page for a free-text query. Used as the generic
/// purchase link when pricing falls back to the static table, and for
/// advisory product suggestions on repair-only items.
pub fn search_page_url(query: &str) -> Option<Url> {
    Url::parse(&format!(
        "https://www.ebay.com/sch/i.html?_nkw={}",
        urlencoding::encode(query)
    ))
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle() -> VehicleDescriptor {
        VehicleDescriptor {
            year: 2018,
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            trim: None,
        }
    }

    #[test]
    fn test_compatibility_filter_without_trim() {
        assert_eq!(
            EbayBrowseClient::compatibility_filter(&vehicle()),
            "Year:2018;Make:Honda;Model:Civic"
        );
    }

    #[test]
    fn test_compatibility_filter_with_trim() {
        let mut v = vehicle();
        v.trim = Some("EX-L".to_string());
        assert_eq!(
            EbayBrowseClient::compatibility_filter(&v),
            "Year:2018;Make:Honda;Model:Civic;Trim:EX-L"
        );
    }

    #[test]
    fn test_search_page_url_encodes_query() {
        let url = search_page_url("2018 Honda Civic front bumper cover").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.ebay.com/sch/i.html?_nkw=2018%20Honda%20Civic%20front%20bumper%20cover"
        );
    }

    #[tokio::test]
    #[ignore] // Requires marketplace credentials and network access
    async fn test_live_search() {
        let config = Config::from_env();
        let client = EbayBrowseClient::new(&config);
        let result = client.search_part_prices("front bumper cover", &vehicle()).await;
        assert!(result.is_ok());
    }
}
