use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "RECON_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_EBAY_CLIENT_ID: &str = "RECON_EBAY_CLIENT_ID";
const ENV_EBAY_CLIENT_SECRET: &str = "RECON_EBAY_CLIENT_SECRET";
const ENV_CACHE_TTL_DAYS: &str = "RECON_CACHE_TTL_DAYS";
const ENV_DEFAULT_LABOR_TIER: &str = "RECON_DEFAULT_LABOR_TIER";

const DEFAULT_CACHE_TTL_DAYS: i64 = 7;
const DEFAULT_LABOR_TIER: &str = "medium";
const DEFAULT_MIN_MARKETPLACE_LISTINGS: usize = 3;

fn default_min_listings() -> usize {
    DEFAULT_MIN_MARKETPLACE_LISTINGS
}

/// Pricing tunables from the YAML config file
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// Minimum qualifying listings before a marketplace quote is trusted.
    /// Guards against outlier-driven mispricing from thin samples.
    #[serde(default = "default_min_listings")]
    pub min_marketplace_listings: usize,
    /// Labor-rate tier used when the caller's profile does not set one
    #[serde(default)]
    pub default_labor_tier: Option<String>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            min_marketplace_listings: DEFAULT_MIN_MARKETPLACE_LISTINGS,
            default_labor_tier: None,
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub pricing: Option<PricingConfig>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub pricing: PricingConfig,
    /// Marketplace client credentials; missing creds degrade the client to
    /// "no result", they do not prevent startup
    pub ebay_client_id: Option<String>,
    pub ebay_client_secret: Option<String>,
    pub cache_ttl_days: i64,
    pub default_labor_tier: String,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pricing: PricingConfig::default(),
            ebay_client_id: None,
            ebay_client_secret: None,
            cache_ttl_days: DEFAULT_CACHE_TTL_DAYS,
            default_labor_tier: DEFAULT_LABOR_TIER.to_string(),
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let ebay_client_id = std::env::var(ENV_EBAY_CLIENT_ID)
            .ok()
            .filter(|s| !s.is_empty());
        let ebay_client_secret = std::env::var(ENV_EBAY_CLIENT_SECRET)
            .ok()
            .filter(|s| !s.is_empty());

        if ebay_client_id.is_none() || ebay_client_secret.is_none() {
            tracing::warn!(
                "Marketplace credentials not configured, replacement parts will use static pricing"
            );
        }

        let cache_ttl_days = std::env::var(ENV_CACHE_TTL_DAYS)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_DAYS);

        // Load config file
        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let pricing = Self::load_config_file(&config_path)
            .and_then(|cf| cf.pricing)
            .unwrap_or_default();

        // Env wins over the YAML value, YAML wins over the built-in default
        let default_labor_tier = std::env::var(ENV_DEFAULT_LABOR_TIER)
            .ok()
            .or_else(|| pricing.default_labor_tier.clone())
            .unwrap_or_else(|| DEFAULT_LABOR_TIER.to_string());

        Self {
            pricing,
            ebay_client_id,
            ebay_client_secret,
            cache_ttl_days,
            default_labor_tier,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                // Handle empty file
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
