use serde::Deserialize;

/// Limits applied to the public lead submission endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 3,
            window_secs: 60,
        }
    }
}

/// Configuration options of the Trend Motor service.
///
/// Loaded from `config/default.yaml`, the optional `config/{APP_ENV}.yaml`
/// overlay and `APP_`-prefixed environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub database_url: String,
    /// Cookie signing key material; also signs storage URLs.
    pub secret: String,
    pub admin_password: String,
    /// Prefix for generated storage URLs. Empty means site-relative URLs.
    #[serde(default)]
    pub public_base_url: String,
    pub storage_root: String,
    #[serde(default)]
    pub public_buckets: Vec<String>,
    pub signed_url_ttl_secs: i64,
    pub page_cache_ttl_secs: u64,
    #[serde(default = "default_page_cache_max_entries")]
    pub page_cache_max_entries: usize,
    pub templates_dir: String,
    pub assets_dir: String,
    #[serde(default)]
    pub lead_rate_limit: RateLimitConfig,
}

fn default_page_cache_max_entries() -> usize {
    crate::cache::DEFAULT_MAX_ENTRIES
}
