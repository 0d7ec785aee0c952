use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub defaults: Defaults,
    pub fetch: FetchConfig,
}

/// Default analysis parameters, used when the corresponding CLI flag is not
/// supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct Defaults {
    /// The history window to download (e.g. "1y", "5y", "max").
    pub range: String,
    /// The bar interval (e.g. "1d").
    pub interval: String,
    /// The benchmark ticker used for the market regression.
    pub benchmark: String,
    /// The annual risk-free rate as a decimal (0.03 for 3%).
    pub risk_free_rate: f64,
}

/// Tuning for the market-data fetch path.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Per-request HTTP timeout.
    pub timeout_secs: u64,
    /// How many times a transient failure is retried before giving up.
    pub max_retries: u32,
    /// Base delay between retries; doubles on each attempt.
    pub retry_base_delay_ms: u64,
    /// How long a fetched series is served from memory before refetching.
    pub cache_ttl_secs: u64,
}
