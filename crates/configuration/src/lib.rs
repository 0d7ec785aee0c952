use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, Defaults, FetchConfig};

/// Loads the application configuration.
///
/// Every setting carries a built-in default, so the tool runs with no
/// configuration file at all. An optional `riskscope.toml` in the working
/// directory overrides the defaults, and `RISKSCOPE_*` environment
/// variables (e.g. `RISKSCOPE_DEFAULTS__BENCHMARK`) override both.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .set_default("defaults.range", "1y")?
        .set_default("defaults.interval", "1d")?
        .set_default("defaults.benchmark", "^GSPC")?
        .set_default("defaults.risk_free_rate", 0.0)?
        .set_default("fetch.timeout_secs", 10_i64)?
        .set_default("fetch.max_retries", 3_i64)?
        .set_default("fetch.retry_base_delay_ms", 500_i64)?
        .set_default("fetch.cache_ttl_secs", 300_i64)?
        .add_source(config::File::with_name("riskscope").required(false))
        .add_source(config::Environment::with_prefix("RISKSCOPE").separator("__"))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.defaults.risk_free_rate <= -1.0 {
        return Err(ConfigError::ValidationError(format!(
            "risk_free_rate must be greater than -1.0, got {}",
            config.defaults.risk_free_rate
        )));
    }
    if config.fetch.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "fetch.timeout_secs must be positive".to_string(),
        ));
    }
    Ok(())
}
