use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a pure
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("SHOPGRAB_ENV", "development"))?;
    let bind_addr = parse_addr("SHOPGRAB_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("SHOPGRAB_LOG_LEVEL", "info");

    let scraper_request_timeout_secs = parse_u64("SHOPGRAB_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    if scraper_request_timeout_secs == 0 {
        return Err(invalid(
            "SHOPGRAB_SCRAPER_REQUEST_TIMEOUT_SECS",
            "must be greater than zero".into(),
        ));
    }

    let scraper_connect_timeout_secs = parse_u64("SHOPGRAB_SCRAPER_CONNECT_TIMEOUT_SECS", "10")?;
    if scraper_connect_timeout_secs == 0 {
        return Err(invalid(
            "SHOPGRAB_SCRAPER_CONNECT_TIMEOUT_SECS",
            "must be greater than zero".into(),
        ));
    }
    if scraper_connect_timeout_secs > scraper_request_timeout_secs {
        return Err(invalid(
            "SHOPGRAB_SCRAPER_CONNECT_TIMEOUT_SECS",
            format!(
                "connect timeout ({scraper_connect_timeout_secs}s) exceeds request timeout ({scraper_request_timeout_secs}s)"
            ),
        ));
    }

    let scraper_user_agent = or_default(
        "SHOPGRAB_SCRAPER_USER_AGENT",
        "shopgrab/0.1 (storefront-scraper)",
    );

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        scraper_request_timeout_secs,
        scraper_connect_timeout_secs,
        scraper_user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPGRAB_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
