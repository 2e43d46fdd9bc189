use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds an invalid value. Every
/// variable has a default, so a bare environment is valid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("LOOTER_ENV", "development"));
    let bind_addr = parse_addr("LOOTER_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("LOOTER_LOG_LEVEL", "info");

    let connect_delay_ms = parse_u64("LOOTER_CONNECT_DELAY_MS", "2000")?;
    let extract_delay_ms = parse_u64("LOOTER_EXTRACT_DELAY_MS", "1500")?;
    let status_linger_ms = parse_u64("LOOTER_STATUS_LINGER_MS", "3000")?;

    let gemini_api_key = lookup("GEMINI_API_KEY").ok();
    let gemini_model = or_default("GEMINI_MODEL", "gemini-3-flash-preview");
    let sentiment_timeout_secs = parse_u64("LOOTER_SENTIMENT_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        connect_delay_ms,
        extract_delay_ms,
        status_linger_ms,
        gemini_api_key,
        gemini_model,
        sentiment_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
