use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a configured value cannot be parsed.
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
/// Returns `ConfigError` if a configured value cannot be parsed.
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("FOLIO_ENV", "development"))?;
    let bind_addr = parse_addr("FOLIO_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("FOLIO_LOG_LEVEL", "info");

    let cms_url = parse_cms_url(&or_default("FOLIO_CMS_URL", "http://localhost:1337"))?;
    let cms_timeout_secs = parse_u64("FOLIO_CMS_TIMEOUT_SECS", "10")?;
    let snapshot_ttl_secs = parse_u64("FOLIO_SNAPSHOT_TTL_SECS", "3600")?;

    let contact_rate_limit = parse_usize("FOLIO_CONTACT_RATE_LIMIT", "3")?;
    let contact_rate_window_secs = parse_u64("FOLIO_CONTACT_RATE_WINDOW_SECS", "60")?;

    let resend_api_key = lookup("RESEND_API_KEY").ok().filter(|s| !s.is_empty());
    let resend_from_email = or_default("RESEND_FROM_EMAIL", "Portfolio <onboarding@resend.dev>");
    let revalidate_secret = lookup("FOLIO_REVALIDATE_SECRET")
        .ok()
        .filter(|s| !s.is_empty());

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        cms_url,
        cms_timeout_secs,
        snapshot_ttl_secs,
        contact_rate_limit,
        contact_rate_window_secs,
        resend_api_key,
        resend_from_email,
        revalidate_secret,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "FOLIO_ENV".to_string(),
            reason: format!("expected development/test/production, got '{other}'"),
        }),
    }
}

/// Validate the content-source URL and strip any trailing slash.
///
/// Asset URL resolution concatenates this origin with source-relative paths,
/// so a trailing slash would produce double-slash URLs.
fn parse_cms_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidEnvVar {
            var: "FOLIO_CMS_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        })
    }
}
