use crate::app_config::{AppConfig, Environment};
use crate::geo::GeoConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

fn invalid(var: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: reason.into(),
    }
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing is decoupled from the process environment so tests can drive it
/// with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;
    use std::str::FromStr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    fn parse_as<T>(var: &str, raw: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        raw.trim()
            .parse::<T>()
            .map_err(|e| invalid(var, e.to_string()))
    }

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("PROPMAP_ENV", "development"));

    let bind_addr: SocketAddr = parse_as(
        "PROPMAP_BIND_ADDR",
        &or_default("PROPMAP_BIND_ADDR", "0.0.0.0:3000"),
    )?;
    let log_level = or_default("PROPMAP_LOG_LEVEL", "info");
    let listings_path = PathBuf::from(or_default(
        "PROPMAP_LISTINGS_PATH",
        "./config/listings.yaml",
    ));

    let db_max_connections: u32 = parse_as(
        "PROPMAP_DB_MAX_CONNECTIONS",
        &or_default("PROPMAP_DB_MAX_CONNECTIONS", "10"),
    )?;
    let db_min_connections: u32 = parse_as(
        "PROPMAP_DB_MIN_CONNECTIONS",
        &or_default("PROPMAP_DB_MIN_CONNECTIONS", "1"),
    )?;
    let db_acquire_timeout_secs: u64 = parse_as(
        "PROPMAP_DB_ACQUIRE_TIMEOUT_SECS",
        &or_default("PROPMAP_DB_ACQUIRE_TIMEOUT_SECS", "10"),
    )?;

    let rate_limit_max_requests: usize = parse_as(
        "PROPMAP_RATE_LIMIT_MAX_REQUESTS",
        &or_default("PROPMAP_RATE_LIMIT_MAX_REQUESTS", "120"),
    )?;
    let rate_limit_window_secs: u64 = parse_as(
        "PROPMAP_RATE_LIMIT_WINDOW_SECS",
        &or_default("PROPMAP_RATE_LIMIT_WINDOW_SECS", "60"),
    )?;

    let mut geo = GeoConfig::default();
    if let Ok(raw) = lookup("PROPMAP_MIN_RADIUS_KM") {
        geo.min_radius_km = parse_as("PROPMAP_MIN_RADIUS_KM", &raw)?;
    }
    if let Ok(raw) = lookup("PROPMAP_MAX_RADIUS_KM") {
        geo.max_radius_km = parse_as("PROPMAP_MAX_RADIUS_KM", &raw)?;
    }
    if let Ok(raw) = lookup("PROPMAP_DEFAULT_PER_PAGE") {
        geo.default_per_page = parse_as("PROPMAP_DEFAULT_PER_PAGE", &raw)?;
    }
    if let Ok(raw) = lookup("PROPMAP_MAX_PER_PAGE") {
        geo.max_per_page = parse_as("PROPMAP_MAX_PER_PAGE", &raw)?;
    }
    if let Ok(raw) = lookup("PROPMAP_CLUSTER_CANDIDATE_CAP") {
        geo.cluster.candidate_cap = parse_as("PROPMAP_CLUSTER_CANDIDATE_CAP", &raw)?;
    }
    validate_geo(&geo)?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        listings_path,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        rate_limit_max_requests,
        rate_limit_window_secs,
        geo,
    })
}

fn validate_geo(geo: &GeoConfig) -> Result<(), ConfigError> {
    if !(geo.min_radius_km.is_finite() && geo.min_radius_km > 0.0) {
        return Err(invalid(
            "PROPMAP_MIN_RADIUS_KM",
            "must be a positive number",
        ));
    }
    if !geo.max_radius_km.is_finite() || geo.max_radius_km < geo.min_radius_km {
        return Err(invalid(
            "PROPMAP_MAX_RADIUS_KM",
            "must be a number no smaller than the minimum radius",
        ));
    }
    if geo.max_per_page == 0 {
        return Err(invalid("PROPMAP_MAX_PER_PAGE", "must be at least 1"));
    }
    if geo.default_per_page == 0 || geo.default_per_page > geo.max_per_page {
        return Err(invalid(
            "PROPMAP_DEFAULT_PER_PAGE",
            format!("must be between 1 and {}", geo.max_per_page),
        ));
    }
    if geo.cluster.candidate_cap == 0 {
        return Err(invalid("PROPMAP_CLUSTER_CANDIDATE_CAP", "must be at least 1"));
    }
    Ok(())
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
