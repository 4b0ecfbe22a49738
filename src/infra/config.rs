use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::get_env_default;
use time::Duration;

use crate::{
    application::use_cases::revenue_analytics::DEFAULT_MAX_RANGE_DAYS, infra::error::InfraError,
};

pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    /// Enables the shared Redis report cache; the in-process cache is used otherwise.
    pub redis_url: Option<String>,
    pub report_cache_ttl: Duration,
    /// Ranges spanning more days than this also get monthly movement totals.
    pub movement_rollup_threshold_days: i64,
    /// Longest report range a request may ask for, in days.
    pub max_range_days: u64,
    pub log_file: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        let database_url: String = get_env_default(
            "DATABASE_URL",
            "sqlite://data/sqlite/saas_subscriptions.db".to_string(),
        );
        let database_max_connections: u32 = get_env_default("DATABASE_MAX_CONNECTIONS", 5);
        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3001)));
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .map_err(|_| InfraError::ConfigInvalid { var: "CORS_ORIGIN" })?;
        let redis_url: Option<String> = std::env::var("REDIS_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let report_cache_ttl_secs: i64 = get_env_default("REPORT_CACHE_TTL_SECS", 600);
        let movement_rollup_threshold_days: i64 =
            get_env_default("MOVEMENT_ROLLUP_THRESHOLD_DAYS", 60);
        let max_range_days: u64 = get_env_default("MAX_RANGE_DAYS", DEFAULT_MAX_RANGE_DAYS);
        let log_file: String = get_env_default("LOG_FILE", "app.log".to_string());

        Ok(Self {
            database_url,
            database_max_connections,
            bind_addr,
            cors_origin,
            redis_url,
            report_cache_ttl: Duration::seconds(report_cache_ttl_secs),
            movement_rollup_threshold_days,
            max_range_days,
            log_file,
        })
    }
}
