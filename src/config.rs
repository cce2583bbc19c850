// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Absent means no cache: leaderboard reads always recompute.
    pub redis_url: Option<String>,
    pub rust_log: String,
    pub port: u16,
    /// TTL for cached leaderboard pages.
    pub cache_ttl_secs: u64,
    /// Per-operation cache timeout; an expired operation degrades to a
    /// miss / no-op instead of stalling the request.
    pub cache_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let redis_url = env::var("REDIS_URL").ok();

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let cache_ttl_secs = env::var("LEADERBOARD_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        let cache_timeout_ms = env::var("CACHE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(500);

        Self {
            database_url,
            redis_url,
            rust_log,
            port,
            cache_ttl_secs,
            cache_timeout_ms,
        }
    }
}
