// src/cache.rs

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

/// Namespace for all cached leaderboard pages.
pub const LEADERBOARD_NS: &str = "leaderboard";

/// Key-value cache collaborator.
///
/// Every operation is infallible at the call site: connection problems,
/// timeouts and protocol errors are logged server-side and degrade to a miss
/// or a no-op, so cache trouble can never fail a read or write path that
/// consults it.
///
/// Invalidation uses a namespace version counter instead of deleting keys by
/// prefix: cached keys embed the current version, and bumping the counter
/// atomically orphans every existing entry in the namespace. Orphaned
/// entries age out via their TTL.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Fetches a cached value. Returns `None` on miss or any cache error.
    async fn get(&self, key: &str) -> Option<String>;

    /// Stores a value with a TTL. Errors are logged and ignored.
    async fn set(&self, key: &str, value: &str, ttl: Duration);

    /// Current version of a namespace. 0 if never bumped or unavailable.
    async fn namespace_version(&self, ns: &str) -> u64;

    /// Atomically bumps a namespace version, instantly invalidating every
    /// key that embeds the previous one. Returns the new version, or 0 if
    /// the cache was unreachable.
    async fn bump_version(&self, ns: &str) -> u64;
}

fn version_key(ns: &str) -> String {
    format!("{}:version", ns)
}

/// Redis-backed cache. All operations run under a per-call timeout and fall
/// through on expiry rather than stall the request.
pub struct RedisCache {
    conn: ConnectionManager,
    op_timeout: Duration,
}

impl RedisCache {
    pub async fn connect(redis_url: &str, op_timeout: Duration) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(redis_url)?;
        let conn = client.get_connection_manager().await?;

        Ok(Self { conn, op_timeout })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut conn = self.conn.clone();
        match tokio::time::timeout(self.op_timeout, conn.get::<_, Option<String>>(key)).await {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => {
                tracing::warn!("Cache get failed for '{}': {}", key, e);
                None
            }
            Err(_) => {
                tracing::warn!("Cache get timed out for '{}'", key);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) {
        let mut conn = self.conn.clone();
        let set = conn.set_ex::<_, _, ()>(key, value, ttl.as_secs());
        match tokio::time::timeout(self.op_timeout, set).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!("Cache set failed for '{}': {}", key, e),
            Err(_) => tracing::warn!("Cache set timed out for '{}'", key),
        }
    }

    async fn namespace_version(&self, ns: &str) -> u64 {
        let mut conn = self.conn.clone();
        let key = version_key(ns);
        match tokio::time::timeout(self.op_timeout, conn.get::<_, Option<u64>>(&key)).await {
            Ok(Ok(version)) => version.unwrap_or(0),
            Ok(Err(e)) => {
                tracing::warn!("Cache version read failed for '{}': {}", key, e);
                0
            }
            Err(_) => {
                tracing::warn!("Cache version read timed out for '{}'", key);
                0
            }
        }
    }

    async fn bump_version(&self, ns: &str) -> u64 {
        let mut conn = self.conn.clone();
        let key = version_key(ns);
        match tokio::time::timeout(self.op_timeout, conn.incr::<_, _, u64>(&key, 1)).await {
            Ok(Ok(version)) => version,
            Ok(Err(e)) => {
                tracing::warn!("Cache version bump failed for '{}': {}", key, e);
                0
            }
            Err(_) => {
                tracing::warn!("Cache version bump timed out for '{}'", key);
                0
            }
        }
    }
}

#[derive(Default)]
struct MemoryCacheData {
    entries: HashMap<String, (String, Instant)>,
    versions: HashMap<String, u64>,
}

/// In-process cache used by tests and local runs without Redis.
#[derive(Default)]
pub struct MemoryCache {
    data: Mutex<MemoryCacheData>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Option<String> {
        let mut data = self.data.lock().unwrap();
        match data.entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Some(value.clone()),
            Some(_) => {
                data.entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) {
        let mut data = self.data.lock().unwrap();
        data.entries
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
    }

    async fn namespace_version(&self, ns: &str) -> u64 {
        let data = self.data.lock().unwrap();
        data.versions.get(ns).copied().unwrap_or(0)
    }

    async fn bump_version(&self, ns: &str) -> u64 {
        let mut data = self.data.lock().unwrap();
        let version = data.versions.entry(ns.to_string()).or_insert(0);
        *version += 1;
        *version
    }
}

/// Cache stand-in when no cache is configured: every read misses, every
/// write is a no-op. Keeps the call sites oblivious to cache presence.
pub struct NoopCache;

#[async_trait]
impl Cache for NoopCache {
    async fn get(&self, _key: &str) -> Option<String> {
        None
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) {}

    async fn namespace_version(&self, _ns: &str) -> u64 {
        0
    }

    async fn bump_version(&self, _ns: &str) -> u64 {
        0
    }
}
