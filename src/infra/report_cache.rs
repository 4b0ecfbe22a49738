use std::{
    collections::HashMap,
    sync::Mutex,
    time::Instant,
};

use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};

use crate::{
    app_error::{AppError, AppResult},
    application::ports::report_cache::ReportCacheTrait,
    infra::error::InfraError,
};

/// Report cache shared across instances through Redis (`SET EX`).
#[derive(Clone)]
pub struct RedisReportCache {
    manager: ConnectionManager,
}

impl RedisReportCache {
    pub async fn new(redis_url: &str) -> Result<Self, InfraError> {
        let client = redis::Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;
        Ok(Self { manager })
    }

    fn key(key: &str) -> String {
        format!("revenue_ledger:{key}")
    }
}

#[async_trait]
impl ReportCacheTrait for RedisReportCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.manager.clone();
        conn.get(Self::key(key))
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read report cache: {e}")))
    }

    async fn put(&self, key: &str, value: &str, ttl: time::Duration) -> AppResult<()> {
        let mut conn = self.manager.clone();
        let ttl_secs = ttl.whole_seconds().max(1) as u64;

        let _: () = conn
            .set_ex(Self::key(key), value, ttl_secs)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write report cache: {e}")))?;

        Ok(())
    }
}

/// Process-local report cache. Expired entries are dropped on read and swept on every write.
#[derive(Default)]
pub struct InProcessReportCache {
    entries: Mutex<HashMap<String, (Instant, String)>>,
}

impl InProcessReportCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportCacheTrait for InProcessReportCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Internal("Report cache lock poisoned".into()))?;

        match entries.get(key) {
            Some((expires_at, value)) if *expires_at > Instant::now() => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: &str, ttl: time::Duration) -> AppResult<()> {
        let ttl: std::time::Duration = ttl
            .try_into()
            .map_err(|_| AppError::Internal("Report cache TTL must be positive".into()))?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Internal("Report cache lock poisoned".into()))?;

        let now = Instant::now();
        entries.retain(|_, (expires_at, _)| *expires_at > now);
        entries.insert(key.to_string(), (now + ttl, value.to_string()));
        Ok(())
    }
}
