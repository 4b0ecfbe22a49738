use async_trait::async_trait;

use crate::app_error::AppResult;

/// Key/value store for serialized report results with a per-entry expiry.
#[async_trait]
pub trait ReportCacheTrait: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<String>>;
    async fn put(&self, key: &str, value: &str, ttl: time::Duration) -> AppResult<()>;
}
