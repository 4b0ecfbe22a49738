use thiserror::Error;

/// Infrastructure errors that can occur during application startup.
///
/// Display messages are safe for console output. Debug output includes the
/// `#[source]` chain, which may contain connection strings.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Database connection failed. Check DATABASE_URL and that the ledger file exists.")]
    DatabaseConnection(#[source] sqlx::Error),

    #[error("Redis connection failed. Check REDIS_URL and credentials.")]
    RedisConnection(#[source] redis::RedisError),

    #[error("Configuration error: environment variable {var} is invalid")]
    ConfigInvalid { var: &'static str },
}

impl From<sqlx::Error> for InfraError {
    fn from(e: sqlx::Error) -> Self {
        InfraError::DatabaseConnection(e)
    }
}

impl From<redis::RedisError> for InfraError {
    fn from(e: redis::RedisError) -> Self {
        InfraError::RedisConnection(e)
    }
}
