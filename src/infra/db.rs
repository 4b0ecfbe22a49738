use std::str::FromStr;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::info;

use crate::infra::error::InfraError;

/// Opens the ledger database read-only. The file must already exist.
pub async fn init_db(database_url: &str, max_connections: u32) -> Result<SqlitePool, InfraError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .read_only(true)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    info!("Connected to ledger database!");
    Ok(pool)
}
