use crate::{
    adapters::persistence::SqlitePersistence,
    infra::{db::init_db, error::InfraError},
};

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod report_cache;
pub mod setup;

pub async fn sqlite_persistence(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePersistence, InfraError> {
    let pool = init_db(database_url, max_connections).await?;
    let persistence = SqlitePersistence::new(pool);
    Ok(persistence)
}
