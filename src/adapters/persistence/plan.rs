use async_trait::async_trait;
use sqlx::{Row, sqlite::SqliteRow};

use crate::{
    adapters::persistence::SqlitePersistence,
    app_error::AppResult,
    application::ports::ledger::PlanRepoTrait,
    domain::entities::plan::{Plan, dollars_to_cents},
};

fn row_to_plan(row: &SqliteRow) -> AppResult<Plan> {
    Ok(Plan {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        price_cents: dollars_to_cents(row.try_get::<f64, _>("price_monthly")?),
        features: row.try_get("features")?,
    })
}

#[async_trait]
impl PlanRepoTrait for SqlitePersistence {
    async fn list_all(&self) -> AppResult<Vec<Plan>> {
        let rows = sqlx::query("SELECT id, name, price_monthly, features FROM plans ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_plan).collect()
    }
}
