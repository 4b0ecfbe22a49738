use async_trait::async_trait;
use sqlx::{QueryBuilder, Row, Sqlite, sqlite::SqliteRow};

use crate::{
    adapters::persistence::{MAX_IN_CLAUSE, SqlitePersistence, get_date},
    app_error::AppResult,
    application::ports::ledger::CustomerRepoTrait,
    domain::entities::customer::Customer,
};

const SELECT_COLS: &str = "SELECT id, name, email, registration_date, marketing_campaign_id FROM customers";

fn row_to_customer(row: &SqliteRow) -> AppResult<Customer> {
    Ok(Customer {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        registration_date: get_date(row, "registration_date")?,
        campaign_id: row.try_get("marketing_campaign_id")?,
    })
}

impl SqlitePersistence {
    async fn customers_where_in(&self, column: &str, ids: &[i64]) -> AppResult<Vec<Customer>> {
        let mut customers = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_IN_CLAUSE) {
            let mut builder = QueryBuilder::<Sqlite>::new(SELECT_COLS);
            builder.push(" WHERE ").push(column).push(" IN (");
            let mut separated = builder.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(") ORDER BY id");

            let rows = builder.build().fetch_all(&self.pool).await?;
            for row in &rows {
                customers.push(row_to_customer(row)?);
            }
        }
        Ok(customers)
    }
}

#[async_trait]
impl CustomerRepoTrait for SqlitePersistence {
    async fn list_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Customer>> {
        self.customers_where_in("id", ids).await
    }

    async fn list_by_campaigns(&self, campaign_ids: &[i64]) -> AppResult<Vec<Customer>> {
        self.customers_where_in("marketing_campaign_id", campaign_ids)
            .await
    }
}
