use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Row, Sqlite, sqlite::SqliteRow};

use crate::{
    adapters::persistence::{MAX_IN_CLAUSE, SqlitePersistence, get_date, get_opt_date},
    app_error::AppResult,
    application::ports::ledger::{DateSpan, SubscriptionRepoTrait},
    domain::entities::{
        date_range::DateRange,
        subscription::{SubscriptionRecord, SubscriptionStatus},
    },
};

const SELECT_COLS: &str =
    "SELECT id, customer_id, plan_id, start_date, end_date, status, prev_plan_id FROM subscriptions";

fn row_to_record(row: &SqliteRow) -> AppResult<SubscriptionRecord> {
    let status: String = row.try_get("status")?;
    let parsed = SubscriptionStatus::parse_lenient(&status);
    if parsed == SubscriptionStatus::Unrecognized {
        tracing::trace!(status, "Unrecognized subscription status");
    }

    Ok(SubscriptionRecord {
        id: row.try_get("id")?,
        customer_id: row.try_get("customer_id")?,
        plan_id: row.try_get("plan_id")?,
        start_date: get_date(row, "start_date")?,
        end_date: get_opt_date(row, "end_date")?,
        status: parsed,
        prev_plan_id: row.try_get("prev_plan_id")?,
    })
}

#[async_trait]
impl SubscriptionRepoTrait for SqlitePersistence {
    async fn list_chains_touching(&self, range: &DateRange) -> AppResult<Vec<SubscriptionRecord>> {
        let rows = sqlx::query(&format!(
            r#"
            {SELECT_COLS}
            WHERE customer_id IN (
                SELECT DISTINCT customer_id FROM subscriptions
                WHERE start_date <= ?1 AND (end_date IS NULL OR end_date >= ?2)
            )
            ORDER BY customer_id, start_date, id
            "#
        ))
        .bind(range.end().to_string())
        .bind(range.start().to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_record).collect()
    }

    async fn list_by_customers(&self, customer_ids: &[i64]) -> AppResult<Vec<SubscriptionRecord>> {
        let mut records = Vec::new();
        for chunk in customer_ids.chunks(MAX_IN_CLAUSE) {
            let mut builder = QueryBuilder::<Sqlite>::new(SELECT_COLS);
            builder.push(" WHERE customer_id IN (");
            let mut separated = builder.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(") ORDER BY customer_id, start_date, id");

            let rows = builder.build().fetch_all(&self.pool).await?;
            for row in &rows {
                records.push(row_to_record(row)?);
            }
        }
        Ok(records)
    }

    async fn date_span(&self, today: NaiveDate) -> AppResult<Option<DateSpan>> {
        let row = sqlx::query(
            r#"
            SELECT MIN(start_date) AS earliest,
                   MAX(MAX(start_date, COALESCE(end_date, ?1))) AS latest
            FROM subscriptions
            "#,
        )
        .bind(today.to_string())
        .fetch_one(&self.pool)
        .await?;

        let earliest = get_opt_date(&row, "earliest")?;
        let latest = get_opt_date(&row, "latest")?;
        Ok(earliest.zip(latest).map(|(earliest, latest)| DateSpan { earliest, latest }))
    }
}
