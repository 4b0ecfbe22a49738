use async_trait::async_trait;
use sqlx::{Row, sqlite::SqliteRow};

use crate::{
    adapters::persistence::{SqlitePersistence, get_date, get_opt_date},
    app_error::AppResult,
    application::ports::ledger::{CampaignRepoTrait, DateSpan},
    domain::entities::{campaign::Campaign, date_range::DateRange, plan::dollars_to_cents},
};

fn row_to_campaign(row: &SqliteRow) -> AppResult<Campaign> {
    Ok(Campaign {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        start_date: get_date(row, "start_date")?,
        end_date: get_opt_date(row, "end_date")?,
        budget_cents: dollars_to_cents(row.try_get::<f64, _>("budget")?),
        channel: row.try_get("channel")?,
    })
}

#[async_trait]
impl CampaignRepoTrait for SqlitePersistence {
    async fn list_overlapping(&self, range: &DateRange) -> AppResult<Vec<Campaign>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, start_date, end_date, budget, channel
            FROM marketing_campaigns
            WHERE start_date <= ?1 AND (end_date IS NULL OR end_date >= ?2)
            ORDER BY start_date, id
            "#,
        )
        .bind(range.end().to_string())
        .bind(range.start().to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_campaign).collect()
    }

    async fn date_span(&self) -> AppResult<Option<DateSpan>> {
        let row = sqlx::query(
            r#"
            SELECT MIN(start_date) AS earliest,
                   MAX(MAX(start_date, COALESCE(end_date, start_date))) AS latest
            FROM marketing_campaigns
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let earliest = get_opt_date(&row, "earliest")?;
        let latest = get_opt_date(&row, "latest")?;
        Ok(earliest.zip(latest).map(|(earliest, latest)| DateSpan { earliest, latest }))
    }
}
