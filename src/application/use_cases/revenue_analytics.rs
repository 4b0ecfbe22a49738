use std::{collections::HashMap, future::Future, sync::Arc};

use chrono::{Days, NaiveDate, Utc};
use serde::{Serialize, de::DeserializeOwned};
use tracing::instrument;

use crate::{
    app_error::AppResult,
    application::{
        analytics::{
            self, ActiveCount, CampaignSummary, DailyRevenue, Ledger, LifecycleEvent,
        },
        ports::{
            ledger::{
                CampaignRepoTrait, CustomerRepoTrait, PlanRepoTrait, SubscriptionRepoTrait,
            },
            report_cache::ReportCacheTrait,
        },
    },
    domain::entities::{customer::Customer, date_range::{DateRange, parse_day}},
};

/// Days covered by the fallback range when the ledger holds no dates at all.
const FALLBACK_RANGE_DAYS: u64 = 365;

/// Longest report range accepted unless configured otherwise.
pub const DEFAULT_MAX_RANGE_DAYS: u64 = 3660;

/// Loads ledger snapshots from storage and runs the analytics over them.
///
/// Report results are memoized in the report cache per `(report, range)`.
/// Storage failures degrade to an empty report which is never cached.
#[derive(Clone)]
pub struct RevenueAnalyticsUseCases {
    plans: Arc<dyn PlanRepoTrait>,
    customers: Arc<dyn CustomerRepoTrait>,
    campaigns: Arc<dyn CampaignRepoTrait>,
    subscriptions: Arc<dyn SubscriptionRepoTrait>,
    cache: Arc<dyn ReportCacheTrait>,
    cache_ttl: time::Duration,
    max_range_days: u64,
}

impl RevenueAnalyticsUseCases {
    pub fn new(
        plans: Arc<dyn PlanRepoTrait>,
        customers: Arc<dyn CustomerRepoTrait>,
        campaigns: Arc<dyn CampaignRepoTrait>,
        subscriptions: Arc<dyn SubscriptionRepoTrait>,
        cache: Arc<dyn ReportCacheTrait>,
        cache_ttl: time::Duration,
    ) -> Self {
        Self {
            plans,
            customers,
            campaigns,
            subscriptions,
            cache,
            cache_ttl,
            max_range_days: DEFAULT_MAX_RANGE_DAYS,
        }
    }

    pub fn with_max_range_days(mut self, days: u64) -> Self {
        self.max_range_days = days;
        self
    }

    #[instrument(skip(self))]
    pub async fn daily_revenue(&self, range: &DateRange) -> AppResult<Vec<DailyRevenue>> {
        self.cached("daily_revenue", range, move || async move {
            let ledger = self.load_ledger(range).await?;
            AppResult::Ok(analytics::daily_revenue(&ledger, range))
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn active_census(&self, range: &DateRange) -> AppResult<Vec<ActiveCount>> {
        self.cached("active_census", range, move || async move {
            let ledger = self.load_ledger(range).await?;
            AppResult::Ok(analytics::active_census(ledger.records(), range))
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn lifecycle_events(&self, range: &DateRange) -> AppResult<Vec<LifecycleEvent>> {
        self.cached("lifecycle_events", range, move || async move {
            let ledger = self.load_ledger(range).await?;

            let lapsed = analytics::lapsed_without_cancellation(&ledger, range);
            if lapsed > 0 {
                tracing::warn!(
                    lapsed,
                    "Active subscriptions ended in range without a cancellation row"
                );
            }

            let customers: HashMap<i64, Customer> = self
                .customers
                .list_by_ids(&ledger.customer_ids())
                .await?
                .into_iter()
                .map(|c| (c.id, c))
                .collect();

            AppResult::Ok(analytics::lifecycle_events(&ledger, &customers, range))
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn campaign_summary(&self, range: &DateRange) -> AppResult<Vec<CampaignSummary>> {
        self.cached("campaign_summary", range, move || async move {
            let campaigns = self.campaigns.list_overlapping(range).await?;
            if campaigns.is_empty() {
                return Ok(Vec::new());
            }

            let campaign_ids: Vec<i64> = campaigns.iter().map(|c| c.id).collect();
            let customers = self.customers.list_by_campaigns(&campaign_ids).await?;
            let customer_ids: Vec<i64> = customers.iter().map(|c| c.id).collect();

            let plans = self.plans.list_all().await?;
            let records = self.subscriptions.list_by_customers(&customer_ids).await?;
            let ledger = Ledger::build(plans, records);

            AppResult::Ok(analytics::campaign_summary(
                &campaigns, &customers, &ledger, range,
            ))
        })
        .await
    }

    /// Overall span of the stored data, used as the default report range.
    #[instrument(skip(self))]
    pub async fn date_bounds(&self) -> AppResult<DateRange> {
        self.date_bounds_on(Utc::now().date_naive()).await
    }

    /// Like [`Self::date_bounds`] with an explicit "today" for open-ended records.
    ///
    /// Falls back to the 365 days ending `today` when storage holds no dates
    /// or cannot be read.
    pub async fn date_bounds_on(&self, today: NaiveDate) -> AppResult<DateRange> {
        let spans = async {
            let subs = self.subscriptions.date_span(today).await?;
            let campaigns = self.campaigns.date_span().await?;
            AppResult::Ok(match (subs, campaigns) {
                (Some(a), Some(b)) => Some(a.union(b)),
                (a, b) => a.or(b),
            })
        };

        let span = match spans.await {
            Ok(span) => span,
            Err(e) if e.is_data_unavailable() => {
                tracing::error!(error = %e, "Date bounds unavailable, using fallback range");
                None
            }
            Err(e) => return Err(e),
        };

        match span {
            Some(span) => DateRange::new(span.earliest, span.latest.max(span.earliest)),
            None => {
                let start = today
                    .checked_sub_days(Days::new(FALLBACK_RANGE_DAYS))
                    .unwrap_or(NaiveDate::MIN);
                DateRange::new(start, today)
            }
        }
    }

    /// Builds the report range from optional `YYYY-MM-DD` bounds.
    ///
    /// Missing bounds are filled in from [`Self::date_bounds`]; a missing start
    /// never reaches further back than the longest accepted range. Ranges longer
    /// than that are rejected.
    #[instrument(skip(self))]
    pub async fn resolve_range(&self, start: Option<&str>, end: Option<&str>) -> AppResult<DateRange> {
        let start = start.map(|raw| parse_day(raw, "start")).transpose()?;
        let end = end.map(|raw| parse_day(raw, "end")).transpose()?;

        let range = match (start, end) {
            (Some(start), Some(end)) => DateRange::new(start, end)?,
            (start, end) => {
                let bounds = self.date_bounds().await?;
                let end = end.unwrap_or(bounds.end());
                let start = start.unwrap_or_else(|| {
                    let earliest = end
                        .checked_sub_days(Days::new(self.max_range_days.saturating_sub(1)))
                        .unwrap_or(NaiveDate::MIN);
                    bounds.start().max(earliest)
                });
                DateRange::new(start, end)?
            }
        };

        range.within_days(self.max_range_days)
    }

    async fn load_ledger(&self, range: &DateRange) -> AppResult<Ledger> {
        let plans = self.plans.list_all().await?;
        let records = self.subscriptions.list_chains_touching(range).await?;
        tracing::debug!(
            plans = plans.len(),
            records = records.len(),
            "Loaded ledger snapshot"
        );
        Ok(Ledger::build(plans, records))
    }

    async fn cached<T, F, Fut>(&self, report: &str, range: &DateRange, compute: F) -> AppResult<Vec<T>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<Vec<T>>>,
    {
        let key = format!("report:{report}:{}:{}", range.start(), range.end());

        match self.cache.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    tracing::debug!(key, "Report cache hit");
                    return Ok(value);
                }
                Err(e) => tracing::warn!(key, error = %e, "Discarding unreadable cached report"),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!(key, error = %e, "Report cache read failed"),
        }

        let value = match compute().await {
            Ok(value) => value,
            Err(e) if e.is_data_unavailable() => {
                tracing::error!(report, error = %e, "Ledger unavailable, returning empty report");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        match serde_json::to_string(&value) {
            Ok(json) => {
                if let Err(e) = self.cache.put(&key, &json, self.cache_ttl).await {
                    tracing::warn!(key, error = %e, "Report cache write failed");
                }
            }
            Err(e) => tracing::warn!(key, error = %e, "Failed to serialize report for cache"),
        }

        Ok(value)
    }
}
