use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use tracing::instrument;

use crate::{
    app_error::AppResult,
    application::{
        analytics::{
            ActiveCount, CampaignSummary, DailyRevenue, EventKindCount, LifecycleEvent,
            MonthlyEventCount, MonthlyMovement, rollup,
        },
        use_cases::revenue_analytics::RevenueAnalyticsUseCases,
    },
    domain::entities::date_range::DateRange,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DashboardSection {
    KeyMetrics,
    Fluctuations,
    Marketing,
}

/// Latest values of the key metric series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub mrr_cents: i64,
    pub active_count: i64,
    /// Net MRR change between the first and last day of the range.
    pub mrr_change_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum DashboardView {
    KeyMetrics {
        range: DateRange,
        headline: Headline,
        daily_revenue: Vec<DailyRevenue>,
        /// Present only when the range is long enough for monthly bars.
        monthly_movements: Option<Vec<MonthlyMovement>>,
        active_census: Vec<ActiveCount>,
    },
    Fluctuations {
        range: DateRange,
        event_counts: Vec<EventKindCount>,
        monthly_event_counts: Vec<MonthlyEventCount>,
        /// Newest first.
        events: Vec<LifecycleEvent>,
    },
    Marketing {
        range: DateRange,
        campaigns: Vec<CampaignSummary>,
    },
}

/// Assembles the dashboard sections from the analytics reports.
#[derive(Clone)]
pub struct DashboardUseCases {
    analytics: Arc<RevenueAnalyticsUseCases>,
    rollup_threshold_days: i64,
}

impl DashboardUseCases {
    pub fn new(analytics: Arc<RevenueAnalyticsUseCases>, rollup_threshold_days: i64) -> Self {
        Self {
            analytics,
            rollup_threshold_days,
        }
    }

    #[instrument(skip(self))]
    pub async fn section(&self, section: DashboardSection, range: &DateRange) -> AppResult<DashboardView> {
        match section {
            DashboardSection::KeyMetrics => self.key_metrics(range).await,
            DashboardSection::Fluctuations => self.fluctuations(range).await,
            DashboardSection::Marketing => {
                let campaigns = self.analytics.campaign_summary(range).await?;
                Ok(DashboardView::Marketing {
                    range: *range,
                    campaigns,
                })
            }
        }
    }

    async fn key_metrics(&self, range: &DateRange) -> AppResult<DashboardView> {
        let daily_revenue = self.analytics.daily_revenue(range).await?;
        let active_census = self.analytics.active_census(range).await?;

        let monthly_movements = (range.span_days() > self.rollup_threshold_days)
            .then(|| rollup::monthly_movements(&daily_revenue));

        let first_mrr = daily_revenue.first().map_or(0, |r| r.mrr_cents);
        let last_mrr = daily_revenue.last().map_or(0, |r| r.mrr_cents);
        let headline = Headline {
            mrr_cents: last_mrr,
            active_count: active_census.last().map_or(0, |c| c.active_count),
            mrr_change_cents: last_mrr - first_mrr,
        };

        Ok(DashboardView::KeyMetrics {
            range: *range,
            headline,
            daily_revenue,
            monthly_movements,
            active_census,
        })
    }

    async fn fluctuations(&self, range: &DateRange) -> AppResult<DashboardView> {
        let mut events = self.analytics.lifecycle_events(range).await?;

        let event_counts = rollup::event_counts(&events);
        let monthly_event_counts = rollup::monthly_event_counts(&events);
        events.reverse();

        Ok(DashboardView::Fluctuations {
            range: *range,
            event_counts,
            monthly_event_counts,
            events,
        })
    }
}
