use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    app_error::AppResult,
    domain::entities::{
        campaign::Campaign, customer::Customer, date_range::DateRange, plan::Plan,
        subscription::SubscriptionRecord,
    },
};

/// Earliest and latest date a table carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl DateSpan {
    /// Smallest span covering both inputs.
    pub fn union(self, other: DateSpan) -> DateSpan {
        DateSpan {
            earliest: self.earliest.min(other.earliest),
            latest: self.latest.max(other.latest),
        }
    }
}

#[async_trait]
pub trait PlanRepoTrait: Send + Sync {
    async fn list_all(&self) -> AppResult<Vec<Plan>>;
}

#[async_trait]
pub trait CustomerRepoTrait: Send + Sync {
    async fn list_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Customer>>;
    async fn list_by_campaigns(&self, campaign_ids: &[i64]) -> AppResult<Vec<Customer>>;
}

#[async_trait]
pub trait CampaignRepoTrait: Send + Sync {
    /// Campaigns whose window intersects the range. Ongoing campaigns have no end.
    async fn list_overlapping(&self, range: &DateRange) -> AppResult<Vec<Campaign>>;
    async fn date_span(&self) -> AppResult<Option<DateSpan>>;
}

#[async_trait]
pub trait SubscriptionRepoTrait: Send + Sync {
    /// Full chains of every customer holding a record whose start or coverage
    /// touches the range, so predecessors that started earlier are included.
    async fn list_chains_touching(&self, range: &DateRange) -> AppResult<Vec<SubscriptionRecord>>;
    async fn list_by_customers(&self, customer_ids: &[i64]) -> AppResult<Vec<SubscriptionRecord>>;
    /// Open-ended records count as reaching `today`.
    async fn date_span(&self, today: NaiveDate) -> AppResult<Option<DateSpan>>;
}
