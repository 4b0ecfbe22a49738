//! In-memory mock implementations for the ledger repository and report cache traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::{
        ledger::{
            CampaignRepoTrait, CustomerRepoTrait, DateSpan, PlanRepoTrait, SubscriptionRepoTrait,
        },
        report_cache::ReportCacheTrait,
    },
    domain::entities::{
        campaign::Campaign, customer::Customer, date_range::DateRange, plan::Plan,
        subscription::SubscriptionRecord,
    },
};

/// In-memory ledger implementing every repository trait over plain vectors.
#[derive(Default)]
pub struct InMemoryLedgerRepo {
    pub plans: Mutex<Vec<Plan>>,
    pub customers: Mutex<Vec<Customer>>,
    pub campaigns: Mutex<Vec<Campaign>>,
    pub subscriptions: Mutex<Vec<SubscriptionRecord>>,
}

impl InMemoryLedgerRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plans(self, plans: Vec<Plan>) -> Self {
        *self.plans.lock().unwrap() = plans;
        self
    }

    pub fn with_customers(self, customers: Vec<Customer>) -> Self {
        *self.customers.lock().unwrap() = customers;
        self
    }

    pub fn with_campaigns(self, campaigns: Vec<Campaign>) -> Self {
        *self.campaigns.lock().unwrap() = campaigns;
        self
    }

    pub fn with_subscriptions(self, subscriptions: Vec<SubscriptionRecord>) -> Self {
        *self.subscriptions.lock().unwrap() = subscriptions;
        self
    }
}

#[async_trait]
impl PlanRepoTrait for InMemoryLedgerRepo {
    async fn list_all(&self) -> AppResult<Vec<Plan>> {
        Ok(self.plans.lock().unwrap().clone())
    }
}

#[async_trait]
impl CustomerRepoTrait for InMemoryLedgerRepo {
    async fn list_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Customer>> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn list_by_campaigns(&self, campaign_ids: &[i64]) -> AppResult<Vec<Customer>> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.campaign_id.is_some_and(|id| campaign_ids.contains(&id)))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CampaignRepoTrait for InMemoryLedgerRepo {
    async fn list_overlapping(&self, range: &DateRange) -> AppResult<Vec<Campaign>> {
        Ok(self
            .campaigns
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.overlaps(range))
            .cloned()
            .collect())
    }

    async fn date_span(&self) -> AppResult<Option<DateSpan>> {
        let campaigns = self.campaigns.lock().unwrap();
        Ok(span(
            campaigns
                .iter()
                .map(|c| (c.start_date, c.end_date.unwrap_or(c.start_date))),
        ))
    }
}

#[async_trait]
impl SubscriptionRepoTrait for InMemoryLedgerRepo {
    async fn list_chains_touching(&self, range: &DateRange) -> AppResult<Vec<SubscriptionRecord>> {
        let subscriptions = self.subscriptions.lock().unwrap();
        let customers: HashSet<i64> = subscriptions
            .iter()
            .filter(|s| {
                s.start_date <= range.end() && s.end_date.is_none_or(|end| end >= range.start())
            })
            .map(|s| s.customer_id)
            .collect();
        Ok(subscriptions
            .iter()
            .filter(|s| customers.contains(&s.customer_id))
            .cloned()
            .collect())
    }

    async fn list_by_customers(&self, customer_ids: &[i64]) -> AppResult<Vec<SubscriptionRecord>> {
        Ok(self
            .subscriptions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| customer_ids.contains(&s.customer_id))
            .cloned()
            .collect())
    }

    async fn date_span(&self, today: NaiveDate) -> AppResult<Option<DateSpan>> {
        let subscriptions = self.subscriptions.lock().unwrap();
        Ok(span(subscriptions.iter().map(|s| {
            (s.start_date, s.end_date.unwrap_or(today).max(s.start_date))
        })))
    }
}

fn span(dates: impl Iterator<Item = (NaiveDate, NaiveDate)>) -> Option<DateSpan> {
    dates
        .map(|(earliest, latest)| DateSpan { earliest, latest })
        .reduce(DateSpan::union)
}

/// Repository whose every call fails as if the database were unreachable.
#[derive(Default)]
pub struct UnavailableLedgerRepo;

fn offline<T>() -> AppResult<T> {
    Err(AppError::DataUnavailable("ledger database offline".into()))
}

#[async_trait]
impl PlanRepoTrait for UnavailableLedgerRepo {
    async fn list_all(&self) -> AppResult<Vec<Plan>> {
        offline()
    }
}

#[async_trait]
impl CustomerRepoTrait for UnavailableLedgerRepo {
    async fn list_by_ids(&self, _ids: &[i64]) -> AppResult<Vec<Customer>> {
        offline()
    }

    async fn list_by_campaigns(&self, _campaign_ids: &[i64]) -> AppResult<Vec<Customer>> {
        offline()
    }
}

#[async_trait]
impl CampaignRepoTrait for UnavailableLedgerRepo {
    async fn list_overlapping(&self, _range: &DateRange) -> AppResult<Vec<Campaign>> {
        offline()
    }

    async fn date_span(&self) -> AppResult<Option<DateSpan>> {
        offline()
    }
}

#[async_trait]
impl SubscriptionRepoTrait for UnavailableLedgerRepo {
    async fn list_chains_touching(&self, _range: &DateRange) -> AppResult<Vec<SubscriptionRecord>> {
        offline()
    }

    async fn list_by_customers(&self, _customer_ids: &[i64]) -> AppResult<Vec<SubscriptionRecord>> {
        offline()
    }

    async fn date_span(&self, _today: NaiveDate) -> AppResult<Option<DateSpan>> {
        offline()
    }
}

/// Report cache that never expires entries.
#[derive(Default)]
pub struct InMemoryReportCache {
    pub entries: Mutex<HashMap<String, String>>,
}

impl InMemoryReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl ReportCacheTrait for InMemoryReportCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str, _ttl: time::Duration) -> AppResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
