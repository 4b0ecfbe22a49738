//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` creates an `AppState` whose use cases run against an
//! in-memory ledger and cache.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use time::Duration;

use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::{
        dashboard::DashboardUseCases,
        revenue_analytics::{DEFAULT_MAX_RANGE_DAYS, RevenueAnalyticsUseCases},
    },
    domain::entities::{
        campaign::Campaign, customer::Customer, plan::Plan, subscription::SubscriptionRecord,
    },
    infra::config::AppConfig,
    test_utils::{InMemoryLedgerRepo, InMemoryReportCache, UnavailableLedgerRepo},
};

/// Builder for creating `AppState` with in-memory mocks.
///
/// # Example
///
/// ```ignore
/// let app_state = TestAppStateBuilder::new()
///     .with_plans(vec![create_test_plan(1, |_| {})])
///     .with_subscriptions(vec![create_test_subscription(1, 1, 1, day(2024, 1, 1), |_| {})])
///     .build();
/// ```
pub struct TestAppStateBuilder {
    plans: Vec<Plan>,
    customers: Vec<Customer>,
    campaigns: Vec<Campaign>,
    subscriptions: Vec<SubscriptionRecord>,
    rollup_threshold_days: i64,
    max_range_days: u64,
    unavailable: bool,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            plans: vec![],
            customers: vec![],
            campaigns: vec![],
            subscriptions: vec![],
            rollup_threshold_days: 60,
            max_range_days: DEFAULT_MAX_RANGE_DAYS,
            unavailable: false,
        }
    }

    pub fn with_plans(mut self, plans: Vec<Plan>) -> Self {
        self.plans.extend(plans);
        self
    }

    pub fn with_customers(mut self, customers: Vec<Customer>) -> Self {
        self.customers.extend(customers);
        self
    }

    pub fn with_campaigns(mut self, campaigns: Vec<Campaign>) -> Self {
        self.campaigns.extend(campaigns);
        self
    }

    pub fn with_subscriptions(mut self, subscriptions: Vec<SubscriptionRecord>) -> Self {
        self.subscriptions.extend(subscriptions);
        self
    }

    pub fn with_rollup_threshold_days(mut self, days: i64) -> Self {
        self.rollup_threshold_days = days;
        self
    }

    pub fn with_max_range_days(mut self, days: u64) -> Self {
        self.max_range_days = days;
        self
    }

    /// Back every repository with one that fails as if storage were offline.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    pub fn build(self) -> AppState {
        let config = test_config(self.rollup_threshold_days, self.max_range_days);
        let cache = Arc::new(InMemoryReportCache::new());

        let analytics = if self.unavailable {
            let repo = Arc::new(UnavailableLedgerRepo);
            RevenueAnalyticsUseCases::new(
                repo.clone(),
                repo.clone(),
                repo.clone(),
                repo,
                cache,
                config.report_cache_ttl,
            )
            .with_max_range_days(config.max_range_days)
        } else {
            let repo = Arc::new(
                InMemoryLedgerRepo::new()
                    .with_plans(self.plans)
                    .with_customers(self.customers)
                    .with_campaigns(self.campaigns)
                    .with_subscriptions(self.subscriptions),
            );
            RevenueAnalyticsUseCases::new(
                repo.clone(),
                repo.clone(),
                repo.clone(),
                repo,
                cache,
                config.report_cache_ttl,
            )
            .with_max_range_days(config.max_range_days)
        };
        let analytics = Arc::new(analytics);
        let dashboard = DashboardUseCases::new(
            analytics.clone(),
            config.movement_rollup_threshold_days,
        );

        AppState {
            config: Arc::new(config),
            analytics_use_cases: analytics,
            dashboard_use_cases: Arc::new(dashboard),
        }
    }
}

fn test_config(rollup_threshold_days: i64, max_range_days: u64) -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        cors_origin: HeaderValue::from_static("http://localhost:3000"),
        redis_url: None,
        report_cache_ttl: Duration::minutes(10),
        movement_rollup_threshold_days: rollup_threshold_days,
        max_range_days,
        log_file: "test.log".to_string(),
    }
}
