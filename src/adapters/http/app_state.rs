use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    infra::config::AppConfig,
    use_cases::{dashboard::DashboardUseCases, revenue_analytics::RevenueAnalyticsUseCases},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub analytics_use_cases: Arc<RevenueAnalyticsUseCases>,
    pub dashboard_use_cases: Arc<DashboardUseCases>,
}

impl FromRef<AppState> for Arc<RevenueAnalyticsUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.analytics_use_cases.clone()
    }
}

impl FromRef<AppState> for Arc<DashboardUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.dashboard_use_cases.clone()
    }
}
