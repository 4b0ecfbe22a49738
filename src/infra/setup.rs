use crate::{
    adapters::http::app_state::AppState,
    application::ports::{
        ledger::{CampaignRepoTrait, CustomerRepoTrait, PlanRepoTrait, SubscriptionRepoTrait},
        report_cache::ReportCacheTrait,
    },
    infra::{
        config::AppConfig,
        report_cache::{InProcessReportCache, RedisReportCache},
        sqlite_persistence,
    },
    use_cases::{dashboard::DashboardUseCases, revenue_analytics::RevenueAnalyticsUseCases},
};
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let sqlite_arc = Arc::new(
        sqlite_persistence(&config.database_url, config.database_max_connections).await?,
    );

    let cache = init_report_cache(&config).await;

    let analytics_use_cases = RevenueAnalyticsUseCases::new(
        sqlite_arc.clone() as Arc<dyn PlanRepoTrait>,
        sqlite_arc.clone() as Arc<dyn CustomerRepoTrait>,
        sqlite_arc.clone() as Arc<dyn CampaignRepoTrait>,
        sqlite_arc as Arc<dyn SubscriptionRepoTrait>,
        cache,
        config.report_cache_ttl,
    )
    .with_max_range_days(config.max_range_days);
    let analytics_use_cases = Arc::new(analytics_use_cases);

    let dashboard_use_cases = DashboardUseCases::new(
        analytics_use_cases.clone(),
        config.movement_rollup_threshold_days,
    );

    Ok(AppState {
        config: Arc::new(config),
        analytics_use_cases,
        dashboard_use_cases: Arc::new(dashboard_use_cases),
    })
}

/// Redis when configured and reachable, otherwise a per-process cache.
async fn init_report_cache(config: &AppConfig) -> Arc<dyn ReportCacheTrait> {
    let Some(redis_url) = config.redis_url.as_deref() else {
        tracing::info!("REDIS_URL not set, using in-process report cache");
        return Arc::new(InProcessReportCache::new());
    };

    match RedisReportCache::new(redis_url).await {
        Ok(cache) => {
            tracing::info!("Using Redis report cache");
            Arc::new(cache)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Falling back to in-process report cache");
            Arc::new(InProcessReportCache::new())
        }
    }
}

pub fn init_tracing(log_file: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "revenue_ledger=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs), skipped when the file cannot be created
    let json_layer = match File::create(log_file) {
        Ok(file) => Some(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(true)
                .with_span_list(true),
        ),
        Err(e) => {
            eprintln!("cannot create log file {log_file}: {e}");
            None
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
