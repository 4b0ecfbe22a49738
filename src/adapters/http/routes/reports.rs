use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    adapters::http::{app_state::AppState, routes::RangeQuery},
    app_error::AppResult,
    application::use_cases::revenue_analytics::RevenueAnalyticsUseCases,
    domain::entities::date_range::DateRange,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/daily-revenue", get(daily_revenue))
        .route("/active-census", get(active_census))
        .route("/lifecycle-events", get(lifecycle_events))
        .route("/campaigns", get(campaigns))
        .route("/date-bounds", get(date_bounds))
}

#[derive(Serialize)]
struct ReportResponse<T> {
    start: NaiveDate,
    end: NaiveDate,
    rows: Vec<T>,
}

impl<T> ReportResponse<T> {
    fn new(range: DateRange, rows: Vec<T>) -> Self {
        Self {
            start: range.start(),
            end: range.end(),
            rows,
        }
    }
}

#[derive(Serialize)]
struct DateBoundsResponse {
    start: NaiveDate,
    end: NaiveDate,
}

async fn resolve(analytics: &RevenueAnalyticsUseCases, query: &RangeQuery) -> AppResult<DateRange> {
    analytics
        .resolve_range(query.start.as_deref(), query.end.as_deref())
        .await
}

async fn daily_revenue(
    State(analytics): State<Arc<RevenueAnalyticsUseCases>>,
    Query(query): Query<RangeQuery>,
) -> AppResult<impl IntoResponse> {
    let range = resolve(&analytics, &query).await?;
    let rows = analytics.daily_revenue(&range).await?;
    Ok(Json(ReportResponse::new(range, rows)))
}

async fn active_census(
    State(analytics): State<Arc<RevenueAnalyticsUseCases>>,
    Query(query): Query<RangeQuery>,
) -> AppResult<impl IntoResponse> {
    let range = resolve(&analytics, &query).await?;
    let rows = analytics.active_census(&range).await?;
    Ok(Json(ReportResponse::new(range, rows)))
}

async fn lifecycle_events(
    State(analytics): State<Arc<RevenueAnalyticsUseCases>>,
    Query(query): Query<RangeQuery>,
) -> AppResult<impl IntoResponse> {
    let range = resolve(&analytics, &query).await?;
    let rows = analytics.lifecycle_events(&range).await?;
    Ok(Json(ReportResponse::new(range, rows)))
}

async fn campaigns(
    State(analytics): State<Arc<RevenueAnalyticsUseCases>>,
    Query(query): Query<RangeQuery>,
) -> AppResult<impl IntoResponse> {
    let range = resolve(&analytics, &query).await?;
    let rows = analytics.campaign_summary(&range).await?;
    Ok(Json(ReportResponse::new(range, rows)))
}

async fn date_bounds(
    State(analytics): State<Arc<RevenueAnalyticsUseCases>>,
) -> AppResult<impl IntoResponse> {
    let bounds = analytics.date_bounds().await?;
    Ok(Json(DateBoundsResponse {
        start: bounds.start(),
        end: bounds.end(),
    }))
}
