use std::{str::FromStr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};

use crate::{
    adapters::http::{app_state::AppState, routes::RangeQuery},
    app_error::{AppError, AppResult},
    application::use_cases::{
        dashboard::{DashboardSection, DashboardUseCases},
        revenue_analytics::RevenueAnalyticsUseCases,
    },
};

pub fn router() -> Router<AppState> {
    Router::new().route("/{section}", get(get_section))
}

async fn get_section(
    State(analytics): State<Arc<RevenueAnalyticsUseCases>>,
    State(dashboard): State<Arc<DashboardUseCases>>,
    Path(section): Path<String>,
    Query(query): Query<RangeQuery>,
) -> AppResult<impl IntoResponse> {
    let section = DashboardSection::from_str(&section).map_err(|_| AppError::NotFound)?;
    let range = analytics
        .resolve_range(query.start.as_deref(), query.end.as_deref())
        .await?;

    let view = dashboard.section(section, &range).await?;
    Ok(Json(view))
}
