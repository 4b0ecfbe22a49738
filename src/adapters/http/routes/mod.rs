pub mod dashboard;
pub mod reports;

use axum::Router;
use serde::Deserialize;

use crate::adapters::http::app_state::AppState;

/// Optional `YYYY-MM-DD` bounds shared by every report endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/reports", reports::router())
        .nest("/dashboard", dashboard::router())
}
