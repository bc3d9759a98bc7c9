use crate::{error::AppError, pipeline, AppState};
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;

/// The embedded dashboard page. It renders the JSON from `/api/dashboard`
/// client-side; the backend never does display work beyond titles and units.
const DASHBOARD_PAGE: &str = include_str!("../assets/dashboard.html");

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Earliest observation date; defaults to the configured start.
    pub start: Option<NaiveDate>,
    /// Apply the 3-period moving average (display only).
    #[serde(default)]
    pub smooth: bool,
}

/// # GET /
/// Serves the single dashboard page.
pub async fn dashboard_page() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}

/// Enforces the fetch input constraint that a start bound must not lie in
/// the future. Shared by the web handler and the `snapshot` CLI path.
pub fn validate_start(start: NaiveDate) -> Result<(), AppError> {
    if start > Utc::now().date_naive() {
        return Err(AppError::BadRequest(format!(
            "start date {} is in the future",
            start
        )));
    }
    Ok(())
}

/// # GET /api/dashboard
/// Fetches the three configured series, applies each panel's derivation, and
/// returns the chart payloads. Panel failures are carried inside the
/// payload; this endpoint only rejects malformed requests.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<pipeline::Dashboard>, AppError> {
    let start = query.start.unwrap_or(state.config.fred.observation_start);
    validate_start(start)?;

    let dashboard = pipeline::build_dashboard(state.source.as_ref(), start, query.smooth).await;
    Ok(Json(dashboard))
}
