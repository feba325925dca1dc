//! Dashboard endpoint.

use axum::extract::State;
use axum::Json;
use chrono::Local;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::home::{self, DashboardData};

/// `GET /api/dashboard` — today's schedule, adherence, and streak cards.
pub async fn dashboard(State(ctx): State<ApiContext>) -> Result<Json<DashboardData>, ApiError> {
    let today = Local::now().date_naive();
    ctx.with_db(|conn| home::dashboard_data(conn, today)).map(Json)
}
