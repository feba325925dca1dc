//! Health-log endpoints for the progress screen.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::enums::HealthLogType;
use crate::models::health_log::HealthLog;
use crate::progress::{self, NewHealthLog, TrendPoint};

#[derive(Deserialize)]
pub struct LogListQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Deserialize)]
pub struct TrendQuery {
    #[serde(rename = "type")]
    pub kind: String,
    /// Window length in days, default one week.
    pub days: Option<u32>,
}

#[derive(Serialize)]
pub struct LogListResponse {
    pub logs: Vec<HealthLog>,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

#[derive(Serialize)]
pub struct TrendResponse {
    pub points: Vec<TrendPoint>,
}

fn parse_kind(s: &str) -> Result<HealthLogType, ApiError> {
    s.parse()
        .map_err(|_| ApiError::BadRequest(format!("Unknown health log type: {s}")))
}

/// `GET /api/health-logs?type=` — newest first.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<LogListQuery>,
) -> Result<Json<LogListResponse>, ApiError> {
    let kind = query.kind.as_deref().map(parse_kind).transpose()?;
    let logs = ctx.with_db(|conn| progress::fetch_health_logs(conn, kind))?;
    Ok(Json(LogListResponse { logs }))
}

/// `POST /api/health-logs`
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(input): Json<NewHealthLog>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let id = ctx.with_db(|conn| progress::record_health_log(conn, &input))?;
    Ok(Json(CreatedResponse { id }))
}

/// `GET /api/health-logs/trend?type=&days=` — chart points, oldest first.
pub async fn trend(
    State(ctx): State<ApiContext>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<TrendResponse>, ApiError> {
    let kind = parse_kind(&query.kind)?;
    let days = query.days.unwrap_or(7);
    if days == 0 {
        return Err(ApiError::BadRequest("days must be at least 1".into()));
    }
    let today = Local::now().date_naive();
    let points = ctx.with_db(|conn| progress::recent_trend(conn, kind, days, today))?;
    Ok(Json(TrendResponse { points }))
}
