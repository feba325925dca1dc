//! Streak endpoints.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::enums::StreakCategory;
use crate::streaks::{self, StreakSummary};

#[derive(Serialize)]
pub struct StreaksResponse {
    pub streaks: Vec<StreakSummary>,
}

#[derive(Deserialize)]
pub struct GoalRequest {
    pub goal: u32,
}

/// `GET /api/streaks` — both streak cards, freshly computed.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<StreaksResponse>, ApiError> {
    let today = Local::now().date_naive();
    let streaks = ctx.with_db(|conn| streaks::all_streak_summaries(conn, today))?;
    Ok(Json(StreaksResponse { streaks }))
}

/// `PUT /api/streaks/:category/goal`
pub async fn update_goal(
    State(ctx): State<ApiContext>,
    Path(category): Path<String>,
    Json(body): Json<GoalRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let category: StreakCategory = category
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Unknown streak category: {category}")))?;
    ctx.with_db(|conn| streaks::update_goal(conn, category, body.goal))?;
    Ok(Json(serde_json::json!({
        "category": category.as_str(),
        "goal": body.goal,
    })))
}
