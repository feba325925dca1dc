//! Reminder endpoints: list, create, delete, and the completion toggle.

use axum::extract::{Path, State};
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::reminder::Reminder;
use crate::reminders::{self, NewReminder};

#[derive(Serialize)]
pub struct ReminderListResponse {
    pub reminders: Vec<Reminder>,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

/// Body for the completion toggle. `date` defaults to today, letting the
/// client retroactively check or uncheck past days.
#[derive(Deserialize)]
pub struct CompletionRequest {
    pub date: Option<String>,
    pub done: bool,
}

/// `GET /api/reminders` — all reminders with their completion logs.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<ReminderListResponse>, ApiError> {
    let reminders = ctx.with_db(reminders::fetch_all_reminders)?;
    Ok(Json(ReminderListResponse { reminders }))
}

/// `POST /api/reminders`
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(input): Json<NewReminder>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let id = ctx.with_db(|conn| reminders::add_reminder(conn, &input))?;
    Ok(Json(CreatedResponse { id }))
}

/// `DELETE /api/reminders/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    ctx.with_db(|conn| reminders::delete_reminder(conn, &id))?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

/// `POST /api/reminders/:id/completion` — check or uncheck a date.
pub async fn set_completion(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
    Json(body): Json<CompletionRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let day = match body.date {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|_| ApiError::BadRequest(format!("Invalid date (expected YYYY-MM-DD): {s}")))?,
        None => Local::now().date_naive(),
    };
    ctx.with_db(|conn| reminders::set_completion(conn, &id, day, body.done))?;
    Ok(Json(serde_json::json!({ "id": id, "date": day.to_string(), "done": body.done })))
}
