//! Prescription endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::prescription::Prescription;
use crate::prescriptions::{self, NewPrescription};

#[derive(Serialize)]
pub struct PrescriptionListResponse {
    pub prescriptions: Vec<Prescription>,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

/// `GET /api/prescriptions` — newest first.
pub async fn list(
    State(ctx): State<ApiContext>,
) -> Result<Json<PrescriptionListResponse>, ApiError> {
    let prescriptions = ctx.with_db(prescriptions::fetch_prescriptions)?;
    Ok(Json(PrescriptionListResponse { prescriptions }))
}

/// `POST /api/prescriptions`
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(input): Json<NewPrescription>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let id = ctx.with_db(|conn| prescriptions::add_prescription(conn, &input))?;
    Ok(Json(CreatedResponse { id }))
}

/// `DELETE /api/prescriptions/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    ctx.with_db(|conn| prescriptions::delete_prescription(conn, &id))?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}
