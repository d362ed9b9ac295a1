//! Intervention handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::entities::{CarId, Intervention, InterventionId, InterventionInput};
use crate::error::AppError;
use crate::AppState;

/// GET /cars/:id/interventions
pub async fn list_interventions(
    State(state): State<AppState>,
    Path(car_id): Path<i32>,
) -> Result<Response, AppError> {
    let interventions = state
        .intervention_service
        .list_for_car(&CarId(car_id))
        .await?;
    if interventions.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(interventions).into_response())
}

/// POST /cars/:id/interventions/save
///
/// The year and per-year number are assigned by the server.
pub async fn save_intervention(
    State(state): State<AppState>,
    Path(car_id): Path<i32>,
    Json(input): Json<InterventionInput>,
) -> Result<(StatusCode, Json<Intervention>), AppError> {
    let intervention = state
        .intervention_service
        .add(&CarId(car_id), &input)
        .await?;
    Ok((StatusCode::CREATED, Json(intervention)))
}

/// GET /interventions/:id
pub async fn get_intervention(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Intervention>, AppError> {
    let intervention = state
        .intervention_service
        .get(&InterventionId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Intervention {} not found", id)))?;

    Ok(Json(intervention))
}

/// PUT /interventions/:id/update
pub async fn update_intervention(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<InterventionInput>,
) -> Result<Json<Intervention>, AppError> {
    let intervention = state
        .intervention_service
        .update(&InterventionId(id), &input)
        .await?;
    Ok(Json(intervention))
}

/// DELETE /interventions/:id/delete
pub async fn delete_intervention(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state
        .intervention_service
        .delete(&InterventionId(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
