//! Car handlers
//!
//! Endpoints for the car aggregate. Responses carry the full tree of
//! interventions, operations and lines.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::domain::entities::{Car, CarId, CarInput, CarSort};
use crate::error::AppError;
use crate::AppState;

/// Query parameters for listing cars
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCarsQuery {
    pub sorted_by: Option<String>,
}

/// GET /cars/all
///
/// List every car, sorted ascending by `sortedBy` (registration by default).
/// Answers 204 when there are none.
pub async fn list_cars(
    State(state): State<AppState>,
    Query(query): Query<ListCarsQuery>,
) -> Result<Response, AppError> {
    let sort = match query.sorted_by.as_deref() {
        None | Some("") => CarSort::default(),
        Some(field) => field.parse().map_err(AppError::BadRequest)?,
    };

    let cars = state.car_service.list(sort).await?;
    if cars.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(cars).into_response())
}

/// GET /cars/:id
pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Car>, AppError> {
    let car = state
        .car_service
        .get(&CarId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Car {} not found", id)))?;

    Ok(Json(car))
}

/// POST /cars/save
pub async fn save_car(
    State(state): State<AppState>,
    Json(input): Json<CarInput>,
) -> Result<(StatusCode, Json<Car>), AppError> {
    let car = state.car_service.save(&input).await?;
    Ok((StatusCode::CREATED, Json(car)))
}

/// PUT /cars/:id/update
///
/// Replace the car's fields. When `interventions` is present it becomes
/// the car's complete list: unlisted interventions are deleted.
pub async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<CarInput>,
) -> Result<Json<Car>, AppError> {
    let car = state.car_service.update(&CarId(id), &input).await?;
    Ok(Json(car))
}

/// DELETE /cars/:id/delete
pub async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.car_service.delete(&CarId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
