//! Operation line handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::entities::{OperationId, OperationLine, OperationLineId, OperationLineInput};
use crate::error::AppError;
use crate::AppState;

/// GET /operations/:id/lines
pub async fn list_operation_lines(
    State(state): State<AppState>,
    Path(operation_id): Path<i32>,
) -> Result<Response, AppError> {
    let lines = state
        .operation_service
        .list_lines(&OperationId(operation_id))
        .await?;
    if lines.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(lines).into_response())
}

/// POST /operations/:id/lines/save
pub async fn save_operation_line(
    State(state): State<AppState>,
    Path(operation_id): Path<i32>,
    Json(input): Json<OperationLineInput>,
) -> Result<(StatusCode, Json<OperationLine>), AppError> {
    let line = state
        .operation_service
        .add_line(&OperationId(operation_id), &input)
        .await?;
    Ok((StatusCode::CREATED, Json(line)))
}

/// GET /operation-lines/:id
pub async fn get_operation_line(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OperationLine>, AppError> {
    let line = state
        .operation_service
        .get_line(&OperationLineId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Operation line {} not found", id)))?;

    Ok(Json(line))
}

/// PUT /operation-lines/:id/update
pub async fn update_operation_line(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<OperationLineInput>,
) -> Result<Json<OperationLine>, AppError> {
    let line = state
        .operation_service
        .update_line(&OperationLineId(id), &input)
        .await?;
    Ok(Json(line))
}

/// DELETE /operation-lines/:id/delete
pub async fn delete_operation_line(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state
        .operation_service
        .delete_line(&OperationLineId(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
