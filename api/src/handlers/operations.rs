//! Operation handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::entities::{InterventionId, Operation, OperationId, OperationInput};
use crate::error::AppError;
use crate::AppState;

/// GET /interventions/:id/operations
pub async fn list_operations(
    State(state): State<AppState>,
    Path(intervention_id): Path<i32>,
) -> Result<Response, AppError> {
    let operations = state
        .operation_service
        .list_for_intervention(&InterventionId(intervention_id))
        .await?;
    if operations.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(operations).into_response())
}

/// POST /interventions/:id/operations/save
pub async fn save_operation(
    State(state): State<AppState>,
    Path(intervention_id): Path<i32>,
    Json(input): Json<OperationInput>,
) -> Result<(StatusCode, Json<Operation>), AppError> {
    let operation = state
        .operation_service
        .add(&InterventionId(intervention_id), &input)
        .await?;
    Ok((StatusCode::CREATED, Json(operation)))
}

/// GET /operations/:id
pub async fn get_operation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Operation>, AppError> {
    let operation = state
        .operation_service
        .get(&OperationId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Operation {} not found", id)))?;

    Ok(Json(operation))
}

/// PUT /operations/:id/update
///
/// Listed lines are inserted or updated; lines left out are kept.
pub async fn update_operation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<OperationInput>,
) -> Result<Json<Operation>, AppError> {
    let operation = state
        .operation_service
        .update(&OperationId(id), &input)
        .await?;
    Ok(Json(operation))
}

/// DELETE /operations/:id/delete
///
/// Also deletes the owning intervention and its other operations.
pub async fn delete_operation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    state.operation_service.delete(&OperationId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::test_utils::test_server;

    async fn car_with_operation(server: &axum_test::TestServer) -> Value {
        server
            .post("/cars/save")
            .json(&json!({
                "registration": "AB-123-CD",
                "owner": "Dupont",
                "interventions": [{
                    "status": "OPEN",
                    "operations": [{
                        "label": "Oil change",
                        "operationLines": [{"label": "Oil 5W30"}, {"label": "Oil filter"}]
                    }]
                }]
            }))
            .await
            .json()
    }

    #[tokio::test]
    async fn update_keeps_unlisted_lines() {
        let server = test_server().await;
        let car = car_with_operation(&server).await;
        let operation = &car["interventions"][0]["operations"][0];
        let operation_id = operation["id"].as_i64().unwrap();
        let first_line = operation["operationLines"][0]["id"].as_i64().unwrap();

        let updated: Value = server
            .put(&format!("/operations/{}/update", operation_id))
            .json(&json!({
                "label": "Oil service",
                "operationLines": [{"id": first_line, "label": "Oil 5W30", "done": true}]
            }))
            .await
            .json();

        assert_eq!(updated["label"], "Oil service");
        let lines = updated["operationLines"].as_array().unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().any(|l| l["id"] == first_line && l["done"] == true));
    }

    #[tokio::test]
    async fn deleting_an_operation_removes_its_intervention() {
        let server = test_server().await;
        let car = car_with_operation(&server).await;
        let car_id = car["id"].as_i64().unwrap();
        let intervention_id = car["interventions"][0]["id"].as_i64().unwrap();
        let operation_id = car["interventions"][0]["operations"][0]["id"]
            .as_i64()
            .unwrap();

        server
            .delete(&format!("/operations/{}/delete", operation_id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/interventions/{}", intervention_id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get(&format!("/cars/{}", car_id))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn save_and_list_operations() {
        let server = test_server().await;
        let car = car_with_operation(&server).await;
        let intervention_id = car["interventions"][0]["id"].as_i64().unwrap();

        server
            .post(&format!("/interventions/{}/operations/save", intervention_id))
            .json(&json!({"label": "Brakes"}))
            .await
            .assert_status(StatusCode::CREATED);

        let operations: Vec<Value> = server
            .get(&format!("/interventions/{}/operations", intervention_id))
            .await
            .json();
        assert_eq!(operations.len(), 2);
    }

    #[tokio::test]
    async fn missing_operation_is_not_found() {
        let server = test_server().await;

        server
            .get("/operations/5")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete("/operations/5/delete")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
