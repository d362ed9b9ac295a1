//! End-to-end tests for the Hostocars API
//!
//! Drive the full router over a fresh in-memory database: a car's life in
//! the garage from registration to removal, with method logging enabled.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use tracing::level_filters::LevelFilter;
    use tracing_test::traced_test;

    use crate::loggable::MethodLogger;
    use crate::test_utils::{test_db, StaticLevels};
    use crate::{build_router, AppState};

    async fn traced_server() -> TestServer {
        let logger = MethodLogger::new(Arc::new(StaticLevels(LevelFilter::TRACE)));
        let state = AppState::new(test_db().await, logger);
        TestServer::new(build_router(state)).unwrap()
    }

    #[tokio::test]
    async fn health_check() {
        let server = traced_server().await;

        let body: Value = server.get("/health").await.json();
        assert_eq!(body["status"], "ok");
    }

    #[traced_test]
    #[tokio::test]
    async fn garage_workflow() {
        let server = traced_server().await;

        // Register the car
        let car: Value = server
            .post("/cars/save")
            .json(&json!({
                "registration": "GH-789-IJ",
                "owner": "Leroy",
                "brand": "Peugeot",
                "model": "308"
            }))
            .await
            .json();
        let car_id = car["id"].as_i64().unwrap();

        // Open two interventions; numbers follow each other within the year
        let first: Value = server
            .post(&format!("/cars/{}/interventions/save", car_id))
            .json(&json!({"status": "OPEN", "mileage": 98000}))
            .await
            .json();
        let second: Value = server
            .post(&format!("/cars/{}/interventions/save", car_id))
            .json(&json!({"status": "OPEN", "mileage": 99500}))
            .await
            .json();
        assert_eq!(first["number"], 1);
        assert_eq!(second["number"], 2);
        assert_eq!(first["year"], second["year"]);

        // Plan the work on the first one
        let operation: Value = server
            .post(&format!(
                "/interventions/{}/operations/save",
                first["id"].as_i64().unwrap()
            ))
            .json(&json!({
                "label": "Timing belt",
                "operationLines": [{"label": "Belt kit"}, {"label": "Water pump"}]
            }))
            .await
            .json();
        let line_id = operation["operationLines"][0]["id"].as_i64().unwrap();

        server
            .put(&format!("/operation-lines/{}/update", line_id))
            .json(&json!({"label": "Belt kit", "quantity": 1, "done": true}))
            .await
            .assert_status_ok();

        // Drop the second intervention by resubmitting the car without it
        let mut update = car.clone();
        update["interventions"] = json!([{"id": first["id"], "status": "DONE"}]);
        let updated: Value = server
            .put(&format!("/cars/{}/update", car_id))
            .json(&update)
            .await
            .json();
        let interventions = updated["interventions"].as_array().unwrap();
        assert_eq!(interventions.len(), 1);
        assert_eq!(interventions[0]["status"], "DONE");
        assert_eq!(
            interventions[0]["operations"][0]["operationLines"][0]["done"],
            true
        );
        server
            .get(&format!("/interventions/{}", second["id"].as_i64().unwrap()))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        // Remove the car and everything with it
        server
            .delete(&format!("/cars/{}/delete", car_id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&format!("/operation-lines/{}", line_id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get("/cars/all")
            .await
            .assert_status(StatusCode::NO_CONTENT);

        assert!(logs_contain(r#"save_car <= {"registration":"GH-789-IJ","serialNumber":null,"owner":"Leroy""#));
        assert!(logs_contain("add_intervention ["));
        assert!(logs_contain("update_operation_line ["));
        assert!(logs_contain("delete_car ["));
    }
}
