//! HTTP test server over a fresh in-memory database

use axum_test::TestServer;

use super::test_db;
use crate::loggable::MethodLogger;
use crate::{build_router, AppState};

pub async fn test_server() -> TestServer {
    let state = AppState::new(test_db().await, MethodLogger::disabled());
    TestServer::new(build_router(state)).expect("Failed to start test server")
}
