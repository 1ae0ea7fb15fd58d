//! Router-level smoke tests. The database connection is never touched:
//! health endpoints short-circuit, and protected routes reject before
//! any store access when the bearer token is missing or invalid.

use axum_test::TestServer;
use sea_orm::DatabaseConnection;

use campus_registry::router::build_router;
use campus_registry::state::AppState;

use crate::helpers::TEST_JWT_SECRET;

fn test_server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_answer_health_checks() {
    let server = test_server();
    assert_eq!(server.get("/healthz").await.status_code(), 200);
    assert_eq!(server.get("/readyz").await.status_code(), 200);
}

#[tokio::test]
async fn should_reject_protected_route_without_token() {
    let server = test_server();
    let response = server.get("/courses").await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn should_reject_protected_route_with_garbage_token() {
    let server = test_server();
    let response = server
        .get("/users/me")
        .authorization("Bearer not-a-jwt")
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn should_reject_mutation_without_token() {
    let server = test_server();
    let response = server
        .post("/courses")
        .json(&serde_json::json!({
            "course_code": "CS101",
            "title": "Intro"
        }))
        .await;
    assert_eq!(response.status_code(), 401);
}
