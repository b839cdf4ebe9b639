use axum::http::StatusCode;
use serde_json::json;

mod common;

use common::{broken_app, send, TestApp};

fn registration(email: &str) -> serde_json::Value {
    json!({ "name": "Ada Lovelace", "email": email, "password": "analytical" })
}

#[tokio::test]
async fn register_returns_user_and_working_token() {
    let app = TestApp::new();

    let (status, body) = app
        .send("POST", "/api/users", None, Some(registration("Ada@Example.com")))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["email"], "ada@example.com");
    assert!(body["data"]["user"].get("passwordHash").is_none());

    let token = body["data"]["token"].as_str().unwrap();
    let (status, me) = app.send("GET", "/api/auth", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["data"]["id"], body["data"]["user"]["id"]);
    assert_eq!(me["data"]["name"], "Ada Lovelace");
}

#[tokio::test]
async fn register_reports_every_invalid_field() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            "POST",
            "/api/users",
            None,
            Some(json!({ "name": " ", "email": "nope", "password": "short" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "email", "password"]);
}

#[tokio::test]
async fn register_duplicate_email_conflicts() {
    let app = TestApp::new();

    let (status, _) = app
        .send("POST", "/api/users", None, Some(registration("ada@example.com")))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .send("POST", "/api/users", None, Some(registration(" ADA@example.com")))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn login_issues_token_for_valid_credentials() {
    let app = TestApp::new();
    app.send("POST", "/api/users", None, Some(registration("ada@example.com")))
        .await;

    let (status, body) = app
        .send(
            "POST",
            "/api/auth",
            None,
            Some(json!({ "email": "ada@example.com", "password": "analytical" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let token = body["data"]["token"].as_str().unwrap();
    let (status, _) = app
        .send("POST", "/api/todos", Some(token), Some(json!({ "todo": "log in" })))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn login_rejects_bad_credentials_uniformly() {
    let app = TestApp::new();
    app.send("POST", "/api/users", None, Some(registration("ada@example.com")))
        .await;

    let (status, wrong_password) = app
        .send(
            "POST",
            "/api/auth",
            None,
            Some(json!({ "email": "ada@example.com", "password": "difference" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown_user) = app
        .send(
            "POST",
            "/api/auth",
            None,
            Some(json!({ "email": "babbage@example.com", "password": "analytical" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn current_user_requires_token() {
    let app = TestApp::new();

    let (status, body) = app.send("GET", "/api/auth", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token, authorization denied");
}

#[tokio::test]
async fn current_user_missing_from_store() {
    let app = TestApp::new();
    let (_, token) = app.new_caller();

    let (status, _) = app.send("GET", "/api/auth", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_storage_failure_is_server_error() {
    let router = broken_app();

    let (status, body) = send(
        &router,
        "POST",
        "/api/auth",
        None,
        Some(json!({ "email": "ada@example.com", "password": "analytical" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Server Error");
}

#[tokio::test]
async fn public_routes_respond() {
    let app = TestApp::new();

    let (status, body) = app.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": 200 }));

    let (status, body) = app.send("GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["msg"].is_string());
}
