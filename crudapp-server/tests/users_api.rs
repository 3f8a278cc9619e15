//! End-to-end tests of the users routes against the in-memory connector.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use crudapp_server::{build_router, MemoryConnector, ServerConfig};

fn app() -> (Router, Arc<MemoryConnector>) {
    let connector = Arc::new(MemoryConnector::new());
    let router = build_router(connector.clone(), &ServerConfig::default());
    (router, connector)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn ada_lifecycle() {
    let (app, _) = app();

    let (status, body) = send_json(
        &app,
        "POST",
        "/users",
        Some(json!({ "name": "Ada", "email": "ada@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 1, "name": "Ada", "email": "ada@x.com" }));

    let (status, body) = send_json(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "id": 1, "name": "Ada", "email": "ada@x.com" }]));

    let (status, body) = send_json(
        &app,
        "PUT",
        "/users/1",
        Some(json!({ "name": "Ada L.", "email": "ada@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "1", "name": "Ada L.", "email": "ada@x.com" }));

    let (status, bytes) = send(&app, "DELETE", "/users/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(bytes.is_empty());

    let (status, body) = send_json(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn created_ids_strictly_increase() {
    let (app, _) = app();
    let mut last = 0;

    for i in 0..5 {
        let (status, body) = send_json(
            &app,
            "POST",
            "/users",
            Some(json!({ "name": format!("user{}", i), "email": format!("u{}@x.com", i) })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let id = body["id"].as_i64().expect("numeric id");
        assert!(id > last);
        last = id;
        assert_eq!(body["name"], json!(format!("user{}", i)));
    }
}

#[tokio::test]
async fn update_touches_only_target_row() {
    let (app, _) = app();
    for (name, email) in [("Ada", "ada@x.com"), ("Grace", "grace@x.com")] {
        send_json(&app, "POST", "/users", Some(json!({ "name": name, "email": email }))).await;
    }

    let (status, _) = send_json(
        &app,
        "PUT",
        "/users/2",
        Some(json!({ "name": "Grace H.", "email": "gh@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send_json(&app, "GET", "/users", None).await;
    assert_eq!(
        body,
        json!([
            { "id": 1, "name": "Ada", "email": "ada@x.com" },
            { "id": 2, "name": "Grace H.", "email": "gh@x.com" }
        ])
    );
}

#[tokio::test]
async fn update_of_missing_id_still_echoes() {
    let (app, _) = app();

    let (status, body) = send_json(
        &app,
        "PUT",
        "/users/99",
        Some(json!({ "name": "Ghost", "email": "ghost@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "99", "name": "Ghost", "email": "ghost@x.com" }));

    let (_, body) = send_json(&app, "GET", "/users", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn delete_of_missing_id_is_still_204() {
    let (app, _) = app();

    let (status, bytes) = send(&app, "DELETE", "/users/42", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn invalid_input_is_400_and_skips_the_database() {
    let (app, connector) = app();

    let cases = [
        ("POST", "/users", Some(json!({ "email": "a@x.com" })), "name is required"),
        ("POST", "/users", Some(json!({ "name": "Ada", "email": null })), "email is required"),
        ("POST", "/users", Some(json!({ "name": "  ", "email": "a@x.com" })), "name cannot be empty"),
        ("POST", "/users", Some(json!({ "name": "Ada", "email": 7 })), "email must be a string"),
        ("PUT", "/users/abc", Some(json!({ "name": "Ada", "email": "a@x.com" })), "id: must be an integer"),
        ("DELETE", "/users/0", None, "id: must be a positive integer"),
    ];

    for (method, uri, body, message) in cases {
        let (status, body) = send_json(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert_eq!(body, json!({ "error": message }));
    }

    assert_eq!(connector.executed(), 0);
}

async fn send_form(app: &Router, method: &str, uri: &str, form: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn form_bodies_are_accepted() {
    let (app, _) = app();

    let (status, body) = send_form(&app, "POST", "/users", "name=Bob&email=bob%40x.com").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 1, "name": "Bob", "email": "bob@x.com" }));

    let (status, body) = send_form(&app, "PUT", "/users/1", "name=Bob+B.&email=bob%40x.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "1", "name": "Bob B.", "email": "bob@x.com" }));
}

#[tokio::test]
async fn form_body_is_validated_like_json() {
    let (app, connector) = app();

    let (status, body) = send_form(&app, "POST", "/users", "name=Bob").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "email is required" }));

    let (status, body) = send_form(&app, "POST", "/users", "name=+&email=bob%40x.com").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "name cannot be empty" }));

    assert_eq!(connector.executed(), 0);
}

#[tokio::test]
async fn non_json_body_is_400() {
    let (app, connector) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("invalid request body"));
    assert_eq!(connector.executed(), 0);
}

#[tokio::test]
async fn database_failure_is_500_with_driver_message() {
    let connector = Arc::new(MemoryConnector::failing("connect ECONNREFUSED 127.0.0.1:3306"));
    let app = build_router(connector, &ServerConfig::default());

    let requests = [
        ("GET", "/users", None),
        ("POST", "/users", Some(json!({ "name": "Ada", "email": "ada@x.com" }))),
        ("PUT", "/users/1", Some(json!({ "name": "Ada", "email": "ada@x.com" }))),
        ("DELETE", "/users/1", None),
    ];

    for (method, uri, body) in requests {
        let (status, body) = send_json(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
        assert_eq!(body, json!({ "error": "connect ECONNREFUSED 127.0.0.1:3306" }));
    }
}

#[tokio::test]
async fn health_does_not_touch_the_database() {
    let (app, connector) = app();

    let (status, body) = send_json(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "memory");
    assert_eq!(connector.executed(), 0);
}
