#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use inventra::router::init_router;
use inventra::state::AppState;
use inventra_auth::create_token;
use inventra_config::{CorsConfig, JwtConfig, PasswordConfig};
use inventra_core::PlainPassword;
use inventra_db::{MemoryStore, UserStore};
use inventra_models::{NewUser, User, UserRole};

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        token_expiry: 86_400,
    }
}

/// Router over a fresh in-memory store. The store handle is returned so
/// tests can inspect what was persisted.
pub fn setup_test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState {
        store: store.clone(),
        jwt_config: jwt_config(),
        password_config: PasswordConfig { bcrypt_cost: 4 },
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    };
    (init_router(state), store)
}

pub struct TestUser {
    pub user: User,
    pub password: String,
    pub token: String,
}

pub async fn create_test_user(store: &MemoryStore, username: &str, role: UserRole) -> TestUser {
    let password = "testpass123".to_string();
    let record = store
        .insert_user(NewUser {
            username: username.to_string(),
            email: format!("{}@test.com", username),
            password_hash: PlainPassword::new(password.clone()).hash(4).unwrap(),
            role,
        })
        .await
        .unwrap();

    let user = record.to_user();
    let token = create_token(&user, &jwt_config()).unwrap();

    TestUser {
        user,
        password,
        token,
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Sends one request and returns status plus decoded JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

pub fn product_payload(staff_id: i64, serial_number: &str, model: &str) -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Obi",
        "staffId": staff_id,
        "designation": "Officer",
        "department": "Finance",
        "location": "Headquarters",
        "block": "A",
        "roomNumber": "101",
        "make": "APC",
        "model": model,
        "serialNumber": serial_number,
        "capacityVA": "1500",
        "issueDate": "2024-01-15",
        "status": "functional"
    })
}

pub async fn create_product(app: &Router, admin_token: &str, payload: Value) -> Value {
    let (status, body) = send(
        app,
        json_request("POST", "/api/products", Some(admin_token), Some(payload)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["product"].clone()
}
