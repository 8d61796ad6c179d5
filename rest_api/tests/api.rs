use std::path::PathBuf;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use lib::HostelStore;
use rest_api::{build_router, AppState, RestApiConfig};

fn config() -> RestApiConfig {
    RestApiConfig {
        host: "127.0.0.1".into(),
        port: 0,
        data_directory: PathBuf::from("unused"),
        jwt_secret: "api-test-secret-api-test-secret".into(),
        token_ttl_hours: 1,
        log_level: "debug".into(),
        cors_allow_any_origin: true,
    }
}

fn app() -> Router {
    let state = AppState::new(HostelStore::temporary().unwrap(), &config()).unwrap();
    build_router(state, true)
}

async fn call(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

async fn register(app: &Router, name: &str, email: &str) -> (String, Value) {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({ "name": name, "email": email, "password": "s3cret!" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    (body["token"].as_str().unwrap().to_string(), body["user"].clone())
}

async fn admin(app: &Router) -> String {
    register(app, "Warden", "warden@hostel.test").await.0
}

#[tokio::test]
async fn health_needs_no_token() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn room_assign_and_checkout_flow() {
    let app = app();
    let token = admin(&app).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/rooms",
        Some(&token),
        Some(json!({ "number": "101", "pricePerMonth": 5000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["ok"], true);
    assert_eq!(body["room"]["status"], "available");

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/rooms/101/assign",
        Some(&token),
        Some(json!({ "name": "Asha", "checkInDate": "2024-01-10" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["room"]["status"], "occupied");
    assert_eq!(body["room"]["occupants"].as_array().unwrap().len(), 1);
    assert_eq!(body["resident"]["name"], "Asha");
    assert_eq!(body["resident"]["roomNumber"], "101");

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/rooms/101/assign",
        Some(&token),
        Some(json!({ "name": "Ravi" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["ok"], false);
    assert!(body["error"].is_string());

    let (status, body) = call(&app, Method::POST, "/api/rooms/101/checkout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["room"]["status"], "available");
    assert!(body["room"]["occupants"].as_array().unwrap().is_empty());

    let (status, body) = call(&app, Method::POST, "/api/rooms/101/checkout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["released"].as_array().unwrap().is_empty());

    let (_, body) = call(&app, Method::GET, "/api/residents?status=checked-out", Some(&token), None).await;
    assert_eq!(body["residents"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn paid_invoice_is_frozen() {
    let app = app();
    let token = admin(&app).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/billing",
        Some(&token),
        Some(json!({ "residentName": "Asha", "roomNumber": "101", "amount": 5000, "month": "Jan 2024" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["invoice"]["status"], "Pending");
    let id = body["invoice"]["id"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        Method::PATCH,
        &format!("/api/billing/{}/pay", id),
        Some(&token),
        Some(json!({ "method": "Cash" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["invoice"]["status"], "Paid");
    assert_eq!(body["invoice"]["method"], "Cash");
    assert!(body["invoice"]["paidOn"].is_string());

    let (status, _) = call(
        &app,
        Method::PUT,
        &format!("/api/billing/{}", id),
        Some(&token),
        Some(json!({ "amount": 4000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(&app, Method::DELETE, &format!("/api/billing/{}", id), Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(
        &app,
        Method::PATCH,
        &format!("/api/billing/{}/pay", id),
        Some(&token),
        Some(json!({ "method": "Card" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn user_creation_rules() {
    let app = app();
    let token = admin(&app).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/users",
        Some(&token),
        Some(json!({ "name": "Priya", "email": "priya@hostel.test" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);

    let new_user = json!({ "name": "Priya", "email": "priya@hostel.test", "password": "pw123" });
    let (status, body) = call(&app, Method::POST, "/api/users", Some(&token), Some(new_user.clone())).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["user"]["role"], "Staff");
    assert!(body["user"].get("passwordHash").is_none());

    let (status, _) = call(&app, Method::POST, "/api/users", Some(&token), Some(new_user)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn first_account_is_admin_and_staff_cannot_manage_users() {
    let app = app();
    let (admin_token, admin_user) = register(&app, "Warden", "warden@hostel.test").await;
    assert_eq!(admin_user["role"], "Admin");

    let (staff_token, staff_user) = register(&app, "Desk", "desk@hostel.test").await;
    assert_eq!(staff_user["role"], "Staff");

    let (status, _) = call(&app, Method::GET, "/api/users", Some(&staff_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(&app, Method::GET, "/api/users", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"].as_array().unwrap().len(), 2);

    let (status, body) = call(&app, Method::GET, "/api/rooms", Some(&staff_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["rooms"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = app();

    let (status, body) = call(&app, Method::GET, "/api/rooms", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["ok"], false);

    let (status, _) = call(&app, Method::GET, "/api/rooms", Some("not.a.token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_and_me() {
    let app = app();
    register(&app, "Warden", "warden@hostel.test").await;

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "warden@hostel.test", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "Warden@Hostel.test", "password": "s3cret!" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = call(&app, Method::GET, "/api/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "warden@hostel.test");
}

#[tokio::test]
async fn disabled_account_cannot_log_in() {
    let app = app();
    let token = admin(&app).await;
    let (_, staff) = register(&app, "Desk", "desk@hostel.test").await;
    let staff_id = staff["id"].as_str().unwrap();

    let (status, body) = call(
        &app,
        Method::PUT,
        &format!("/api/users/{}", staff_id),
        Some(&token),
        Some(json!({ "status": "Disabled" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "desk@hostel.test", "password": "s3cret!" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_cannot_delete_itself() {
    let app = app();
    let (token, user) = register(&app, "Warden", "warden@hostel.test").await;
    let uri = format!("/api/users/{}", user["id"].as_str().unwrap());
    let (status, _) = call(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn malformed_bodies_are_validation_errors() {
    let app = app();
    let token = admin(&app).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/rooms")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert_eq!(body["ok"], false);

    let (status, _) = call(&app, Method::POST, "/api/rooms", Some(&token), Some(json!({ "pricePerMonth": 10 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, Method::POST, "/api/residents", Some(&token), Some(json!({ "phone": "123" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn resident_create_then_get() {
    let app = app();
    let token = admin(&app).await;
    call(&app, Method::POST, "/api/rooms", Some(&token), Some(json!({ "number": "201", "pricePerMonth": 4500 }))).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/residents",
        Some(&token),
        Some(json!({ "name": "Meera", "phone": "98450 00000" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/residents",
        Some(&token),
        Some(json!({ "name": "Meera", "phone": "98450 00000", "roomNumber": "201" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let created = body["resident"].clone();
    assert_eq!(created["status"], "active");

    let (_, body) = call(&app, Method::GET, "/api/rooms/201", Some(&token), None).await;
    assert_eq!(body["room"]["status"], "occupied");
    assert_eq!(body["room"]["occupants"][0]["residentId"], created["id"]);

    let uri = format!("/api/residents/{}", created["id"].as_str().unwrap());
    let (status, body) = call(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resident"], created);

    let (status, _) = call(&app, Method::GET, "/api/residents/does-not-exist", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn maintenance_ticket_moves_forward_only() {
    let app = app();
    let token = admin(&app).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/maintenance",
        Some(&token),
        Some(json!({ "roomNumber": "101", "issue": "Leaking tap", "priority": "High" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["ticket"]["status"], "Open");
    let uri = format!("/api/maintenance/{}", body["ticket"]["id"].as_str().unwrap());

    let (status, body) = call(&app, Method::PUT, &uri, Some(&token), Some(json!({ "status": "Closed" }))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    let (status, _) = call(&app, Method::PUT, &uri, Some(&token), Some(json!({ "status": "Open" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn summary_counts_rooms() {
    let app = app();
    let token = admin(&app).await;
    for number in ["101", "102"] {
        call(
            &app,
            Method::POST,
            "/api/rooms",
            Some(&token),
            Some(json!({ "number": number, "pricePerMonth": 4000 })),
        )
        .await;
    }
    call(&app, Method::POST, "/api/rooms/102/assign", Some(&token), Some(json!({ "name": "Asha" }))).await;

    let (status, body) = call(&app, Method::GET, "/api/reports/summary", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["rooms"]["total"], 2);
    assert_eq!(body["summary"]["rooms"]["occupied"], 1);
    assert_eq!(body["summary"]["residents"]["active"], 1);
}

#[tokio::test]
async fn unknown_route_uses_the_envelope() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/api/nowhere", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn paying_without_a_body_records_manual() {
    let app = app();
    let token = admin(&app).await;
    let (_, body) = call(
        &app,
        Method::POST,
        "/api/billing",
        Some(&token),
        Some(json!({ "residentName": "Ravi", "roomNumber": "102", "amount": 4200, "month": "Feb 2024" })),
    )
    .await;
    let uri = format!("/api/billing/{}/pay", body["invoice"]["id"].as_str().unwrap());

    let (status, body) = call(&app, Method::PATCH, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["invoice"]["method"], "Manual");
    assert!(body["invoice"]["invoiceNo"].as_str().unwrap().starts_with("INV-"));
}

#[tokio::test]
async fn admin_cannot_disable_or_demote_itself() {
    let app = app();
    let (token, user) = register(&app, "Warden", "warden@hostel.test").await;
    let uri = format!("/api/users/{}", user["id"].as_str().unwrap());

    let (status, _) = call(&app, Method::PUT, &uri, Some(&token), Some(json!({ "status": "Disabled" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, _) = call(&app, Method::PUT, &uri, Some(&token), Some(json!({ "role": "Staff" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(&app, Method::GET, "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn account_changes_apply_to_issued_tokens() {
    let app = app();
    let (first_token, first) = register(&app, "Warden", "warden@hostel.test").await;
    let (second_token, second) = register(&app, "Deputy", "deputy@hostel.test").await;
    let first_uri = format!("/api/users/{}", first["id"].as_str().unwrap());
    let second_uri = format!("/api/users/{}", second["id"].as_str().unwrap());

    let (status, _) = call(&app, Method::PUT, &second_uri, Some(&first_token), Some(json!({ "role": "Admin" }))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&app, Method::GET, "/api/users", Some(&second_token), None).await;
    assert_eq!(status, StatusCode::OK);

    // Demoted: still signed in, but no longer allowed to manage accounts.
    let (status, _) = call(&app, Method::PUT, &first_uri, Some(&second_token), Some(json!({ "role": "Staff" }))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&app, Method::GET, "/api/users", Some(&first_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = call(&app, Method::GET, "/api/rooms", Some(&first_token), None).await;
    assert_eq!(status, StatusCode::OK);

    // Disabled: the old token stops working everywhere.
    let (status, _) = call(&app, Method::PUT, &first_uri, Some(&second_token), Some(json!({ "status": "Disabled" }))).await;
    assert_eq!(status, StatusCode::OK);
    for (method, uri) in [(Method::GET, "/api/me"), (Method::GET, "/api/users"), (Method::GET, "/api/rooms")] {
        let (status, body) = call(&app, method, uri, Some(&first_token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(body["ok"], false);
    }
    let (status, _) = call(
        &app,
        Method::POST,
        "/api/rooms",
        Some(&first_token),
        Some(json!({ "number": "301", "pricePerMonth": 3000 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Deleted: same outcome.
    let (status, _) = call(&app, Method::DELETE, &first_uri, Some(&second_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&app, Method::GET, "/api/me", Some(&first_token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
