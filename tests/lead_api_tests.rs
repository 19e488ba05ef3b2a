use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use retirewise::models::user::User;
use retirewise::router::build_router;
use retirewise::test_utils::test_helpers;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> (Router, retirewise::AppState) {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::build_test_state(pool, None);
    (build_router(state.clone()), state)
}

fn admin_token(state: &retirewise::AppState) -> String {
    let admin = User {
        id: 1,
        name: "Admin".to_string(),
        email: "admin@retirewise.test".to_string(),
        phone: None,
        locality: None,
        password_hash: String::new(),
        role: "admin".to_string(),
        created_at: None,
    };
    state.jwt.sign_admin(&admin).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn lead_payload(phone: &str, email: &str) -> Value {
    json!({
        "name": "Ravi Kumar",
        "phone": phone,
        "email": email,
        "age_group": "25-34",
        "financial_goal": "Retirement",
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn valid_submission_creates_exactly_one_lead() {
    let (app, state) = app().await;

    let response = app
        .oneshot(post_json("/api/leads", lead_payload("9876543210", "ravi@example.com")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["lead_id"], 1);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM leads")
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn reusing_phone_or_email_is_rejected() {
    let (app, _state) = app().await;

    let response = app
        .clone()
        .oneshot(post_json("/api/leads", lead_payload("9876543210", "ravi@example.com")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // same phone, different email
    let response = app
        .clone()
        .oneshot(post_json("/api/leads", lead_payload("9876543210", "other@example.com")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);

    // same email, different phone
    let response = app
        .oneshot(post_json("/api/leads", lead_payload("9123456789", "ravi@example.com")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn phone_must_be_exactly_ten_digits() {
    let (app, _state) = app().await;

    for phone in ["987654321", "98765432100", "98765abcde"] {
        let response = app
            .clone()
            .oneshot(post_json("/api/leads", lead_payload(phone, "ravi@example.com")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "phone {phone}");
        let body = body_json(response).await;
        assert_eq!(body["message"], "Phone must be exactly 10 digits.");
    }
}

#[tokio::test]
async fn sixth_submission_within_the_hour_is_rate_limited() {
    let (app, _state) = app().await;

    for i in 0..5 {
        let payload = lead_payload(&format!("987654321{i}"), &format!("lead{i}@example.com"));
        let response = app.clone().oneshot(post_json("/api/leads", payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "submission {i}");
    }

    // perfectly valid payload, still rejected
    let response = app
        .oneshot(post_json("/api/leads", lead_payload("9876543215", "lead5@example.com")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers()["X-RateLimit-Remaining"], "0");
    let body = body_json(response).await;
    assert_eq!(body["message"], "Too many submissions. Please try again in an hour.");
}

#[tokio::test]
async fn lead_admin_routes_require_a_token() {
    let (app, _state) = app().await;

    let response = app
        .oneshot(Request::builder().uri("/api/leads").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_can_list_get_and_update_leads() {
    let (app, state) = app().await;
    let token = admin_token(&state);

    let response = app
        .clone()
        .oneshot(post_json("/api/leads", lead_payload("9876543210", "ravi@example.com")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/leads")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["status"], "new");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/leads/1")
                .header("content-type", "application/json")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::from(
                    json!({ "status": "contacted", "notes": "Spoke on phone" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/leads/1")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "contacted");
    assert_eq!(body["data"]["notes"], "Spoke on phone");
}

#[tokio::test]
async fn updating_a_missing_lead_is_not_found() {
    let (app, state) = app().await;
    let token = admin_token(&state);

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/leads/999")
                .header("content-type", "application/json")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::from(json!({ "status": "contacted" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_stats_are_zero_filled() {
    let (app, state) = app().await;
    let token = admin_token(&state);

    let response = app
        .clone()
        .oneshot(post_json("/api/leads", lead_payload("9876543210", "ravi@example.com")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/leads-stats")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(
        body["data"],
        json!({ "total": 1, "new": 1, "contacted": 0, "converted": 0, "rejected": 0 })
    );
}
