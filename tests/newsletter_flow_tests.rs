use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use retirewise::models::email_log::EmailLogEntry;
use retirewise::models::user::User;
use retirewise::router::build_router;
use retirewise::services::UnsubscribeSigner;
use retirewise::test_utils::test_helpers::{self, TEST_UNSUBSCRIBE_SECRET};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> (Router, retirewise::AppState) {
    let pool = test_helpers::create_test_db().await.unwrap();
    let state = test_helpers::build_test_state(pool, None);
    (build_router(state.clone()), state)
}

fn signer() -> UnsubscribeSigner {
    UnsubscribeSigner::new(TEST_UNSUBSCRIBE_SECRET)
}

fn subscribe_request(name: &str, email: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/newsletter/subscribe")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "fullName": name, "email": email, "topics": ["SIP"] }).to_string(),
        ))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn subscriber_status(state: &retirewise::AppState, email: &str) -> String {
    sqlx::query_scalar("SELECT status FROM newsletter_subscribers WHERE email = ?")
        .bind(email)
        .fetch_one(&state.pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn subscribe_then_duplicate_then_unsubscribe_round_trip() {
    let (app, state) = app().await;

    // first signup succeeds
    let response = app
        .clone()
        .oneshot(subscribe_request("A", "a@x.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["subscriber_id"], 1);
    assert_eq!(body["message"], "Welcome to the RetireWise+ Club!");

    // same email again is a conflict
    let response = app
        .clone()
        .oneshot(subscribe_request("A", "a@x.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "You're already in the club!");

    // unsubscribe with the correct token flips the status
    let token = signer().token_for("a@x.com");
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/unsubscribe?email=a%40x.com&token={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(subscriber_status(&state, "a@x.com").await, "unsubscribed");

    // the same link again still succeeds: the row matches the UPDATE
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/unsubscribe?email=a%40x.com&token={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unsubscribe_with_wrong_token_is_forbidden() {
    let (app, state) = app().await;
    test_helpers::insert_test_subscriber(&state.pool, "A", "a@x.com")
        .await
        .unwrap();

    let token = signer().token_for("someone-else@x.com");
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/unsubscribe?email=a%40x.com&token={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(subscriber_status(&state, "a@x.com").await, "active");
}

#[tokio::test]
async fn unsubscribe_unknown_email_is_not_found() {
    let (app, _state) = app().await;

    let token = signer().token_for("ghost@x.com");
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/unsubscribe?email=ghost%40x.com&token={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unsubscribe_without_params_is_bad_request() {
    let (app, _state) = app().await;

    let response = app
        .oneshot(Request::builder().uri("/unsubscribe").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn fourth_signup_within_the_hour_is_rate_limited() {
    let (app, _state) = app().await;

    for i in 0..3 {
        let response = app
            .clone()
            .oneshot(subscribe_request("A", &format!("reader{i}@x.com")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "signup {i}");
    }

    let response = app
        .oneshot(subscribe_request("A", "reader3@x.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Too many signup attempts. Please try again later.");
}

#[tokio::test]
async fn admin_can_unsubscribe_and_list_active_only() {
    let (app, state) = app().await;
    test_helpers::insert_test_subscriber(&state.pool, "A", "a@x.com")
        .await
        .unwrap();
    test_helpers::insert_test_subscriber(&state.pool, "B", "b@x.com")
        .await
        .unwrap();

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
    let token = state.jwt.sign_admin(&admin).unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/newsletter/unsubscribe")
                .header("content-type", "application/json")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::from(json!({ "email": "a@x.com" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "a@x.com unsubscribed.");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/newsletter/subscribers")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    let subscribers = body.as_array().expect("array");
    assert_eq!(subscribers.len(), 1);
    assert_eq!(subscribers[0]["email"], "b@x.com");
}

#[tokio::test]
async fn email_log_appends_a_row() {
    let (app, state) = app().await;
    let id = test_helpers::insert_test_subscriber(&state.pool, "A", "a@x.com")
        .await
        .unwrap();

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
    let token = state.jwt.sign_admin(&admin).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/newsletter/email-log")
                .header("content-type", "application/json")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::from(
                    json!({ "subscriber_id": id, "subject": "Why SIPs Win", "status": "sent" })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let entry = sqlx::query_as::<_, EmailLogEntry>(
        "SELECT id, subscriber_id, subject, status, sent_at FROM newsletter_email_logs",
    )
    .fetch_one(&state.pool)
    .await
    .unwrap();
    assert_eq!(entry.subscriber_id, id);
    assert_eq!(entry.subject, "Why SIPs Win");
    assert_eq!(entry.status, "sent");
}
