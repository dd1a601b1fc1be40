use axum::http::StatusCode;
use framed_core::models::{pagination::Page, review::ReviewResponse};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::{TestContext, operator_auth};

fn review(author: &str, rating: i32) -> Value {
    json!({
        "author": author,
        "email": "client@example.com",
        "rating": rating,
        "text": "Wonderful session, the photos are great"
    })
}

#[tokio::test]
async fn reviews_are_hidden_until_approved_and_published() {
    let server = TestContext::new().server();
    let (name, value) = operator_auth();

    let response = server.post("/api/reviews").json(&review("Maria", 5)).await;
    response.assert_status(StatusCode::CREATED);
    let id = response.json::<Value>()["id"].clone();

    let listed: Page<ReviewResponse> = server.get("/api/reviews").await.json();
    assert_eq!(listed.total, 0);

    server
        .post("/api/admin/reviews/moderate")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "ids": [id.clone()], "action": "approve" }))
        .await
        .assert_status_ok();

    let listed: Page<ReviewResponse> = server.get("/api/reviews").await.json();
    assert_eq!(listed.total, 0);

    server
        .post("/api/admin/reviews/moderate")
        .add_header(name, value)
        .json(&json!({ "ids": [id], "action": "publish" }))
        .await
        .assert_status_ok();

    let listed: Page<ReviewResponse> = server.get("/api/reviews").await.json();
    assert_eq!(listed.total, 1);
    assert_eq!(listed.items[0].author, "Maria");
}

#[tokio::test]
async fn rating_outside_range_is_rejected() {
    let server = TestContext::new().server();

    for rating in [0, 6] {
        server
            .post("/api/reviews")
            .json(&review("Oleg", rating))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn social_reviews_are_listed_publicly() {
    let server = TestContext::new().server();
    let (name, value) = operator_auth();

    server
        .post("/api/admin/social-reviews")
        .add_header(name, value)
        .json(&json!({
            "source": "instagram",
            "external_id": "post-1",
            "author": "lena.photo",
            "text": "Best photographer in town",
            "rating": 5,
            "post_url": "https://instagram.com/p/post-1",
            "created_at": "2026-01-10T12:00:00Z"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let listed: Vec<Value> = server.get("/api/social-reviews").await.json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["source"], "instagram");
}
