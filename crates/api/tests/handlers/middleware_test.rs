use axum::{http::StatusCode, response::IntoResponse};
use framed_api::middleware::{auth, error_handling::AppError};
use framed_core::errors::FramedError;

#[tokio::test]
async fn test_error_handling_not_found() {
    let response = AppError(FramedError::NotFound("Booking ABCD1234".to_string())).into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_validation() {
    let response = AppError(FramedError::Validation("Invalid input".to_string())).into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_delivery() {
    let response = AppError(FramedError::Delivery("SMTP down".to_string())).into_response();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_error_handling_masks_internal_details() {
    let response = AppError(FramedError::Database(eyre::eyre!(
        "relation \"bookings\" does not exist"
    )))
    .into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn test_hash_and_verify_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    assert_ne!(hashed, password);
    assert!(hashed.starts_with("$argon2"));
    assert!(auth::verify_password(&hashed, password).unwrap());
    assert!(!auth::verify_password(&hashed, "wrong_password").unwrap());
}

#[tokio::test]
async fn test_verify_rejects_malformed_hash() {
    assert!(auth::verify_password("not-a-phc-string", "anything").is_err());
}

#[tokio::test]
async fn test_health_probes() {
    let server = crate::test_utils::TestContext::new().server();

    server.get("/health").await.assert_status_ok();
    server
        .get("/health/ready")
        .await
        .assert_json(&serde_json::json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION")
        }));
}
