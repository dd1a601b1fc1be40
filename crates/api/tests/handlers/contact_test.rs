use axum::http::StatusCode;
use framed_core::notify::NotificationEvent;
use serde_json::json;

use crate::test_utils::{CONTACT_RECIPIENT, TestContext};

fn contact_form() -> serde_json::Value {
    json!({
        "name": "Anna",
        "email": "anna@example.com",
        "message": "Do you shoot weddings in winter?"
    })
}

#[tokio::test]
async fn contact_form_mails_the_studio_and_alerts() {
    let mut ctx = TestContext::new();
    ctx.mailer
        .expect_send()
        .withf(|mail| {
            mail.to == CONTACT_RECIPIENT
                && mail.reply_to.as_deref() == Some("anna@example.com")
                && mail.subject.contains("Anna")
        })
        .times(1)
        .returning(|_| Ok(()));
    ctx.notifier
        .expect_notify()
        .withf(|event| matches!(event, NotificationEvent::ContactMessage(_)))
        .times(1)
        .returning(|_| Ok(()));
    let server = ctx.server();

    let response = server.post("/api/contact").json(&contact_form()).await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "sent" }));
}

#[tokio::test]
async fn mail_failure_is_reported_and_skips_the_alert() {
    let mut ctx = TestContext::new();
    ctx.mailer
        .expect_send()
        .times(1)
        .returning(|_| Err(eyre::eyre!("connection refused")));
    ctx.notifier.expect_notify().times(0);
    let server = ctx.server();

    let response = server.post("/api/contact").json(&contact_form()).await;

    response.assert_status(StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn alert_failure_does_not_fail_the_request() {
    let mut ctx = TestContext::new();
    ctx.mailer.expect_send().returning(|_| Ok(()));
    ctx.notifier
        .expect_notify()
        .returning(|_| Err(eyre::eyre!("bot blocked")));
    let server = ctx.server();

    server
        .post("/api/contact")
        .json(&contact_form())
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn invalid_contact_form_is_rejected() {
    let mut ctx = TestContext::new();
    ctx.mailer.expect_send().times(0);
    let server = ctx.server();

    server
        .post("/api/contact")
        .json(&json!({ "name": "", "email": "anna@example.com", "message": "Hi" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
