use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{Form, Json, Router, extract::State, http::Uri};
use framed_core::notify::{NotificationEvent, Notifier};
use framed_telegram::{
    DisabledNotifier, build_notifier,
    config::{NotifierBackend, TelegramConfig},
    http::HttpNotifier,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct Captured {
    path: String,
    form: HashMap<String, String>,
}

#[derive(Clone)]
struct FakeTelegram {
    reply: Value,
    captured: Arc<Mutex<Vec<Captured>>>,
}

async fn send_message(
    State(fake): State<FakeTelegram>,
    uri: Uri,
    Form(form): Form<HashMap<String, String>>,
) -> Json<Value> {
    fake.captured.lock().unwrap().push(Captured {
        path: uri.path().to_string(),
        form,
    });
    Json(fake.reply.clone())
}

/// Spawns a stand-in Bot API on a random local port.
async fn spawn_fake_telegram(reply: Value) -> (String, Arc<Mutex<Vec<Captured>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().fallback(send_message).with_state(FakeTelegram {
        reply,
        captured: Arc::clone(&captured),
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), captured)
}

#[tokio::test]
async fn test_http_notifier_posts_markdown_message() {
    let (api_url, captured) = spawn_fake_telegram(json!({"ok": true, "result": {}})).await;
    let notifier = HttpNotifier::new(&api_url, "123:secret", 4242, Duration::from_secs(5)).unwrap();

    notifier
        .notify(NotificationEvent::Text("*ping*".to_string()))
        .await
        .unwrap();

    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].path, "/bot123:secret/sendMessage");
    assert_eq!(captured[0].form["chat_id"], "4242");
    assert_eq!(captured[0].form["text"], "\\*ping\\*");
    assert_eq!(captured[0].form["parse_mode"], "MarkdownV2");
}

#[tokio::test]
async fn test_http_notifier_reports_api_rejection() {
    let (api_url, _) = spawn_fake_telegram(json!({
        "ok": false,
        "description": "Bad Request: chat not found"
    }))
    .await;
    let notifier = HttpNotifier::new(&api_url, "123:secret", 1, Duration::from_secs(5)).unwrap();

    let error = notifier
        .notify(NotificationEvent::Text("hello".to_string()))
        .await
        .unwrap_err();

    assert!(error.to_string().contains("chat not found"));
}

#[tokio::test]
async fn test_http_notifier_reports_unreachable_api() {
    // Nothing listens on the discard port.
    let notifier =
        HttpNotifier::new("http://127.0.0.1:9", "123:secret", 1, Duration::from_secs(2)).unwrap();

    let result = notifier
        .notify(NotificationEvent::Text("hello".to_string()))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_missing_credentials_disable_alerts() {
    let config = TelegramConfig::default();

    let notifier = build_notifier(&config, NotifierBackend::Http).unwrap();

    assert!(notifier
        .notify(NotificationEvent::Text("hello".to_string()))
        .await
        .is_ok());
    assert!(DisabledNotifier
        .notify(NotificationEvent::Text("hello".to_string()))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_build_notifier_uses_configured_api_url() {
    let (api_url, captured) = spawn_fake_telegram(json!({"ok": true, "result": {}})).await;
    let config = TelegramConfig {
        bot_token: Some("777:token".to_string()),
        chat_id: Some(99),
        api_url,
        timeout_seconds: 5,
    };

    let notifier = build_notifier(&config, NotifierBackend::Http).unwrap();
    notifier
        .notify(NotificationEvent::Text("hi".to_string()))
        .await
        .unwrap();

    assert_eq!(captured.lock().unwrap()[0].form["chat_id"], "99");
}
