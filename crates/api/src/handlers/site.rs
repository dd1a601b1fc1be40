use axum::{Json, extract::State};
use framed_core::{
    errors::FramedError,
    models::site::{ContactRequest, ContactResponse, Service, SiteSettings},
    notify::{ContactAlert, NotificationEvent, OutgoingMail},
};
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError, notifications::notify_best_effort};

#[axum::debug_handler]
pub async fn get_site_settings(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<SiteSettings>, AppError> {
    Ok(Json(state.store.load_site_settings().await?))
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Service>>, AppError> {
    Ok(Json(state.store.list_services(true).await?))
}

/// Mails the message to the studio, then sends a best-effort chat alert.
/// A mail failure is reported to the client; an alert failure is not.
#[axum::debug_handler]
pub async fn submit_contact(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, AppError> {
    payload.validate()?;

    let mail = OutgoingMail::contact(&state.site.contact_recipient, &payload);
    state.mailer.send(mail).await.map_err(|e| {
        tracing::error!("Contact mail failed: {:#}", e);
        FramedError::Delivery("Could not send your message, please try again later".to_string())
    })?;

    notify_best_effort(
        state.notifier.as_ref(),
        NotificationEvent::ContactMessage(ContactAlert::from(&payload)),
    )
    .await;

    Ok(Json(ContactResponse {
        status: "sent".to_string(),
    }))
}
