//! Best-effort alert dispatch. A failing notifier is logged and otherwise
//! ignored; it never changes the outcome of the request that triggered it.

use framed_core::notify::{NotificationEvent, Notifier};
use tracing::error;

/// Sends `event` and swallows any failure.
pub async fn notify_best_effort(notifier: &dyn Notifier, event: NotificationEvent) {
    let kind = event.kind();
    if let Err(e) = notifier.notify(event).await {
        error!("Failed to deliver {} alert: {:#}", kind, e);
    }
}
