//! Notifier adapter that records events to the tracing pipeline.
//!
//! Downstream delivery (mail, push, audit sinks) hangs off the log
//! stream in deployments; the workflow layer only needs the event to
//! leave the process boundary.

use async_trait::async_trait;

use kb_core::errors::DomainError;
use kb_core::services::notifier::{Notification, Notifier};

pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, event: Notification) -> Result<(), DomainError> {
        match event {
            Notification::VerifyEmail { user_id, email } => {
                tracing::info!(%user_id, email, "event: verify email requested");
            }
            Notification::UserRegistered { user_id } => {
                tracing::info!(%user_id, "event: user registered");
            }
            Notification::UserLoggedIn { user_id } => {
                tracing::info!(%user_id, "event: user logged in");
            }
            Notification::Activity {
                actor,
                action,
                target,
                message,
            } => {
                tracing::info!(
                    %actor,
                    action,
                    %target,
                    message = message.as_deref().unwrap_or(""),
                    "event: admin activity"
                );
            }
        }
        Ok(())
    }
}
