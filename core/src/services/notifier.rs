//! Outbound notification boundary
//!
//! Workflow code announces lifecycle events through the `Notifier`
//! trait and never blocks on delivery. Failures are logged and
//! swallowed so a broken mail or activity pipeline cannot fail a
//! request that already committed.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainError;

/// A lifecycle event emitted by the auth and admin workflows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Ask the user to confirm ownership of an email address
    VerifyEmail { user_id: Uuid, email: String },
    /// A new account was created
    UserRegistered { user_id: Uuid },
    /// An existing account signed in
    UserLoggedIn { user_id: Uuid },
    /// An administrative action against another account
    Activity {
        actor: Uuid,
        action: String,
        target: Uuid,
        message: Option<String>,
    },
}

/// Delivery channel for lifecycle notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: Notification) -> Result<(), DomainError>;
}

/// Deliver an event, logging and discarding any delivery error
pub async fn emit<N: Notifier + ?Sized>(notifier: &N, event: Notification) {
    let label = match &event {
        Notification::VerifyEmail { .. } => "verify_email",
        Notification::UserRegistered { .. } => "user_registered",
        Notification::UserLoggedIn { .. } => "user_logged_in",
        Notification::Activity { .. } => "activity",
    };
    if let Err(err) = notifier.notify(event).await {
        tracing::warn!(event = label, error = %err, "notification delivery failed");
    }
}

/// Notifier that drops every event
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _event: Notification) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Recording notifier for tests
pub struct MockNotifier {
    events: std::sync::Arc<tokio::sync::RwLock<Vec<Notification>>>,
    fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            events: std::sync::Arc::new(tokio::sync::RwLock::new(Vec::new())),
            fail: false,
        }
    }

    /// A notifier whose every delivery fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Snapshot of everything delivered so far
    pub async fn recorded(&self) -> Vec<Notification> {
        self.events.read().await.clone()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, event: Notification) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::internal("delivery refused"));
        }
        self.events.write().await.push(event);
        Ok(())
    }
}
