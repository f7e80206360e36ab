//! Event publication port.
//!
//! The concrete RabbitMQ publisher lives in the infrastructure layer; the
//! services only see this trait. Publication is at-least-once: a consumer may
//! see an event more than once, never silently lose one the broker accepted.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::events::{UserCreatedEvent, UserUpdatedEvent, WelcomeEmailEvent};
use crate::errors::DomainError;

/// Port for propagating user-lifecycle facts to other services
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish_user_created(&self, event: &UserCreatedEvent) -> Result<(), DomainError>;

    async fn publish_user_updated(&self, event: &UserUpdatedEvent) -> Result<(), DomainError>;

    async fn publish_welcome_email(&self, event: &WelcomeEmailEvent) -> Result<(), DomainError>;
}

/// Recording publisher for tests
///
/// Stores every published event; can be switched into a failing mode to
/// exercise the best-effort publish paths.
#[derive(Default)]
pub struct MockEventPublisher {
    pub created: RwLock<Vec<UserCreatedEvent>>,
    pub updated: RwLock<Vec<UserUpdatedEvent>>,
    pub welcome: RwLock<Vec<WelcomeEmailEvent>>,
    fail: bool,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher whose every publish fails with an infrastructure error
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn outcome(&self) -> Result<(), DomainError> {
        if self.fail {
            Err(DomainError::Infrastructure {
                message: "broker unreachable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish_user_created(&self, event: &UserCreatedEvent) -> Result<(), DomainError> {
        self.outcome()?;
        self.created.write().await.push(event.clone());
        Ok(())
    }

    async fn publish_user_updated(&self, event: &UserUpdatedEvent) -> Result<(), DomainError> {
        self.outcome()?;
        self.updated.write().await.push(event.clone());
        Ok(())
    }

    async fn publish_welcome_email(&self, event: &WelcomeEmailEvent) -> Result<(), DomainError> {
        self.outcome()?;
        self.welcome.write().await.push(event.clone());
        Ok(())
    }
}
