//! RabbitMQ-backed implementation of the event publication port.

use std::sync::Arc;

use async_trait::async_trait;

use gf_core::domain::events::{UserCreatedEvent, UserUpdatedEvent, WelcomeEmailEvent};
use gf_core::errors::DomainError;
use gf_core::services::messaging::EventPublisher;

use super::client::BrokerClient;
use super::constants::{
    EMAIL_EXCHANGE, USER_CREATED_KEY, USER_CREATED_QUEUE, USER_EXCHANGE, USER_UPDATED_KEY,
    USER_UPDATED_QUEUE, WELCOME_EMAIL_KEY, WELCOME_EMAIL_QUEUE,
};
use super::error::BrokerError;
use super::topology::{Binding, ExchangeConfig, ExchangeKind, QueueConfig};

/// Publishes user-lifecycle events over RabbitMQ
pub struct RabbitEventPublisher {
    client: Arc<BrokerClient>,
}

impl RabbitEventPublisher {
    /// Declare the user/email topology and build the publisher
    ///
    /// Must complete before any publish or consume referencing these names;
    /// an event published to an exchange with no matching binding is silently
    /// dropped by the broker.
    pub async fn new(client: Arc<BrokerClient>) -> Result<Self, BrokerError> {
        client
            .declare_exchange(ExchangeConfig::new(USER_EXCHANGE, ExchangeKind::Topic, true))
            .await?;
        client
            .declare_exchange(ExchangeConfig::new(EMAIL_EXCHANGE, ExchangeKind::Direct, true))
            .await?;

        for queue in [USER_CREATED_QUEUE, USER_UPDATED_QUEUE, WELCOME_EMAIL_QUEUE] {
            client.declare_queue(QueueConfig::new(queue, true)).await?;
        }

        client
            .bind_queue(Binding::new(USER_CREATED_QUEUE, USER_EXCHANGE, USER_CREATED_KEY))
            .await?;
        client
            .bind_queue(Binding::new(USER_UPDATED_QUEUE, USER_EXCHANGE, USER_UPDATED_KEY))
            .await?;
        client
            .bind_queue(Binding::new(
                WELCOME_EMAIL_QUEUE,
                EMAIL_EXCHANGE,
                WELCOME_EMAIL_KEY,
            ))
            .await?;

        tracing::info!("broker topology declared");

        Ok(Self { client })
    }
}

#[async_trait]
impl EventPublisher for RabbitEventPublisher {
    async fn publish_user_created(&self, event: &UserCreatedEvent) -> Result<(), DomainError> {
        self.client
            .publish(USER_EXCHANGE, USER_CREATED_KEY, event)
            .await?;
        tracing::info!(user_id = %event.id, "user created event published");
        Ok(())
    }

    async fn publish_user_updated(&self, event: &UserUpdatedEvent) -> Result<(), DomainError> {
        self.client
            .publish(USER_EXCHANGE, USER_UPDATED_KEY, event)
            .await?;
        tracing::info!(user_id = %event.id, "user updated event published");
        Ok(())
    }

    async fn publish_welcome_email(&self, event: &WelcomeEmailEvent) -> Result<(), DomainError> {
        self.client
            .publish(EMAIL_EXCHANGE, WELCOME_EMAIL_KEY, event)
            .await?;
        tracing::info!(user_id = %event.id, "welcome email event published");
        Ok(())
    }
}
