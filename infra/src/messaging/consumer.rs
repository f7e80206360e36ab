//! Consumer handlers for user-lifecycle queues.

use async_trait::async_trait;

use gf_core::domain::events::UserCreatedEvent;

use super::client::MessageHandler;

/// Handles deliveries from the `user.created` queue
///
/// Malformed bodies error out, which nacks the delivery back onto the queue.
#[derive(Default)]
pub struct UserCreatedHandler;

impl UserCreatedHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessageHandler for UserCreatedHandler {
    async fn handle(&self, body: &[u8]) -> anyhow::Result<()> {
        let event: UserCreatedEvent = serde_json::from_slice(body)?;

        tracing::info!(
            user_id = %event.id,
            email = %event.email,
            "handling user created event"
        );

        Ok(())
    }
}
