//! RabbitMQ client owning one connection and one channel.
//!
//! An AMQP channel is not safe for unsynchronized concurrent use: every
//! topology-mutating operation, every publish and every consumer
//! acknowledgment serializes on a single mutex.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, BasicNackOptions, BasicPublishOptions,
    ExchangeDeclareOptions, QueueBindOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties};
use serde::Serialize;
use tokio::sync::Mutex;

use super::error::BrokerError;
use super::topology::{Binding, BrokerTopology, ExchangeConfig, ExchangeKind, QueueConfig};

/// AMQP reply code for a normal close
const REPLY_SUCCESS: u16 = 200;

/// Persistent delivery mode: the broker retains the message across restarts
/// when the target queue is durable
const DELIVERY_MODE_PERSISTENT: u8 = 2;

/// Handler invoked for each delivery pulled from a queue
///
/// Returning an error negatively acknowledges the delivery with requeue
/// enabled, so the message will be redelivered.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle(&self, body: &[u8]) -> anyhow::Result<()>;
}

struct BrokerState {
    connection: Connection,
    channel: Channel,
    topology: BrokerTopology,
}

/// Client over one transport connection and one channel
///
/// The dial URL is stored at construction; reconnects always use it rather
/// than anything derived from the live connection.
pub struct BrokerClient {
    url: String,
    state: Mutex<BrokerState>,
}

impl BrokerClient {
    /// Connect to the broker and open a channel
    ///
    /// A refused connection at startup is fatal; the process must not serve
    /// traffic without its broker.
    pub async fn connect(url: &str) -> Result<Self, BrokerError> {
        let connection = Connection::connect(url, ConnectionProperties::default())
            .await
            .map_err(BrokerError::Connect)?;
        let channel = connection
            .create_channel()
            .await
            .map_err(BrokerError::Connect)?;

        tracing::info!("connected to broker");

        Ok(Self {
            url: url.to_string(),
            state: Mutex::new(BrokerState {
                connection,
                channel,
                topology: BrokerTopology::new(),
            }),
        })
    }

    /// Declare an exchange; identical redeclarations are no-ops
    pub async fn declare_exchange(&self, config: ExchangeConfig) -> Result<(), BrokerError> {
        let mut state = self.state.lock().await;

        // Conflicts are caught in the model before touching the broker
        if !state.topology.declare_exchange(config.clone())? {
            return Ok(());
        }

        state
            .channel
            .exchange_declare(
                &config.name,
                lapin_kind(config.kind),
                ExchangeDeclareOptions {
                    durable: config.durable,
                    ..ExchangeDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(BrokerError::Declare)
    }

    /// Declare a queue; identical redeclarations are no-ops
    pub async fn declare_queue(&self, config: QueueConfig) -> Result<(), BrokerError> {
        let mut state = self.state.lock().await;

        if !state.topology.declare_queue(config.clone())? {
            return Ok(());
        }

        state
            .channel
            .queue_declare(
                &config.name,
                QueueDeclareOptions {
                    durable: config.durable,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .map(|_| ())
            .map_err(BrokerError::Declare)
    }

    /// Bind a queue to an exchange under a routing key
    pub async fn bind_queue(&self, binding: Binding) -> Result<(), BrokerError> {
        let mut state = self.state.lock().await;

        if !state.topology.bind_queue(binding.clone()) {
            return Ok(());
        }

        state
            .channel
            .queue_bind(
                &binding.queue,
                &binding.exchange,
                &binding.routing_key,
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(BrokerError::Declare)
    }

    /// Publish a message, marked persistent, as UTF-8 JSON
    ///
    /// Returns once the broker has accepted the frame - not once a consumer
    /// has processed it, and with no publisher-confirm step. If the connection
    /// has dropped, one reconnect against the stored URL is attempted first;
    /// nothing in flight is replayed.
    pub async fn publish<T: Serialize>(
        &self,
        exchange: &str,
        routing_key: &str,
        message: &T,
    ) -> Result<(), BrokerError> {
        let body = serde_json::to_vec(message)?;

        let mut state = self.state.lock().await;
        self.ensure_connected(&mut state)
            .await
            .map_err(BrokerError::Publish)?;

        state
            .channel
            .basic_publish(
                exchange,
                routing_key,
                BasicPublishOptions::default(),
                &body,
                BasicProperties::default()
                    .with_content_type("application/json".into())
                    .with_delivery_mode(DELIVERY_MODE_PERSISTENT),
            )
            .await
            .map(|_confirm| ())
            .map_err(BrokerError::Publish)
    }

    /// Register a long-running consumer on `queue` in manual-ack mode
    ///
    /// Each delivery runs through `handler`: success acknowledges, failure
    /// negatively acknowledges with requeue enabled. There is no redelivery
    /// ceiling and no dead-letter routing, so a permanently failing handler
    /// loops; closing the connection ends the task.
    pub async fn consume(
        self: &Arc<Self>,
        queue: &str,
        handler: Arc<dyn MessageHandler>,
    ) -> Result<(), BrokerError> {
        let mut consumer = {
            let state = self.state.lock().await;
            state
                .channel
                .basic_consume(
                    queue,
                    "",
                    BasicConsumeOptions::default(),
                    FieldTable::default(),
                )
                .await
                .map_err(|source| BrokerError::ConsumeSetup {
                    queue: queue.to_string(),
                    source,
                })?
        };

        let client = Arc::clone(self);
        let queue = queue.to_string();
        tokio::spawn(async move {
            while let Some(delivery) = consumer.next().await {
                let delivery = match delivery {
                    Ok(delivery) => delivery,
                    Err(e) => {
                        tracing::error!(queue = %queue, error = %e, "delivery stream failed");
                        break;
                    }
                };

                match handler.handle(&delivery.data).await {
                    Ok(()) => {
                        // Acks share the channel with publishes; serialize
                        let _guard = client.state.lock().await;
                        if let Err(e) = delivery.ack(BasicAckOptions::default()).await {
                            tracing::error!(queue = %queue, error = %e, "failed to ack message");
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!(queue = %queue, error = %e, "failed to process message");
                        let _guard = client.state.lock().await;
                        let nack = delivery
                            .nack(BasicNackOptions {
                                requeue: true,
                                ..BasicNackOptions::default()
                            })
                            .await;
                        if let Err(e) = nack {
                            tracing::error!(queue = %queue, error = %e, "failed to nack message");
                            break;
                        }
                    }
                }
            }
            tracing::info!(queue = %queue, "consumer loop ended");
        });

        Ok(())
    }

    /// Close the channel, then the connection
    ///
    /// Both closes are attempted even when the first fails; the first failure
    /// is the one reported.
    pub async fn close(&self) -> Result<(), BrokerError> {
        let state = self.state.lock().await;

        let channel_result = state.channel.close(REPLY_SUCCESS, "").await;
        let connection_result = state.connection.close(REPLY_SUCCESS, "").await;

        channel_result
            .and(connection_result)
            .map_err(BrokerError::Close)
    }

    /// Reconnect to the stored URL when the connection has dropped
    ///
    /// Best-effort: nothing unacknowledged is tracked, so nothing is replayed.
    async fn ensure_connected(&self, state: &mut BrokerState) -> Result<(), lapin::Error> {
        if state.connection.status().connected() {
            return Ok(());
        }

        tracing::warn!("broker connection lost, reconnecting");

        let connection = Connection::connect(&self.url, ConnectionProperties::default()).await?;
        let channel = connection.create_channel().await?;

        state.connection = connection;
        state.channel = channel;

        tracing::info!("broker connection reestablished");
        Ok(())
    }
}

fn lapin_kind(kind: ExchangeKind) -> lapin::ExchangeKind {
    match kind {
        ExchangeKind::Direct => lapin::ExchangeKind::Direct,
        ExchangeKind::Fanout => lapin::ExchangeKind::Fanout,
        ExchangeKind::Topic => lapin::ExchangeKind::Topic,
    }
}
