//! RabbitMQ messaging layer.
//!
//! [`BrokerClient`] owns one connection and one channel; [`BrokerTopology`]
//! models the declared exchanges, queues and bindings; the publisher and
//! consumer modules put them to work for the user-lifecycle events.

pub mod client;
pub mod constants;
pub mod consumer;
pub mod error;
pub mod publisher;
pub mod topology;

pub use client::{BrokerClient, MessageHandler};
pub use consumer::UserCreatedHandler;
pub use error::BrokerError;
pub use publisher::RabbitEventPublisher;
pub use topology::{Binding, BrokerTopology, ExchangeConfig, ExchangeKind, QueueConfig};
