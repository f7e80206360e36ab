//! Broker error types.

use thiserror::Error;

use gf_core::errors::DomainError;

use super::topology::TopologyConflict;

/// Errors raised by the messaging layer
#[derive(Error, Debug)]
pub enum BrokerError {
    /// Initial connection refused; fatal at startup
    #[error("failed to connect to broker: {0}")]
    Connect(#[source] lapin::Error),

    #[error(transparent)]
    Topology(#[from] TopologyConflict),

    #[error("failed to declare topology: {0}")]
    Declare(#[source] lapin::Error),

    #[error("failed to serialize message: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Publish failures, including a failed reconnect attempt on the way
    #[error("failed to publish message: {0}")]
    Publish(#[source] lapin::Error),

    #[error("failed to register consumer on queue {queue}: {source}")]
    ConsumeSetup {
        queue: String,
        #[source]
        source: lapin::Error,
    },

    #[error("failed to close broker client: {0}")]
    Close(#[source] lapin::Error),
}

impl From<BrokerError> for DomainError {
    fn from(err: BrokerError) -> Self {
        DomainError::Infrastructure {
            message: err.to_string(),
        }
    }
}
