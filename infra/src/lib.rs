//! # Infrastructure Layer
//!
//! Concrete implementations behind the ports defined in `gf_core`:
//! - RabbitMQ topology management, publishing and consuming
//! - Postgres-backed user persistence
//!
//! Startup ordering contract: the broker topology must be fully declared
//! (see [`messaging::RabbitEventPublisher::new`]) before any publish or
//! consume referencing it, or the broker silently drops unroutable events.

pub mod database;
pub mod messaging;

pub use database::PostgresUserRepository;
pub use messaging::{BrokerClient, BrokerError, BrokerTopology, RabbitEventPublisher};
