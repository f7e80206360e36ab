//! Declarative model of the broker topology.
//!
//! Declarations are idempotent: redeclaring a name with identical parameters
//! is a no-op, redeclaring with different parameters is a definition conflict.
//! The model is transport-free; [`super::client::BrokerClient`] drives the
//! channel and records successful declarations here.

use std::collections::HashMap;

use thiserror::Error;

/// Dispatch rule of an exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeKind {
    Direct,
    Fanout,
    Topic,
}

impl ExchangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExchangeKind::Direct => "direct",
            ExchangeKind::Fanout => "fanout",
            ExchangeKind::Topic => "topic",
        }
    }
}

/// Exchange definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeConfig {
    pub name: String,
    pub kind: ExchangeKind,
    pub durable: bool,
}

impl ExchangeConfig {
    pub fn new(name: impl Into<String>, kind: ExchangeKind, durable: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            durable,
        }
    }
}

/// Queue definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    pub name: String,
    pub durable: bool,
}

impl QueueConfig {
    pub fn new(name: impl Into<String>, durable: bool) -> Self {
        Self {
            name: name.into(),
            durable,
        }
    }
}

/// Routing-key attachment of a queue to an exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub queue: String,
    pub exchange: String,
    pub routing_key: String,
}

impl Binding {
    pub fn new(
        queue: impl Into<String>,
        exchange: impl Into<String>,
        routing_key: impl Into<String>,
    ) -> Self {
        Self {
            queue: queue.into(),
            exchange: exchange.into(),
            routing_key: routing_key.into(),
        }
    }
}

/// Redeclaration of an existing name with different parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("conflicting redeclaration of {kind} {name}")]
pub struct TopologyConflict {
    pub kind: &'static str,
    pub name: String,
}

/// Declared exchanges, queues and bindings, keyed by name
#[derive(Debug, Default)]
pub struct BrokerTopology {
    exchanges: HashMap<String, ExchangeConfig>,
    queues: HashMap<String, QueueConfig>,
    bindings: Vec<Binding>,
}

impl BrokerTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an exchange declaration
    ///
    /// Returns `Ok(true)` for a new declaration, `Ok(false)` for an identical
    /// redeclaration (no-op).
    pub fn declare_exchange(&mut self, config: ExchangeConfig) -> Result<bool, TopologyConflict> {
        match self.exchanges.get(&config.name) {
            Some(existing) if *existing == config => Ok(false),
            Some(_) => Err(TopologyConflict {
                kind: "exchange",
                name: config.name,
            }),
            None => {
                self.exchanges.insert(config.name.clone(), config);
                Ok(true)
            }
        }
    }

    /// Record a queue declaration; same idempotence contract as exchanges
    pub fn declare_queue(&mut self, config: QueueConfig) -> Result<bool, TopologyConflict> {
        match self.queues.get(&config.name) {
            Some(existing) if *existing == config => Ok(false),
            Some(_) => Err(TopologyConflict {
                kind: "queue",
                name: config.name,
            }),
            None => {
                self.queues.insert(config.name.clone(), config);
                Ok(true)
            }
        }
    }

    /// Record a binding; duplicates collapse
    ///
    /// Returns `true` when the binding is new.
    pub fn bind_queue(&mut self, binding: Binding) -> bool {
        if self.bindings.contains(&binding) {
            return false;
        }
        self.bindings.push(binding);
        true
    }

    pub fn has_exchange(&self, name: &str) -> bool {
        self.exchanges.contains_key(name)
    }

    pub fn has_queue(&self, name: &str) -> bool {
        self.queues.contains_key(name)
    }

    /// Whether `queue` is reachable from `exchange` under `routing_key`;
    /// publishing to an exchange with no matching binding means the broker
    /// silently drops the message
    pub fn is_bound(&self, queue: &str, exchange: &str, routing_key: &str) -> bool {
        self.bindings
            .iter()
            .any(|b| b.queue == queue && b.exchange == exchange && b.routing_key == routing_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_exchange() -> ExchangeConfig {
        ExchangeConfig::new("user.events", ExchangeKind::Topic, true)
    }

    #[test]
    fn test_identical_redeclare_is_noop() {
        let mut topology = BrokerTopology::new();
        assert!(topology.declare_exchange(user_exchange()).unwrap());
        assert!(!topology.declare_exchange(user_exchange()).unwrap());
    }

    #[test]
    fn test_mismatched_redeclare_is_conflict() {
        let mut topology = BrokerTopology::new();
        topology.declare_exchange(user_exchange()).unwrap();

        let err = topology
            .declare_exchange(ExchangeConfig::new("user.events", ExchangeKind::Fanout, true))
            .unwrap_err();
        assert_eq!(err.kind, "exchange");
        assert_eq!(err.name, "user.events");
    }

    #[test]
    fn test_queue_conflict_on_durability_change() {
        let mut topology = BrokerTopology::new();
        topology
            .declare_queue(QueueConfig::new("user.created", true))
            .unwrap();

        assert!(topology
            .declare_queue(QueueConfig::new("user.created", false))
            .is_err());
        assert!(!topology
            .declare_queue(QueueConfig::new("user.created", true))
            .unwrap());
    }

    #[test]
    fn test_duplicate_bindings_collapse() {
        let mut topology = BrokerTopology::new();
        let binding = Binding::new("user.created", "user.events", "user.created");

        assert!(topology.bind_queue(binding.clone()));
        assert!(!topology.bind_queue(binding));
        assert!(topology.is_bound("user.created", "user.events", "user.created"));
        assert!(!topology.is_bound("user.created", "user.events", "user.deleted"));
    }
}
