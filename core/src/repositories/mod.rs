//! Repository interfaces for data persistence.
//!
//! Concrete implementations live in the infrastructure layer; the in-memory
//! mocks here back the service unit tests.

pub mod user;

pub use user::{MockUserRepository, UserRepository};
