//! # Goodfood Auth Core
//!
//! Core business logic and domain layer for the Goodfood auth service.
//! This crate contains domain entities, domain events, business services,
//! repository interfaces, and error types. Infrastructure concerns (HTTP,
//! database, message broker) live behind the ports defined here.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, Role, TokenPair, User, JWT_ISSUER};
pub use domain::events::{UserCreatedEvent, UserUpdatedEvent, WelcomeEmailEvent};
pub use errors::{DomainError, DomainResult};
pub use repositories::{MockUserRepository, UserRepository};
pub use services::{
    AuthService, EventPublisher, LoginInput, MockEventPublisher, PasswordManager, RegisterInput,
    TokenManager, UpdateUserInput, UserService,
};
