//! User repository trait defining the interface for user data persistence.
//!
//! The services treat persistence as an external collaborator: implementations
//! must be safe for concurrent use by simultaneous requests (internally pooled)
//! and are expected to key records by the opaque user id, the normalized email
//! and the E.164 phone number.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository contract for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given id
    /// * `Err(DomainError)` - Database or other infrastructure error
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by their normalized email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their E.164 phone number
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// Implementations must reject duplicate emails or phone numbers with
    /// `DomainError::Conflict`.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Persist changes to an existing user
    ///
    /// Returns `DomainError::NotFound` when the user does not exist.
    async fn update(&self, user: User) -> Result<User, DomainError>;
}
