//! Main user service implementation

use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;
use crate::domain::events::{UserCreatedEvent, UserUpdatedEvent, WelcomeEmailEvent};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::messaging::EventPublisher;
use crate::services::password::PasswordManager;
use crate::services::token::TokenManager;

use super::input::{LoginInput, RegisterInput, UpdateUserInput};
use gf_shared::utils::validation::{is_valid_email, is_valid_phone, normalize_email, normalize_phone};

/// User service orchestrating registration, login and profile updates
///
/// Stateless per call; collaborators are injected and shared across
/// simultaneous requests.
pub struct UserService<R, P>
where
    R: UserRepository,
    P: EventPublisher,
{
    /// User repository for persistence
    repository: Arc<R>,
    /// Token manager for issuing pairs at login
    token_manager: Arc<TokenManager>,
    /// Password hashing and verification
    password_manager: Arc<PasswordManager>,
    /// Broker-backed publisher for user-lifecycle events
    publisher: Arc<P>,
}

impl<R, P> UserService<R, P>
where
    R: UserRepository,
    P: EventPublisher,
{
    pub fn new(
        repository: Arc<R>,
        token_manager: Arc<TokenManager>,
        password_manager: Arc<PasswordManager>,
        publisher: Arc<P>,
    ) -> Self {
        Self {
            repository,
            token_manager,
            password_manager,
            publisher,
        }
    }

    /// Register a new user
    ///
    /// Normalizes the email and phone before any check, validates the
    /// normalized forms, checks each for uniqueness, hashes the password and
    /// persists the account. On successful persistence a
    /// `UserCreatedEvent` and a derived `WelcomeEmailEvent` are published
    /// best-effort: a publish failure is logged and the registration still
    /// succeeds. No compensating retry exists, so a downstream consumer may
    /// never see the event if the broker is unreachable at that instant.
    ///
    /// # Returns
    /// * `Ok(User)` - The persisted account
    /// * `Err(DomainError::Validation)` - Malformed input
    /// * `Err(DomainError::Conflict)` - Email or phone already registered
    pub async fn register(&self, input: RegisterInput) -> DomainResult<User> {
        input
            .validate()
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let email = normalize_email(&input.email);
        if !is_valid_email(&email) {
            return Err(DomainError::validation("email must be well-formed"));
        }
        let phone = normalize_phone(&input.phone);
        if !is_valid_phone(&phone) {
            return Err(DomainError::validation("phone must be in E.164 format"));
        }

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(DomainError::conflict("email"));
        }
        if self.repository.find_by_phone(&phone).await?.is_some() {
            return Err(DomainError::conflict("phone"));
        }

        let password_hash = self.password_manager.hash_password(&input.password)?;

        let user = User::new(
            input.first_name,
            input.last_name,
            email,
            phone,
            password_hash,
            input.role,
        );
        let user = self.repository.create(user).await?;

        tracing::info!(user_id = %user.id, role = %user.role, "user registered");

        let created = UserCreatedEvent::from(&user);
        if let Err(e) = self.publisher.publish_user_created(&created).await {
            tracing::error!(user_id = %user.id, error = %e, "failed to publish user created event");
        }

        let welcome = WelcomeEmailEvent::from(&created);
        if let Err(e) = self.publisher.publish_welcome_email(&welcome).await {
            tracing::error!(user_id = %user.id, error = %e, "failed to publish welcome email event");
        }

        Ok(user)
    }

    /// Authenticate a user and issue a token pair
    ///
    /// A missing account and a wrong password both return the same
    /// `InvalidCredentials` error, so the endpoint leaks no existence
    /// information.
    pub async fn login(&self, input: LoginInput) -> DomainResult<TokenPair> {
        input
            .validate()
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let email = normalize_email(&input.email);
        let user = match self.repository.find_by_email(&email).await? {
            Some(user) => user,
            None => return Err(DomainError::InvalidCredentials),
        };

        if !self
            .password_manager
            .compare_password(&user.password_hash, &input.password)?
        {
            tracing::warn!(user_id = %user.id, "login failed: password mismatch");
            return Err(DomainError::InvalidCredentials);
        }

        self.token_manager.generate_token_pair(user.id, user.role)
    }

    /// Apply a partial profile update
    ///
    /// Only non-empty fields are applied; a `UserUpdatedEvent` is published
    /// best-effort after the write.
    pub async fn update(&self, id: Uuid, input: UpdateUserInput) -> DomainResult<User> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                resource: "User".to_string(),
            })?;

        user.apply_update(input.first_name, input.last_name);
        let user = self.repository.update(user).await?;

        let updated = UserUpdatedEvent::from(&user);
        if let Err(e) = self.publisher.publish_user_updated(&updated).await {
            tracing::error!(user_id = %user.id, error = %e, "failed to publish user updated event");
        }

        Ok(user)
    }

    /// Fetch a user profile by id
    pub async fn get_by_id(&self, id: Uuid) -> DomainResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                resource: "User".to_string(),
            })
    }
}
