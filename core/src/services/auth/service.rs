//! Main authentication service implementation

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::token::TokenPair;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::token::TokenManager;

/// Authentication service handling the refresh-token flow
pub struct AuthService<R>
where
    R: UserRepository,
{
    /// User repository for resolving the embedded identity
    repository: Arc<R>,
    /// Token manager for validation and reissuance
    token_manager: Arc<TokenManager>,
}

impl<R> AuthService<R>
where
    R: UserRepository,
{
    pub fn new(repository: Arc<R>, token_manager: Arc<TokenManager>) -> Self {
        Self {
            repository,
            token_manager,
        }
    }

    /// Exchange a valid refresh token for a new access/refresh pair
    ///
    /// The new pair carries the role currently stored for the user, not the
    /// role embedded in the old token, so a role change takes effect at the
    /// next refresh. A lookup miss returns the same `InvalidToken` as a bad
    /// signature: the endpoint leaks no existence information.
    pub async fn refresh_token(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let claims = self.token_manager.validate_token(refresh_token, true)?;

        let user_id =
            Uuid::parse_str(&claims.user_id).map_err(|_| DomainError::InvalidToken)?;

        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::InvalidToken)?;

        tracing::debug!(user_id = %user.id, "refresh token accepted");

        self.token_manager.generate_token_pair(user.id, user.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::{Role, User};
    use crate::repositories::MockUserRepository;
    use gf_shared::config::TokenConfig;

    fn token_manager() -> Arc<TokenManager> {
        Arc::new(TokenManager::new(TokenConfig::new("access", "refresh")))
    }

    async fn registered_user(repository: &MockUserRepository, role: Role) -> User {
        repository
            .create(User::new(
                "Jane".to_string(),
                "Doe".to_string(),
                "jane@example.com".to_string(),
                "+33612345678".to_string(),
                "hash".to_string(),
                role,
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_refresh_reissues_pair() {
        let repository = Arc::new(MockUserRepository::new());
        let tm = token_manager();
        let user = registered_user(&repository, Role::Client).await;
        let pair = tm.generate_token_pair(user.id, user.role).unwrap();

        let service = AuthService::new(Arc::clone(&repository), Arc::clone(&tm));
        let new_pair = service.refresh_token(&pair.refresh_token).await.unwrap();

        let claims = tm.validate_token(&new_pair.access_token, false).unwrap();
        assert_eq!(claims.user_id, user.id.to_string());
        assert_eq!(claims.role, Role::Client);
    }

    #[tokio::test]
    async fn test_refresh_uses_currently_stored_role() {
        let repository = Arc::new(MockUserRepository::new());
        let tm = token_manager();
        let mut user = registered_user(&repository, Role::Client).await;
        let pair = tm.generate_token_pair(user.id, user.role).unwrap();

        // Role change between issuance and refresh
        user.role = Role::Manager;
        repository.update(user.clone()).await.unwrap();

        let service = AuthService::new(Arc::clone(&repository), Arc::clone(&tm));
        let new_pair = service.refresh_token(&pair.refresh_token).await.unwrap();

        let claims = tm.validate_token(&new_pair.access_token, false).unwrap();
        assert_eq!(claims.role, Role::Manager);
    }

    #[tokio::test]
    async fn test_access_token_rejected_on_refresh_endpoint() {
        let repository = Arc::new(MockUserRepository::new());
        let tm = token_manager();
        let user = registered_user(&repository, Role::Client).await;
        let pair = tm.generate_token_pair(user.id, user.role).unwrap();

        let service = AuthService::new(repository, tm);
        let err = service.refresh_token(&pair.access_token).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidToken));
    }

    #[tokio::test]
    async fn test_expired_refresh_token_rejected() {
        let repository = Arc::new(MockUserRepository::new());
        let expired_tm = Arc::new(TokenManager::new(
            TokenConfig::new("access", "refresh").with_refresh_ttl(-60),
        ));
        let user = registered_user(&repository, Role::Client).await;
        let pair = expired_tm.generate_token_pair(user.id, user.role).unwrap();

        let service = AuthService::new(repository, token_manager());
        let err = service.refresh_token(&pair.refresh_token).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidToken));
    }

    #[tokio::test]
    async fn test_unknown_user_maps_to_invalid_token() {
        let repository = Arc::new(MockUserRepository::new());
        let tm = token_manager();
        // Valid signature, but the user was never persisted
        let pair = tm
            .generate_token_pair(Uuid::new_v4(), Role::Client)
            .unwrap();

        let service = AuthService::new(repository, tm);
        let err = service.refresh_token(&pair.refresh_token).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidToken));
    }
}
