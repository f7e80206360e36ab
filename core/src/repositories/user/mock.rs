//! In-memory implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// Mock user repository backed by a shared map
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.phone == phone).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::conflict("email"));
        }
        if users.values().any(|u| u.phone == user.phone) {
            return Err(DomainError::conflict("phone"));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::Role;

    fn sample_user(email: &str, phone: &str) -> User {
        User::new(
            "Jane".to_string(),
            "Doe".to_string(),
            email.to_string(),
            phone.to_string(),
            "hash".to_string(),
            Role::Client,
        )
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = MockUserRepository::new();
        let user = repo
            .create(sample_user("a@b.com", "+33612345678"))
            .await
            .unwrap();

        assert!(repo.find_by_id(user.id).await.unwrap().is_some());
        assert!(repo.find_by_email("a@b.com").await.unwrap().is_some());
        assert!(repo.find_by_phone("+33612345678").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = MockUserRepository::new();
        repo.create(sample_user("a@b.com", "+33612345678"))
            .await
            .unwrap();

        let err = repo
            .create(sample_user("a@b.com", "+33698765432"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict { field } if field == "email"));
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let repo = MockUserRepository::new();
        let err = repo
            .update(sample_user("a@b.com", "+33612345678"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
