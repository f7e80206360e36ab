//! Unit tests for the user service

use std::sync::Arc;

use crate::domain::entities::user::Role;
use crate::errors::DomainError;
use crate::repositories::MockUserRepository;
use crate::services::messaging::MockEventPublisher;
use crate::services::password::PasswordManager;
use crate::services::token::TokenManager;
use gf_shared::config::{PasswordConfig, TokenConfig};

use super::input::{LoginInput, RegisterInput, UpdateUserInput};
use super::service::UserService;

fn service() -> (
    UserService<MockUserRepository, MockEventPublisher>,
    Arc<MockUserRepository>,
    Arc<MockEventPublisher>,
) {
    service_with_publisher(MockEventPublisher::new())
}

fn service_with_publisher(
    publisher: MockEventPublisher,
) -> (
    UserService<MockUserRepository, MockEventPublisher>,
    Arc<MockUserRepository>,
    Arc<MockEventPublisher>,
) {
    let repository = Arc::new(MockUserRepository::new());
    let publisher = Arc::new(publisher);
    let service = UserService::new(
        Arc::clone(&repository),
        Arc::new(TokenManager::new(TokenConfig::new("access", "refresh"))),
        Arc::new(PasswordManager::new(PasswordConfig::new("pepper"))),
        Arc::clone(&publisher),
    );
    (service, repository, publisher)
}

fn register_input() -> RegisterInput {
    RegisterInput {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: "a@b.com".to_string(),
        phone: "+33612345678".to_string(),
        password: "Passw0rd!".to_string(),
        role: Role::Client,
    }
}

#[tokio::test]
async fn test_register_persists_and_publishes_both_events() {
    let (service, repository, publisher) = service();

    let user = service.register(register_input()).await.unwrap();

    assert_eq!(user.email, "a@b.com");
    assert_ne!(user.password_hash, "Passw0rd!");
    assert_eq!(repository.len().await, 1);

    let created = publisher.created.read().await;
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].id, user.id);
    assert_eq!(created[0].email, "a@b.com");

    let welcome = publisher.welcome.read().await;
    assert_eq!(welcome.len(), 1);
    assert_eq!(welcome[0].id, user.id);
}

#[tokio::test]
async fn test_register_normalizes_email_and_phone() {
    let (service, _, _) = service();

    let mut input = register_input();
    input.email = "  John.Doe@Example.COM ".to_string();
    input.phone = "+33 6 12 34 56 78".to_string();

    let user = service.register(input).await.unwrap();
    assert_eq!(user.email, "john.doe@example.com");
    assert_eq!(user.phone, "+33612345678");
}

#[tokio::test]
async fn test_register_rejects_malformed_email() {
    let (service, _, _) = service();

    let mut input = register_input();
    input.email = "not-an-email".to_string();
    assert!(matches!(
        service.register(input).await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_login_accepts_padded_email() {
    let (service, _, _) = service();
    service.register(register_input()).await.unwrap();

    let pair = service
        .login(LoginInput {
            email: "  A@B.com ".to_string(),
            password: "Passw0rd!".to_string(),
        })
        .await
        .unwrap();
    assert!(!pair.access_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email_is_conflict() {
    let (service, _, _) = service();
    service.register(register_input()).await.unwrap();

    let mut second = register_input();
    second.phone = "+33698765432".to_string();
    let err = service.register(second).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict { field } if field == "email"));
}

#[tokio::test]
async fn test_register_duplicate_phone_is_conflict() {
    let (service, _, _) = service();
    service.register(register_input()).await.unwrap();

    let mut second = register_input();
    second.email = "other@b.com".to_string();
    let err = service.register(second).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict { field } if field == "phone"));
}

#[tokio::test]
async fn test_register_rejects_short_password_and_bad_phone() {
    let (service, _, _) = service();

    let mut input = register_input();
    input.password = "short".to_string();
    assert!(matches!(
        service.register(input).await,
        Err(DomainError::Validation { .. })
    ));

    let mut input = register_input();
    input.phone = "0612345678".to_string();
    assert!(matches!(
        service.register(input).await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_register_survives_publish_failure() {
    let (service, repository, publisher) = service_with_publisher(MockEventPublisher::failing());

    let user = service.register(register_input()).await.unwrap();

    assert_eq!(repository.len().await, 1);
    assert!(publisher.created.read().await.is_empty());
    assert!(service.get_by_id(user.id).await.is_ok());
}

#[tokio::test]
async fn test_login_issues_tokens_for_valid_credentials() {
    let (service, _, _) = service();
    service.register(register_input()).await.unwrap();

    let pair = service
        .login(LoginInput {
            email: "a@b.com".to_string(),
            password: "Passw0rd!".to_string(),
        })
        .await
        .unwrap();

    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh_token.is_empty());
    assert_ne!(pair.access_token, pair.refresh_token);
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_look_identical() {
    let (service, _, _) = service();
    service.register(register_input()).await.unwrap();

    let wrong_password = service
        .login(LoginInput {
            email: "a@b.com".to_string(),
            password: "wrong-password".to_string(),
        })
        .await
        .unwrap_err();

    let unknown_email = service
        .login(LoginInput {
            email: "nobody@b.com".to_string(),
            password: "Passw0rd!".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, DomainError::InvalidCredentials));
    assert!(matches!(unknown_email, DomainError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_update_applies_partial_fields_only() {
    let (service, _, publisher) = service();
    let user = service.register(register_input()).await.unwrap();

    let updated = service
        .update(
            user.id,
            UpdateUserInput {
                first_name: None,
                last_name: Some("Smith".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.first_name, "Jane");
    assert_eq!(updated.last_name, "Smith");
    assert!(updated.updated_at >= user.updated_at);
    assert_eq!(publisher.updated.read().await.len(), 1);
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() {
    let (service, _, _) = service();
    let err = service
        .update(uuid::Uuid::new_v4(), UpdateUserInput::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}
