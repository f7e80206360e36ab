//! Domain events propagated to other services over the message broker.
//!
//! Events are immutable value records serialized to UTF-8 JSON at the publish
//! boundary. Field names follow the published wire contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entities::user::{Role, User};

/// Published when a user account has been persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreatedEvent {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserCreatedEvent {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Published when a user profile has been modified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdatedEvent {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserUpdatedEvent {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
            updated_at: user.updated_at,
        }
    }
}

/// Derived from [`UserCreatedEvent`] to trigger the welcome email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeEmailEvent {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&UserCreatedEvent> for WelcomeEmailEvent {
    fn from(event: &UserCreatedEvent) -> Self {
        Self {
            id: event.id,
            email: event.email.clone(),
            first_name: event.first_name.clone(),
            last_name: event.last_name.clone(),
            role: event.role,
            created_at: event.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::User;

    fn sample_user() -> User {
        User::new(
            "Jane".to_string(),
            "Doe".to_string(),
            "jane@example.com".to_string(),
            "+33612345678".to_string(),
            "hash".to_string(),
            Role::Client,
        )
    }

    #[test]
    fn test_user_created_event_wire_fields() {
        let user = sample_user();
        let event = UserCreatedEvent::from(&user);
        let json = serde_json::to_value(&event).unwrap();

        for field in ["id", "email", "first_name", "last_name", "role", "created_at"] {
            assert!(json.get(field).is_some(), "missing field {}", field);
        }
        assert_eq!(json["email"], "jane@example.com");
        assert_eq!(json["role"], "client");
    }

    #[test]
    fn test_welcome_email_derived_from_created() {
        let user = sample_user();
        let created = UserCreatedEvent::from(&user);
        let welcome = WelcomeEmailEvent::from(&created);

        assert_eq!(welcome.id, created.id);
        assert_eq!(welcome.email, created.email);
        assert_eq!(welcome.created_at, created.created_at);
    }

    #[test]
    fn test_event_round_trip() {
        let event = UserCreatedEvent::from(&sample_user());
        let bytes = serde_json::to_vec(&event).unwrap();
        let decoded: UserCreatedEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded, event);
    }
}
