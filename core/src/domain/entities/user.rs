//! User entity representing a registered user of the Goodfood platform.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a user in the system
///
/// A closed set: an invalid role cannot be represented, so authorization
/// checks never fall back to ad hoc string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A customer ordering food
    Client,
    /// A restaurant manager
    Manager,
    /// A platform administrator
    Admin,
    /// A delivery driver
    Driver,
}

impl Role {
    /// Whether this role may administer other user accounts
    pub fn can_manage_users(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Manager => "manager",
            Role::Admin => "admin",
            Role::Driver => "driver",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Role::Client),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            "driver" => Ok(Role::Driver),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// User entity
///
/// Uniqueness keys are the normalized email and the E.164 phone number. The
/// password hash never serializes outward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    pub first_name: String,

    pub last_name: String,

    /// Normalized (trimmed, lowercased) email address, unique
    pub email: String,

    /// E.164 phone number, unique
    pub phone: String,

    /// One-way password hash; the embedded cost and salt make verification
    /// self-describing
    #[serde(skip_serializing)]
    #[serde(default)]
    pub password_hash: String,

    pub role: Role,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User with a fresh id and timestamps
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        phone: String,
        password_hash: String,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            phone,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update; empty fields leave existing values untouched
    pub fn apply_update(&mut self, first_name: Option<String>, last_name: Option<String>) {
        if let Some(first_name) = first_name.filter(|s| !s.is_empty()) {
            self.first_name = first_name;
        }
        if let Some(last_name) = last_name.filter(|s| !s.is_empty()) {
            self.last_name = last_name;
        }
        self.updated_at = Utc::now();
    }
}
