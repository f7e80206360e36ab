//! Validated input records for the user service.
//!
//! The routing collaborator decodes requests into these structs; validation
//! tags mirror the registration contract (names 2-100 characters, password of
//! at least 8 characters). Email and phone are checked after normalization
//! rather than here.

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::user::Role;

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 2, max = 100))]
    pub first_name: String,

    #[validate(length(min = 2, max = 100))]
    pub last_name: String,

    /// Checked for well-formedness after normalization
    pub email: String,

    /// Checked against E.164 after normalization
    pub phone: String,

    #[validate(length(min = 8))]
    pub password: String,

    pub role: Role,
}

/// Login request; the email is normalized before lookup
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginInput {
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Partial profile update; absent or empty fields leave values untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserInput {
    pub first_name: Option<String>,

    pub last_name: Option<String>,
}
