//! Token entities for JWT-based authentication.

use serde::{Deserialize, Serialize};

use super::user::Role;

/// JWT issuer claim
pub const JWT_ISSUER: &str = "Goodfood";

/// A freshly issued access/refresh token pair
///
/// The two tokens carry identical claims except for the expiry, and are signed
/// with independent secrets. There is no revoked state: a pair stays valid
/// until natural expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Role held by the user at issuance time
    pub role: Role,

    /// User identifier (also the sole audience entry)
    pub user_id: String,

    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,

    /// Issued-at timestamp
    pub iat: i64,

    /// Not-before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: Vec<String>,
}

impl Claims {
    /// Creates claims for `user_id` valid from `now` until `expires_at`
    pub fn new(user_id: String, role: Role, now: i64, expires_at: i64) -> Self {
        Self {
            role,
            aud: vec![user_id.clone()],
            user_id,
            exp: expires_at,
            iat: now,
            nbf: now,
            iss: JWT_ISSUER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_audience_is_user_id() {
        let claims = Claims::new("user-1".to_string(), Role::Driver, 1000, 2000);
        assert_eq!(claims.aud, vec!["user-1".to_string()]);
        assert_eq!(claims.iss, "Goodfood");
        assert_eq!(claims.iat, claims.nbf);
    }

    #[test]
    fn test_claims_json_shape() {
        let claims = Claims::new("user-1".to_string(), Role::Admin, 1000, 2000);
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["role"], "admin");
        assert_eq!(json["user_id"], "user-1");
        assert_eq!(json["exp"], 2000);
    }
}
