//! JWT token manager with independent access and refresh secret domains.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenPair, JWT_ISSUER};
use crate::domain::entities::user::Role;
use crate::errors::DomainError;
use gf_shared::config::TokenConfig;

/// Issues and validates HS256 token pairs
///
/// Access and refresh tokens live in separate secret domains: a token
/// validated against the wrong domain fails even when otherwise well-formed.
pub struct TokenManager {
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
    validation: Validation,
}

impl TokenManager {
    pub fn new(config: TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // The audience is the per-token user id, checked by callers
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            access_encoding_key: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding_key: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding_key: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl_seconds: config.access_ttl_seconds,
            refresh_ttl_seconds: config.refresh_ttl_seconds,
            validation,
        }
    }

    /// Generate an access/refresh token pair for a user
    ///
    /// One claims record is built, signed with the access secret, then re-signed
    /// with the refresh secret after moving only the expiry out. Both tokens
    /// share identical `iat`/`nbf`/`iss`/`aud`.
    ///
    /// # Returns
    /// * `Ok(TokenPair)` - The signed pair
    /// * `Err(DomainError)` - Signing failed; does not occur under correct
    ///   secret configuration
    pub fn generate_token_pair(&self, user_id: Uuid, role: Role) -> Result<TokenPair, DomainError> {
        let now = Utc::now().timestamp();
        let mut claims = Claims::new(
            user_id.to_string(),
            role,
            now,
            now + self.access_ttl_seconds,
        );

        let header = Header::new(Algorithm::HS256);
        let access_token = encode(&header, &claims, &self.access_encoding_key)
            .map_err(Self::signing_error)?;

        claims.exp = now + self.refresh_ttl_seconds;
        let refresh_token = encode(&header, &claims, &self.refresh_encoding_key)
            .map_err(Self::signing_error)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Validate a token against the secret domain selected by `is_refresh`
    ///
    /// Verifies the signature, issuer and registered time claims
    /// (`nbf <= now <= exp`, zero leeway). Every defect - bad signature,
    /// wrong-domain secret, malformed encoding, expired, not yet valid -
    /// collapses to `DomainError::InvalidToken` so callers cannot serve as a
    /// validation oracle.
    pub fn validate_token(&self, token: &str, is_refresh: bool) -> Result<Claims, DomainError> {
        let decoding_key = if is_refresh {
            &self.refresh_decoding_key
        } else {
            &self.access_decoding_key
        };

        decode::<Claims>(token, decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| DomainError::InvalidToken)
    }

    fn signing_error(err: jsonwebtoken::errors::Error) -> DomainError {
        DomainError::Internal {
            message: format!("token signing failed: {}", err),
        }
    }
}
