//! Adaptive password hashing with a server-side pepper.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::errors::DomainError;
use gf_shared::config::PasswordConfig;

/// bcrypt operates on at most 72 input bytes; anything beyond would be
/// silently truncated, so oversized input is rejected instead
const MAX_INPUT_BYTES: usize = 72;

/// Salted and peppered password hashing
///
/// The submitted password is concatenated with a process-wide secret (pepper)
/// before hashing. bcrypt generates a fresh salt per call and embeds the salt
/// and cost factor in the output, so verification needs no external state.
pub struct PasswordManager {
    cost: u32,
    pepper: String,
}

impl PasswordManager {
    pub fn new(config: PasswordConfig) -> Self {
        Self {
            cost: DEFAULT_COST,
            pepper: config.pepper,
        }
    }

    /// Hash a plaintext password
    ///
    /// # Returns
    /// * `Ok(String)` - Self-describing hash embedding cost and salt
    /// * `Err(DomainError)` - Oversized input or hashing failure
    pub fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        let peppered = self.pepper_password(password);
        if peppered.len() > MAX_INPUT_BYTES {
            return Err(DomainError::validation("password too long"));
        }

        hash(&peppered, self.cost).map_err(|e| DomainError::Internal {
            message: format!("password hashing failed: {}", e),
        })
    }

    /// Verify a plaintext password against a stored hash
    ///
    /// A mismatch is `Ok(false)`, not an error. Oversized input is rejected
    /// like in `hash_password`, and a malformed hash encoding errors. The
    /// comparison is defined by bcrypt to be invariant to input length, so
    /// there is no early-exit timing path.
    pub fn compare_password(&self, hashed: &str, password: &str) -> Result<bool, DomainError> {
        let peppered = self.pepper_password(password);
        if peppered.len() > MAX_INPUT_BYTES {
            return Err(DomainError::validation("password too long"));
        }

        verify(&peppered, hashed).map_err(|e| DomainError::Internal {
            message: format!("malformed password hash: {}", e),
        })
    }

    fn pepper_password(&self, password: &str) -> String {
        format!("{}{}", password, self.pepper)
    }
}
