//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{Claims, TokenPair, JWT_ISSUER};
pub use user::{Role, User};
