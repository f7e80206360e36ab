//! Business services containing domain logic and use cases.

pub mod auth;
pub mod messaging;
pub mod password;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use auth::AuthService;
pub use messaging::{EventPublisher, MockEventPublisher};
pub use password::PasswordManager;
pub use token::TokenManager;
pub use user::{LoginInput, RegisterInput, UpdateUserInput, UserService};
