//! Password hashing and verification.

mod manager;

pub use manager::PasswordManager;
