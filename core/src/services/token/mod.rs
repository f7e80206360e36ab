//! Signed-token issuance and validation.

mod manager;

pub use manager::TokenManager;
