//! Token refresh flow.

mod service;

pub use service::AuthService;
