//! User registration, login and profile management.

mod input;
mod service;

pub use input::{LoginInput, RegisterInput, UpdateUserInput};
pub use service::UserService;

#[cfg(test)]
mod tests;
