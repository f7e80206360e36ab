//! Shared configuration and utilities for the Goodfood auth service
//!
//! This crate provides functionality used across the server crates:
//! - Configuration types loaded from the environment
//! - Input normalization and validation helpers

pub mod config;
pub mod utils;

pub use config::ConfigError;
