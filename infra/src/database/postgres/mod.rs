pub mod user_repository_impl;

pub use user_repository_impl::PostgresUserRepository;
