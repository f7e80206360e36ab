//! Well-known exchange, queue and routing-key names.

// Exchanges
pub const USER_EXCHANGE: &str = "user.events";
pub const EMAIL_EXCHANGE: &str = "email.events";

// Queues
pub const USER_CREATED_QUEUE: &str = "user.created";
pub const USER_UPDATED_QUEUE: &str = "user.updated";
pub const WELCOME_EMAIL_QUEUE: &str = "email.welcome";

// Routing keys
pub const USER_CREATED_KEY: &str = "user.created";
pub const USER_UPDATED_KEY: &str = "user.updated";
pub const WELCOME_EMAIL_KEY: &str = "email.welcome";
