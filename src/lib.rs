pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod personas;
pub mod prompt;
pub mod rate_limit;
pub mod server;
pub mod sse;
pub mod state;
pub mod upstream;
pub mod validate;
