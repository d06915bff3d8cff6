mod client_ip;
mod health;
mod metrics;
mod personas;
mod review;

pub use client_ip::ClientIp;
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use personas::personas_handler;
pub use review::review_handler;
