//! TaskHub library: projects, their tasks, and the HTTP API over them.

pub mod config;
pub mod domain;
pub mod http;
pub mod store;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::Store;
