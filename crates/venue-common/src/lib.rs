//! # venue-common
//!
//! Shared utilities including configuration, error handling, identity
//! resolution, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, JwtService};
pub use config::{AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment, JwtConfig};
pub use error::{AppError, ErrorResponse};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
