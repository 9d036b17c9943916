//! Logging and observability
//!
//! Structured logging with:
//! - Console output for interactive use
//! - JSON-formatted local file logs with rotation
//! - Configurable log levels
//!
//! # Example
//!
//! ```no_run
//! use hkmask::logging::init_logging;
//! use hkmask::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};
