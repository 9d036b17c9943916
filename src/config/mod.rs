//! Configuration management for hkmask.
//!
//! TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! hkmask uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for optional settings
//! - Environment overrides with the `HKMASK_*` prefix
//! - Type-safe configuration structs
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hkmask::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("hkmask.toml")?;
//!
//! println!("LLM model: {}", config.llm.model);
//! println!("Confidence threshold: {}", config.pipeline.confidence_threshold);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`crate::pipeline::PipelineConfig`] - Span-resolution tunables
//! - [`NerConfig`] - Remote NER service connection
//! - [`LlmConfig`] - LLM paraphrase endpoint, model and prompts
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [pipeline]
//! confidence_threshold = 0.30
//!
//! [ner]
//! enabled = true
//! endpoint = "http://localhost:8000/ner"
//!
//! [llm]
//! endpoint = "http://localhost:11434/api/chat"
//! model = "qwen3:8b"
//! temperature = 0.2
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_str};
pub use schema::{ApplicationConfig, HkMaskConfig, LlmConfig, LoggingConfig, NerConfig};
