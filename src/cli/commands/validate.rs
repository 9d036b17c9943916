//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the hkmask configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        // load_config validates internally
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Confidence Threshold: {}",
            config.pipeline.confidence_threshold
        );
        println!(
            "  Pattern Library: {}",
            config
                .pipeline
                .pattern_library
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string())
        );
        if config.ner.enabled {
            println!("  NER Endpoint: {}", config.ner.endpoint);
            println!("  NER Timeout: {}s", config.ner.timeout_secs);
        } else {
            println!("  NER: disabled (regex fallback only)");
        }
        println!("  LLM Endpoint: {}", config.llm.endpoint);
        println!("  LLM Model: {}", config.llm.model);
        println!("  LLM Temperature: {}", config.llm.temperature);
        println!();
        Ok(0)
    }
}
