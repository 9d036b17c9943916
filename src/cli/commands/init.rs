//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "hkmask.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_default_config()) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Point [ner] at your NER service, or leave it disabled");
                println!("  3. Point [llm] at your local Ollama instance");
                println!("  4. Validate configuration: hkmask validate-config");
                println!("  5. Mask a document: hkmask mask input.txt");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate the default configuration
    fn generate_default_config() -> String {
        r#"# hkmask Configuration File
# Hong Kong PII detection and reversible masking

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[pipeline]
# Spans with score at or below this threshold are dropped
confidence_threshold = 0.30

# Optional custom fallback pattern library (TOML). The built-in
# Hong Kong patterns (HKID, phone, plate, email, account) are used
# when this is not set.
# pattern_library = "patterns/pii_patterns.toml"

[ner]
# Remote NER service. When disabled and no span file is supplied,
# masking runs on the regex fallback alone.
enabled = false
endpoint = "http://localhost:8000/ner"
timeout_secs = 60

[llm]
# Local Ollama chat endpoint used by the paraphrase command
endpoint = "http://localhost:11434/api/chat"
model = "qwen3:8b"
temperature = 0.2
# Local models take minutes per document
timeout_secs = 300

[logging]
# JSON file logs with rotation; console output is always on
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }
}
