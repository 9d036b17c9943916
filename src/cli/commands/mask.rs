//! Mask command implementation
//!
//! Detects PII in a document and writes the masked text plus the tag
//! mapping needed to reverse it.

use super::{build_source, read_input};
use crate::config::load_config;
use crate::domain::DocumentOutcome;
use crate::pipeline::PiiPipeline;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the mask command
#[derive(Args, Debug)]
pub struct MaskArgs {
    /// Input text file
    pub input: Option<PathBuf>,

    /// Inline input text instead of a file
    #[arg(long, conflicts_with = "input")]
    pub text: Option<String>,

    /// JSON file of pre-computed candidate spans
    #[arg(long)]
    pub spans: Option<PathBuf>,

    /// Where to write the masked text (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Where to write the tag mapping
    #[arg(long, default_value = "mappings.json")]
    pub mappings: Option<PathBuf>,

    /// Write the full document result as JSON to this path
    #[arg(long)]
    pub json: Option<PathBuf>,
}

impl MaskArgs {
    /// Execute the mask command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        let text = read_input(self.input.as_deref(), self.text.as_deref())?;
        let source = build_source(&config, self.spans.as_deref())?;
        let pipeline = PiiPipeline::new(config.pipeline)?;

        let outcome = pipeline.mask_document(source.as_ref(), &text).await;
        let doc = match outcome {
            DocumentOutcome::Masked(doc) => doc,
            DocumentOutcome::Failed { error } => {
                eprintln!("Masking failed: {error}");
                return Ok(3);
            }
        };

        tracing::info!(
            entities = doc.entities.len(),
            elapsed_ms = doc.processing_time_ms,
            "document masked"
        );

        match &self.output {
            Some(path) => fs::write(path, &doc.masked)?,
            None => println!("{}", doc.masked),
        }

        if let Some(path) = &self.mappings {
            fs::write(path, serde_json::to_string_pretty(&doc.mappings)?)?;
        }

        if let Some(path) = &self.json {
            fs::write(path, serde_json::to_string_pretty(&doc)?)?;
        }

        if doc.has_entities() {
            eprintln!("Masked {} entities:", doc.entities.len());
            for (label, count) in &doc.stats_by_label {
                eprintln!("  {label}: {count}");
            }
        } else {
            eprintln!("No PII detected");
        }

        Ok(0)
    }
}
