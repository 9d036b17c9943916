//! Paraphrase command implementation
//!
//! The full privacy-preserving rewrite flow: mask the document, send the
//! masked text to a local LLM for rewriting, then restore the original
//! PII values into the rewritten text. The LLM never sees real PII.
//!
//! Intermediate artifacts (masked input, raw LLM response, mapping) are
//! written alongside the final output so a bad rewrite can be inspected
//! and re-run without repeating earlier steps.

use super::{build_source, read_input};
use crate::adapters::llm::{LlmClient, OllamaClient};
use crate::config::load_config;
use crate::domain::DocumentOutcome;
use crate::pipeline::{unmask_text, PiiPipeline};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the paraphrase command
#[derive(Args, Debug)]
pub struct ParaphraseArgs {
    /// Input text file
    pub input: Option<PathBuf>,

    /// Inline input text instead of a file
    #[arg(long, conflicts_with = "input")]
    pub text: Option<String>,

    /// JSON file of pre-computed candidate spans
    #[arg(long)]
    pub spans: Option<PathBuf>,

    /// Directory for the final output and intermediate artifacts
    #[arg(short, long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Exit with an error when the LLM loses or duplicates a tag
    #[arg(long)]
    pub strict: bool,
}

impl ParaphraseArgs {
    /// Execute the paraphrase command
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
        let pipeline = PiiPipeline::new(config.pipeline.clone())?;

        fs::create_dir_all(&self.output_dir)?;

        // Step 1: mask
        let doc = match pipeline.mask_document(source.as_ref(), &text).await {
            DocumentOutcome::Masked(doc) => doc,
            DocumentOutcome::Failed { error } => {
                eprintln!("Masking failed: {error}");
                return Ok(3);
            }
        };

        fs::write(self.output_dir.join("masked_input.txt"), &doc.masked)?;
        fs::write(
            self.output_dir.join("mappings.json"),
            serde_json::to_string_pretty(&doc.mappings)?,
        )?;
        tracing::info!(entities = doc.entities.len(), "mask step complete");

        // Step 2: paraphrase the masked text
        let llm = OllamaClient::new(&config.llm)?;
        let rewritten = match llm.paraphrase(&doc.masked).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(client = llm.name(), error = %e, "paraphrase failed");
                eprintln!("Paraphrase failed: {e}");
                return Ok(3);
            }
        };

        fs::write(self.output_dir.join("ai_response.txt"), &rewritten)?;
        tracing::info!(chars = rewritten.chars().count(), "paraphrase step complete");

        // Step 3: unmask into the rewritten text
        let (restored, audit) = unmask_text(&rewritten, &doc.mappings);

        if !audit.missing.is_empty() {
            eprintln!("Warning: LLM dropped tags: {:?}", audit.missing);
        }
        if !audit.duplicated.is_empty() {
            eprintln!("Warning: LLM duplicated tags: {:?}", audit.duplicated);
        }

        let final_path = self.output_dir.join("final_output.txt");
        fs::write(&final_path, &restored)?;

        println!("{restored}");
        eprintln!("Final output written to {}", final_path.display());

        if self.strict && !audit.is_clean() {
            eprintln!("Tag audit failed in strict mode");
            return Ok(2);
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ParaphraseArgs,
    }

    #[test]
    fn test_paraphrase_args_defaults() {
        let cli = TestCli::parse_from(["test", "input.txt"]);
        assert_eq!(cli.args.input, Some(PathBuf::from("input.txt")));
        assert_eq!(cli.args.output_dir, PathBuf::from("output"));
        assert!(!cli.args.strict);
    }
}
