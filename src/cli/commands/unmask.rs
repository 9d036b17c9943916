//! Unmask command implementation
//!
//! Restores original values into a masked (possibly paraphrased)
//! document using a saved tag mapping, and reports any tags the
//! downstream processor lost or duplicated.

use crate::domain::TagMap;
use crate::pipeline::unmask_text;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the unmask command
#[derive(Args, Debug)]
pub struct UnmaskArgs {
    /// Masked text file
    pub input: PathBuf,

    /// Tag mapping file produced by the mask step
    #[arg(long, default_value = "mappings.json")]
    pub mappings: PathBuf,

    /// Where to write the restored text (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit with an error when any tag is missing or duplicated
    #[arg(long)]
    pub strict: bool,
}

impl UnmaskArgs {
    /// Execute the unmask command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let text = fs::read_to_string(&self.input).map_err(|e| {
            anyhow::anyhow!("failed to read input file {}: {e}", self.input.display())
        })?;

        let mappings_json = fs::read_to_string(&self.mappings).map_err(|e| {
            anyhow::anyhow!(
                "failed to read mappings file {}: {e}",
                self.mappings.display()
            )
        })?;
        let mappings: TagMap = serde_json::from_str(&mappings_json)?;

        let (restored, audit) = unmask_text(&text, &mappings);

        tracing::info!(
            expected = audit.expected,
            found = audit.found,
            "document unmasked"
        );

        if !audit.missing.is_empty() {
            eprintln!("Warning: tags missing from the text: {:?}", audit.missing);
        }
        if !audit.duplicated.is_empty() {
            eprintln!(
                "Warning: tags duplicated in the text: {:?}",
                audit.duplicated
            );
        }

        match &self.output {
            Some(path) => fs::write(path, &restored)?,
            None => println!("{restored}"),
        }

        if self.strict && !audit.is_clean() {
            eprintln!("Tag audit failed in strict mode");
            return Ok(2);
        }

        Ok(0)
    }
}
