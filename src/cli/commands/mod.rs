//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod init;
pub mod mask;
pub mod paraphrase;
pub mod unmask;
pub mod validate;

use crate::adapters::source::{EmptySource, FileSource, RemoteNerSource, SpanSource};
use crate::config::HkMaskConfig;
use std::path::Path;

/// Choose the span source for a masking run
///
/// A span file on the command line wins. Otherwise the remote NER
/// service is used when configured, and with neither the pipeline runs
/// on its regex fallback alone.
pub(crate) fn build_source(
    config: &HkMaskConfig,
    spans_file: Option<&Path>,
) -> anyhow::Result<Box<dyn SpanSource>> {
    match spans_file {
        Some(path) => Ok(Box::new(FileSource::new(path))),
        None if config.ner.enabled => {
            let source = RemoteNerSource::new(&config.ner.endpoint, config.ner.timeout_secs)?;
            Ok(Box::new(source))
        }
        None => {
            tracing::info!("no span source configured, running regex fallback only");
            Ok(Box::new(EmptySource))
        }
    }
}

/// Read input text from a file argument or an inline --text flag
pub(crate) fn read_input(input: Option<&Path>, text: Option<&str>) -> anyhow::Result<String> {
    match (input, text) {
        (Some(path), None) => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read input file {}: {e}", path.display())),
        (None, Some(text)) => Ok(text.to_string()),
        _ => anyhow::bail!("provide exactly one of an input file or --text"),
    }
}
