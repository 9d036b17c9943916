//! Regex fallback for rigidly-formatted identifiers
//!
//! Runs after boundary expansion so it only fills genuine gaps the model
//! missed, never competing with already-expanded spans. The patterns use
//! lookaround guards, hence `fancy-regex` rather than the plain `regex`
//! engine.

use crate::domain::{EntityLabel, Span};
use crate::pipeline::normalize::in_forbidden_range;
use anyhow::{Context, Result};
use fancy_regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
struct PatternDefinition {
    /// Identifier for error messages
    name: String,
    /// Entity label the pattern produces
    label: String,
    /// The pattern itself
    regex: String,
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    #[serde(rename = "pattern")]
    patterns: Vec<PatternDefinition>,
}

/// Compiled pattern with its target label
#[derive(Debug)]
pub struct CompiledPattern {
    pub regex: Regex,
    pub label: EntityLabel,
}

/// Ordered registry of fallback patterns
///
/// Earlier patterns claim overlapping ranges first, so the file order of
/// the pattern library is part of the contract.
#[derive(Debug)]
pub struct FallbackRegistry {
    patterns: Vec<CompiledPattern>,
}

impl FallbackRegistry {
    /// Load a pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read pattern library: {}",
                path.as_ref().display()
            )
        })?;
        Self::from_toml(&content)
    }

    /// Parse a pattern registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary =
            toml::from_str(content).context("Failed to parse pattern library TOML")?;

        let mut patterns = Vec::with_capacity(library.patterns.len());
        for def in library.patterns {
            let label = def
                .label
                .parse::<EntityLabel>()
                .map_err(|e| anyhow::anyhow!("Invalid label in pattern '{}': {e}", def.name))?;
            let regex = Regex::new(&def.regex)
                .with_context(|| format!("Invalid regex in pattern '{}'", def.name))?;
            patterns.push(CompiledPattern { regex, label });
        }
        Ok(Self { patterns })
    }

    /// Built-in Hong Kong identifier patterns
    pub fn default_patterns() -> Result<Self> {
        let default_toml = include_str!("../../patterns/pii_patterns.toml");
        Self::from_toml(default_toml)
    }

    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }
}

/// Inject full-text regex matches not covered by any existing span
///
/// A match inside a forbidden URL range, or overlapping any span already
/// present, is skipped. Injected spans carry score 1.0: a fixed-format
/// match is treated as certain.
pub fn apply_regex_fallback(
    text: &str,
    registry: &FallbackRegistry,
    forbidden: &[(usize, usize)],
    mut spans: Vec<Span>,
) -> Vec<Span> {
    let mut occupied: Vec<(usize, usize)> = spans.iter().map(|s| (s.start, s.end)).collect();

    for pattern in registry.all_patterns() {
        for found in pattern.regex.find_iter(text) {
            let m = match found {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!(label = %pattern.label, error = %e, "fallback pattern scan aborted");
                    break;
                }
            };
            let (start, end) = (m.start(), m.end());
            if start >= end {
                continue;
            }
            if in_forbidden_range(forbidden, start, end) {
                continue;
            }
            if occupied
                .iter()
                .any(|&(o_start, o_end)| start.max(o_start) < end.min(o_end))
            {
                continue;
            }
            spans.push(Span::new(start, end, pattern.label, 1.0));
            occupied.push((start, end));
        }
    }
    spans
}
