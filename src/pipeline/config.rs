//! Pipeline configuration
//!
//! Every tunable the stages consult lives here as one immutable value
//! passed into the pipeline, instead of module-level constants. The
//! recognized fields are a closed set: threshold, per-label merge gaps,
//! per-label priorities, vocabulary lists and the fallback pattern
//! library path.

use crate::domain::EntityLabel;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration for one pipeline instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Spans with score <= threshold are dropped
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,

    /// Label-specific maximum merge gaps, in bytes of safe filler
    #[serde(default = "default_merge_gaps")]
    pub merge_gaps: HashMap<EntityLabel, usize>,

    /// Merge gap for labels without an explicit entry
    #[serde(default = "default_merge_gap")]
    pub default_merge_gap: usize,

    /// Overlap-resolution priority tiers; higher wins
    #[serde(default = "default_priorities")]
    pub priorities: HashMap<EntityLabel, u8>,

    /// Suffix vocabulary whose adjacency reclassifies a span as ADDRESS
    #[serde(default = "default_infra_suffixes")]
    pub infra_suffixes: Vec<String>,

    /// Keywords marking an age context around a numeral
    #[serde(default = "default_age_keywords")]
    pub age_keywords: Vec<String>,

    /// Lookback window (in characters) for age-context detection
    #[serde(default = "default_age_lookback")]
    pub age_lookback_chars: usize,

    /// Cantonese particles that a one-character NAME span may collide with
    #[serde(default = "default_particles")]
    pub cantonese_particles: Vec<char>,

    /// Verb-like characters that precede a particle, not a name
    #[serde(default = "default_verb_endings")]
    pub verb_endings: Vec<char>,

    /// Optional TOML pattern library overriding the built-in fallback set
    pub pattern_library: Option<PathBuf>,
}

fn default_confidence_threshold() -> f32 {
    0.30
}

fn default_merge_gaps() -> HashMap<EntityLabel, usize> {
    HashMap::from([
        (EntityLabel::Org, 1),
        (EntityLabel::Address, 1),
        (EntityLabel::Name, 1),
        (EntityLabel::Id, 1),
        (EntityLabel::Phone, 2),
        (EntityLabel::Account, 2),
    ])
}

fn default_merge_gap() -> usize {
    2
}

fn default_priorities() -> HashMap<EntityLabel, u8> {
    HashMap::from([
        (EntityLabel::LicensePlate, 5),
        (EntityLabel::Id, 5),
        (EntityLabel::Email, 5),
        (EntityLabel::Phone, 4),
        (EntityLabel::Name, 3),
        (EntityLabel::Org, 2),
        (EntityLabel::Address, 2),
        (EntityLabel::Account, 1),
    ])
}

fn default_infra_suffixes() -> Vec<String> {
    [
        "高鐵",
        "鐵路",
        "大橋",
        "隧道",
        "幹線",
        "公路",
        "通道",
        "線",
        "站",
        "High Speed Rail",
        "Bridge",
        "Tunnel",
        "Line",
        "Station",
        "Rail",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_age_keywords() -> Vec<String> {
    ["歲", "years", "yrs", "age", "old", "今年", "年紀", "at"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_age_lookback() -> usize {
    20
}

fn default_particles() -> Vec<char> {
    vec!['黎', '嚟', '巨', '咗', '度']
}

fn default_verb_endings() -> Vec<char> {
    vec!['過', '打', '返', '嚟', '去', '左']
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            merge_gaps: default_merge_gaps(),
            default_merge_gap: default_merge_gap(),
            priorities: default_priorities(),
            infra_suffixes: default_infra_suffixes(),
            age_keywords: default_age_keywords(),
            age_lookback_chars: default_age_lookback(),
            cantonese_particles: default_particles(),
            verb_endings: default_verb_endings(),
            pattern_library: None,
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            anyhow::bail!(
                "confidence_threshold must be in [0, 1], got {}",
                self.confidence_threshold
            );
        }
        if self.age_lookback_chars == 0 {
            anyhow::bail!("age_lookback_chars must be non-zero");
        }
        if self.infra_suffixes.iter().any(|s| s.is_empty()) {
            anyhow::bail!("infra_suffixes must not contain empty entries");
        }
        if self.age_keywords.iter().any(|s| s.is_empty()) {
            anyhow::bail!("age_keywords must not contain empty entries");
        }
        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                anyhow::bail!("Pattern library file not found: {}", path.display());
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                anyhow::bail!("Pattern library must be a TOML file: {}", path.display());
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("HKMASK_CONFIDENCE_THRESHOLD") {
            self.confidence_threshold = val
                .parse()
                .context("Invalid HKMASK_CONFIDENCE_THRESHOLD value")?;
        }
        if let Ok(val) = std::env::var("HKMASK_PATTERN_LIBRARY") {
            self.pattern_library = Some(PathBuf::from(val));
        }
        Ok(())
    }

    /// Maximum merge gap for a label
    pub fn merge_gap(&self, label: EntityLabel) -> usize {
        self.merge_gaps
            .get(&label)
            .copied()
            .unwrap_or(self.default_merge_gap)
    }

    /// Overlap-resolution priority tier for a label
    pub fn priority(&self, label: EntityLabel) -> u8 {
        self.priorities.get(&label).copied().unwrap_or(0)
    }
}
