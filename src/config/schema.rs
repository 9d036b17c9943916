//! Configuration schema types
//!
//! Root structure mapping to the hkmask.toml file.

use crate::pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use url::Url;

/// Main hkmask configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HkMaskConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Span-resolution pipeline tunables
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Remote NER service configuration
    #[serde(default)]
    pub ner: NerConfig,

    /// LLM paraphrase configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HkMaskConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.pipeline.validate().map_err(|e| e.to_string())?;
        self.ner.validate()?;
        self.llm.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Remote NER service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NerConfig {
    /// Call the remote NER endpoint when no span file is supplied
    #[serde(default)]
    pub enabled: bool,

    /// NER service endpoint URL
    #[serde(default = "default_ner_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_ner_timeout_secs")]
    pub timeout_secs: u64,
}

impl NerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled {
            Url::parse(&self.endpoint)
                .map_err(|e| format!("Invalid ner.endpoint '{}': {}", self.endpoint, e))?;
            if self.timeout_secs == 0 {
                return Err("ner.timeout_secs must be > 0".to_string());
            }
        }
        Ok(())
    }
}

impl Default for NerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_ner_endpoint(),
            timeout_secs: default_ner_timeout_secs(),
        }
    }
}

/// LLM paraphrase configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Chat completion endpoint URL
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_llm_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds. Local models take minutes per document.
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,

    /// System prompt sent with every request
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// User message template; {text} is replaced with the masked document
    #[serde(default = "default_user_template")]
    pub user_template: String,
}

impl LlmConfig {
    fn validate(&self) -> Result<(), String> {
        Url::parse(&self.endpoint)
            .map_err(|e| format!("Invalid llm.endpoint '{}': {}", self.endpoint, e))?;
        if self.model.is_empty() {
            return Err("llm.model cannot be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "llm.temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        if self.timeout_secs == 0 {
            return Err("llm.timeout_secs must be > 0".to_string());
        }
        if !self.user_template.contains("{text}") {
            return Err("llm.user_template must contain the {text} placeholder".to_string());
        }
        Ok(())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            temperature: default_llm_temperature(),
            timeout_secs: default_llm_timeout_secs(),
            system_prompt: default_system_prompt(),
            user_template: default_user_template(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily or hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_ner_endpoint() -> String {
    "http://localhost:8000/ner".to_string()
}

fn default_ner_timeout_secs() -> u64 {
    60
}

fn default_llm_endpoint() -> String {
    "http://localhost:11434/api/chat".to_string()
}

fn default_llm_model() -> String {
    "qwen3:8b".to_string()
}

fn default_llm_temperature() -> f32 {
    0.2
}

fn default_llm_timeout_secs() -> u64 {
    300
}

fn default_system_prompt() -> String {
    "You are a text rewriting assistant. Rewrite the user's text in natural, \
     fluent language while preserving its meaning. The text contains bracketed \
     placeholder tags such as [NAME-1] or [PHONE-2]. You MUST copy every tag \
     into your answer exactly as written, including the brackets. Never invent, \
     drop, split or renumber a tag. Reply with the rewritten text only."
        .to_string()
}

fn default_user_template() -> String {
    "Rewrite the following text:\n\n{text}".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
