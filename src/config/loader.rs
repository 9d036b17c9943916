//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::HkMaskConfig;
use crate::domain::errors::HkMaskError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into HkMaskConfig
/// 4. Applies environment variable overrides (HKMASK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
pub fn load_config(path: impl AsRef<Path>) -> Result<HkMaskConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(HkMaskError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        HkMaskError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Parses and validates a configuration from TOML text
pub fn load_config_str(contents: &str) -> Result<HkMaskConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: HkMaskConfig = toml::from_str(&contents)
        .map_err(|e| HkMaskError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        HkMaskError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(HkMaskError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the HKMASK_* prefix
///
/// Environment variables follow the pattern: HKMASK_<SECTION>_<KEY>
/// For example: HKMASK_LLM_ENDPOINT, HKMASK_NER_ENABLED
fn apply_env_overrides(config: &mut HkMaskConfig) -> Result<()> {
    if let Ok(val) = std::env::var("HKMASK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    config
        .pipeline
        .apply_env_overrides()
        .map_err(|e| HkMaskError::Configuration(e.to_string()))?;

    // NER overrides
    if let Ok(val) = std::env::var("HKMASK_NER_ENABLED") {
        config.ner.enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("HKMASK_NER_ENDPOINT") {
        config.ner.endpoint = val;
    }
    if let Ok(val) = std::env::var("HKMASK_NER_TIMEOUT_SECS") {
        if let Ok(secs) = val.parse() {
            config.ner.timeout_secs = secs;
        }
    }

    // LLM overrides
    if let Ok(val) = std::env::var("HKMASK_LLM_ENDPOINT") {
        config.llm.endpoint = val;
    }
    if let Ok(val) = std::env::var("HKMASK_LLM_MODEL") {
        config.llm.model = val;
    }
    if let Ok(val) = std::env::var("HKMASK_LLM_TEMPERATURE") {
        if let Ok(temp) = val.parse() {
            config.llm.temperature = temp;
        }
    }
    if let Ok(val) = std::env::var("HKMASK_LLM_TIMEOUT_SECS") {
        if let Ok(secs) = val.parse() {
            config.llm.timeout_secs = secs;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("HKMASK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("HKMASK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
