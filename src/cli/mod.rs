//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for hkmask using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// hkmask - Hong Kong PII masking tool
#[derive(Parser, Debug)]
#[command(name = "hkmask")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "hkmask.toml", env = "HKMASK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "HKMASK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect and mask PII in a document
    Mask(commands::mask::MaskArgs),

    /// Restore original values into a masked document
    Unmask(commands::unmask::UnmaskArgs),

    /// Mask, paraphrase through an LLM, then unmask
    Paraphrase(commands::paraphrase::ParaphraseArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
