use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use easel_core::Scope;

/// Run one generation cascade from the command line
#[derive(Debug, Parser)]
#[command(name = "easel", version, about = "Fault-tolerant content generation with guaranteed fallback")]
pub struct Args {
    /// What to generate
    #[arg(long, value_enum, default_value_t = ScopeArg::Text)]
    pub scope: ScopeArg,

    /// Prompt describing the desired content
    #[arg(long)]
    pub prompt: String,

    /// Path to a TOML configuration file (defaults apply when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the result here; required for binary output
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Provider preference: `auto`, `none`, or a provider id
    #[arg(long)]
    pub preference: Option<String>,

    /// Per-attempt deadline override in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Artifact width in pixels (image scope)
    #[arg(long)]
    pub width: Option<u32>,

    /// Artifact height in pixels (image scope)
    #[arg(long)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    Text,
    Image,
}

impl From<ScopeArg> for Scope {
    fn from(value: ScopeArg) -> Self {
        match value {
            ScopeArg::Text => Self::Text,
            ScopeArg::Image => Self::Image,
        }
    }
}
