//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use lumen_core::{AnalyzerBackend, PipelineMode};

/// Command-line interface for the prompt-optimization pipeline.
#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "Prompt optimizer: score, disambiguate, decompose, rewrite", long_about = None)]
pub struct Cli {
    /// The request to optimize.
    #[arg(help = "The user request to optimize")]
    pub request: String,

    /// Prior conversation context, attached when the request depends on it.
    #[arg(short, long, help = "Prior conversation context")]
    pub context: Option<String>,

    /// Pipeline operating mode; falls back to the config file when omitted.
    #[arg(long, value_enum, help = "Pipeline mode (overrides config)")]
    pub mode: Option<ModeArg>,

    /// Analyzer backend family; falls back to the config file when omitted.
    #[arg(long, value_enum, help = "Analyzer backend (overrides config)")]
    pub backend: Option<BackendArg>,

    /// Configuration file path.
    #[arg(long, default_value = "lumen.toml", help = "Configuration file")]
    pub config: PathBuf,

    /// Feed the optimized prompt back to the model and print its answer.
    #[arg(long, help = "Generate a final answer from the optimized prompt")]
    pub answer: bool,
}

/// Pipeline mode flag values.
#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Reject unclear or ambiguous requests with a clarification message.
    Strict,
    /// Never reject; rewrite aggressively and always produce output.
    AlwaysAnswer,
}

impl From<ModeArg> for PipelineMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Strict => Self::Strict,
            ModeArg::AlwaysAnswer => Self::AlwaysAnswer,
        }
    }
}

/// Analyzer backend flag values.
#[derive(Clone, Copy, ValueEnum)]
pub enum BackendArg {
    /// Keyword heuristics, no external calls.
    Rules,
    /// Every analyzer delegates to the external model.
    Llm,
}

impl From<BackendArg> for AnalyzerBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Rules => Self::Rules,
            BackendArg::Llm => Self::Llm,
        }
    }
}
