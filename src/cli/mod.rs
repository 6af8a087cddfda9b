//! CLI command definitions and parsing
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::dedup::{
    EditDistanceStrategy, ExactMatchStrategy, SetOverlapStrategy, Strategy, VectorSpaceStrategy,
};

#[derive(Parser, Debug)]
#[command(
    name = "dupfind",
    version,
    author = "neur0map",
    about = "Find duplicate and near-duplicate sentences",
    long_about = "dupfind reads sentences from stdin, one per line, and groups exact and near-duplicate \
                  entries using a configurable chain of comparison strategies: exact match, Levenshtein \
                  distance, Jaccard similarity and TF-IDF cosine similarity."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/dupfind/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze sentences read from stdin
    Analyze {
        /// Profile to apply from the configuration file
        #[arg(short, long)]
        profile: Option<String>,

        /// Run only these strategies, in this order, with default settings
        #[arg(short, long = "strategy", value_enum)]
        strategies: Vec<StrategyArg>,

        /// Run pairwise comparisons in parallel
        #[arg(long)]
        parallel: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Strategy selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Exact match (case-sensitive)
    Exact,
    /// Levenshtein edit distance
    Levenshtein,
    /// Jaccard word-set overlap
    Jaccard,
    /// TF-IDF cosine similarity
    Cosine,
}

impl StrategyArg {
    /// Strategy with its default parameters
    pub fn to_strategy(self) -> Strategy {
        match self {
            Self::Exact => ExactMatchStrategy::default().into(),
            Self::Levenshtein => EditDistanceStrategy::default().into(),
            Self::Jaccard => SetOverlapStrategy::default().into(),
            Self::Cosine => VectorSpaceStrategy::default().into(),
        }
    }
}

/// How analysis results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable group listing
    Text,
    /// Full outcome as JSON
    Json,
    /// Deduplicated sentences, one per line
    Filtered,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
