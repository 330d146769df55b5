use crate::core::EntityKind;
use crate::formatting::ColorMode;
use crate::io::OutputFormat;
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lobbymap")]
#[command(
    about = "Influence scoring, similar-entity ranking and surge classification for lobbying disclosure data",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the nearest .lobbymap.toml)
    #[arg(long, global = true, env = "LOBBYMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    /// -v: Show score breakdowns and info logs
    /// -vv: Debug logs (degenerate input handling)
    /// -vvv: Trace logs
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Color output: auto, always, never
    #[arg(long, global = true, default_value = "auto", value_parser = parse_color_mode)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score and rank entities by influence
    Score(ScoreArgs),

    /// List the most similar entities for one or more targets
    Similar(SimilarArgs),

    /// Classify period-over-period change into momentum buckets
    Surge(SurgeArgs),

    /// Write the default configuration to .lobbymap.toml
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Check the configuration and report every problem found
    ValidateConfig,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show only the top N rows (the computation is not truncated)
    #[arg(long = "top", visible_alias = "head")]
    pub top: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Dataset directory (clients.json, firms.json, ...)
    pub data: PathBuf,

    /// Entity kind to score; ignored when --scheme names a scheme
    #[arg(short, long, default_value = "client")]
    pub kind: EntityKind,

    /// Scoring scheme name from the configuration
    #[arg(long)]
    pub scheme: Option<String>,

    /// Override the scheme's cohort size
    #[arg(long)]
    pub cohort: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("targets").required(true).args(["entity", "all"])))]
pub struct SimilarArgs {
    /// Dataset directory (clients.json, firms.json, ...)
    pub data: PathBuf,

    /// Entity kind to compare
    #[arg(short, long, default_value = "client")]
    pub kind: EntityKind,

    /// Target entity id (repeatable)
    #[arg(short, long)]
    pub entity: Vec<String>,

    /// Compute the list for every entity in the dataset
    #[arg(long)]
    pub all: bool,

    /// List length (defaults to similarity.top_k)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct SurgeArgs {
    /// Period-pair JSON file, or a dataset directory
    pub input: PathBuf,

    /// Threshold context from the configuration
    #[arg(short, long, default_value = "issue_momentum")]
    pub context: String,

    /// Dataset key when INPUT is a directory (defaults to the context name)
    #[arg(long)]
    pub dataset: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

fn parse_color_mode(s: &str) -> Result<ColorMode, String> {
    ColorMode::parse(s).ok_or_else(|| format!("invalid color mode '{}': use auto, always or never", s))
}
