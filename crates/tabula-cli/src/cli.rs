//! CLI argument definitions for tabula.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tabula",
    version,
    about = "Profile tabular datasets and generate insights",
    long_about = "Profile CSV datasets: column types, descriptive statistics and\n\
                  Pearson correlations, with rule-based insights enhanced by a\n\
                  language-model provider when one is configured."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Configuration file (default: platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory for stored analyses (overrides the config file).
    #[arg(long = "store-dir", value_name = "DIR", global = true)]
    pub store_dir: Option<PathBuf>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow dataset values and prompts to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a CSV file and store the result.
    Analyze(AnalyzeArgs),

    /// Show the latest stored analysis for a dataset.
    Show(ShowArgs),

    /// Re-run insight enhancement for a stored analysis.
    Enhance(EnhanceArgs),
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to the CSV file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Dataset identifier (default: the file stem).
    #[arg(long = "dataset-id", value_name = "ID")]
    pub dataset_id: Option<String>,

    /// Human-readable dataset name used in the provider prompt.
    #[arg(long = "dataset-name", value_name = "NAME")]
    pub dataset_name: Option<String>,

    /// Owner recorded with the analysis.
    #[arg(long = "user", value_name = "ID", default_value = "local")]
    pub user_id: String,

    /// Keep the rule-based insights and skip the provider.
    #[arg(long = "no-enhance")]
    pub no_enhance: bool,

    /// Print the result as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Dataset identifier.
    #[arg(value_name = "DATASET_ID")]
    pub dataset_id: String,

    /// Print the stored record as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct EnhanceArgs {
    /// Analysis identifier.
    #[arg(value_name = "ANALYSIS_ID")]
    pub analysis_id: String,

    /// Print the outcome as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_defaults() {
        let cli = Cli::parse_from(["tabula", "analyze", "sales.csv"]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.file, PathBuf::from("sales.csv"));
        assert_eq!(args.user_id, "local");
        assert!(args.dataset_id.is_none());
        assert!(!args.no_enhance);
        assert!(!cli.log_data);
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from([
            "tabula",
            "show",
            "sales",
            "--store-dir",
            "/tmp/analyses",
            "--log-data",
        ]);
        assert_eq!(cli.store_dir, Some(PathBuf::from("/tmp/analyses")));
        assert!(cli.log_data);
    }
}
