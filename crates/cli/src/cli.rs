//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Project used by the trigger path when none is configured
pub const DEFAULT_PROJECT_ID: &str = "openshift-gce-devel";

/// Dataset used by the trigger path when none is configured
pub const DEFAULT_DATASET_ID: &str = "ci_operator_metrics";

/// CI Metrics Loader - load ci-operator metrics documents into BigQuery
#[derive(Parser, Debug)]
#[command(
    name = "ci-metrics-loader",
    author,
    version,
    about = "Load ci-operator metrics documents into BigQuery",
    long_about = "Reads a ci-operator-metrics.json document from GCS, splits it into \n\
                  its record categories and writes each category to its own BigQuery \n\
                  table, or to newline-delimited JSON files with --export."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "CI_METRICS_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "CI_METRICS_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load one metrics document into BigQuery or export it to files
    Load(LoadArgs),

    /// Handle an object-finalized storage event
    Trigger(TriggerArgs),

    /// Display per-category record counts of a metrics document
    Info(InfoArgs),
}

/// Options shared by every command that reads a document
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "CI_METRICS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Read objects from `<DIR>/<bucket>/<object>` instead of GCS
    #[arg(long, value_name = "DIR", env = "CI_METRICS_SOURCE_ROOT")]
    pub source_root: Option<PathBuf>,

    /// OAuth access token for GCS and BigQuery
    #[arg(long, env = "GOOGLE_OAUTH_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,
}

/// Arguments for the `load` command
#[derive(Parser, Debug, Clone)]
pub struct LoadArgs {
    /// GCS path of the metrics document (gs://bucket/path/to/ci-operator-metrics.json)
    #[arg(long, env = "CI_METRICS_GCS_PATH")]
    pub gcs_path: String,

    /// Google Cloud project ID
    #[arg(long, env = "GOOGLE_PROJECT_ID")]
    pub google_project_id: Option<String>,

    /// BigQuery dataset name
    #[arg(long, env = "BIGQUERY_DATASET")]
    pub bigquery_dataset: Option<String>,

    /// Write `<destination>.json` files into DIR instead of loading BigQuery
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the `trigger` command
#[derive(Parser, Debug, Clone)]
pub struct TriggerArgs {
    /// Storage event JSON file, `-` for stdin
    #[arg(long, value_name = "FILE")]
    pub event: PathBuf,

    /// Google Cloud project ID
    #[arg(long, env = "GOOGLE_PROJECT_ID")]
    pub google_project_id: Option<String>,

    /// BigQuery dataset name
    #[arg(long, env = "BIGQUERY_DATASET")]
    pub bigquery_dataset: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
#[command(group = clap::ArgGroup::new("document").required(true).args(["input", "gcs_path"]))]
pub struct InfoArgs {
    /// Local metrics document
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// GCS path of the metrics document
    #[arg(long)]
    pub gcs_path: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
