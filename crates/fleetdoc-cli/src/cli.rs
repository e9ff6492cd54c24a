use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fleetdoc_core::MAX_RESULTS_LIMIT;
use fleetdoc_model::PlatformFilter;

/// Publish and execute command documents across many AWS accounts.
#[derive(Parser, Debug)]
#[command(name = "fleetdoc", version)]
pub struct Cli {
    /// Maximum number of remote operations in flight for the whole run
    #[arg(
        short = 'S',
        long = "concurrency",
        env = "FLEETDOC_CONCURRENCY",
        default_value_t = 10,
        global = true
    )]
    pub concurrency: usize,

    /// Log filter directive (e.g. `info`, `fleetdoc_core=debug`)
    #[arg(long, env = "FLEETDOC_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format: text, json or journald
    #[arg(long, env = "FLEETDOC_LOG_FORMAT", default_value = "text", global = true)]
    pub log_format: String,

    /// Region used for every profile instead of the profile's own
    #[arg(long, env = "AWS_REGION", global = true)]
    pub region: Option<String>,

    /// Exit with status 2 when any task fails
    #[arg(long, global = true)]
    pub fail_on_error: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create or update a command document in every profile
    Publish(PublishArgs),
    /// Execute a document on instances of every profile
    Run(RunArgs),
    /// List recent command invocations on instances of every profile
    Results(ResultsArgs),
}

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Profiles file, one profile per line
    #[arg(short = 'p', long)]
    pub profiles: PathBuf,

    /// JSON file with the document content
    #[arg(short = 'd', long)]
    pub document: PathBuf,

    /// Name of the document to publish
    #[arg(short = 'D', long = "document-name", visible_alias = "document_name")]
    pub document_name: String,

    /// Platform the document is written for (informational)
    #[arg(short = 'o', long = "os")]
    pub os: Option<PlatformFilter>,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Profiles file, one profile per line
    #[arg(short = 'p', long)]
    pub profiles: PathBuf,

    /// Name of the document to execute
    #[arg(short = 'D', long = "document-name", visible_alias = "document_name")]
    pub document_name: String,

    /// JSON file mapping profile to instance ids; unlisted profiles are discovered
    #[arg(short = 'i', long = "instances", visible_alias = "instances_json")]
    pub instances: Option<PathBuf>,

    /// Only run on discovered instances of this platform (win|lin)
    #[arg(short = 'o', long = "os")]
    pub os: Option<PlatformFilter>,
}

#[derive(Args, Debug)]
pub struct ResultsArgs {
    /// Profiles file, one profile per line
    #[arg(short = 'p', long)]
    pub profiles: PathBuf,

    /// JSON file mapping profile to instance ids; unlisted profiles are discovered
    #[arg(short = 'i', long = "instances")]
    pub instances: Option<PathBuf>,

    /// Only query discovered instances of this platform (win|lin)
    #[arg(short = 'o', long = "os")]
    pub os: Option<PlatformFilter>,

    /// Number of recent commands listed per instance (1-50)
    #[arg(
        short = 'n',
        long,
        default_value_t = 5,
        value_parser = clap::value_parser!(u32).range(1..=MAX_RESULTS_LIMIT as i64)
    )]
    pub max_results: u32,
}
