mod cli;
mod error;
mod input;
mod run;

use std::process::ExitCode;

use clap::Parser;
use fleetdoc_observe::{LoggerConfig, LoggerFormat, logger_init};
use tracing::warn;

use crate::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let format: LoggerFormat = cli.log_format.parse()?;
    let cfg = LoggerConfig::default()
        .with_level(cli.log_level.clone())
        .with_format(format);
    logger_init(&cfg)?;

    let summary = run::execute(&cli).await?;
    if cli.fail_on_error && summary.has_failures() {
        warn!(failed = summary.failed(), "run finished with failed tasks");
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}
