//! Wiring of one CLI invocation onto the orchestrator.

use std::{io, sync::Arc};

use anyhow::Context;
use fleetdoc_aws::AwsClientProvider;
use fleetdoc_core::{Orchestrator, OrchestratorConfig};
use fleetdoc_model::{InstanceMap, RunSummary};
use tracing::info;

use crate::{
    cli::{Cli, Command},
    input,
};

/// Load every input artifact, then run the selected operation with the report on stdout.
pub async fn execute(cli: &Cli) -> anyhow::Result<RunSummary> {
    let mut config = OrchestratorConfig::default().with_concurrency_limit(cli.concurrency);
    if let Command::Results(args) = &cli.command {
        config = config.with_max_results(args.max_results);
    }

    let mut provider = AwsClientProvider::new();
    if let Some(region) = &cli.region {
        provider = provider.with_region(region);
    }

    match &cli.command {
        Command::Publish(args) => {
            let profiles = input::read_profiles(&args.profiles)?;
            let document = input::read_document(&args.document, &args.document_name)?;
            if let Some(os) = args.os {
                info!(platform = %os, "document platform hint");
            }

            let orchestrator = orchestrator(config, provider)?;
            Ok(orchestrator
                .publish_document(&profiles, document, io::stdout())
                .await)
        }
        Command::Run(args) => {
            let profiles = input::read_profiles(&args.profiles)?;
            let instances = args
                .instances
                .as_deref()
                .map(input::read_instance_map)
                .transpose()?;

            let orchestrator = orchestrator(config, provider)?;
            Ok(orchestrator
                .run_command(
                    &profiles,
                    &args.document_name,
                    instances.as_ref(),
                    args.os,
                    io::stdout(),
                )
                .await)
        }
        Command::Results(args) => {
            let profiles = input::read_profiles(&args.profiles)?;
            let instances: Option<InstanceMap> = args
                .instances
                .as_deref()
                .map(input::read_instance_map)
                .transpose()?;

            let orchestrator = orchestrator(config, provider)?;
            Ok(orchestrator
                .query_results(&profiles, instances.as_ref(), args.os, io::stdout())
                .await)
        }
    }
}

fn orchestrator(
    config: OrchestratorConfig,
    provider: AwsClientProvider,
) -> anyhow::Result<Orchestrator> {
    Orchestrator::new(config, Arc::new(provider)).context("invalid run configuration")
}
