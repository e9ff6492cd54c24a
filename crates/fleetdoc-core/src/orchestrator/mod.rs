//! Fan-out of one operation across profiles and their instances.
//!
//! The full task set is built before dispatch starts. Every task then acquires the
//! run's [`ConcurrencyGate`], does its remote work, releases the slot and hands its
//! result to the [`ResultCollector`]. The run ends once every task has reported.

mod config;
pub use config::OrchestratorConfig;

mod job;
use job::{Job, Work, discover, spawn_isolated};

use std::{io::Write, sync::Arc};

use fleetdoc_model::{
    DocumentDefinition, InstanceMap, OperationKind, PlatformFilter, Profile, RunSummary,
    TargetInstance, Task, TaskFailure, TaskId, TaskResult,
};
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument};

use crate::{
    client::ClientProvider,
    collect::ResultCollector,
    dispatch::CommandQuery,
    error::{CoreError, ServiceError},
    gate::ConcurrencyGate,
    resolve::TargetResolver,
};

pub struct Orchestrator {
    gate: ConcurrencyGate,
    clients: Arc<dyn ClientProvider>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(
        config: OrchestratorConfig,
        clients: Arc<dyn ClientProvider>,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        let gate = ConcurrencyGate::new(config.concurrency_limit)?;
        Ok(Self {
            gate,
            clients,
            config,
        })
    }

    /// Create or update `document` in every profile (one task per profile entry).
    #[instrument(level = "info", skip_all, fields(document = %document.name, profiles = profiles.len()))]
    pub async fn publish_document<W: Write>(
        &self,
        profiles: &[Profile],
        document: DocumentDefinition,
        out: W,
    ) -> RunSummary {
        let kind = OperationKind::SyncDocument;
        let mut collector = ResultCollector::new(kind, out);

        let tasks = profiles
            .iter()
            .enumerate()
            .map(|(seq, profile)| Task::for_profile(TaskId::new(seq as u64), profile.clone(), kind))
            .collect();

        self.dispatch(tasks, Work::Sync(Arc::new(document)), &mut collector)
            .await;
        collector.finish()
    }

    /// Execute `document` on every target of every profile.
    ///
    /// Targets come from `instances` when the profile has a non-empty entry there,
    /// otherwise from live discovery narrowed by `filter`.
    #[instrument(level = "info", skip_all, fields(document = %document, profiles = profiles.len(), filter = ?filter))]
    pub async fn run_command<W: Write>(
        &self,
        profiles: &[Profile],
        document: &str,
        instances: Option<&InstanceMap>,
        filter: Option<PlatformFilter>,
        out: W,
    ) -> RunSummary {
        let kind = OperationKind::RunCommand;
        let mut collector = ResultCollector::new(kind, out);
        let resolver = TargetResolver::new(filter);

        self.fan_out(
            profiles,
            instances,
            resolver,
            kind,
            Work::Run(Arc::from(document)),
            &mut collector,
        )
        .await;
        collector.finish()
    }

    /// List recent invocations on every target of every profile.
    #[instrument(level = "info", skip_all, fields(profiles = profiles.len(), filter = ?filter))]
    pub async fn query_results<W: Write>(
        &self,
        profiles: &[Profile],
        instances: Option<&InstanceMap>,
        filter: Option<PlatformFilter>,
        out: W,
    ) -> RunSummary {
        let kind = OperationKind::QueryCommandResults;
        let mut collector = ResultCollector::new(kind, out);
        let resolver = TargetResolver::new(filter);
        let query = CommandQuery::new(self.config.max_results);

        self.fan_out(
            profiles,
            instances,
            resolver,
            kind,
            Work::Query(query),
            &mut collector,
        )
        .await;
        collector.finish()
    }

    async fn fan_out<W: Write>(
        &self,
        profiles: &[Profile],
        instances: Option<&InstanceMap>,
        resolver: TargetResolver,
        kind: OperationKind,
        work: Work,
        collector: &mut ResultCollector<W>,
    ) {
        let planned = self.plan_targets(profiles, instances, resolver).await;

        let mut seq = 0u64;
        let mut tasks = Vec::new();
        let mut unresolved = Vec::new();
        for (profile, targets) in planned {
            match targets {
                Ok(targets) => {
                    for target in targets {
                        tasks.push(Task::for_target(TaskId::new(seq), profile.clone(), target, kind));
                        seq += 1;
                    }
                }
                Err(e) => {
                    let task = Task::for_profile(TaskId::new(seq), profile, kind);
                    unresolved.push(TaskResult::failure(task, TaskFailure::remote(e.to_string())));
                    seq += 1;
                }
            }
        }

        for result in unresolved {
            collector.record(result);
        }
        self.dispatch(tasks, work, collector).await;
    }

    /// Target set of every profile, in profile order.
    ///
    /// Profiles with a static list are resolved immediately; the rest are discovered
    /// concurrently, each discovery holding a gate slot.
    async fn plan_targets(
        &self,
        profiles: &[Profile],
        instances: Option<&InstanceMap>,
        resolver: TargetResolver,
    ) -> Vec<(Profile, Result<Vec<TargetInstance>, ServiceError>)> {
        let mut planned: Vec<Option<Result<Vec<TargetInstance>, ServiceError>>> =
            profiles.iter().map(|_| None).collect();
        let mut set = JoinSet::new();

        for (idx, profile) in profiles.iter().enumerate() {
            let explicit = instances
                .map(|m| m.instances(profile))
                .unwrap_or_default();
            if let Some(targets) = resolver.explicit(explicit) {
                debug!(%profile, count = targets.len(), "static targets");
                planned[idx] = Some(Ok(targets));
                continue;
            }

            let fut = discover(
                self.gate.clone(),
                Arc::clone(&self.clients),
                profile.clone(),
                resolver,
            );
            spawn_isolated(
                &mut set,
                async move { (idx, fut.await) },
                move |e| {
                    (
                        idx,
                        Err(ServiceError::remote(
                            "list_instances",
                            format!("discovery aborted: {e}"),
                        )),
                    )
                },
            );
        }

        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((idx, targets)) => planned[idx] = Some(targets),
                Err(e) => error!(error = %e, "discovery wrapper failed"),
            }
        }

        profiles
            .iter()
            .cloned()
            .zip(planned)
            .map(|(profile, targets)| {
                let targets = targets.unwrap_or_else(|| {
                    Err(ServiceError::remote("list_instances", "discovery did not complete"))
                });
                (profile, targets)
            })
            .collect()
    }

    async fn dispatch<W: Write>(
        &self,
        tasks: Vec<Task>,
        work: Work,
        collector: &mut ResultCollector<W>,
    ) {
        let submitted = tasks.len();
        info!(tasks = submitted, limit = self.gate.limit(), "dispatching tasks");

        let mut set = JoinSet::new();
        for task in tasks {
            let fallback = task.clone();
            let job = Job {
                task,
                work: work.clone(),
                gate: self.gate.clone(),
                clients: Arc::clone(&self.clients),
            };
            spawn_isolated(&mut set, job.run(), move |e| {
                TaskResult::failure(fallback, TaskFailure::aborted(e.to_string()))
            });
        }

        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(result) => collector.record(result),
                Err(e) => error!(error = %e, "task wrapper failed"),
            }
        }
        debug!(submitted, completed = collector.completed(), "all tasks reported");
    }
}
