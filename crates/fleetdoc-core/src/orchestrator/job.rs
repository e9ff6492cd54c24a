use std::{future::Future, sync::Arc};

use fleetdoc_model::{
    DocumentDefinition, Profile, TargetInstance, Task, TaskFailure, TaskResult, TaskSuccess,
};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, instrument};

use crate::{
    client::ClientProvider,
    dispatch::{CommandDispatcher, CommandQuery},
    error::ServiceError,
    gate::ConcurrencyGate,
    resolve::{DocumentResolver, TargetResolver},
};

/// Operation-specific input shared by every task of a run.
#[derive(Debug, Clone)]
pub(crate) enum Work {
    Sync(Arc<DocumentDefinition>),
    Run(Arc<str>),
    Query(CommandQuery),
}

/// One task together with everything it needs to execute on its own.
pub(crate) struct Job {
    pub task: Task,
    pub work: Work,
    pub gate: ConcurrencyGate,
    pub clients: Arc<dyn ClientProvider>,
}

impl Job {
    pub async fn run(self) -> TaskResult {
        let outcome = self.execute().await;
        match outcome {
            Ok(success) => TaskResult::success(self.task, success),
            Err(failure) => TaskResult::failure(self.task, failure),
        }
    }

    #[instrument(level = "debug", skip(self), fields(task = %self.task.id, profile = %self.task.profile, kind = %self.task.kind))]
    async fn execute(&self) -> Result<TaskSuccess, TaskFailure> {
        let _slot = self
            .gate
            .acquire()
            .await
            .map_err(|e| TaskFailure::aborted(e.to_string()))?;
        debug!("slot acquired");

        let client = self.clients.client(&self.task.profile).await.map_err(remote)?;
        let client = client.as_ref();

        match (&self.work, &self.task.target) {
            (Work::Sync(document), _) => DocumentResolver::new()
                .resolve(client, document)
                .await
                .map_err(remote),
            (Work::Run(document), Some(target)) => CommandDispatcher::new()
                .dispatch(client, target, document)
                .await
                .map(|command_id| TaskSuccess::CommandSent { command_id })
                .map_err(remote),
            (Work::Query(query), Some(target)) => query
                .recent(client, target)
                .await
                .map(|commands| TaskSuccess::CommandResults { commands })
                .map_err(remote),
            (_, None) => Err(TaskFailure::aborted(format!(
                "{} task has no target instance",
                self.task.kind
            ))),
        }
    }
}

/// Live discovery for one profile, holding a gate slot like any other remote work.
#[instrument(level = "debug", skip(gate, clients, profile, resolver), fields(profile = %profile))]
pub(crate) async fn discover(
    gate: ConcurrencyGate,
    clients: Arc<dyn ClientProvider>,
    profile: Profile,
    resolver: TargetResolver,
) -> Result<Vec<TargetInstance>, ServiceError> {
    let _slot = gate
        .acquire()
        .await
        .map_err(|e| ServiceError::remote("list_instances", e.to_string()))?;
    let client = clients.client(&profile).await?;
    resolver.discover(client.as_ref()).await
}

/// Spawn `fut` so that a panic inside it still yields a value for the set.
///
/// The work runs in its own tokio task; a thin wrapper in `set` awaits it and
/// turns a [`JoinError`] into `on_abort(err)`.
pub(crate) fn spawn_isolated<T, F, A>(set: &mut JoinSet<T>, fut: F, on_abort: A)
where
    T: Send + 'static,
    F: Future<Output = T> + Send + 'static,
    A: FnOnce(JoinError) -> T + Send + 'static,
{
    let inner = tokio::spawn(fut);
    set.spawn(async move {
        match inner.await {
            Ok(value) => value,
            Err(e) => on_abort(e),
        }
    });
}

fn remote(e: ServiceError) -> TaskFailure {
    TaskFailure::remote(e.to_string())
}
