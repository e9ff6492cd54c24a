use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CommandId, CommandSummary, DocumentName, Task};

/// Success payload of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum TaskSuccess {
    /// The document did not exist and was created.
    Created { document: DocumentName },
    /// The document existed and its latest version was updated.
    Updated { document: DocumentName },
    /// The document was sent for execution.
    CommandSent { command_id: CommandId },
    /// Recent invocations on the instance, newest first as returned by the service.
    CommandResults { commands: Vec<CommandSummary> },
}

/// Classification of a task failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// Any error returned by the remote service (including session setup).
    RemoteOperationFailed,
    /// The task body panicked; the run carries on without it.
    Aborted,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::RemoteOperationFailed => "remote operation failed",
            FailureKind::Aborted => "aborted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl TaskFailure {
    pub fn remote(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::RemoteOperationFailed,
            message: message.into(),
        }
    }

    pub fn aborted(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Aborted,
            message: message.into(),
        }
    }
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskOutcome {
    Success(TaskSuccess),
    Failure(TaskFailure),
}

/// Terminal outcome of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    pub task: Task,
    pub outcome: TaskOutcome,
}

impl TaskResult {
    pub fn success(task: Task, success: TaskSuccess) -> Self {
        Self {
            task,
            outcome: TaskOutcome::Success(success),
        }
    }

    pub fn failure(task: Task, failure: TaskFailure) -> Self {
        Self {
            task,
            outcome: TaskOutcome::Failure(failure),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, TaskOutcome::Success(_))
    }

    /// Human-readable report lines for this result.
    ///
    /// Always at least one line; command listings produce one line per command.
    pub fn report_lines(&self) -> Vec<String> {
        let scope = self.task.scope();
        match &self.outcome {
            TaskOutcome::Success(TaskSuccess::Created { document }) => {
                vec![format!("[{scope}] document {document} created")]
            }
            TaskOutcome::Success(TaskSuccess::Updated { document }) => {
                vec![format!("[{scope}] document {document} updated")]
            }
            TaskOutcome::Success(TaskSuccess::CommandSent { command_id }) => {
                vec![format!("[{scope}] command sent: {command_id}")]
            }
            TaskOutcome::Success(TaskSuccess::CommandResults { commands }) if commands.is_empty() => {
                vec![format!("[{scope}] no recent commands")]
            }
            TaskOutcome::Success(TaskSuccess::CommandResults { commands }) => commands
                .iter()
                .map(|c| format!("[{scope}] command {} status {}", c.command_id, c.status))
                .collect(),
            TaskOutcome::Failure(failure) => {
                vec![format!("[{scope}] {} failed: {failure}", self.task.kind)]
            }
        }
    }
}
