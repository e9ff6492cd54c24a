use serde::{Deserialize, Serialize};

use crate::{OperationKind, TaskOutcome, TaskResult};

/// Every task result of one run, in completion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub operation: OperationKind,
    pub results: Vec<TaskResult>,
}

impl RunSummary {
    pub fn new(operation: OperationKind) -> Self {
        Self {
            operation,
            results: Vec::new(),
        }
    }

    pub fn push(&mut self, result: TaskResult) {
        self.results.push(result);
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn has_failures(&self) -> bool {
        self.results
            .iter()
            .any(|r| matches!(r.outcome, TaskOutcome::Failure(_)))
    }

    /// Final line of a run; emitted even when every task failed.
    pub fn completion_line(&self) -> String {
        format!(
            "{} completed: {} task(s), {} succeeded, {} failed",
            self.operation,
            self.total(),
            self.succeeded(),
            self.failed()
        )
    }
}
