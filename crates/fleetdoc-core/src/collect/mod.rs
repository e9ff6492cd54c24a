//! Per-task reporting.

use std::io::Write;

use fleetdoc_model::{OperationKind, RunSummary, TaskOutcome, TaskResult};
use tracing::{info, warn};

/// Receives task results in completion order and reports each one.
///
/// Writes one or more lines per result to `out`, logs it, and records it in the
/// run summary. A failed task is reported like any other result; it never
/// changes the collector's control flow.
pub struct ResultCollector<W> {
    out: W,
    summary: RunSummary,
}

impl<W: Write> ResultCollector<W> {
    pub fn new(operation: OperationKind, out: W) -> Self {
        Self {
            out,
            summary: RunSummary::new(operation),
        }
    }

    pub fn record(&mut self, result: TaskResult) {
        match &result.outcome {
            TaskOutcome::Success(_) => info!(
                task = %result.task.id,
                profile = %result.task.profile,
                scope = %result.task.scope(),
                "task succeeded"
            ),
            TaskOutcome::Failure(failure) => warn!(
                task = %result.task.id,
                profile = %result.task.profile,
                scope = %result.task.scope(),
                reason = %failure,
                "task failed"
            ),
        }

        for line in result.report_lines() {
            self.emit(&line);
        }
        self.summary.push(result);
    }

    /// Number of results recorded so far.
    #[inline]
    pub fn completed(&self) -> usize {
        self.summary.total()
    }

    /// Emit the completion line and hand back the summary.
    pub fn finish(mut self) -> RunSummary {
        let line = self.summary.completion_line();
        self.emit(&line);
        if let Err(e) = self.out.flush() {
            warn!(error = %e, "failed to flush report output");
        }
        info!(
            operation = %self.summary.operation,
            total = self.summary.total(),
            failed = self.summary.failed(),
            "run completed"
        );
        self.summary
    }

    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}") {
            warn!(error = %e, "failed to write report line");
        }
    }
}
