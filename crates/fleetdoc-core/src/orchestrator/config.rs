use crate::{
    dispatch::query::{DEFAULT_MAX_RESULTS, MAX_RESULTS_LIMIT},
    error::CoreError,
    gate::DEFAULT_CONCURRENCY_LIMIT,
};

/// Run-level settings of an [`crate::Orchestrator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Maximum number of tasks holding a gate slot at once, across all profiles.
    pub concurrency_limit: usize,
    /// Number of recent invocations listed per instance by result queries.
    pub max_results: u32,
}

impl OrchestratorConfig {
    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = limit;
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.concurrency_limit == 0 {
            return Err(CoreError::ConfigurationUnavailable(
                "concurrency limit must be positive".into(),
            ));
        }
        if !(1..=MAX_RESULTS_LIMIT).contains(&self.max_results) {
            return Err(CoreError::ConfigurationUnavailable(format!(
                "max results must be between 1 and {MAX_RESULTS_LIMIT}, got {}",
                self.max_results
            )));
        }
        Ok(())
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}
