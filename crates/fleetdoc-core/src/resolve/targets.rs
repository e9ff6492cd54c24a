use fleetdoc_model::{PlatformFilter, Profile, TargetInstance};
use tracing::{debug, instrument};

use crate::{client::DocumentServiceClient, error::ServiceError};

/// Chooses the instances a per-target operation runs against.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetResolver {
    filter: Option<PlatformFilter>,
}

impl TargetResolver {
    pub fn new(filter: Option<PlatformFilter>) -> Self {
        Self { filter }
    }

    /// Static instances for the profile, when there are any.
    ///
    /// A non-empty explicit list is returned as given; the platform filter is not applied to it.
    pub fn explicit(&self, explicit: &[String]) -> Option<Vec<TargetInstance>> {
        if explicit.is_empty() {
            return None;
        }
        Some(explicit.iter().map(TargetInstance::new).collect())
    }

    /// Explicit list if non-empty, otherwise live discovery through `client` followed by the filter.
    ///
    /// An empty result is valid and yields no tasks for the profile.
    #[instrument(level = "debug", skip(self, profile, explicit, client), fields(profile = %profile, filter = ?self.filter))]
    pub async fn resolve(
        &self,
        profile: &Profile,
        explicit: &[String],
        client: &dyn DocumentServiceClient,
    ) -> Result<Vec<TargetInstance>, ServiceError> {
        if let Some(targets) = self.explicit(explicit) {
            debug!(count = targets.len(), "using static instance list");
            return Ok(targets);
        }
        self.discover(client).await
    }

    /// List every instance of the profile and keep those passing the filter.
    pub async fn discover(
        &self,
        client: &dyn DocumentServiceClient,
    ) -> Result<Vec<TargetInstance>, ServiceError> {
        let discovered = client.list_instances().await?;
        let total = discovered.len();
        let kept = self.apply_filter(discovered);
        debug!(total, kept = kept.len(), "instances discovered");
        Ok(kept)
    }

    fn apply_filter(&self, instances: Vec<TargetInstance>) -> Vec<TargetInstance> {
        match self.filter {
            Some(filter) => instances.into_iter().filter(|t| filter.matches(t)).collect(),
            None => instances,
        }
    }
}
