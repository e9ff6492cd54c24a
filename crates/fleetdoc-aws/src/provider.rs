use std::sync::Arc;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use fleetdoc_core::{ClientProvider, DocumentServiceClient, ServiceError};
use fleetdoc_model::Profile;
use tracing::{debug, instrument};

use crate::client::AwsDocumentClient;

/// Resolves a profile name from the shared AWS config/credentials files into SDK clients.
#[derive(Debug, Clone, Default)]
pub struct AwsClientProvider {
    region: Option<String>,
}

impl AwsClientProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a region instead of the one configured for each profile.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

#[async_trait]
impl ClientProvider for AwsClientProvider {
    #[instrument(level = "debug", skip(self), fields(profile = %profile))]
    async fn client(
        &self,
        profile: &Profile,
    ) -> Result<Arc<dyn DocumentServiceClient>, ServiceError> {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).profile_name(profile.as_str());
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let config = loader.load().await;
        debug!(region = ?config.region(), "sdk config loaded");

        Ok(Arc::new(AwsDocumentClient::new(&config)))
    }
}
