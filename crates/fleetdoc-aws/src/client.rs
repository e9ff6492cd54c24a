use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ssm::types::{DocumentFormat, DocumentType};
use fleetdoc_core::{DocumentServiceClient, ServiceError};
use fleetdoc_model::{CommandId, CommandSummary, DocumentDefinition, TargetInstance};
use tracing::{debug, trace};

use crate::util::{sdk_error, truncate_comment};

/// SSM + EC2 clients for one profile.
#[derive(Debug, Clone)]
pub struct AwsDocumentClient {
    ssm: aws_sdk_ssm::Client,
    ec2: aws_sdk_ec2::Client,
}

impl AwsDocumentClient {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            ssm: aws_sdk_ssm::Client::new(config),
            ec2: aws_sdk_ec2::Client::new(config),
        }
    }
}

#[async_trait]
impl DocumentServiceClient for AwsDocumentClient {
    async fn describe_document(&self, name: &str) -> Result<(), ServiceError> {
        match self.ssm.describe_document().name(name).send().await {
            Ok(_) => Ok(()),
            Err(err) => {
                let missing = err
                    .as_service_error()
                    .is_some_and(|e| e.is_invalid_document());
                if missing {
                    trace!(document = name, "document does not exist");
                    Err(ServiceError::NotFound(name.to_string()))
                } else {
                    Err(sdk_error("describe_document", err))
                }
            }
        }
    }

    async fn create_document(&self, document: &DocumentDefinition) -> Result<(), ServiceError> {
        self.ssm
            .create_document()
            .name(&document.name)
            .content(document.content_json())
            .document_type(DocumentType::Command)
            .document_format(DocumentFormat::Json)
            .send()
            .await
            .map_err(|e| sdk_error("create_document", e))?;
        Ok(())
    }

    async fn update_document(
        &self,
        document: &DocumentDefinition,
        version: &str,
    ) -> Result<(), ServiceError> {
        self.ssm
            .update_document()
            .name(&document.name)
            .content(document.content_json())
            .document_version(version)
            .document_format(DocumentFormat::Json)
            .send()
            .await
            .map_err(|e| sdk_error("update_document", e))?;
        Ok(())
    }

    async fn send_command(
        &self,
        instance_id: &str,
        document: &str,
        comment: &str,
    ) -> Result<CommandId, ServiceError> {
        let out = self
            .ssm
            .send_command()
            .instance_ids(instance_id)
            .document_name(document)
            .comment(truncate_comment(comment))
            .send()
            .await
            .map_err(|e| sdk_error("send_command", e))?;

        out.command()
            .and_then(|c| c.command_id())
            .map(str::to_string)
            .ok_or_else(|| ServiceError::remote("send_command", "response carried no command id"))
    }

    async fn list_commands(
        &self,
        instance_id: &str,
        max_results: u32,
    ) -> Result<Vec<CommandSummary>, ServiceError> {
        let out = self
            .ssm
            .list_commands()
            .instance_id(instance_id)
            .max_results(i32::try_from(max_results).unwrap_or(i32::MAX))
            .send()
            .await
            .map_err(|e| sdk_error("list_commands", e))?;

        Ok(out
            .commands()
            .iter()
            .map(|c| {
                CommandSummary::new(
                    c.command_id().unwrap_or_default(),
                    c.status().map(|s| s.as_str()).unwrap_or("Unknown"),
                )
            })
            .collect())
    }

    async fn list_instances(&self) -> Result<Vec<TargetInstance>, ServiceError> {
        let mut instances = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let out = self
                .ec2
                .describe_instances()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| sdk_error("describe_instances", e))?;

            for reservation in out.reservations() {
                for instance in reservation.instances() {
                    let Some(id) = instance.instance_id() else {
                        continue;
                    };
                    let mut target = TargetInstance::new(id);
                    if let Some(platform) = instance.platform() {
                        target = target.with_platform(platform.as_str());
                    }
                    instances.push(target);
                }
            }

            match out.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!(count = instances.len(), "instances listed");
        Ok(instances)
    }
}
