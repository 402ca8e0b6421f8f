use async_trait::async_trait;
use rusoto_core::Region;
use rusoto_ssm::{GetParametersByPathRequest, Ssm, SsmClient};

use crate::error::AuditorError;
use crate::tag::ResourceTag;

/// Parameter Store path holding the tags of resources created by an IAM user.
pub fn user_tag_path(user_name: &str) -> String {
    format!("/auto-tag/{}/tag", user_name)
}

/// Parameter Store path holding the tags of resources created through an
/// assumed IAM role.
pub fn role_tag_path(role_name: &str, user_id: &str) -> String {
    format!("/auto-tag/{}/{}/tag", role_name, user_id)
}

pub struct SsmParameterClient {
    client: SsmClient,
}

#[async_trait]
pub trait LookupParameters {
    /// Tags stored below a Parameter Store path. Each parameter's tag key is
    /// the last component of its name.
    async fn parameter_tags(&self, path: &str) -> Result<Vec<ResourceTag>, AuditorError>;
}

#[async_trait]
impl LookupParameters for SsmParameterClient {
    async fn parameter_tags(&self, path: &str) -> Result<Vec<ResourceTag>, AuditorError> {
        let request = GetParametersByPathRequest {
            path: path.to_string(),
            recursive: Some(true),
            with_decryption: Some(true),
            ..GetParametersByPathRequest::default()
        };
        let response = self.client.get_parameters_by_path(request).await?;

        let mut tags = Vec::new();
        for parameter in response.parameters.unwrap_or_default() {
            let key = parameter
                .name
                .as_deref()
                .and_then(|name| name.rsplit('/').next())
                .map(|key| key.to_string());
            if let (Some(key), Some(value)) = (key, parameter.value) {
                tags.push(ResourceTag { key, value });
            }
        }
        Ok(tags)
    }
}

impl SsmParameterClient {
    pub fn new(region: Region) -> Self {
        Self::new_with_client(SsmClient::new(region))
    }

    pub fn new_with_client(client: SsmClient) -> Self {
        SsmParameterClient { client }
    }
}
