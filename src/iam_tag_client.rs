use async_trait::async_trait;
use rusoto_core::Region;
use rusoto_iam::{Iam, IamClient, ListRoleTagsRequest, ListUserTagsRequest};

use crate::error::AuditorError;
use crate::tag::ResourceTag;

pub struct IamTagClient {
    client: IamClient,
}

#[async_trait]
pub trait LookupTags {
    /// Tags assigned to the IAM role that created a resource.
    async fn role_tags(&self, role_name: &str) -> Result<Vec<ResourceTag>, AuditorError>;

    /// Tags assigned to the IAM user that created a resource.
    async fn user_tags(&self, user_name: &str) -> Result<Vec<ResourceTag>, AuditorError>;
}

#[async_trait]
impl LookupTags for IamTagClient {
    async fn role_tags(&self, role_name: &str) -> Result<Vec<ResourceTag>, AuditorError> {
        let request = ListRoleTagsRequest {
            role_name: role_name.to_string(),
            ..ListRoleTagsRequest::default()
        };
        let response = self.client.list_role_tags(request).await?;
        Ok(response.tags.into_iter().map(ResourceTag::from).collect())
    }

    async fn user_tags(&self, user_name: &str) -> Result<Vec<ResourceTag>, AuditorError> {
        let request = ListUserTagsRequest {
            user_name: user_name.to_string(),
            ..ListUserTagsRequest::default()
        };
        let response = self.client.list_user_tags(request).await?;
        Ok(response.tags.into_iter().map(ResourceTag::from).collect())
    }
}

impl IamTagClient {
    pub fn new(region: Region) -> Self {
        Self::new_with_client(IamClient::new(region))
    }

    pub fn new_with_client(client: IamClient) -> Self {
        IamTagClient { client }
    }
}
