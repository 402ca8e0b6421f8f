use async_trait::async_trait;
use rusoto_core::Region;
use rusoto_ec2::{CreateTagsRequest, DescribeVolumesRequest, Ec2, Ec2Client, Filter};

use crate::error::AuditorError;
use crate::tag::ResourceTag;

pub struct ResourceTagClient {
    client: Ec2Client,
}

#[async_trait]
pub trait ApplyTags {
    /// Applies the tag set to an EC2 instance and to every EBS volume attached
    /// to it.
    async fn tag_instance_with_volumes(
        &self,
        instance_id: &str,
        tags: &[ResourceTag],
    ) -> Result<(), AuditorError>;
}

#[async_trait]
impl ApplyTags for ResourceTagClient {
    async fn tag_instance_with_volumes(
        &self,
        instance_id: &str,
        tags: &[ResourceTag],
    ) -> Result<(), AuditorError> {
        let ec2_tags: Vec<rusoto_ec2::Tag> =
            tags.iter().cloned().map(rusoto_ec2::Tag::from).collect();

        self.client
            .create_tags(CreateTagsRequest {
                resources: vec![instance_id.to_string()],
                tags: ec2_tags.clone(),
                ..CreateTagsRequest::default()
            })
            .await?;

        let volumes = self
            .client
            .describe_volumes(DescribeVolumesRequest {
                filters: Some(vec![Filter {
                    name: Some("attachment.instance-id".to_string()),
                    values: Some(vec![instance_id.to_string()]),
                }]),
                ..DescribeVolumesRequest::default()
            })
            .await?;

        let volume_ids: Vec<String> = volumes
            .volumes
            .into_iter()
            .flatten()
            .filter_map(|volume| volume.volume_id)
            .collect();
        if volume_ids.is_empty() {
            return Ok(());
        }

        self.client
            .create_tags(CreateTagsRequest {
                resources: volume_ids,
                tags: ec2_tags,
                ..CreateTagsRequest::default()
            })
            .await?;
        Ok(())
    }
}

impl ResourceTagClient {
    pub fn new(region: Region) -> Self {
        Self::new_with_client(Ec2Client::new(region))
    }

    pub fn new_with_client(client: Ec2Client) -> Self {
        ResourceTagClient { client }
    }
}
