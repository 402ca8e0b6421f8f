use async_trait::async_trait;
use log::error;
use rusoto_core::Region;
use rusoto_s3::{GetBucketLocationRequest, S3Client, S3};

use crate::error::AuditorError;

pub struct S3BucketClient {
    client: S3Client,
}

#[async_trait]
pub trait ListRegionBuckets {
    /// Names of the buckets homed in the given region. A bucket whose
    /// location cannot be read is logged and skipped.
    async fn buckets_in_region(&self, region: &Region) -> Result<Vec<String>, AuditorError>;
}

#[async_trait]
impl ListRegionBuckets for S3BucketClient {
    async fn buckets_in_region(&self, region: &Region) -> Result<Vec<String>, AuditorError> {
        let listing = self.client.list_buckets().await?;

        let mut bucket_names = Vec::new();
        for bucket in listing.buckets.unwrap_or_default() {
            let name = match bucket.name {
                Some(name) => name,
                None => continue,
            };
            let location = self
                .client
                .get_bucket_location(GetBucketLocationRequest {
                    bucket: name.clone(),
                    ..GetBucketLocationRequest::default()
                })
                .await;
            match location {
                Ok(location) => {
                    if Self::is_in_region(location.location_constraint.as_deref(), region) {
                        bucket_names.push(name);
                    }
                }
                Err(err) => error!("Bucket: {} - S3 API returned error: {}", name, err),
            }
        }
        Ok(bucket_names)
    }
}

impl S3BucketClient {
    pub fn new(region: Region) -> Self {
        Self::new_with_client(S3Client::new(region))
    }

    pub fn new_with_client(client: S3Client) -> Self {
        S3BucketClient { client }
    }

    // the API reports buckets in us-east-1 with a null location constraint
    fn is_in_region(location_constraint: Option<&str>, region: &Region) -> bool {
        match location_constraint {
            None | Some("") => *region == Region::UsEast1,
            Some(constraint) => constraint == region.name(),
        }
    }
}
