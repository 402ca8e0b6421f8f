use crate::error::AuditorError;
use crate::subnet_classifier::classify_public_subnets;
use async_trait::async_trait;

use rusoto_core::Region;
use rusoto_ec2::{DescribeRouteTablesRequest, DescribeSubnetsRequest, Ec2, Ec2Client};
use std::collections::{HashMap, HashSet};

/// Fetches the region's routing topology and classifies its public subnets.
pub struct PublicSubnetClient {
    client: Ec2Client,
}

#[async_trait]
pub trait Classify {
    /// Err means the topology could not be retrieved, which is distinct from
    /// an Ok empty set (no subnet is public). Callers that keep the
    /// conservative behavior log the error and continue with an empty set.
    async fn public_subnets(&self) -> Result<HashSet<String>, AuditorError>;
}

#[async_trait]
impl Classify for PublicSubnetClient {
    async fn public_subnets(&self) -> Result<HashSet<String>, AuditorError> {
        let subnets = self
            .client
            .describe_subnets(DescribeSubnetsRequest::default())
            .await?;

        let mut vpc_subnets: HashMap<String, HashSet<String>> = HashMap::new();
        for subnet in subnets.subnets.unwrap_or_default() {
            if let (Some(vpc_id), Some(subnet_id)) = (subnet.vpc_id, subnet.subnet_id) {
                vpc_subnets.entry(vpc_id).or_default().insert(subnet_id);
            }
        }

        let route_tables = self
            .client
            .describe_route_tables(DescribeRouteTablesRequest::default())
            .await?;

        Ok(classify_public_subnets(
            vpc_subnets,
            &route_tables.route_tables.unwrap_or_default(),
        ))
    }
}

impl PublicSubnetClient {
    pub fn new(region: Region) -> Self {
        Self::new_with_client(Ec2Client::new(region))
    }

    pub fn new_with_client(client: Ec2Client) -> Self {
        PublicSubnetClient { client }
    }
}
