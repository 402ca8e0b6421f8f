use async_trait::async_trait;
use rusoto_core::Region;
use rusoto_ec2::{Ec2, Ec2Client, Filter};

use crate::error::AuditorError;
use rusoto_ec2::DescribeInstancesRequest;
use std::collections::HashSet;

pub struct Ec2InstanceClient {
    client: Ec2Client,
}

#[derive(Debug, PartialEq)]
pub struct MachineInstance {
    pub instance_id: String,
    pub subnet_id: Option<String>,
}

#[async_trait]
pub trait Describe {
    async fn describe_public_instances(
        &self,
        public_subnets: &HashSet<String>,
    ) -> Result<Vec<MachineInstance>, AuditorError>;

    async fn instance_subnet(&self, instance_id: &str) -> Result<Option<String>, AuditorError>;
}

#[async_trait]
impl Describe for Ec2InstanceClient {
    async fn describe_public_instances(
        &self,
        public_subnets: &HashSet<String>,
    ) -> Result<Vec<MachineInstance>, AuditorError> {
        // an empty filter value list is an API error, and nothing can match anyway
        if public_subnets.is_empty() {
            return Ok(Vec::new());
        }
        let request = DescribeInstancesRequest {
            filters: Some(vec![Filter {
                name: Some("network-interface.subnet-id".to_string()),
                values: Some(public_subnets.iter().cloned().collect()),
            }]),
            ..DescribeInstancesRequest::default()
        };

        let result = self
            .client
            .describe_instances(request)
            .await
            .map_err(AuditorError::DescribeInstances)?;

        let mut machine_instances = Vec::<MachineInstance>::new();
        for reservation in result.reservations.unwrap_or_default() {
            for instance in reservation.instances.unwrap_or_default() {
                machine_instances.push(MachineInstance {
                    instance_id: instance.instance_id.ok_or(AuditorError::NoneValue)?,
                    subnet_id: instance.subnet_id,
                })
            }
        }
        Ok(machine_instances)
    }

    async fn instance_subnet(&self, instance_id: &str) -> Result<Option<String>, AuditorError> {
        let request = DescribeInstancesRequest {
            filters: Some(vec![Filter {
                name: Some("instance-id".to_string()),
                values: Some(vec![instance_id.to_string()]),
            }]),
            ..DescribeInstancesRequest::default()
        };

        let result = self
            .client
            .describe_instances(request)
            .await
            .map_err(AuditorError::DescribeInstances)?;

        let subnet_id = result
            .reservations
            .into_iter()
            .flatten()
            .flat_map(|reservation| reservation.instances.unwrap_or_default())
            .filter_map(|instance| instance.subnet_id)
            .find(|subnet_id| subnet_id.starts_with("subnet-"));
        Ok(subnet_id)
    }
}

impl Ec2InstanceClient {
    pub fn new(region: Region) -> Self {
        Self::new_with_client(Ec2Client::new(region))
    }

    pub fn new_with_client(client: Ec2Client) -> Self {
        Ec2InstanceClient { client }
    }
}
