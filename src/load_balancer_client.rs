use async_trait::async_trait;
use log::info;
use rusoto_core::Region;
use rusoto_elbv2::{DescribeLoadBalancersInput, Elb, ElbClient};

use crate::error::AuditorError;
use std::collections::HashSet;

pub struct LoadBalancerClient {
    client: ElbClient,
}

#[async_trait]
pub trait DescribeLoadBalancers {
    /// Subnet ids of the availability zones a load balancer is attached to.
    async fn load_balancer_subnets(&self, arn: &str) -> Result<Vec<String>, AuditorError>;

    /// ARNs of every load balancer with at least one availability-zone subnet
    /// in the public set.
    async fn public_load_balancers(
        &self,
        public_subnets: &HashSet<String>,
    ) -> Result<Vec<String>, AuditorError>;
}

#[async_trait]
impl DescribeLoadBalancers for LoadBalancerClient {
    async fn load_balancer_subnets(&self, arn: &str) -> Result<Vec<String>, AuditorError> {
        let request = DescribeLoadBalancersInput {
            load_balancer_arns: Some(vec![arn.to_string()]),
            ..DescribeLoadBalancersInput::default()
        };
        let result = self.client.describe_load_balancers(request).await?;

        let mut subnet_ids = Vec::new();
        for load_balancer in result.load_balancers.unwrap_or_default() {
            for zone in load_balancer.availability_zones.unwrap_or_default() {
                if let Some(subnet_id) = zone.subnet_id {
                    if subnet_id.starts_with("subnet-") {
                        subnet_ids.push(subnet_id);
                    }
                }
            }
        }
        Ok(subnet_ids)
    }

    async fn public_load_balancers(
        &self,
        public_subnets: &HashSet<String>,
    ) -> Result<Vec<String>, AuditorError> {
        let result = self
            .client
            .describe_load_balancers(DescribeLoadBalancersInput::default())
            .await?;

        let mut public_load_balancers = Vec::new();
        for load_balancer in result.load_balancers.unwrap_or_default() {
            let arn = match load_balancer.load_balancer_arn {
                Some(arn) => arn,
                None => continue,
            };
            let public_subnet = load_balancer
                .availability_zones
                .iter()
                .flatten()
                .filter_map(|zone| zone.subnet_id.as_ref())
                .find(|subnet_id| public_subnets.contains(*subnet_id));
            match public_subnet {
                Some(subnet_id) => {
                    info!("Load balancer: {} is IN public subnet: {}", arn, subnet_id);
                    public_load_balancers.push(arn);
                }
                None => info!("Load balancer: {} is NOT IN a public subnet", arn),
            }
        }
        Ok(public_load_balancers)
    }
}

impl LoadBalancerClient {
    pub fn new(region: Region) -> Self {
        Self::new_with_client(ElbClient::new(region))
    }

    pub fn new_with_client(client: ElbClient) -> Self {
        LoadBalancerClient { client }
    }
}

#[cfg(test)]
mod tests {
    use crate::load_balancer_client::{DescribeLoadBalancers, LoadBalancerClient};
    use rusoto_elbv2::ElbClient;
    use rusoto_mock::{
        MockCredentialsProvider, MockRequestDispatcher, MockResponseReader, ReadMockResponse,
    };
    use std::collections::HashSet;

    const ARN: &str = "arn:aws:elasticloadbalancing:us-east-1:123456789012:loadbalancer/app/front-door/50dc6c495c0c9188";

    fn mock_client() -> LoadBalancerClient {
        let mock = ElbClient::new_with(
            MockRequestDispatcher::default().with_body(&MockResponseReader::read_response(
                "test_resources/valid",
                "describe_load_balancers.xml",
            )),
            MockCredentialsProvider,
            Default::default(),
        );
        LoadBalancerClient::new_with_client(mock)
    }

    #[tokio::test]
    async fn test_load_balancer_subnets() {
        let client = mock_client();
        let result = client.load_balancer_subnets(ARN).await;
        assert_eq!(
            result.unwrap(),
            [
                "subnet-0f5cca24e6ee30b01".to_string(),
                "subnet-02d1b4e74cf3b6a9d".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_public_load_balancers() {
        let client = mock_client();
        let mut public_subnets = HashSet::new();
        public_subnets.insert("subnet-0f5cca24e6ee30b01".to_string());

        let result = client.public_load_balancers(&public_subnets).await;
        assert_eq!(result.unwrap(), [ARN.to_string()]);
    }

    #[tokio::test]
    async fn test_public_load_balancers_without_public_subnets() {
        let client = mock_client();
        let result = client.public_load_balancers(&HashSet::new()).await;
        assert_eq!(result.unwrap(), Vec::<String>::new());
    }
}
