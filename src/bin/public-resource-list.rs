use lambda_runtime::{handler_fn, Context};
use log::{error, info};
use rusoto_core::Region;

use serde_json::{json, Value};
use std::collections::HashSet;
use std::str::FromStr;

use subnet_auditor::compliance_client::{
    Compliance, ComplianceClient, ComplianceEvaluation, Report,
};
use subnet_auditor::config_event;
use subnet_auditor::ec2_instance_client::{Describe, Ec2InstanceClient};
use subnet_auditor::load_balancer_client::{DescribeLoadBalancers, LoadBalancerClient};
use subnet_auditor::public_subnet_client::{Classify, PublicSubnetClient};

type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

const RESOURCE_TYPE: &str = "AWS::EC2::Instance";
const ANNOTATION: &str = "Is this EC2 instance in a public subnet?";

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    lambda_runtime::run(handler_fn(list_handler)).await?;
    Ok(())
}

/// Enumerates the region's public resources, then evaluates the triggering
/// instance by membership in that enumeration.
async fn list_handler(event: Value, _: Context) -> Result<Value, Error> {
    let event = config_event::parse(&event)?;
    let item = &event.configuration_item;
    let region = Region::from_str(&item.aws_region)?;

    let public_subnets = match PublicSubnetClient::new(region.clone()).public_subnets().await {
        Ok(public_subnets) => public_subnets,
        Err(err) => {
            error!("Public subnet classification unavailable: {}", err);
            HashSet::new()
        }
    };

    let public_instances = Ec2InstanceClient::new(region.clone())
        .describe_public_instances(&public_subnets)
        .await?;
    let public_instance_ids: Vec<&str> = public_instances
        .iter()
        .map(|instance| instance.instance_id.as_str())
        .collect();
    info!(
        "The public EC2 instances in region {} are: {:?}",
        item.aws_region, public_instance_ids
    );

    let public_load_balancers = LoadBalancerClient::new(region)
        .public_load_balancers(&public_subnets)
        .await?;
    info!(
        "The public load balancers in region {} are: {:?}",
        item.aws_region, public_load_balancers
    );

    let compliance = if item.resource_type != RESOURCE_TYPE {
        Compliance::NotApplicable
    } else if public_instance_ids.contains(&item.resource_id.as_str()) {
        Compliance::NonCompliant
    } else {
        Compliance::Compliant
    };
    info!(
        "EC2 instance: {} in region: {} is {}",
        item.resource_id, item.aws_region, compliance
    );

    ComplianceClient::new(Region::default())
        .put_evaluation(
            ComplianceEvaluation {
                resource_type: item.resource_type.clone(),
                resource_id: item.resource_id.clone(),
                compliance,
                annotation: ANNOTATION.to_string(),
                ordering_timestamp: item.capture_timestamp()?,
            },
            &event.result_token,
        )
        .await?;

    Ok(json!({
        "resourceId": item.resource_id,
        "complianceType": compliance.as_str(),
        "publicInstances": public_instance_ids,
        "publicLoadBalancers": public_load_balancers,
    }))
}
