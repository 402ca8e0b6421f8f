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
use subnet_auditor::error::AuditorError;
use subnet_auditor::load_balancer_client::{DescribeLoadBalancers, LoadBalancerClient};
use subnet_auditor::public_subnet_client::{Classify, PublicSubnetClient};

type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

const RESOURCE_TYPE: &str = "AWS::ElasticLoadBalancingV2::LoadBalancer";
const ANNOTATION: &str = "Is this ELB instance in a public subnet?";

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    lambda_runtime::run(handler_fn(check_handler)).await?;
    Ok(())
}

async fn check_handler(event: Value, _: Context) -> Result<Value, Error> {
    let event = config_event::parse(&event)?;
    let item = &event.configuration_item;
    let region = Region::from_str(&item.aws_region)?;

    let compliance = if item.resource_type != RESOURCE_TYPE {
        Compliance::NotApplicable
    } else {
        let arn = item.arn.as_deref().ok_or(AuditorError::NoneValue)?;
        let public_subnets = match PublicSubnetClient::new(region.clone()).public_subnets().await {
            Ok(public_subnets) => public_subnets,
            Err(err) => {
                error!("Public subnet classification unavailable: {}", err);
                HashSet::new()
            }
        };
        let subnet_ids = LoadBalancerClient::new(region)
            .load_balancer_subnets(arn)
            .await?;
        if subnet_ids
            .iter()
            .any(|subnet_id| public_subnets.contains(subnet_id))
        {
            Compliance::NonCompliant
        } else {
            Compliance::Compliant
        }
    };
    info!(
        "ELB: {} in region: {} is {}",
        item.arn.as_deref().unwrap_or(&item.resource_id),
        item.aws_region,
        compliance
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
    }))
}
