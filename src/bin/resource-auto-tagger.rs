use lambda_runtime::{handler_fn, Context};
use log::{error, info};
use rusoto_core::Region;

use serde_json::{json, Value};

use subnet_auditor::cloudtrail_event::{self, LaunchEvent};
use subnet_auditor::iam_tag_client::{IamTagClient, LookupTags};
use subnet_auditor::resource_tag_client::{ApplyTags, ResourceTagClient};
use subnet_auditor::ssm_parameter_client::{
    role_tag_path, user_tag_path, LookupParameters, SsmParameterClient,
};
use subnet_auditor::tag::ResourceTag;

type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    lambda_runtime::run(handler_fn(tag_handler)).await?;
    Ok(())
}

/// Tags the EC2 instances of a CloudTrail RunInstances event with the creating
/// identity's IAM and Parameter Store tags.
async fn tag_handler(event: Value, context: Context) -> Result<Value, Error> {
    let launch = cloudtrail_event::parse(&event)?;
    let resource_tags = collect_tags(&launch).await;

    if launch.instance_ids.is_empty() {
        info!(
            "No Amazon EC2 resources to tag: Event ID: {}",
            event.get("id").and_then(Value::as_str).unwrap_or("unknown")
        );
        return Ok(json!({ "statusCode": 200 }));
    }

    let tag_client = ResourceTagClient::new(Region::default());
    for instance_id in &launch.instance_ids {
        match tag_client
            .tag_instance_with_volumes(instance_id, &resource_tags)
            .await
        {
            Ok(()) => info!(
                "Resource ID: {} tagged with: {}",
                instance_id,
                serde_json::to_string(&resource_tags)?
            ),
            Err(err) => error!(
                "No tags applied to Resource ID: {} ({}), request: {}",
                instance_id, err, context.request_id
            ),
        }
    }
    Ok(json!({ "statusCode": 200 }))
}

/// Every lookup failure is logged and skipped; tagging proceeds with whatever
/// was gathered.
async fn collect_tags(launch: &LaunchEvent) -> Vec<ResourceTag> {
    let iam_client = IamTagClient::new(Region::default());
    let ssm_client = SsmParameterClient::new(Region::default());
    let mut resource_tags = Vec::new();

    if let Some(user_name) = &launch.iam_user_name {
        resource_tags.push(ResourceTag::new("IAM User Name", user_name));
        match iam_client.user_tags(user_name).await {
            Ok(tags) => resource_tags.extend(tags),
            Err(err) => error!("IAM API returned error: {}", err),
        }
        match ssm_client.parameter_tags(&user_tag_path(user_name)).await {
            Ok(tags) => resource_tags.extend(tags),
            Err(err) => error!("SSM API returned error: {}", err),
        }
    }

    if let Some(event_time) = &launch.event_time {
        resource_tags.push(ResourceTag::new("Date created", event_time));
    }

    if let Some(role_name) = &launch.role_name {
        resource_tags.push(ResourceTag::new("IAM Role Name", role_name));
        match iam_client.role_tags(role_name).await {
            Ok(tags) => resource_tags.extend(tags),
            Err(err) => error!("IAM API returned error: {}", err),
        }
        if let Some(user_id) = &launch.user_id {
            resource_tags.push(ResourceTag::new("Created by", user_id));
            match ssm_client
                .parameter_tags(&role_tag_path(role_name, user_id))
                .await
            {
                Ok(tags) => resource_tags.extend(tags),
                Err(err) => error!("SSM API returned error: {}", err),
            }
        }
    }
    resource_tags
}
