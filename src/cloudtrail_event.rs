use serde::Deserialize;
use serde_json::Value;

use crate::error::AuditorError;

#[derive(Debug, Deserialize)]
struct CloudTrailEvent {
    detail: Detail,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Detail {
    user_identity: UserIdentity,
    #[serde(default)]
    response_elements: Option<ResponseElements>,
    #[serde(default)]
    event_time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserIdentity {
    #[serde(rename = "type")]
    identity_type: String,
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    arn: Option<String>,
    #[serde(default)]
    session_context: Option<SessionContext>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionContext {
    #[serde(default)]
    session_issuer: Option<SessionIssuer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionIssuer {
    #[serde(rename = "type", default)]
    issuer_type: Option<String>,
    #[serde(default)]
    arn: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseElements {
    #[serde(default)]
    instances_set: Option<InstancesSet>,
}

#[derive(Debug, Deserialize)]
struct InstancesSet {
    #[serde(default)]
    items: Vec<InstanceItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstanceItem {
    #[serde(default)]
    instance_id: Option<String>,
}

/// Launch details extracted from a CloudTrail `RunInstances` event: who
/// created the instances and which instances were created.
#[derive(Debug, Default, PartialEq)]
pub struct LaunchEvent {
    pub iam_user_name: Option<String>,
    pub role_name: Option<String>,
    pub user_id: Option<String>,
    pub event_time: Option<String>,
    pub instance_ids: Vec<String>,
}

pub fn parse(event: &Value) -> Result<LaunchEvent, AuditorError> {
    let event: CloudTrailEvent = serde_json::from_value(event.clone())?;
    let identity = &event.detail.user_identity;

    let mut launch = LaunchEvent {
        event_time: event.detail.event_time.clone(),
        ..LaunchEvent::default()
    };

    match identity.identity_type.as_str() {
        "IAMUser" => launch.iam_user_name = identity.user_name.clone(),
        "AssumedRole" | "FederatedUser" => {
            let issuer = identity
                .session_context
                .as_ref()
                .and_then(|context| context.session_issuer.as_ref());
            if let Some(issuer) = issuer {
                if issuer.issuer_type.as_deref() == Some("Role") {
                    launch.role_name = issuer.arn.as_deref().and_then(last_arn_component);
                    launch.user_id = identity.arn.as_deref().and_then(last_arn_component);
                }
            }
        }
        _ => {}
    }

    launch.instance_ids = event
        .detail
        .response_elements
        .and_then(|elements| elements.instances_set)
        .map(|set| {
            set.items
                .into_iter()
                .filter_map(|item| item.instance_id)
                .collect()
        })
        .unwrap_or_default();

    Ok(launch)
}

fn last_arn_component(arn: &str) -> Option<String> {
    arn.rsplit('/').next().map(|component| component.to_string())
}
