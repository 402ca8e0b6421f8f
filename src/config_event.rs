use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AuditorError;

/// Relevant fields of the configuration item an AWS Config rule is evaluated
/// against. The item arrives inside `invokingEvent`, which is itself a
/// JSON-encoded string on the outer event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationItem {
    pub aws_region: String,
    pub resource_id: String,
    pub resource_type: String,
    #[serde(rename = "ARN", default)]
    pub arn: Option<String>,
    pub configuration_item_capture_time: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvokingEvent {
    configuration_item: ConfigurationItem,
}

#[derive(Debug, PartialEq)]
pub struct ConfigEvent {
    pub configuration_item: ConfigurationItem,
    pub result_token: String,
}

pub fn parse(event: &Value) -> Result<ConfigEvent, AuditorError> {
    let invoking_event = event
        .get("invokingEvent")
        .and_then(Value::as_str)
        .ok_or(AuditorError::NoneValue)?;
    let invoking_event: InvokingEvent = serde_json::from_str(invoking_event)?;

    let result_token = event
        .get("resultToken")
        .and_then(Value::as_str)
        .ok_or(AuditorError::NoneValue)?;

    Ok(ConfigEvent {
        configuration_item: invoking_event.configuration_item,
        result_token: result_token.to_string(),
    })
}

impl ConfigurationItem {
    /// Capture time as epoch seconds, the ordering timestamp of the evaluation.
    pub fn capture_timestamp(&self) -> Result<f64, AuditorError> {
        let capture_time = DateTime::parse_from_rfc3339(&self.configuration_item_capture_time)?;
        Ok(capture_time.timestamp_millis() as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::config_event::{parse, ConfigurationItem};
    use crate::error::AuditorError;
    use serde_json::json;

    fn config_event() -> serde_json::Value {
        let invoking_event = json!({
            "configurationItem": {
                "awsRegion": "us-east-1",
                "resourceId": "i-1234567890abcdef0",
                "resourceType": "AWS::EC2::Instance",
                "ARN": "arn:aws:ec2:us-east-1:123456789012:instance/i-1234567890abcdef0",
                "configurationItemCaptureTime": "2020-09-09T12:05:00.000Z",
            },
            "messageType": "ConfigurationItemChangeNotification",
        });
        json!({
            "invokingEvent": invoking_event.to_string(),
            "resultToken": "token-1234",
        })
    }

    #[test]
    fn test_parse() {
        let event = parse(&config_event()).unwrap();
        assert_eq!(event.result_token, "token-1234");
        assert_eq!(event.configuration_item.aws_region, "us-east-1");
        assert_eq!(
            event.configuration_item.resource_id,
            "i-1234567890abcdef0"
        );
        assert_eq!(
            event.configuration_item.resource_type,
            "AWS::EC2::Instance"
        );
        assert_eq!(
            event.configuration_item.arn.as_deref(),
            Some("arn:aws:ec2:us-east-1:123456789012:instance/i-1234567890abcdef0")
        );
    }

    #[test]
    fn test_parse_without_result_token() {
        let mut event = config_event();
        event.as_object_mut().unwrap().remove("resultToken");
        assert_eq!(parse(&event).err().unwrap(), AuditorError::NoneValue);
    }

    #[test]
    fn test_parse_with_malformed_invoking_event() {
        let event = json!({
            "invokingEvent": "{not json",
            "resultToken": "token-1234",
        });
        match parse(&event) {
            Err(AuditorError::Json(_)) => {}
            other => panic!("expected a JSON error, got {:?}", other),
        }
    }

    #[test]
    fn test_capture_timestamp() {
        let item = ConfigurationItem {
            aws_region: "us-east-1".to_string(),
            resource_id: "i-1234567890abcdef0".to_string(),
            resource_type: "AWS::EC2::Instance".to_string(),
            arn: None,
            configuration_item_capture_time: "2020-09-09T12:05:00.500Z".to_string(),
        };
        assert_eq!(item.capture_timestamp().unwrap(), 1_599_653_100.5);
    }
}
