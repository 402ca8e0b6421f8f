use async_trait::async_trait;
use log::warn;
use rusoto_config::{ConfigService, ConfigServiceClient, Evaluation, PutEvaluationsRequest};
use rusoto_core::Region;

use crate::error::AuditorError;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Compliance {
    Compliant,
    NonCompliant,
    NotApplicable,
}

impl Compliance {
    pub fn as_str(self) -> &'static str {
        match self {
            Compliance::Compliant => "COMPLIANT",
            Compliance::NonCompliant => "NON_COMPLIANT",
            Compliance::NotApplicable => "NOT_APPLICABLE",
        }
    }
}

impl Display for Compliance {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq)]
pub struct ComplianceEvaluation {
    pub resource_type: String,
    pub resource_id: String,
    pub compliance: Compliance,
    pub annotation: String,
    /// Configuration item capture time as epoch seconds.
    pub ordering_timestamp: f64,
}

pub struct ComplianceClient {
    client: ConfigServiceClient,
}

#[async_trait]
pub trait Report {
    async fn put_evaluation(
        &self,
        evaluation: ComplianceEvaluation,
        result_token: &str,
    ) -> Result<(), AuditorError>;
}

#[async_trait]
impl Report for ComplianceClient {
    async fn put_evaluation(
        &self,
        evaluation: ComplianceEvaluation,
        result_token: &str,
    ) -> Result<(), AuditorError> {
        let request = PutEvaluationsRequest {
            evaluations: Some(vec![Evaluation {
                compliance_resource_type: evaluation.resource_type,
                compliance_resource_id: evaluation.resource_id,
                compliance_type: evaluation.compliance.as_str().to_string(),
                annotation: Some(evaluation.annotation),
                ordering_timestamp: evaluation.ordering_timestamp,
            }]),
            result_token: result_token.to_string(),
            test_mode: None,
        };

        let response = self.client.put_evaluations(request).await?;
        for failed in response.failed_evaluations.unwrap_or_default() {
            warn!(
                "Evaluation for {} was rejected by AWS Config",
                failed.compliance_resource_id
            );
        }
        Ok(())
    }
}

impl ComplianceClient {
    pub fn new(region: Region) -> Self {
        Self::new_with_client(ConfigServiceClient::new(region))
    }

    pub fn new_with_client(client: ConfigServiceClient) -> Self {
        ComplianceClient { client }
    }
}

#[cfg(test)]
mod tests {
    use crate::compliance_client::{
        Compliance, ComplianceClient, ComplianceEvaluation, Report,
    };
    use crate::error::AuditorError;
    use rusoto_config::ConfigServiceClient;
    use rusoto_mock::{
        MockCredentialsProvider, MockRequestDispatcher, MockResponseReader, ReadMockResponse,
    };

    fn evaluation() -> ComplianceEvaluation {
        ComplianceEvaluation {
            resource_type: "AWS::EC2::Instance".to_string(),
            resource_id: "i-1234567890abcdef0".to_string(),
            compliance: Compliance::NonCompliant,
            annotation: "Is this EC2 instance in a public subnet?".to_string(),
            ordering_timestamp: 1_599_653_100.0,
        }
    }

    #[tokio::test]
    async fn test_put_evaluation() {
        let mock = ConfigServiceClient::new_with(
            MockRequestDispatcher::default().with_body(&MockResponseReader::read_response(
                "test_resources/valid",
                "put_evaluations.json",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = ComplianceClient::new_with_client(mock);
        let result = client.put_evaluation(evaluation(), "token").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_put_evaluation_error() {
        let mock = ConfigServiceClient::new_with(
            MockRequestDispatcher::with_status(403).with_body(&MockResponseReader::read_response(
                "test_resources/error",
                "access_denied.json",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = ComplianceClient::new_with_client(mock);
        let result = client.put_evaluation(evaluation(), "token").await;
        match result {
            Err(AuditorError::PutEvaluations(_)) => {}
            other => panic!("expected a PutEvaluations error, got {:?}", other),
        }
    }

    #[test]
    fn test_compliance_as_str() {
        assert_eq!(Compliance::Compliant.as_str(), "COMPLIANT");
        assert_eq!(Compliance::NonCompliant.as_str(), "NON_COMPLIANT");
        assert_eq!(Compliance::NotApplicable.as_str(), "NOT_APPLICABLE");
    }
}
