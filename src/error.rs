use std::error::Error;

use rusoto_cloudwatch::GetMetricStatisticsError;
use rusoto_config::PutEvaluationsError;
use rusoto_core::RusotoError;
use rusoto_ec2::{
    CreateTagsError, DescribeInstancesError, DescribeRouteTablesError, DescribeSubnetsError,
    DescribeVolumesError,
};
use rusoto_elbv2::DescribeLoadBalancersError;
use rusoto_iam::{ListRoleTagsError, ListUserTagsError};
use rusoto_s3::{GetBucketLocationError, ListBucketsError};
use rusoto_ssm::GetParametersByPathError;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::num::TryFromIntError;

#[derive(Debug, PartialEq)]
pub enum AuditorError {
    NoneValue,
    ToPrimitive,
    TryFromIntError,
    InvalidDate(chrono::ParseError),
    Json(String),
    DescribeSubnets(RusotoError<DescribeSubnetsError>),
    DescribeRouteTables(RusotoError<DescribeRouteTablesError>),
    DescribeInstances(RusotoError<DescribeInstancesError>),
    DescribeVolumes(RusotoError<DescribeVolumesError>),
    CreateTags(RusotoError<CreateTagsError>),
    DescribeLoadBalancers(RusotoError<DescribeLoadBalancersError>),
    PutEvaluations(RusotoError<PutEvaluationsError>),
    ListRoleTags(RusotoError<ListRoleTagsError>),
    ListUserTags(RusotoError<ListUserTagsError>),
    GetParametersByPath(RusotoError<GetParametersByPathError>),
    ListBuckets(RusotoError<ListBucketsError>),
    GetBucketLocation(RusotoError<GetBucketLocationError>),
    GetMetrics(RusotoError<GetMetricStatisticsError>),
}

impl Display for AuditorError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            AuditorError::NoneValue => write!(f, "Value is None"),
            AuditorError::ToPrimitive => {
                write!(f, "Failed to convert bigDecimal to primitive")
            }
            AuditorError::TryFromIntError => write!(f, "Failed to convert int"),
            AuditorError::InvalidDate(ref error) => write!(f, "Invalid date: {}", error),
            AuditorError::Json(ref message) => write!(f, "Invalid event JSON: {}", message),
            AuditorError::DescribeSubnets(ref error) => Display::fmt(error, f),
            AuditorError::DescribeRouteTables(ref error) => Display::fmt(error, f),
            AuditorError::DescribeInstances(ref error) => Display::fmt(error, f),
            AuditorError::DescribeVolumes(ref error) => Display::fmt(error, f),
            AuditorError::CreateTags(ref error) => Display::fmt(error, f),
            AuditorError::DescribeLoadBalancers(ref error) => Display::fmt(error, f),
            AuditorError::PutEvaluations(ref error) => Display::fmt(error, f),
            AuditorError::ListRoleTags(ref error) => Display::fmt(error, f),
            AuditorError::ListUserTags(ref error) => Display::fmt(error, f),
            AuditorError::GetParametersByPath(ref error) => Display::fmt(error, f),
            AuditorError::ListBuckets(ref error) => Display::fmt(error, f),
            AuditorError::GetBucketLocation(ref error) => Display::fmt(error, f),
            AuditorError::GetMetrics(ref error) => Display::fmt(error, f),
        }
    }
}

impl Error for AuditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            AuditorError::InvalidDate(ref error) => Some(error),
            AuditorError::DescribeSubnets(ref error) => Some(error),
            AuditorError::DescribeRouteTables(ref error) => Some(error),
            AuditorError::DescribeInstances(ref error) => Some(error),
            AuditorError::DescribeVolumes(ref error) => Some(error),
            AuditorError::CreateTags(ref error) => Some(error),
            AuditorError::DescribeLoadBalancers(ref error) => Some(error),
            AuditorError::PutEvaluations(ref error) => Some(error),
            AuditorError::ListRoleTags(ref error) => Some(error),
            AuditorError::ListUserTags(ref error) => Some(error),
            AuditorError::GetParametersByPath(ref error) => Some(error),
            AuditorError::ListBuckets(ref error) => Some(error),
            AuditorError::GetBucketLocation(ref error) => Some(error),
            AuditorError::GetMetrics(ref error) => Some(error),
            _ => None,
        }
    }
}

impl From<TryFromIntError> for AuditorError {
    fn from(_: TryFromIntError) -> AuditorError {
        AuditorError::TryFromIntError
    }
}

impl From<chrono::ParseError> for AuditorError {
    fn from(e: chrono::ParseError) -> AuditorError {
        AuditorError::InvalidDate(e)
    }
}

// serde_json::Error has no PartialEq, keep the rendered message instead
impl From<serde_json::Error> for AuditorError {
    fn from(e: serde_json::Error) -> AuditorError {
        AuditorError::Json(e.to_string())
    }
}

impl From<RusotoError<DescribeSubnetsError>> for AuditorError {
    fn from(e: RusotoError<DescribeSubnetsError>) -> AuditorError {
        AuditorError::DescribeSubnets(e)
    }
}

impl From<RusotoError<DescribeRouteTablesError>> for AuditorError {
    fn from(e: RusotoError<DescribeRouteTablesError>) -> AuditorError {
        AuditorError::DescribeRouteTables(e)
    }
}

impl From<RusotoError<DescribeInstancesError>> for AuditorError {
    fn from(e: RusotoError<DescribeInstancesError>) -> AuditorError {
        AuditorError::DescribeInstances(e)
    }
}

impl From<RusotoError<DescribeVolumesError>> for AuditorError {
    fn from(e: RusotoError<DescribeVolumesError>) -> AuditorError {
        AuditorError::DescribeVolumes(e)
    }
}

impl From<RusotoError<CreateTagsError>> for AuditorError {
    fn from(e: RusotoError<CreateTagsError>) -> AuditorError {
        AuditorError::CreateTags(e)
    }
}

impl From<RusotoError<DescribeLoadBalancersError>> for AuditorError {
    fn from(e: RusotoError<DescribeLoadBalancersError>) -> AuditorError {
        AuditorError::DescribeLoadBalancers(e)
    }
}

impl From<RusotoError<PutEvaluationsError>> for AuditorError {
    fn from(e: RusotoError<PutEvaluationsError>) -> AuditorError {
        AuditorError::PutEvaluations(e)
    }
}

impl From<RusotoError<ListRoleTagsError>> for AuditorError {
    fn from(e: RusotoError<ListRoleTagsError>) -> AuditorError {
        AuditorError::ListRoleTags(e)
    }
}

impl From<RusotoError<ListUserTagsError>> for AuditorError {
    fn from(e: RusotoError<ListUserTagsError>) -> AuditorError {
        AuditorError::ListUserTags(e)
    }
}

impl From<RusotoError<GetParametersByPathError>> for AuditorError {
    fn from(e: RusotoError<GetParametersByPathError>) -> AuditorError {
        AuditorError::GetParametersByPath(e)
    }
}

impl From<RusotoError<ListBucketsError>> for AuditorError {
    fn from(e: RusotoError<ListBucketsError>) -> AuditorError {
        AuditorError::ListBuckets(e)
    }
}

impl From<RusotoError<GetBucketLocationError>> for AuditorError {
    fn from(e: RusotoError<GetBucketLocationError>) -> AuditorError {
        AuditorError::GetBucketLocation(e)
    }
}

impl From<RusotoError<GetMetricStatisticsError>> for AuditorError {
    fn from(e: RusotoError<GetMetricStatisticsError>) -> AuditorError {
        AuditorError::GetMetrics(e)
    }
}
