use crate::error::AuditorError;
use async_trait::async_trait;

use bigdecimal::{BigDecimal, FromPrimitive, ToPrimitive};
use rusoto_cloudwatch::{
    CloudWatch, CloudWatchClient, Datapoint, Dimension, GetMetricStatisticsInput,
};
use rusoto_core::Region;

use crate::metric::BucketUsage;
use crate::time_range::TimeRange;
use std::convert::TryFrom;
use std::ops::{Add, Div};

// S3 storage metrics are emitted once per day
const S3_METRIC_PERIOD: i64 = 86_400;

pub struct CloudWatchMetricsClient {
    client: CloudWatchClient,
}

#[async_trait]
pub trait Aggregate {
    /// Object count and size of a bucket over the range, averaged across the
    /// range's daily datapoints. None when the range holds no datapoints.
    async fn bucket_usage(
        &self,
        bucket_name: &str,
        time_range: &TimeRange,
    ) -> Result<Option<BucketUsage>, AuditorError>;
}

#[async_trait]
impl Aggregate for CloudWatchMetricsClient {
    async fn bucket_usage(
        &self,
        bucket_name: &str,
        time_range: &TimeRange,
    ) -> Result<Option<BucketUsage>, AuditorError> {
        let objects = self
            .metric_average("NumberOfObjects", "AllStorageTypes", bucket_name, time_range)
            .await?;
        let objects = match objects {
            Some(objects) => objects,
            None => return Ok(None),
        };

        let size_bytes = self
            .metric_average("BucketSizeBytes", "StandardStorage", bucket_name, time_range)
            .await?
            .unwrap_or(0.0);

        Ok(Some(BucketUsage {
            objects,
            size_bytes,
        }))
    }
}

impl CloudWatchMetricsClient {
    pub fn new(region: Region) -> Self {
        Self::new_with_client(CloudWatchClient::new(region))
    }

    pub fn new_with_client(client: CloudWatchClient) -> Self {
        CloudWatchMetricsClient { client }
    }

    async fn metric_average(
        &self,
        metric_name: &str,
        storage_type: &str,
        bucket_name: &str,
        time_range: &TimeRange,
    ) -> Result<Option<f64>, AuditorError> {
        let metrics = self
            .client
            .get_metric_statistics(GetMetricStatisticsInput {
                start_time: time_range.start_timestamp(),
                end_time: time_range.end_timestamp(),
                metric_name: metric_name.to_string(),
                namespace: "AWS/S3".to_string(),
                period: S3_METRIC_PERIOD,
                statistics: Some(vec!["Average".to_string()]),
                dimensions: Some(vec![
                    Dimension {
                        name: "BucketName".to_string(),
                        value: bucket_name.to_string(),
                    },
                    Dimension {
                        name: "StorageType".to_string(),
                        value: storage_type.to_string(),
                    },
                ]),
                ..Default::default()
            })
            .await?;
        Self::average_of(metrics.datapoints)
    }

    fn average_of(data_points: Option<Vec<Datapoint>>) -> Result<Option<f64>, AuditorError> {
        let data_points = data_points.map_or(vec![], |points| points);
        if data_points.is_empty() {
            return Ok(None);
        }
        let mut total = BigDecimal::from(0);
        let length = u32::try_from(data_points.len())?;
        let count = BigDecimal::from(length);
        for data_point in data_points {
            let average = data_point
                .average
                .map(|average| {
                    BigDecimal::from_f64(average).map_or(BigDecimal::from(0), |average| average)
                })
                .ok_or(AuditorError::NoneValue)?;
            total = total.add(average);
        }

        let decimal_average = total.div(count);
        let average = decimal_average
            .to_f64()
            .ok_or(AuditorError::ToPrimitive)?;
        Ok(Some(average))
    }
}
