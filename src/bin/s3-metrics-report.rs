use anyhow::Result;
use log::warn;
use rusoto_core::Region;

use std::io::{self, Write};
use std::str::FromStr;

use subnet_auditor::cloud_watch_metrics_client::{Aggregate, CloudWatchMetricsClient};
use subnet_auditor::s3_bucket_client::{ListRegionBuckets, S3BucketClient};
use subnet_auditor::time_range::TimeRange;

const DEFAULT_START_DATE: &str = "2020-10-01";
const DEFAULT_END_DATE: &str = "2020-10-02";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let region_name = prompt("Please enter the AWS region name: ")?;
    let region = Region::from_str(region_name.trim()).unwrap_or(Region::UsEast1);
    println!("You entered: {}", region.name());

    let start_date = prompt("Please enter the start date in YYYY-MM-DD format: ")?;
    println!("You entered: {}", start_date.trim());
    let end_date = prompt("Please enter the end date in YYYY-MM-DD format: ")?;
    println!("You entered: {}", end_date.trim());
    println!();

    let time_range = match TimeRange::parse(&start_date, &end_date) {
        Ok(time_range) => time_range,
        Err(err) => {
            warn!(
                "Invalid date range ({}), using {} through {}",
                err, DEFAULT_START_DATE, DEFAULT_END_DATE
            );
            TimeRange::parse(DEFAULT_START_DATE, DEFAULT_END_DATE)?
        }
    };

    let bucket_client = S3BucketClient::new(region.clone());
    let metrics_client = CloudWatchMetricsClient::new(region.clone());

    let buckets = bucket_client.buckets_in_region(&region).await?;
    if buckets.is_empty() {
        println!("No buckets found");
        return Ok(());
    }

    for bucket in buckets {
        match metrics_client.bucket_usage(&bucket, &time_range).await? {
            Some(usage) => println!(
                "Bucket: {} has total size: {:.0} bytes & contains {:.0} objects.",
                bucket, usage.size_bytes, usage.objects
            ),
            None => println!(
                "Bucket: {} contains no objects during specified date range.",
                bucket
            ),
        }
    }
    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}
