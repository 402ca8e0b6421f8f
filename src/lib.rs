pub mod cloud_watch_metrics_client;
pub mod cloudtrail_event;
pub mod compliance_client;
pub mod config_event;
pub mod ec2_instance_client;
pub mod error;
pub mod iam_tag_client;
pub mod load_balancer_client;
pub mod metric;
pub mod public_subnet_client;
pub mod resource_tag_client;
pub mod s3_bucket_client;
pub mod ssm_parameter_client;
pub mod subnet_classifier;
pub mod tag;
pub mod time_range;
