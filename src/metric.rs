/// CloudWatch storage metrics of one S3 bucket over a reporting range.
#[derive(Debug, PartialEq)]
pub struct BucketUsage {
    pub objects: f64,
    pub size_bytes: f64,
}
