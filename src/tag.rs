use serde::Serialize;

/// One resource tag, bridging the differently-shaped tag types of the IAM and
/// EC2 APIs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceTag {
    pub key: String,
    pub value: String,
}

impl ResourceTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        ResourceTag {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<rusoto_iam::Tag> for ResourceTag {
    fn from(tag: rusoto_iam::Tag) -> Self {
        ResourceTag {
            key: tag.key,
            value: tag.value,
        }
    }
}

impl From<ResourceTag> for rusoto_ec2::Tag {
    fn from(tag: ResourceTag) -> Self {
        rusoto_ec2::Tag {
            key: Some(tag.key),
            value: Some(tag.value),
        }
    }
}
