use serde::{Deserialize, Serialize};
use validator::Validate;

/// Longest presigned URL lifetime the gateway accepts (7 days)
pub const MAX_PRESIGN_EXPIRY_SECS: u64 = 604_800;

/// Fixed metadata attached to every uploaded object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UploadMetadata {
    #[validate(length(
        min = 1,
        max = 128,
        message = "Department must be between 1 and 128 characters"
    ))]
    pub department: String,
    /// Hostname of the machine that performed the upload
    #[validate(length(
        min = 1,
        max = 255,
        message = "Author must be between 1 and 255 characters"
    ))]
    pub author: String,
    #[validate(length(
        min = 1,
        max = 32,
        message = "Version must be between 1 and 32 characters"
    ))]
    pub version: String,
}

/// Request to generate a presigned URL for a direct upload to the bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct PresignedUploadRequest {
    #[validate(length(
        min = 1,
        max = 63,
        message = "Bucket name must be between 1 and 63 characters"
    ))]
    pub bucket_name: String,
    /// Target key. The gateway prefixes `incoming/` when needed.
    #[validate(length(
        min = 1,
        max = 1024,
        message = "Key must be between 1 and 1024 characters"
    ))]
    pub key: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Content type must be between 1 and 255 characters"
    ))]
    pub content_type: String,
    /// URL lifetime in seconds
    #[validate(range(
        min = 1,
        max = 604800,
        message = "Expiry must be between 1 second and 7 days"
    ))]
    pub expires: u64,
    #[validate(nested)]
    pub metadata: UploadMetadata,
}

/// Presigned URL returned by the gateway. Single use, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedUploadGrant {
    pub upload_url: String,
    #[serde(default)]
    pub bucket_name: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PresignedUploadRequest {
        PresignedUploadRequest {
            bucket_name: "prd-tiss".to_string(),
            key: "lote_julho.zip".to_string(),
            content_type: "application/zip".to_string(),
            expires: 1800,
            metadata: UploadMetadata {
                department: "billing".to_string(),
                author: "workstation-01".to_string(),
                version: "1.0".to_string(),
            },
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn rejects_empty_key_and_zero_expiry() {
        let mut req = request();
        req.key = String::new();
        assert!(req.validate().is_err());

        let mut req = request();
        req.expires = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_empty_nested_metadata() {
        let mut req = request();
        req.metadata.author = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn serializes_wire_shape() {
        let value = serde_json::to_value(request()).unwrap();
        assert_eq!(value["bucket_name"], "prd-tiss");
        assert_eq!(value["expires"], 1800);
        assert_eq!(value["metadata"]["author"], "workstation-01");
    }

    #[test]
    fn grant_tolerates_missing_optional_fields() {
        let grant: PresignedUploadGrant =
            serde_json::from_str(r#"{"upload_url": "https://s3.example/put?sig=1"}"#).unwrap();
        assert_eq!(grant.upload_url, "https://s3.example/put?sig=1");
        assert!(grant.key.is_empty());
        assert_eq!(grant.expires_at, None);
    }
}
