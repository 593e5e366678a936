//! Objects as returned verbatim by the gateway listing endpoint.

use serde::{Deserialize, Serialize};

/// A single object in the bucket. Produced by the listing call, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageObject {
    /// Full slash-delimited path of the object
    pub key: String,
    /// Last modification timestamp as sent by the gateway (usually RFC 3339)
    pub last_modified: String,
    #[serde(default)]
    pub etag: String,
    pub size: u64,
    #[serde(default)]
    pub storage_class: String,
}

/// One page of the bucket listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub objects: Vec<StorageObject>,
    #[serde(default)]
    pub is_truncated: bool,
    /// Marker for the next page. Empty or absent on the last page.
    #[serde(default)]
    pub next_marker: Option<String>,
}

impl ListResponse {
    /// Marker to request the following page, if the gateway reported one.
    pub fn continuation(&self) -> Option<&str> {
        if !self.is_truncated {
            return None;
        }
        self.next_marker.as_deref().filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_gateway_listing() {
        let body = r#"{
            "objects": [
                {
                    "key": "processed-tiss/recurso_glosa/2025/07/05/prd001_xmls.zip",
                    "last_modified": "2025-07-05T14:32:10Z",
                    "etag": "\"9b2cf535f27731c974343645a3985328\"",
                    "size": 52340,
                    "storage_class": "STANDARD"
                }
            ],
            "is_truncated": true,
            "next_marker": "processed-tiss/recurso_glosa/2025/07/05/prd001_xmls.zip"
        }"#;

        let response: ListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.objects.len(), 1);
        assert_eq!(response.objects[0].size, 52340);
        assert_eq!(response.objects[0].storage_class, "STANDARD");
        assert_eq!(
            response.continuation(),
            Some("processed-tiss/recurso_glosa/2025/07/05/prd001_xmls.zip")
        );
    }

    #[test]
    fn continuation_requires_truncation_and_marker() {
        let mut response = ListResponse {
            objects: vec![],
            is_truncated: false,
            next_marker: Some("abc".to_string()),
        };
        assert_eq!(response.continuation(), None);

        response.is_truncated = true;
        response.next_marker = Some(String::new());
        assert_eq!(response.continuation(), None);

        response.next_marker = None;
        assert_eq!(response.continuation(), None);
    }

    #[test]
    fn tolerates_null_marker() {
        let body = r#"{"objects": [], "is_truncated": false, "next_marker": null}"#;
        let response: ListResponse = serde_json::from_str(body).unwrap();
        assert!(response.objects.is_empty());
        assert_eq!(response.next_marker, None);
    }
}
