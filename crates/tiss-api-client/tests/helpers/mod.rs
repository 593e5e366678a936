//! Test helpers: mock gateway fixtures and clients pointed at them.
//!
//! Run from workspace root: `cargo test -p tiss-api-client`.

use std::time::Duration;

use mockito::ServerGuard;
use serde_json::{json, Value};
use tiss_api_client::{ApiClient, UploadOptions};
use tiss_core::ClientConfig;

pub const BUCKET: &str = "prd-tiss";
pub const BASE_PATH: &str = "/production/tiss/api/storage";
pub const REQUEST_ID_PATTERN: &str =
    r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";

/// Gateway path below the mock server root.
pub fn api_path(path: &str) -> String {
    format!("{}{}", BASE_PATH, path)
}

pub fn test_config(server: &ServerGuard) -> ClientConfig {
    let mut config = ClientConfig::new(format!("{}{}", server.url(), BASE_PATH), BUCKET);
    config.progress_tick = Duration::from_millis(5);
    config
}

pub fn test_client(server: &ServerGuard) -> ApiClient {
    ApiClient::new(&test_config(server))
        .expect("client")
        .with_upload_options(UploadOptions {
            expires_secs: 1800,
            department: "billing".to_string(),
            author: "test-host".to_string(),
            version: "1.0".to_string(),
        })
}

pub fn object(key: &str, size: u64, last_modified: &str) -> Value {
    json!({
        "key": key,
        "last_modified": last_modified,
        "etag": "\"d41d8cd98f00b204e9800998ecf8427e\"",
        "size": size,
        "storage_class": "STANDARD"
    })
}

pub fn listing(objects: Vec<Value>, next_marker: Option<&str>) -> String {
    json!({
        "objects": objects,
        "is_truncated": next_marker.is_some(),
        "next_marker": next_marker.unwrap_or("")
    })
    .to_string()
}

pub fn sample_listing() -> String {
    listing(
        vec![
            object("incoming/", 0, "2025-07-01T09:00:00Z"),
            object(
                "processed-tiss/recurso_glosa/2025/07/05/prd001_xmls.zip",
                52340,
                "2025-07-05T14:32:10Z",
            ),
            object(
                "processed-tiss/demonstrativo/2025/07/06/pagamento.xlsx",
                2048,
                "2025-07-06T08:00:00Z",
            ),
            object("incoming/lote_julho.zip", 1024, "2025-07-07T10:15:00Z"),
            object("incoming/guia.xml", 512, "2025-07-03T11:00:00Z"),
        ],
        None,
    )
}
