//! HTTP client for the TISS storage gateway.
//!
//! Provides a minimal client that tags every call with correlation headers,
//! generic GET/POST/PUT helpers that classify failures by status, and domain
//! methods (list, download, presigned upload). The dashboard view-model and
//! the upload sequencer are built on top of it.

pub mod api;
pub mod dashboard;
pub mod upload;

use anyhow::{Context, Result};
use bytes::Bytes;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tiss_core::{AppError, ClientConfig, UploadPolicy};
use uuid::Uuid;

pub const JOURNEY_HEADER: &str = "X-Request-Journey";
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Journey labels sent in `X-Request-Journey`, one per operation.
pub mod journey {
    pub const LIST_FILES: &str = "list-bucket-files";
    pub const DOWNLOAD_FILE: &str = "download-file";
    pub const PRESIGNED_URL: &str = "generate-presigned-url";
}

/// Metadata and lifetime attached to presigned upload requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadOptions {
    pub expires_secs: u64,
    pub department: String,
    /// Hostname of this machine
    pub author: String,
    pub version: String,
}

impl UploadOptions {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            expires_secs: config.presign_expiry_secs,
            department: config.upload_department.clone(),
            author: local_hostname(),
            version: config.upload_version.clone(),
        }
    }
}

fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.to_str().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Map a transport failure to the error taxonomy. No response means status 0.
fn transport_error(err: reqwest::Error) -> AppError {
    let status = err.status().map(|s| s.as_u16()).unwrap_or(0);
    AppError::from_status(status, err.to_string())
}

/// HTTP client for the storage gateway, bound to one bucket.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    api_base: String,
    bucket_name: String,
    upload: UploadOptions,
    policy: UploadPolicy,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bucket_name: config.bucket_name.clone(),
            upload: UploadOptions::from_config(config),
            policy: config.upload_policy(),
        })
    }

    /// Create client from environment: TISS_API_BASE, TISS_BUCKET_NAME and friends.
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env().context("Invalid client configuration")?;
        Self::new(&config)
    }

    /// Replace the presigned upload options (author, department, version, expiry).
    pub fn with_upload_options(mut self, upload: UploadOptions) -> Self {
        self.upload = upload;
        self
    }

    /// Replace the policy files must satisfy before an upload is attempted.
    pub fn with_upload_policy(mut self, policy: UploadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn upload_options(&self) -> &UploadOptions {
        &self.upload
    }

    pub fn upload_policy(&self) -> &UploadPolicy {
        &self.policy
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Attach JSON content type and the correlation headers for `journey`.
    fn correlate(&self, request: RequestBuilder, journey: &str) -> RequestBuilder {
        let request_id = Uuid::new_v4().to_string();
        tracing::debug!(journey, request_id = %request_id, "Dispatching gateway request");
        request
            .header("Content-Type", "application/json")
            .header(JOURNEY_HEADER, journey)
            .header(REQUEST_ID_HEADER, request_id)
    }

    async fn send(request: RequestBuilder) -> Result<Response, AppError> {
        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::from_status(status.as_u16(), error_text));
        }

        Ok(response)
    }

    /// GET request with query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        journey: &str,
    ) -> Result<T, AppError> {
        let url = self.build_url(path);
        let mut request = self.correlate(self.client.get(&url), journey);

        if !query.is_empty() {
            request = request.query(query);
        }

        let response = Self::send(request).await?;
        response
            .json()
            .await
            .map_err(|e| AppError::InvalidResponse(format!("Failed to parse response as JSON: {}", e)))
    }

    /// GET a binary body from an absolute URL.
    pub async fn get_bytes(&self, url: &str, journey: &str) -> Result<Bytes, AppError> {
        let request = self.correlate(self.client.get(url), journey);
        let response = Self::send(request).await?;
        response.bytes().await.map_err(transport_error)
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        journey: &str,
    ) -> Result<T, AppError> {
        let url = self.build_url(path);
        let request = self.correlate(self.client.post(&url).json(body), journey);

        let response = Self::send(request).await?;
        response
            .json()
            .await
            .map_err(|e| AppError::InvalidResponse(format!("Failed to parse response as JSON: {}", e)))
    }

    /// PUT raw bytes to an absolute (presigned) URL with only a Content-Type header.
    /// Anything other than 200 is a failure.
    pub async fn put_raw(
        &self,
        url: &str,
        content_type: &str,
        body: Bytes,
    ) -> Result<(), AppError> {
        let response = self
            .client
            .put(url)
            .header("Content-Type", content_type)
            .body(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::from_status(
                status.as_u16(),
                format!("Upload returned {}: {}", status, error_text),
            ));
        }

        Ok(())
    }

    /// Raw client for custom requests.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

// Re-export domain types for convenience.
pub use dashboard::{Dashboard, UploadSummary};
pub use tiss_core::models::{ListResponse, PresignedUploadGrant, StorageObject};
pub use upload::{LocalFile, UploadSequencer};
