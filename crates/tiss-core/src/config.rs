//! Configuration module
//!
//! Client configuration for the storage gateway, the upload policy and local
//! settings. Values come from the environment (optionally via a `.env` file).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::models::presigned_upload::MAX_PRESIGN_EXPIRY_SECS;
use crate::validation::UploadPolicy;

const DEFAULT_API_BASE: &str =
    "https://gz4z111dwi.execute-api.us-east-1.amazonaws.com/production/tiss/api/storage";
const DEFAULT_BUCKET_NAME: &str = "prd-tiss";
const MAX_UPLOAD_SIZE_MB: u64 = 1024;
const PRESIGN_EXPIRY_SECS: u64 = 1800;
const UPLOAD_DEPARTMENT: &str = "billing";
const UPLOAD_VERSION: &str = "1.0";
const PROGRESS_TICK_MS: u64 = 200;
const SETTINGS_PATH: &str = ".tiss/settings.json";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Gateway base URL, without trailing slash
    pub api_base: String,
    pub bucket_name: String,
    pub max_upload_size_bytes: u64,
    /// Lifetime requested for presigned upload URLs
    pub presign_expiry_secs: u64,
    pub upload_department: String,
    pub upload_version: String,
    /// None keeps requests unbounded
    pub request_timeout: Option<Duration>,
    /// Follow `next_marker` when listing instead of showing the first page only
    pub follow_pagination: bool,
    pub progress_tick: Duration,
    pub settings_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            bucket_name: DEFAULT_BUCKET_NAME.to_string(),
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            presign_expiry_secs: PRESIGN_EXPIRY_SECS,
            upload_department: UPLOAD_DEPARTMENT.to_string(),
            upload_version: UPLOAD_VERSION.to_string(),
            request_timeout: None,
            follow_pagination: false,
            progress_tick: Duration::from_millis(PROGRESS_TICK_MS),
            settings_path: PathBuf::from(SETTINGS_PATH),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl ClientConfig {
    /// Gateway and bucket only; everything else keeps its default.
    pub fn new(api_base: impl Into<String>, bucket_name: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            bucket_name: bucket_name.into(),
            ..Default::default()
        }
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let api_base = env::var("TISS_API_BASE")
            .unwrap_or(defaults.api_base)
            .trim_end_matches('/')
            .to_string();

        let max_upload_size_mb = env::var("TISS_MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<u64>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let request_timeout = match env::var("TISS_REQUEST_TIMEOUT_SECS") {
            Ok(v) => {
                let secs = v
                    .parse::<u64>()
                    .map_err(|_| anyhow::anyhow!("TISS_REQUEST_TIMEOUT_SECS must be a number"))?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        let config = Self {
            api_base,
            bucket_name: env::var("TISS_BUCKET_NAME").unwrap_or(defaults.bucket_name),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            presign_expiry_secs: env::var("TISS_PRESIGN_EXPIRY_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(PRESIGN_EXPIRY_SECS),
            upload_department: env::var("TISS_UPLOAD_DEPARTMENT")
                .unwrap_or(defaults.upload_department),
            upload_version: env::var("TISS_UPLOAD_VERSION").unwrap_or(defaults.upload_version),
            request_timeout,
            follow_pagination: env::var("TISS_FOLLOW_PAGINATION")
                .map(|v| parse_bool(&v))
                .unwrap_or(false),
            progress_tick: env::var("TISS_PROGRESS_TICK_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.progress_tick),
            settings_path: env::var("TISS_SETTINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.settings_path),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.api_base.is_empty() {
            return Err(anyhow::anyhow!("TISS_API_BASE cannot be empty"));
        }
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "TISS_API_BASE must start with http:// or https://, got '{}'",
                self.api_base
            ));
        }
        if self.bucket_name.trim().is_empty() {
            return Err(anyhow::anyhow!("TISS_BUCKET_NAME cannot be empty"));
        }
        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!(
                "TISS_MAX_UPLOAD_SIZE_MB must be greater than zero"
            ));
        }
        if self.presign_expiry_secs == 0 || self.presign_expiry_secs > MAX_PRESIGN_EXPIRY_SECS {
            return Err(anyhow::anyhow!(
                "TISS_PRESIGN_EXPIRY_SECS must be between 1 and {}",
                MAX_PRESIGN_EXPIRY_SECS
            ));
        }
        Ok(())
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::with_max_file_size(self.max_upload_size_bytes)
    }
}
