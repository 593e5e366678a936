//! Error types module
//!
//! All failures surfaced to a user action are unified under [`AppError`].
//! Gateway failures are classified by HTTP status only (status `0` stands for
//! a transport failure where no response was received). Upload validation
//! failures are raised before any network call is made.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for client-side problems like missing objects
    Warn,
    /// Error level - for gateway and transport failures
    Error,
}

/// Describes how an error is presented to the person who triggered it.
pub trait ErrorMetadata {
    /// HTTP status associated with the error, `0` when no response was received
    fn status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "NETWORK_ERROR")
    fn error_code(&self) -> &'static str;

    /// Human-readable message shown as a notification
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Gateway error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },

    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    #[error("File too large: {file_name} is {size} bytes (max: {max} bytes)")]
    FileTooLarge {
        file_name: String,
        size: u64,
        max: u64,
    },

    #[error("Empty file: {0}")]
    EmptyFile(String),

    #[error("File already selected: {0}")]
    DuplicateSelection(String),

    #[error("Upload in progress: {0}")]
    UploadInProgress(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Classify a failed gateway response by status code.
    ///
    /// `detail` is the response body or transport message; it is kept for
    /// logging and only shown to the user when the status has no fixed message.
    pub fn from_status(status: u16, detail: impl Into<String>) -> Self {
        let message = detail.into();
        match status {
            0 => AppError::Network(message),
            401 => AppError::Unauthorized(message),
            403 => AppError::Forbidden(message),
            404 => AppError::NotFound(message),
            s if s >= 500 => AppError::Server { status: s, message },
            s => AppError::Http { status: s, message },
        }
    }

    /// True for errors raised by local validation before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidFileType(_)
                | AppError::FileTooLarge { .. }
                | AppError::EmptyFile(_)
                | AppError::DuplicateSelection(_)
                | AppError::InvalidInput(_)
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidResponse(format!("JSON parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

/// Static metadata for each variant: (status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::Network(_) => (0, "NETWORK_ERROR", LogLevel::Error),
        AppError::Unauthorized(_) => (401, "UNAUTHORIZED", LogLevel::Warn),
        AppError::Forbidden(_) => (403, "FORBIDDEN", LogLevel::Warn),
        AppError::NotFound(_) => (404, "NOT_FOUND", LogLevel::Warn),
        AppError::Server { status, .. } => (*status, "GATEWAY_ERROR", LogLevel::Error),
        AppError::Http { status, .. } => (*status, "REQUEST_FAILED", LogLevel::Warn),
        AppError::InvalidFileType(_) => (400, "INVALID_FILE_TYPE", LogLevel::Debug),
        AppError::FileTooLarge { .. } => (413, "FILE_TOO_LARGE", LogLevel::Debug),
        AppError::EmptyFile(_) => (400, "EMPTY_FILE", LogLevel::Debug),
        AppError::DuplicateSelection(_) => (409, "DUPLICATE_SELECTION", LogLevel::Debug),
        AppError::UploadInProgress(_) => (409, "UPLOAD_IN_PROGRESS", LogLevel::Debug),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", LogLevel::Debug),
        AppError::InvalidResponse(_) => (502, "INVALID_RESPONSE", LogLevel::Error),
        AppError::Io(_) => (500, "IO_ERROR", LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Network(_) => {
                "Network error. Check connectivity to the storage gateway".to_string()
            }
            AppError::Unauthorized(_) => {
                "Authentication error. Check the request headers".to_string()
            }
            AppError::Forbidden(_) => "Access denied. Check the API permissions".to_string(),
            AppError::NotFound(_) => "Endpoint not found. Check the API URL".to_string(),
            AppError::Server { status, .. } => format!("Internal server error ({})", status),
            AppError::Http { message, .. } => message.clone(),
            AppError::InvalidFileType(name) => format!(
                "{} is not an accepted file type. Allowed: .xlsx, .xls, .zip, .xml, .pdf",
                name
            ),
            AppError::FileTooLarge { file_name, max, .. } => format!(
                "{} exceeds the maximum upload size of {} MB",
                file_name,
                max / 1024 / 1024
            ),
            AppError::EmptyFile(name) => format!("{} is empty", name),
            AppError::DuplicateSelection(name) => format!("{} is already selected", name),
            AppError::UploadInProgress(_) => {
                "Wait for the current upload to finish".to_string()
            }
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::InvalidResponse(_) => {
                "The storage gateway returned an unexpected response".to_string()
            }
            AppError::Io(err) => format!("Local file error: {}", err),
            AppError::Internal(_) => "Internal error".to_string(),
        }
    }
}
