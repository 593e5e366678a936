//! TISS Core Library
//!
//! This crate provides the domain models, key parsing, formatting, filtering,
//! upload policy, settings and configuration shared by the storage client and
//! the command-line front end. Nothing in here performs network I/O.

pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod models;
pub mod path;
pub mod settings;
pub mod upload;
pub mod validation;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use filter::{apply_filters, build_rows, DashboardStats, FilterState};
pub use format::{format_date, format_size};
pub use models::{
    Category, DisplayRow, FileType, ListResponse, PresignedUploadGrant, PresignedUploadRequest,
    StorageObject, UploadMetadata, UploadStatus, UploadTask,
};
pub use path::{parse_key, ParsedKey};
pub use settings::Settings;
pub use upload::UploadDialog;
pub use validation::{SelectedFile, UploadPolicy};
