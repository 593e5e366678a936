//! Upload validation policy
//!
//! Files are checked locally before any request is made: type (by MIME type
//! or by extension), size ceiling and emptiness.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::path::file_extension;

/// Default upload ceiling (1 GB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["xlsx", "xls", "zip", "xml", "pdf"];

pub const DEFAULT_ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
    "application/zip",
    "application/x-zip-compressed",
    "application/xml",
    "text/xml",
    "application/pdf",
];

/// A local file picked for upload, described without its contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub size: u64,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            size,
        }
    }
}

/// Normalize MIME type by stripping parameters (e.g. "text/xml; charset=utf-8" -> "text/xml").
fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    max_file_size: u64,
    allowed_extensions: Vec<String>,
    allowed_content_types: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::with_max_file_size(DEFAULT_MAX_FILE_SIZE)
    }
}

impl UploadPolicy {
    pub fn new(
        max_file_size: u64,
        allowed_extensions: Vec<String>,
        allowed_content_types: Vec<String>,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            allowed_content_types: allowed_content_types
                .into_iter()
                .map(|ct| ct.to_lowercase())
                .collect(),
        }
    }

    /// Default type allow-list with a custom size ceiling.
    pub fn with_max_file_size(max_file_size: u64) -> Self {
        Self::new(
            max_file_size,
            DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            DEFAULT_ALLOWED_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Accepted when either the MIME type or the extension is allowed, so an
    /// empty or generic MIME type does not reject a well-named file.
    pub fn is_valid_file_type(&self, file_name: &str, content_type: &str) -> bool {
        let mime = normalize_mime_type(content_type);
        if !mime.is_empty() && self.allowed_content_types.contains(&mime) {
            return true;
        }

        file_extension(file_name)
            .map(|ext| self.allowed_extensions.contains(&ext))
            .unwrap_or(false)
    }

    pub fn is_valid_file_size(&self, size: u64) -> bool {
        size <= self.max_file_size
    }

    pub fn validate(&self, file: &SelectedFile) -> Result<(), AppError> {
        if !self.is_valid_file_type(&file.name, &file.content_type) {
            return Err(AppError::InvalidFileType(file.name.clone()));
        }

        if file.size == 0 {
            return Err(AppError::EmptyFile(file.name.clone()));
        }

        if !self.is_valid_file_size(file.size) {
            return Err(AppError::FileTooLarge {
                file_name: file.name.clone(),
                size: file.size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }
}
