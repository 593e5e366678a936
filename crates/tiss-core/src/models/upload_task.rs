//! Per-file upload state.
//!
//! A task moves `Idle -> Uploading -> {Success, Error}`. Progress is cosmetic
//! while uploading: it creeps toward a ceiling and only reaches 100 once the
//! upload resolves.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Idle,
    Uploading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTask {
    pub file_name: String,
    pub progress_percent: u8,
    pub status: UploadStatus,
    pub message: Option<String>,
}

impl UploadTask {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            progress_percent: 0,
            status: UploadStatus::Idle,
            message: None,
        }
    }

    pub fn start(&mut self) {
        self.status = UploadStatus::Uploading;
        self.progress_percent = 0;
        self.message = None;
    }

    /// Bump progress by `step`, never past `ceiling`. Returns true if the value changed.
    pub fn advance(&mut self, step: u8, ceiling: u8) -> bool {
        if self.status != UploadStatus::Uploading {
            return false;
        }
        let ceiling = ceiling.min(100);
        let next = self.progress_percent.saturating_add(step).min(ceiling);
        if next <= self.progress_percent {
            return false;
        }
        self.progress_percent = next;
        true
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.status = UploadStatus::Success;
        self.progress_percent = 100;
        self.message = Some(message.into());
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = UploadStatus::Error;
        self.progress_percent = 100;
        self.message = Some(message.into());
    }

    pub fn is_uploading(&self) -> bool {
        self.status == UploadStatus::Uploading
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, UploadStatus::Success | UploadStatus::Error)
    }
}
