//! Upload sequencing with cosmetic progress.
//!
//! The transport reports no transfer progress, so while the presigned upload
//! runs a ticker nudges the task's progress toward [`PROGRESS_CEILING`]. The
//! ticker is dropped as soon as the upload resolves and the task is forced to
//! 100%.

use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use tiss_core::models::{PresignedUploadGrant, UploadTask};
use tiss_core::validation::{SelectedFile, UploadPolicy};
use tiss_core::{AppError, ErrorMetadata};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::ApiClient;

pub const PROGRESS_CEILING: u8 = 90;
pub const PROGRESS_STEP: u8 = 10;

/// A local file read into memory for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl LocalFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Read a file from disk, guessing its content type from the extension.
    ///
    /// The file is checked against `policy` using its metadata, so a rejected
    /// file is never read.
    pub async fn from_path(path: &Path, policy: &UploadPolicy) -> Result<Self, AppError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::InvalidInput(format!("Invalid path: {}", path.display())))?
            .to_string();

        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(AppError::InvalidInput(format!(
                "Not a file: {}",
                path.display()
            )));
        }

        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();
        policy.validate(&SelectedFile::new(
            name.clone(),
            content_type.clone(),
            metadata.len(),
        ))?;

        let data = tokio::fs::read(path).await?;

        Ok(Self {
            name,
            content_type,
            data: Bytes::from(data),
        })
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Description used for validation and dialog selection.
    pub fn selected(&self) -> SelectedFile {
        SelectedFile::new(self.name.clone(), self.content_type.clone(), self.size())
    }
}

/// Runs one upload at a time against a client, driving an [`UploadTask`].
pub struct UploadSequencer<'a> {
    client: &'a ApiClient,
    tick: Duration,
    step: u8,
    ceiling: u8,
}

impl<'a> UploadSequencer<'a> {
    pub fn new(client: &'a ApiClient, tick: Duration) -> Self {
        Self {
            client,
            tick,
            step: PROGRESS_STEP,
            ceiling: PROGRESS_CEILING,
        }
    }

    pub fn with_step(mut self, step: u8) -> Self {
        self.step = step;
        self
    }

    /// Upload `file`, reporting every task change through `on_progress`.
    ///
    /// The task ends in `Success` or `Error` with progress 100; the returned
    /// result carries the grant or the failure.
    pub async fn run<F>(
        &self,
        file: &LocalFile,
        task: &mut UploadTask,
        mut on_progress: F,
    ) -> Result<PresignedUploadGrant, AppError>
    where
        F: FnMut(&UploadTask),
    {
        task.start();
        on_progress(task);

        let upload = self.client.upload_file(file);
        tokio::pin!(upload);

        let mut ticker = interval_at(Instant::now() + self.tick, self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let result = loop {
            tokio::select! {
                result = &mut upload => break result,
                _ = ticker.tick() => {
                    if task.advance(self.step, self.ceiling) {
                        on_progress(task);
                    }
                }
            }
        };

        match &result {
            Ok(_) => task.succeed(format!("{} uploaded successfully", file.name)),
            Err(e) => {
                tracing::warn!(file_name = %file.name, error = %e, "Upload failed");
                task.fail(e.client_message());
            }
        }
        on_progress(task);

        result
    }
}
