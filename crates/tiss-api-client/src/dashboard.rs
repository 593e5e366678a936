//! Dashboard view-model.
//!
//! Holds the current rows, aggregates and filter inputs, and sequences the
//! client calls behind them. A failed refresh leaves the previous rows in
//! place; the caller decides how to surface the error.

use std::time::Duration;

use bytes::Bytes;
use tiss_core::filter::{apply_filters, build_rows, DashboardStats, FilterState};
use tiss_core::models::{Category, DisplayRow, FileType, UploadTask};
use tiss_core::upload::UploadDialog;
use tiss_core::{AppError, ClientConfig, ErrorMetadata};

use crate::upload::{LocalFile, UploadSequencer};
use crate::ApiClient;

/// Outcome of uploading the pending files of a dialog.
#[derive(Debug, Default)]
pub struct UploadSummary {
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, AppError)>,
}

impl UploadSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct Dashboard {
    client: ApiClient,
    follow_pagination: bool,
    progress_tick: Duration,
    rows: Vec<DisplayRow>,
    stats: DashboardStats,
    filter: FilterState,
    truncated: bool,
}

impl Dashboard {
    pub fn new(client: ApiClient, config: &ClientConfig) -> Self {
        Self {
            client,
            follow_pagination: config.follow_pagination,
            progress_tick: config.progress_tick,
            rows: Vec::new(),
            stats: DashboardStats::from_rows(&[]),
            filter: FilterState::default(),
            truncated: false,
        }
    }

    pub fn with_follow_pagination(mut self, follow: bool) -> Self {
        self.follow_pagination = follow;
        self
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Re-list the bucket and rebuild rows and aggregates. Returns the row count.
    pub async fn refresh(&mut self) -> Result<usize, AppError> {
        let listing = if self.follow_pagination {
            self.client.list_all_files().await
        } else {
            self.client.list_files().await
        };

        let listing = match listing {
            Ok(listing) => listing,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    status = e.status_code(),
                    "Failed to load files; keeping previous listing"
                );
                return Err(e);
            }
        };

        self.rows = build_rows(&listing.objects);
        self.stats = DashboardStats::from_rows(&self.rows);
        self.truncated = listing.is_truncated;

        if self.truncated {
            tracing::info!(
                next_marker = ?listing.next_marker,
                "Listing truncated; more objects exist than were fetched"
            );
        }
        tracing::info!(files = self.rows.len(), "Files loaded");
        Ok(self.rows.len())
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    /// True when the last listing had more pages that were not fetched.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.filter.category = category;
    }

    pub fn set_file_type(&mut self, file_type: Option<FileType>) {
        self.filter.file_type = file_type;
    }

    /// Rows matching the current filter, recomputed on every call.
    pub fn visible_rows(&self) -> Vec<&DisplayRow> {
        apply_filters(&self.rows, &self.filter)
    }

    pub fn download_url(&self, row: &DisplayRow) -> String {
        self.client.download_url(&row.source_key)
    }

    pub async fn download(&self, row: &DisplayRow) -> Result<Bytes, AppError> {
        self.client.download_file(&row.source_key).await
    }

    /// Upload a single file, refreshing the listing on success.
    ///
    /// Files the upload policy rejects fail before any request is made.
    pub async fn upload<F>(
        &mut self,
        file: &LocalFile,
        on_progress: F,
    ) -> Result<UploadTask, AppError>
    where
        F: FnMut(&UploadTask),
    {
        self.client.upload_policy().validate(&file.selected())?;

        let mut task = UploadTask::new(file.name.clone());
        UploadSequencer::new(&self.client, self.progress_tick)
            .run(file, &mut task, on_progress)
            .await?;

        if let Err(e) = self.refresh().await {
            tracing::warn!(error = %e, "Listing refresh after upload failed");
        }
        Ok(task)
    }

    /// Upload every pending file of `dialog`, one after another.
    ///
    /// `files` supplies the contents for the dialog's selections by name. The
    /// listing is refreshed after each successful upload; a failed refresh is
    /// logged and does not turn the upload into a failure.
    pub async fn upload_pending<F>(
        &mut self,
        dialog: &mut UploadDialog,
        files: &[LocalFile],
        mut on_progress: F,
    ) -> UploadSummary
    where
        F: FnMut(&UploadTask),
    {
        let mut summary = UploadSummary::default();

        for selected in dialog.pending() {
            let Some(file) = files.iter().find(|f| f.name == selected.name) else {
                let err = AppError::Internal(format!("No contents for {}", selected.name));
                if let Some(task) = dialog.task_mut(&selected.name) {
                    task.start();
                    task.fail(err.client_message());
                    on_progress(task);
                }
                summary.failed.push((selected.name, err));
                continue;
            };
            let Some(task) = dialog.task_mut(&selected.name) else {
                continue;
            };

            let result = UploadSequencer::new(&self.client, self.progress_tick)
                .run(file, task, &mut on_progress)
                .await;

            match result {
                Ok(_) => {
                    summary.succeeded.push(selected.name);
                    if let Err(e) = self.refresh().await {
                        tracing::warn!(error = %e, "Listing refresh after upload failed");
                    }
                }
                Err(e) => summary.failed.push((selected.name, e)),
            }
        }

        summary
    }
}
