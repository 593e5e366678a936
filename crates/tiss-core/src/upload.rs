//! Upload dialog state: the files picked for upload and one task per file.

use crate::error::AppError;
use crate::models::UploadTask;
use crate::validation::{SelectedFile, UploadPolicy};

#[derive(Debug, Clone)]
struct DialogEntry {
    file: SelectedFile,
    task: UploadTask,
}

/// Files selected for upload. Rejects bad selections before any network call
/// and refuses to close while an upload is running.
#[derive(Debug, Clone, Default)]
pub struct UploadDialog {
    policy: UploadPolicy,
    entries: Vec<DialogEntry>,
}

impl UploadDialog {
    pub fn new(policy: UploadPolicy) -> Self {
        Self {
            policy,
            entries: Vec::new(),
        }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Add a file to the selection after validating it.
    pub fn select(&mut self, file: SelectedFile) -> Result<(), AppError> {
        if self.entries.iter().any(|e| e.file.name == file.name) {
            return Err(AppError::DuplicateSelection(file.name));
        }
        self.policy.validate(&file)?;

        tracing::debug!(file_name = %file.name, size = file.size, "File selected for upload");
        let task = UploadTask::new(file.name.clone());
        self.entries.push(DialogEntry { file, task });
        Ok(())
    }

    /// Drop a file from the selection. Returns false if it was not selected.
    pub fn remove(&mut self, file_name: &str) -> Result<bool, AppError> {
        let Some(index) = self.entries.iter().position(|e| e.file.name == file_name) else {
            return Ok(false);
        };
        if self.entries[index].task.is_uploading() {
            return Err(AppError::UploadInProgress(file_name.to_string()));
        }
        self.entries.remove(index);
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn files(&self) -> impl Iterator<Item = &SelectedFile> {
        self.entries.iter().map(|e| &e.file)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &UploadTask> {
        self.entries.iter().map(|e| &e.task)
    }

    pub fn task(&self, file_name: &str) -> Option<&UploadTask> {
        self.entries
            .iter()
            .find(|e| e.file.name == file_name)
            .map(|e| &e.task)
    }

    pub fn task_mut(&mut self, file_name: &str) -> Option<&mut UploadTask> {
        self.entries
            .iter_mut()
            .find(|e| e.file.name == file_name)
            .map(|e| &mut e.task)
    }

    /// Files that have not been uploaded yet, in selection order.
    pub fn pending(&self) -> Vec<SelectedFile> {
        self.entries
            .iter()
            .filter(|e| !e.task.is_uploading() && !e.task.is_finished())
            .map(|e| e.file.clone())
            .collect()
    }

    pub fn is_uploading(&self) -> bool {
        self.entries.iter().any(|e| e.task.is_uploading())
    }

    pub fn can_close(&self) -> bool {
        !self.is_uploading()
    }

    /// Close the dialog, discarding every selection and task.
    pub fn close(&mut self) -> Result<(), AppError> {
        if let Some(entry) = self.entries.iter().find(|e| e.task.is_uploading()) {
            return Err(AppError::UploadInProgress(entry.file.name.clone()));
        }
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UploadStatus;

    fn zip(name: &str) -> SelectedFile {
        SelectedFile::new(name, "application/zip", 128)
    }

    #[test]
    fn rejects_duplicate_selection() {
        let mut dialog = UploadDialog::default();
        dialog.select(zip("lote.zip")).unwrap();
        let err = dialog.select(zip("lote.zip")).unwrap_err();
        assert!(matches!(err, AppError::DuplicateSelection(name) if name == "lote.zip"));
        assert_eq!(dialog.len(), 1);
    }

    #[test]
    fn rejects_invalid_files_without_adding_them() {
        let mut dialog = UploadDialog::new(UploadPolicy::with_max_file_size(100));
        assert!(dialog.select(SelectedFile::new("a.exe", "", 10)).is_err());
        assert!(dialog.select(zip("big.zip")).is_err());
        assert!(dialog.is_empty());
    }

    #[test]
    fn close_refused_while_uploading() {
        let mut dialog = UploadDialog::default();
        dialog.select(zip("lote.zip")).unwrap();
        dialog.task_mut("lote.zip").unwrap().start();

        assert!(!dialog.can_close());
        let err = dialog.close().unwrap_err();
        assert!(matches!(err, AppError::UploadInProgress(_)));
        assert!(matches!(
            dialog.remove("lote.zip"),
            Err(AppError::UploadInProgress(_))
        ));

        dialog.task_mut("lote.zip").unwrap().succeed("uploaded");
        assert!(dialog.can_close());
        dialog.close().unwrap();
        assert!(dialog.is_empty());
    }

    #[test]
    fn pending_excludes_finished_tasks() {
        let mut dialog = UploadDialog::default();
        dialog.select(zip("a.zip")).unwrap();
        dialog.select(zip("b.zip")).unwrap();
        dialog.task_mut("a.zip").unwrap().start();
        dialog.task_mut("a.zip").unwrap().fail("PUT failed");

        let pending: Vec<String> = dialog.pending().into_iter().map(|f| f.name).collect();
        assert_eq!(pending, vec!["b.zip"]);
        assert_eq!(dialog.task("a.zip").unwrap().status, UploadStatus::Error);
    }

    #[test]
    fn remove_unknown_file() {
        let mut dialog = UploadDialog::default();
        assert!(!dialog.remove("missing.zip").unwrap());
        dialog.select(zip("a.zip")).unwrap();
        assert!(dialog.remove("a.zip").unwrap());
        assert!(dialog.is_empty());
    }
}
