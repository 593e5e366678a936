//! Domain models for the storage gateway and the dashboard view.

pub mod display;
pub mod presigned_upload;
pub mod storage_object;
pub mod upload_task;

pub use display::{Category, DisplayRow, FileType};
pub use presigned_upload::{PresignedUploadGrant, PresignedUploadRequest, UploadMetadata};
pub use storage_object::{ListResponse, StorageObject};
pub use upload_task::{UploadStatus, UploadTask};
