//! Local storage for uploaded images and the JSON backup mirror

mod backup_mirror;
mod upload_store;

pub use backup_mirror::{BackupMirror, BackupRecord};
pub use upload_store::UploadStore;
