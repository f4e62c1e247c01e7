use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::core::config::StorageConfig;
use crate::core::error::{AppError, Result};

/// Stores uploaded report images on local disk.
///
/// The report id doubles as the stored filename: upload timestamp plus the
/// sanitized original filename. Timestamp-first ids keep collisions out
/// without any coordination.
pub struct UploadStore {
    upload_dir: PathBuf,
}

impl UploadStore {
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        let upload_dir = PathBuf::from(&config.upload_dir);
        tokio::fs::create_dir_all(&upload_dir).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to create upload directory {}: {}",
                upload_dir.display(),
                e
            ))
        })?;

        Ok(Self { upload_dir })
    }

    /// Derive the report id from the upload time and the original filename.
    pub fn derive_report_id(reported_at: DateTime<Utc>, original_filename: &str) -> String {
        format!(
            "{}_{}",
            reported_at.format("%Y%m%d_%H%M%S"),
            sanitize_filename(original_filename)
        )
    }

    /// Write the image bytes under the derived id and return the stored path.
    pub async fn save(&self, report_id: &str, data: &[u8]) -> Result<String> {
        let path = self.upload_dir.join(report_id);
        tokio::fs::write(&path, data).await.map_err(|e| {
            AppError::Internal(format!("Failed to store image {}: {}", path.display(), e))
        })?;

        tracing::debug!("Stored upload at {}", path.display());
        Ok(path.to_string_lossy().into_owned())
    }

    pub fn path_for(&self, report_id: &str) -> PathBuf {
        self.upload_dir.join(report_id)
    }

    /// Remove a stored upload. A file that is already gone is not an error.
    pub async fn discard(&self, report_id: &str) -> Result<()> {
        let path = self.upload_dir.join(report_id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Internal(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// Keep only filesystem-safe characters; anything else becomes '_'.
fn sanitize_filename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_report_id_is_timestamp_plus_filename() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 9).unwrap();
        assert_eq!(
            UploadStore::derive_report_id(at, "jalan rusak.jpg"),
            "20240305_143009_jalan_rusak.jpg"
        );
    }

    #[test]
    fn test_sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("foto (1).png"), "foto__1_.png");
        assert_eq!(sanitize_filename(""), "upload");
    }

    #[tokio::test]
    async fn test_save_writes_under_upload_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(&StorageConfig {
            upload_dir: dir.path().join("uploads").to_string_lossy().into_owned(),
            backup_file: dir.path().join("reports.json").to_string_lossy().into_owned(),
        })
        .await
        .unwrap();

        let path = store.save("20240305_143009_a.jpg", b"jpegbytes").await.unwrap();
        let written = tokio::fs::read(&path).await.unwrap();
        assert_eq!(written, b"jpegbytes");
        assert_eq!(
            store.path_for("20240305_143009_a.jpg").to_string_lossy(),
            path
        );
    }

    #[tokio::test]
    async fn test_discard_removes_file_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(&StorageConfig {
            upload_dir: dir.path().join("uploads").to_string_lossy().into_owned(),
            backup_file: dir.path().join("reports.json").to_string_lossy().into_owned(),
        })
        .await
        .unwrap();

        store.save("20240305_143009_a.jpg", b"jpegbytes").await.unwrap();
        store.discard("20240305_143009_a.jpg").await.unwrap();
        assert!(!store.path_for("20240305_143009_a.jpg").exists());

        store.discard("never-stored.jpg").await.unwrap();
    }
}
