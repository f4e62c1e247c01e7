use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::config::StorageConfig;
use crate::core::error::{AppError, Result};

/// Simplified report record kept in the flat-file mirror.
///
/// Field names mirror the legacy backup format so existing tooling can keep
/// reading the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackupRecord {
    pub id: String,
    pub waktu: String,
    pub lokasi: String,
    pub gambar: String,
    pub hasil_ai: String,
    pub confidence: f64,
    pub priority_score: i32,
    pub status: String,
}

/// Best-effort JSON mirror of the reports table.
///
/// Diagnostic only: the relational store is the source of truth, and callers
/// must treat every error here as non-fatal. The whole array is rewritten on
/// each append; the file is not meant for concurrent writers.
pub struct BackupMirror {
    file: PathBuf,
}

impl BackupMirror {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            file: PathBuf::from(&config.backup_file),
        }
    }

    /// Append one record, rewriting the file. A corrupt or missing file is
    /// treated as an empty array rather than an error.
    pub async fn append(&self, record: BackupRecord) -> Result<()> {
        let mut records = self.load().await;
        records.push(record);

        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| AppError::Internal(format!("Failed to serialize backup: {}", e)))?;

        tokio::fs::write(&self.file, json).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to write backup file {}: {}",
                self.file.display(),
                e
            ))
        })?;

        Ok(())
    }

    pub async fn load(&self) -> Vec<BackupRecord> {
        match tokio::fs::read(&self.file).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> BackupRecord {
        BackupRecord {
            id: id.to_string(),
            waktu: "2024-03-05 14:30".to_string(),
            lokasi: "Jl. Sudirman".to_string(),
            gambar: "static/uploads/a.jpg".to_string(),
            hasil_ai: "Rusak Berat".to_string(),
            confidence: 87.3,
            priority_score: 3,
            status: "Menunggu".to_string(),
        }
    }

    fn mirror_in(dir: &tempfile::TempDir) -> BackupMirror {
        BackupMirror::new(&StorageConfig {
            upload_dir: dir.path().join("uploads").to_string_lossy().into_owned(),
            backup_file: dir.path().join("reports.json").to_string_lossy().into_owned(),
        })
    }

    #[tokio::test]
    async fn test_append_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mirror = mirror_in(&dir);

        mirror.append(record("a")).await.unwrap();
        mirror.append(record("b")).await.unwrap();

        let records = mirror.load().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "a");
        assert_eq!(records[1].id, "b");
        assert_eq!(records[0], record("a"));
    }

    #[tokio::test]
    async fn test_corrupt_file_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mirror = mirror_in(&dir);

        tokio::fs::write(dir.path().join("reports.json"), b"{not json")
            .await
            .unwrap();
        assert!(mirror.load().await.is_empty());

        // Append still succeeds, replacing the corrupt content
        mirror.append(record("fresh")).await.unwrap();
        assert_eq!(mirror.load().await.len(), 1);
    }
}
