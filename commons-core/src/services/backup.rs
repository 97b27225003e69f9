//! Backup service - data directory snapshots
//!
//! Creates ZIP archives containing the two persisted collections and the
//! settings file, for operator-grade snapshots of the portal state.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Files to include in a backup (relative to the data dir)
const BACKUP_FILES: &[&str] = &["users.json", "proposals.json", "settings.json"];

/// Metadata of one backup archive
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupMetadata {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
}

/// Backup management for the portal data directory
pub struct BackupService {
    data_dir: PathBuf,
}

impl BackupService {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn backups_dir(&self) -> PathBuf {
        self.data_dir.join("backups")
    }

    /// Create a ZIP archive of the persisted state
    pub fn create(&self, max_backups: Option<usize>) -> Result<BackupMetadata> {
        let backups_dir = self.backups_dir();
        fs::create_dir_all(&backups_dir)?;

        let now = Utc::now();
        let timestamp = now.format("%Y-%m-%dT%H-%M-%S");
        let micros = now.timestamp_subsec_micros();
        let backup_name = format!("commons-{}-{:06}.zip", timestamp, micros);
        let backup_path = backups_dir.join(&backup_name);

        let file = File::create(&backup_path).context("Failed to create backup file")?;
        let mut zip = ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let mut buffer = Vec::new();
        let mut archived = 0usize;
        for name in BACKUP_FILES {
            let path = self.data_dir.join(name);
            if !path.exists() {
                continue;
            }
            zip.start_file(*name, options)?;
            let mut f = File::open(&path)?;
            buffer.clear();
            f.read_to_end(&mut buffer)?;
            zip.write_all(&buffer)?;
            archived += 1;
        }
        zip.finish()?;

        if archived == 0 {
            fs::remove_file(&backup_path).ok();
            anyhow::bail!("Nothing to back up: no persisted collections found");
        }

        let size_bytes = fs::metadata(&backup_path)?.len();

        if let Some(max) = max_backups {
            self.apply_retention(max)?;
        }

        Ok(BackupMetadata {
            name: backup_name,
            created_at: now,
            size_bytes,
        })
    }

    /// List all backups, newest first
    pub fn list(&self) -> Result<Vec<BackupMetadata>> {
        let backups_dir = self.backups_dir();
        if !backups_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();
        for entry in fs::read_dir(&backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("zip") {
                continue;
            }

            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(n) if n.starts_with("commons-") => n.to_string(),
                _ => continue,
            };

            let metadata = fs::metadata(&path)?;
            let created_at: DateTime<Utc> = metadata
                .modified()
                .map(DateTime::from)
                .unwrap_or_else(|_| Utc::now());

            backups.push(BackupMetadata {
                name,
                created_at,
                size_bytes: metadata.len(),
            });
        }

        backups.sort_by(|a, b| b.name.cmp(&a.name));
        Ok(backups)
    }

    /// Keep only the newest `max` backups
    fn apply_retention(&self, max: usize) -> Result<()> {
        let backups = self.list()?;
        for stale in backups.iter().skip(max) {
            fs::remove_file(self.backups_dir().join(&stale.name))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn seed_data_dir(dir: &std::path::Path) {
        fs::write(dir.join("users.json"), "[]").unwrap();
        fs::write(dir.join("proposals.json"), "[]").unwrap();
    }

    #[test]
    fn test_create_and_list() {
        let dir = tempdir().unwrap();
        seed_data_dir(dir.path());
        let service = BackupService::new(dir.path().to_path_buf());

        let metadata = service.create(None).unwrap();
        assert!(metadata.name.starts_with("commons-"));
        assert!(metadata.size_bytes > 0);

        let backups = service.list().unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(backups[0].name, metadata.name);
    }

    #[test]
    fn test_create_fails_on_empty_data_dir() {
        let dir = tempdir().unwrap();
        let service = BackupService::new(dir.path().to_path_buf());
        assert!(service.create(None).is_err());
    }

    #[test]
    fn test_retention_keeps_newest() {
        let dir = tempdir().unwrap();
        seed_data_dir(dir.path());
        let service = BackupService::new(dir.path().to_path_buf());

        service.create(None).unwrap();
        service.create(None).unwrap();
        service.create(Some(2)).unwrap();

        assert_eq!(service.list().unwrap().len(), 2);
    }
}
