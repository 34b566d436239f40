//! File registry backed by `files.json`.
//!
//! Maps stored filenames to their owners. Records keep insertion order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::file::ContentStore;
use crate::store::JsonFile;
use crate::{DevDropError, Result};

/// Ownership record for an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Stored filename (unique).
    pub filename: String,
    /// Username of the uploader.
    pub owner: String,
}

impl FileRecord {
    /// Create a new record.
    pub fn new(filename: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            owner: owner.into(),
        }
    }
}

/// Differences between the registry and the content directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Records whose physical file is missing.
    pub missing_files: Vec<String>,
    /// Files in the content directory with no record.
    pub untracked_files: Vec<String>,
}

impl ReconcileReport {
    /// Whether registry and content directory agree.
    pub fn is_consistent(&self) -> bool {
        self.missing_files.is_empty() && self.untracked_files.is_empty()
    }
}

/// Registry of uploaded files.
#[derive(Debug)]
pub struct FileRegistry {
    file: JsonFile,
    records: Vec<FileRecord>,
}

impl FileRegistry {
    /// Open the registry, loading existing records from `path` if present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let file = JsonFile::new(path);
        let records: Vec<FileRecord> = file.load()?;
        info!(
            path = %file.path().display(),
            count = records.len(),
            "Loaded file registry"
        );
        Ok(Self { file, records })
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[FileRecord] {
        &self.records
    }

    /// Records owned by `username`, in insertion order.
    pub fn list_by_owner(&self, username: &str) -> Vec<FileRecord> {
        self.records
            .iter()
            .filter(|r| r.owner == username)
            .cloned()
            .collect()
    }

    /// Look up a record by stored filename.
    pub fn get(&self, filename: &str) -> Option<&FileRecord> {
        self.records.iter().find(|r| r.filename == filename)
    }

    /// Append a record and persist.
    pub fn add(&mut self, record: FileRecord) -> Result<()> {
        if self.get(&record.filename).is_some() {
            return Err(DevDropError::DuplicateFilename(record.filename));
        }

        self.records.push(record);
        if let Err(e) = self.file.save(&self.records) {
            self.records.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Remove a record on behalf of `requester`.
    ///
    /// On success the removed record is returned and the caller is
    /// responsible for deleting the physical file.
    pub fn remove(&mut self, filename: &str, requester: &str) -> Result<FileRecord> {
        let index = self
            .records
            .iter()
            .position(|r| r.filename == filename)
            .ok_or_else(|| DevDropError::NotFound(format!("File: {filename}")))?;

        if self.records[index].owner != requester {
            warn!(
                filename = %filename,
                owner = %self.records[index].owner,
                requester = %requester,
                "Delete rejected: not the owner"
            );
            return Err(DevDropError::Forbidden(format!(
                "{requester} does not own {filename}"
            )));
        }

        let record = self.records.remove(index);
        if let Err(e) = self.file.save(&self.records) {
            self.records.insert(index, record);
            return Err(e);
        }
        Ok(record)
    }

    /// Compare records with the files actually present in `content`.
    ///
    /// Inconsistencies are logged but never repaired.
    pub fn reconcile(&self, content: &ContentStore) -> Result<ReconcileReport> {
        let on_disk: HashSet<String> = content.list_names()?.into_iter().collect();
        let tracked: HashSet<&str> = self.records.iter().map(|r| r.filename.as_str()).collect();

        let missing_files: Vec<String> = self
            .records
            .iter()
            .filter(|r| !on_disk.contains(&r.filename))
            .map(|r| r.filename.clone())
            .collect();

        let mut untracked_files: Vec<String> = on_disk
            .iter()
            .filter(|name| !tracked.contains(name.as_str()))
            .cloned()
            .collect();
        untracked_files.sort();

        for name in &missing_files {
            warn!(filename = %name, "Registered file is missing from the content directory");
        }
        for name in &untracked_files {
            warn!(filename = %name, "Content file has no registry record");
        }

        Ok(ReconcileReport {
            missing_files,
            untracked_files,
        })
    }
}
