//! Upload receiving, deletion and preview.

use std::path::Path;

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::{error, info, warn};

use crate::file::{ContentStore, FileRecord, FileRegistry, MAX_STORED_NAME_BYTES};
use crate::{DevDropError, Result};

/// Extensions (without the dot) that can be previewed as text.
pub const PREVIEWABLE_EXTENSIONS: &[&str] = &["txt", "js", "py", "json"];

/// Outcome of a preview request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Full text content of the file.
    Text(String),
    /// The file exists but its type is not previewable.
    Unavailable,
}

/// Reduce a client-supplied filename to a safe final path component.
pub fn sanitize_original_name(original: &str) -> String {
    let last = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return "upload".to_string();
    }
    cleaned.to_string()
}

/// Keep at most `max_bytes` from the end of `name`, cut on a char boundary.
fn keep_tail(name: &str, max_bytes: usize) -> &str {
    let start = name.len().saturating_sub(max_bytes);
    let start = (start..name.len())
        .find(|&i| name.is_char_boundary(i))
        .unwrap_or(name.len());
    &name[start..]
}

/// Build a stored filename: `<millis>-<username>-<random>-<original>`.
///
/// The random component keeps names unique for uploads landing in the same
/// millisecond; the original name stays visible as the suffix. The whole
/// name fits in [`MAX_STORED_NAME_BYTES`], dropping leading bytes of the
/// original name so the extension survives.
pub fn generate_stored_name(username: &str, original: &str, now: DateTime<Utc>) -> String {
    let suffix: u32 = rand::rng().random();
    let prefix = format!("{}-{}-{:08x}-", now.timestamp_millis(), username, suffix);

    let original = sanitize_original_name(original);
    let budget = MAX_STORED_NAME_BYTES.saturating_sub(prefix.len());
    let tail = keep_tail(&original, budget);
    let tail = match tail.trim_start() {
        "" | "." | ".." => "upload",
        t => t,
    };

    format!("{prefix}{tail}")
}

/// Whether a stored filename has a previewable extension.
pub fn is_previewable(stored_name: &str) -> bool {
    Path::new(stored_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| PREVIEWABLE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Accepts uploads into the content directory and keeps the registry in step.
#[derive(Debug, Clone)]
pub struct UploadReceiver {
    content: ContentStore,
}

impl UploadReceiver {
    /// Create a receiver writing into `content`.
    pub fn new(content: ContentStore) -> Self {
        Self { content }
    }

    /// The underlying content store.
    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    /// Store an upload for `username` and register it.
    ///
    /// The bytes are written first. If registration then fails the written
    /// file is removed again and [`DevDropError::RegistrationFailed`] is
    /// returned.
    pub fn receive(
        &self,
        registry: &mut FileRegistry,
        username: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<FileRecord> {
        let stored_name = generate_stored_name(username, original_name, Utc::now());
        self.content.save_with_name(bytes, &stored_name)?;

        let record = FileRecord::new(stored_name.clone(), username);
        if let Err(e) = registry.add(record.clone()) {
            error!(
                filename = %stored_name,
                owner = %username,
                error = %e,
                "Failed to register uploaded file"
            );
            match self.content.delete(&stored_name) {
                Ok(_) => {}
                Err(cleanup) => warn!(
                    filename = %stored_name,
                    error = %cleanup,
                    "Orphaned upload left in content directory"
                ),
            }
            return Err(DevDropError::RegistrationFailed(e.to_string()));
        }

        info!(
            filename = %stored_name,
            owner = %username,
            size = bytes.len(),
            "File uploaded"
        );
        Ok(record)
    }

    /// Delete a file owned by `requester`: registry first, then the bytes.
    ///
    /// A missing physical file after a successful registry removal is logged
    /// rather than reported, since the record is already gone.
    pub fn remove(
        &self,
        registry: &mut FileRegistry,
        filename: &str,
        requester: &str,
    ) -> Result<FileRecord> {
        let record = registry.remove(filename, requester)?;

        match self.content.delete(&record.filename) {
            Ok(true) => info!(filename = %filename, owner = %requester, "File deleted"),
            Ok(false) => warn!(
                filename = %filename,
                "Record removed but physical file was already missing"
            ),
            Err(e) => error!(
                filename = %filename,
                error = %e,
                "Record removed but physical file could not be deleted"
            ),
        }
        Ok(record)
    }

    /// Preview a stored file as text.
    pub fn preview(&self, stored_name: &str) -> Result<Preview> {
        if !self.content.exists(stored_name) {
            return Err(DevDropError::NotFound(format!("File: {stored_name}")));
        }
        if !is_previewable(stored_name) {
            return Ok(Preview::Unavailable);
        }

        let bytes = self.content.load(stored_name)?;
        Ok(Preview::Text(String::from_utf8_lossy(&bytes).into_owned()))
    }
}
