//! Physical storage of uploaded file contents.
//!
//! Files live flat in a single content directory under their stored name.
//! Stored names arrive from URLs, so every lookup goes through
//! [`is_safe_name`] first.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{DevDropError, Result};

/// Whether `name` is usable as a single path component in the content
/// directory.
pub fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Content directory holding uploaded bytes.
#[derive(Debug, Clone)]
pub struct ContentStore {
    base_path: PathBuf,
}

impl ContentStore {
    /// Create a store rooted at `base_path`, creating the directory if needed.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;

        Ok(Self { base_path })
    }

    /// Content directory.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Full path for a stored name.
    ///
    /// Names that would escape the content directory are reported as
    /// [`DevDropError::NotFound`].
    pub fn file_path(&self, stored_name: &str) -> Result<PathBuf> {
        if !is_safe_name(stored_name) {
            return Err(DevDropError::NotFound(format!("File: {stored_name}")));
        }
        Ok(self.base_path.join(stored_name))
    }

    /// Write `content` under `stored_name`, replacing any existing file.
    pub fn save_with_name(&self, content: &[u8], stored_name: &str) -> Result<()> {
        let path = self.file_path(stored_name)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Read a stored file.
    pub fn load(&self, stored_name: &str) -> Result<Vec<u8>> {
        let path = self.file_path(stored_name)?;

        match fs::read(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(DevDropError::NotFound(format!("File: {stored_name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a stored file.
    ///
    /// Returns `true` if the file was deleted, `false` if it didn't exist.
    pub fn delete(&self, stored_name: &str) -> Result<bool> {
        let path = self.file_path(stored_name)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a regular file exists under `stored_name`.
    pub fn exists(&self, stored_name: &str) -> bool {
        self.file_path(stored_name)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    /// Names of all regular files in the content directory, sorted.
    pub fn list_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
