//! File management module for DevDrop.
//!
//! This module provides:
//! - The content directory holding uploaded bytes
//! - The JSON file registry mapping stored names to owners
//! - Upload receiving, owner-checked deletion and text preview

mod content;
mod registry;
mod upload;

pub use content::{is_safe_name, ContentStore};
pub use registry::{FileRecord, FileRegistry, ReconcileReport};
pub use upload::{
    generate_stored_name, is_previewable, sanitize_original_name, Preview, UploadReceiver,
    PREVIEWABLE_EXTENSIONS,
};

/// Maximum length of a stored filename in bytes (the usual filesystem limit).
pub const MAX_STORED_NAME_BYTES: usize = 255;
