// SPDX-License-Identifier: GPL-3.0-or-later
use serrosion_domain::{MediaInfo, Series};
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Collaborator Traits
// ============================================================================

#[derive(Debug, Error)]
pub enum DiskError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },
}

/// Filesystem queries used while deciding on a file.
pub trait DiskProvider: Send + Sync {
    fn file_size(&self, path: &Path) -> Result<u64, DiskError>;
}

/// Reads container-level facts from a media file.
///
/// Returns `None` when the file cannot be read as a media container.
pub trait VideoFileInfoReader: Send + Sync {
    fn get_media_info(&self, path: &Path) -> Option<MediaInfo>;
}

/// Catalog of files already imported into the library.
pub trait MediaFileService: Send + Sync {
    /// Paths from `paths` that are not yet part of `series`, in input order.
    fn filter_existing_files(&self, paths: &[PathBuf], series: &Series) -> Vec<PathBuf>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectSampleResult {
    Indeterminate,
    Sample,
    NotSample,
}

/// Classifies short preview videos bundled with a release.
pub trait DetectSample: Send + Sync {
    fn is_sample(&self, series: &Series, path: &Path, is_special: bool) -> DetectSampleResult;
}
