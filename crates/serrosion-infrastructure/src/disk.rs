// SPDX-License-Identifier: GPL-3.0-or-later
use crate::providers::{DiskError, DiskProvider};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// [`DiskProvider`] backed by the local filesystem.
#[derive(Debug, Default, Clone)]
pub struct FsDiskProvider;

impl DiskProvider for FsDiskProvider {
    fn file_size(&self, path: &Path) -> Result<u64, DiskError> {
        match fs::metadata(path) {
            Ok(metadata) => Ok(metadata.len()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(DiskError::NotFound(path.display().to_string()))
            }
            Err(err) => Err(DiskError::Io {
                path: path.display().to_string(),
                message: err.to_string(),
            }),
        }
    }
}
