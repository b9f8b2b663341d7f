// SPDX-License-Identifier: GPL-3.0-or-later
use crate::providers::MediaFileService;
use serrosion_domain::{Series, SeriesId};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// In-memory catalog of imported file paths, keyed by series.
#[derive(Clone, Default)]
pub struct InMemoryMediaFileService {
    inner: Arc<Mutex<HashMap<SeriesId, HashSet<PathBuf>>>>,
}

impl InMemoryMediaFileService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_imported(&self, series_id: SeriesId, path: impl AsRef<Path>) {
        let mut guard = self.inner.lock().unwrap_or_else(|poisoned| {
            warn!(target: "infrastructure", "media file catalog mutex poisoned, recovering");
            poisoned.into_inner()
        });
        guard
            .entry(series_id)
            .or_default()
            .insert(path.as_ref().to_path_buf());
    }

    pub fn len(&self, series_id: SeriesId) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&series_id)
            .map_or(0, HashSet::len)
    }
}

impl MediaFileService for InMemoryMediaFileService {
    fn filter_existing_files(&self, paths: &[PathBuf], series: &Series) -> Vec<PathBuf> {
        let guard = self.inner.lock().unwrap_or_else(|poisoned| {
            warn!(target: "infrastructure", "media file catalog mutex poisoned, recovering");
            poisoned.into_inner()
        });

        match guard.get(&series.id) {
            Some(known) => paths
                .iter()
                .filter(|path| !known.contains(*path))
                .cloned()
                .collect(),
            None => paths.to_vec(),
        }
    }
}
