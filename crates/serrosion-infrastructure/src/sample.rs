// SPDX-License-Identifier: GPL-3.0-or-later
use crate::providers::{DetectSample, DetectSampleResult, DiskProvider};
use serrosion_domain::Series;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Sample detection from file name and size.
pub struct SampleDetector {
    disk_provider: Arc<dyn DiskProvider>,
    size_limit_bytes: u64,
}

impl SampleDetector {
    pub fn new(disk_provider: Arc<dyn DiskProvider>, size_limit_mb: u64) -> Self {
        Self {
            disk_provider,
            size_limit_bytes: size_limit_mb.saturating_mul(BYTES_PER_MB),
        }
    }
}

impl DetectSample for SampleDetector {
    fn is_sample(&self, series: &Series, path: &Path, is_special: bool) -> DetectSampleResult {
        if is_special {
            debug!(target: "infrastructure", path = %path.display(), "special episode, skipping sample check");
            return DetectSampleResult::NotSample;
        }

        if has_sample_token(path) {
            debug!(target: "infrastructure", path = %path.display(), series = %series.title, "sample token in file name");
            return DetectSampleResult::Sample;
        }

        match self.disk_provider.file_size(path) {
            Ok(size) if size < self.size_limit_bytes => {
                debug!(target: "infrastructure", path = %path.display(), size, "file below sample size limit");
                DetectSampleResult::Sample
            }
            Ok(_) => DetectSampleResult::NotSample,
            Err(err) => {
                debug!(target: "infrastructure", path = %path.display(), error = %err, "unable to read size for sample check");
                DetectSampleResult::Indeterminate
            }
        }
    }
}

fn has_sample_token(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| {
            stem.split(|c: char| !c.is_ascii_alphanumeric())
                .any(|token| token.eq_ignore_ascii_case("sample"))
        })
}
