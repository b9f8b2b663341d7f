// SPDX-License-Identifier: GPL-3.0-or-later
pub mod disk;
pub mod media_files;
pub mod media_info;
pub mod providers;
pub mod sample;

pub use disk::FsDiskProvider;
pub use media_files::InMemoryMediaFileService;
pub use media_info::{DisabledMediaInfoReader, FfprobeMediaInfoReader};
pub use providers::{
    DetectSample, DetectSampleResult, DiskError, DiskProvider, MediaFileService,
    VideoFileInfoReader,
};
pub use sample::SampleDetector;

use serrosion_config::AppConfig;
use std::sync::Arc;
use tracing::info;

/// Default collaborators wired from configuration.
#[derive(Clone)]
pub struct Providers {
    pub disk: Arc<dyn DiskProvider>,
    pub media_info: Arc<dyn VideoFileInfoReader>,
    pub media_files: Arc<dyn MediaFileService>,
    pub sample_detector: Arc<dyn DetectSample>,
}

impl Providers {
    pub fn from_config(config: &AppConfig) -> Self {
        let disk: Arc<dyn DiskProvider> = Arc::new(FsDiskProvider);

        let media_info: Arc<dyn VideoFileInfoReader> = if config.media_info.enabled {
            Arc::new(FfprobeMediaInfoReader::new(config.media_info.ffprobe_path.clone()))
        } else {
            Arc::new(DisabledMediaInfoReader)
        };

        let sample_detector = Arc::new(SampleDetector::new(
            disk.clone(),
            config.import.sample_size_limit_mb,
        ));

        info!(
            target: "infrastructure",
            media_info_enabled = config.media_info.enabled,
            sample_size_limit_mb = config.import.sample_size_limit_mb,
            "providers initialized"
        );

        Self {
            disk,
            media_info,
            media_files: Arc::new(InMemoryMediaFileService::new()),
            sample_detector,
        }
    }
}
