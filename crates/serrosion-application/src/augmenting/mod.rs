// SPDX-License-Identifier: GPL-3.0-or-later

//! Reconciles the file, folder and download-job identities of one candidate file
//! and runs the registered augmenters over it.
//!
//! Augmenters run in registration order and observe each other's mutations, so the
//! default chain puts [`AugmentQuality`] before [`AugmentEpisodes`].

pub mod augmenters;

pub use augmenters::{AugmentEpisodes, AugmentLocalEpisode, AugmentQuality};

use crate::media_file_extensions::MediaFileExtensions;
use crate::parsing::{ParsingService, TitleParser};
use crate::scene_checker::is_scene_title;
use serrosion_domain::{LocalEpisode, ParsedEpisodeInfo};
use serrosion_infrastructure::{DiskError, DiskProvider, VideoFileInfoReader};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum AugmentingError {
    #[error("unable to parse file: {0}")]
    UnableToParse(String),

    #[error(transparent)]
    Disk(#[from] DiskError),
}

pub struct AugmentingService {
    augmenters: Vec<Box<dyn AugmentLocalEpisode>>,
    parsing_service: Arc<dyn ParsingService>,
    title_parser: Arc<dyn TitleParser>,
    disk_provider: Arc<dyn DiskProvider>,
    video_file_info_reader: Arc<dyn VideoFileInfoReader>,
    media_extensions: MediaFileExtensions,
}

impl AugmentingService {
    pub fn new(
        augmenters: Vec<Box<dyn AugmentLocalEpisode>>,
        parsing_service: Arc<dyn ParsingService>,
        title_parser: Arc<dyn TitleParser>,
        disk_provider: Arc<dyn DiskProvider>,
        video_file_info_reader: Arc<dyn VideoFileInfoReader>,
        media_extensions: MediaFileExtensions,
    ) -> Self {
        Self {
            augmenters,
            parsing_service,
            title_parser,
            disk_provider,
            video_file_info_reader,
            media_extensions,
        }
    }

    pub fn augmenter_names(&self) -> Vec<&'static str> {
        self.augmenters.iter().map(|augmenter| augmenter.name()).collect()
    }

    /// Picks the winning parsed identity, reads size and media info, then runs every
    /// augmenter. Only a missing identity for a media file and an unreadable size
    /// are returned as errors; augmenter failures are logged and skipped.
    pub fn augment(&self, local_episode: &mut LocalEpisode, other_files: bool) -> Result<(), AugmentingError> {
        local_episode.parsed_episode_info = self.best_info(local_episode, other_files);

        if local_episode.parsed_episode_info.is_none()
            && self.media_extensions.is_media_file(&local_episode.path)
        {
            return Err(AugmentingError::UnableToParse(
                local_episode.path.display().to_string(),
            ));
        }

        local_episode.size = self.disk_provider.file_size(&local_episode.path)?;
        local_episode.media_info = self.video_file_info_reader.get_media_info(&local_episode.path);

        for augmenter in &self.augmenters {
            if let Err(err) = augmenter.augment(local_episode, other_files) {
                warn!(
                    target: "augmenting",
                    augmenter = augmenter.name(),
                    path = %local_episode.path.display(),
                    error = %err,
                    "augmenter failed"
                );
            }
        }

        Ok(())
    }

    fn best_info(&self, local_episode: &LocalEpisode, other_files: bool) -> Option<ParsedEpisodeInfo> {
        let file_stem = local_episode
            .path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();

        let mut best = local_episode.file_episode_info.as_ref();

        if !other_files && !is_scene_title(self.title_parser.as_ref(), file_stem) {
            if let Some(download_info) = local_episode
                .download_client_episode_info
                .as_ref()
                .filter(|info| !info.full_season)
            {
                debug!(target: "augmenting", path = %local_episode.path.display(), "using download client item info");
                best = Some(download_info);
            } else if let Some(folder_info) = local_episode
                .folder_episode_info
                .as_ref()
                .filter(|info| !info.full_season)
            {
                debug!(target: "augmenting", path = %local_episode.path.display(), "using folder info");
                best = Some(folder_info);
            }
        }

        match best {
            Some(info) if !info.is_possible_special_episode() => Some(info.clone()),
            _ => {
                debug!(target: "augmenting", file_stem, "trying to parse as special episode");
                self.parsing_service
                    .parse_special_episode_title(file_stem, &local_episode.series)
            }
        }
    }
}
