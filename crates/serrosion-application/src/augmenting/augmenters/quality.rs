// SPDX-License-Identifier: GPL-3.0-or-later
use super::AugmentLocalEpisode;
use anyhow::Result;
use serrosion_domain::{
    LocalEpisode, Quality, QualityDetectionSource, QualityModel, QualityModelComparer, Resolution,
    Series,
};
use std::cmp::Ordering;
use tracing::debug;

/// Picks the file's quality from the file name, folder, download job and media info.
#[derive(Debug, Clone, Default)]
pub struct AugmentQuality;

impl AugmentQuality {
    pub fn new() -> Self {
        Self
    }

    fn use_other_quality(series: &Series, file_quality: &QualityModel, other: Option<&QualityModel>) -> bool {
        let Some(other) = other else {
            return false;
        };

        if other.quality == Quality::Unknown {
            return false;
        }

        // Extension guesses always lose to a name-based quality.
        if file_quality.detection_source == QualityDetectionSource::Extension {
            return true;
        }

        QualityModelComparer::new(&series.profile).compare(other, file_quality) == Ordering::Greater
    }
}

impl AugmentLocalEpisode for AugmentQuality {
    fn name(&self) -> &'static str {
        "AugmentQuality"
    }

    fn augment(&self, local_episode: &mut LocalEpisode, _other_files: bool) -> Result<()> {
        let Some(file_info) = local_episode.file_episode_info.as_ref() else {
            return Ok(());
        };

        let mut quality = file_info.quality.clone();
        let download_quality = local_episode
            .download_client_episode_info
            .as_ref()
            .map(|info| &info.quality);
        let folder_quality = local_episode
            .folder_episode_info
            .as_ref()
            .map(|info| &info.quality);

        if Self::use_other_quality(&local_episode.series, &quality, download_quality) {
            if let Some(download_quality) = download_quality {
                debug!(target: "augmenting", quality = %download_quality, "using quality from download client item");
                quality = download_quality.clone();
            }
        } else if Self::use_other_quality(&local_episode.series, &quality, folder_quality) {
            if let Some(folder_quality) = folder_quality {
                debug!(target: "augmenting", quality = %folder_quality, "using quality from folder");
                quality = folder_quality.clone();
            }
        }

        if let Some(resolution) = local_episode
            .media_info
            .as_ref()
            .and_then(|media_info| Resolution::from_width(media_info.width))
        {
            if let Some(corrected) = Quality::from_source_and_resolution(quality.quality_source(), resolution) {
                if corrected != quality.quality {
                    debug!(
                        target: "augmenting",
                        from = %quality.quality,
                        to = %corrected,
                        "correcting quality from media info"
                    );
                    quality = QualityModel::with_revision(corrected, quality.revision)
                        .detected_by(QualityDetectionSource::MediaInfo);
                }
            }
        }

        debug!(target: "augmenting", path = %local_episode.path.display(), quality = %quality, "quality set");
        local_episode.quality = quality;
        Ok(())
    }
}
