// SPDX-License-Identifier: GPL-3.0-or-later
use super::{ImportSpecification, SpecificationDecision};
use anyhow::Result;
use serrosion_domain::{DownloadClientItem, LocalEpisode, QualityModelComparer};
use std::cmp::Ordering;
use tracing::debug;

/// Rejects files that would replace an existing episode file of higher quality.
#[derive(Debug, Clone, Default)]
pub struct UpgradeSpecification;

impl ImportSpecification for UpgradeSpecification {
    fn name(&self) -> &'static str {
        "UpgradeSpecification"
    }

    fn is_satisfied_by(
        &self,
        local_episode: &LocalEpisode,
        _download_client_item: Option<&DownloadClientItem>,
    ) -> Result<SpecificationDecision> {
        let comparer = QualityModelComparer::new(&local_episode.series.profile);

        for episode in &local_episode.episodes {
            let Some(existing) = episode.episode_file.as_ref() else {
                continue;
            };

            if comparer.compare(&existing.quality, &local_episode.quality) == Ordering::Greater {
                debug!(
                    target: "import",
                    path = %local_episode.path.display(),
                    existing = %existing.quality,
                    candidate = %local_episode.quality,
                    "existing file has better quality"
                );
                return Ok(SpecificationDecision::reject(
                    "Not an upgrade for existing episode file(s)",
                ));
            }
        }

        Ok(SpecificationDecision::accept())
    }
}
