// SPDX-License-Identifier: GPL-3.0-or-later
use super::{ImportSpecification, SpecificationDecision};
use anyhow::Result;
use serrosion_domain::{DownloadClientItem, LocalEpisode};
use tracing::debug;

/// Rejects a single file whose identity claims to be a whole season.
#[derive(Debug, Clone, Default)]
pub struct FullSeasonSpecification;

impl ImportSpecification for FullSeasonSpecification {
    fn name(&self) -> &'static str {
        "FullSeasonSpecification"
    }

    fn is_satisfied_by(
        &self,
        local_episode: &LocalEpisode,
        _download_client_item: Option<&DownloadClientItem>,
    ) -> Result<SpecificationDecision> {
        if local_episode
            .parsed_episode_info
            .as_ref()
            .is_some_and(|info| info.full_season)
        {
            debug!(target: "import", path = %local_episode.path.display(), "file is a full season");
            return Ok(SpecificationDecision::reject(
                "Single episode file contains all episodes in seasons",
            ));
        }

        Ok(SpecificationDecision::accept())
    }
}
