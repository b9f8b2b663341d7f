// SPDX-License-Identifier: GPL-3.0-or-later
use super::AugmentLocalEpisode;
use crate::parsing::ParsingService;
use anyhow::{bail, Result};
use serrosion_domain::LocalEpisode;
use std::sync::Arc;
use tracing::debug;

/// Resolves the winning parsed identity to concrete episodes of the series.
#[derive(Clone)]
pub struct AugmentEpisodes {
    parsing_service: Arc<dyn ParsingService>,
}

impl AugmentEpisodes {
    pub fn new(parsing_service: Arc<dyn ParsingService>) -> Self {
        Self { parsing_service }
    }
}

impl AugmentLocalEpisode for AugmentEpisodes {
    fn name(&self) -> &'static str {
        "AugmentEpisodes"
    }

    fn augment(&self, local_episode: &mut LocalEpisode, _other_files: bool) -> Result<()> {
        let Some(parsed_episode_info) = local_episode.parsed_episode_info.as_ref() else {
            bail!("no parsed episode info for {}", local_episode.path.display());
        };

        let episodes = self.parsing_service.get_episodes(
            parsed_episode_info,
            &local_episode.series,
            local_episode.scene_source,
        )?;

        debug!(
            target: "augmenting",
            path = %local_episode.path.display(),
            episodes = episodes.len(),
            "episodes resolved"
        );

        local_episode.episodes = episodes;
        Ok(())
    }
}
