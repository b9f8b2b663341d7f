// SPDX-License-Identifier: GPL-3.0-or-later

//! Parsing and episode lookup contracts, plus two lookups: one backed by a known
//! episode list and one that trusts parsed numbering.

use anyhow::Result;
use serrosion_domain::{Episode, ParsedEpisodeInfo, Series};
use std::path::Path;
use tracing::debug;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Turns text into episode identity. Never fails on malformed input; returns `None`.
pub trait TitleParser: Send + Sync {
    fn parse_title(&self, title: &str) -> Option<ParsedEpisodeInfo>;
    fn parse_path(&self, path: &Path) -> Option<ParsedEpisodeInfo>;
}

/// Resolves parsed identity against a series' episodes.
pub trait ParsingService: Send + Sync {
    /// May return an empty list for unknown identity; errors mean the lookup itself failed.
    fn get_episodes(
        &self,
        parsed_episode_info: &ParsedEpisodeInfo,
        series: &Series,
        scene_source: bool,
    ) -> Result<Vec<Episode>>;

    fn parse_special_episode_title(&self, title: &str, series: &Series) -> Option<ParsedEpisodeInfo>;
}

/// Lookup over a fixed list of episodes for one series.
#[derive(Debug, Clone, Default)]
pub struct CatalogParsingService {
    episodes: Vec<Episode>,
}

impl CatalogParsingService {
    pub fn new(episodes: Vec<Episode>) -> Self {
        Self { episodes }
    }

    fn matches_number(episode: &Episode, season: u32, number: u32, scene_source: bool) -> bool {
        if scene_source {
            if let (Some(scene_season), Some(scene_episode)) =
                (episode.scene_season_number, episode.scene_episode_number)
            {
                return scene_season == season && scene_episode == number;
            }
        }

        episode.season_number == season && episode.episode_number == number
    }
}

impl ParsingService for CatalogParsingService {
    fn get_episodes(
        &self,
        parsed_episode_info: &ParsedEpisodeInfo,
        series: &Series,
        scene_source: bool,
    ) -> Result<Vec<Episode>> {
        let in_series = self.episodes.iter().filter(|episode| episode.series_id == series.id);

        if parsed_episode_info.is_partial_season {
            return Ok(Vec::new());
        }

        if parsed_episode_info.full_season {
            return Ok(in_series
                .filter(|episode| episode.season_number == parsed_episode_info.season_number)
                .cloned()
                .collect());
        }

        if !parsed_episode_info.absolute_episode_numbers.is_empty() {
            return Ok(parsed_episode_info
                .absolute_episode_numbers
                .iter()
                .filter_map(|absolute| {
                    in_series
                        .clone()
                        .find(|episode| episode.absolute_episode_number == Some(*absolute))
                        .cloned()
                })
                .collect());
        }

        let season = parsed_episode_info.season_number;
        let episodes: Vec<Episode> = parsed_episode_info
            .episode_numbers
            .iter()
            .filter_map(|number| {
                in_series
                    .clone()
                    .find(|episode| Self::matches_number(episode, season, *number, scene_source))
                    .cloned()
            })
            .collect();

        debug!(
            target: "parsing",
            series = %series.title,
            season,
            requested = parsed_episode_info.episode_numbers.len(),
            found = episodes.len(),
            "resolved episodes from catalog"
        );

        Ok(episodes)
    }

    fn parse_special_episode_title(&self, title: &str, series: &Series) -> Option<ParsedEpisodeInfo> {
        let normalized_title = normalize_for_match(title);
        if normalized_title.is_empty() {
            return None;
        }

        self.episodes
            .iter()
            .filter(|episode| episode.series_id == series.id && episode.season_number == 0)
            .filter_map(|episode| {
                let episode_title = normalize_for_match(episode.title.as_deref()?);
                (!episode_title.is_empty() && normalized_title.contains(&episode_title))
                    .then_some((episode, episode_title.len()))
            })
            // Longest title wins so "Pilot" does not shadow "Unaired Pilot".
            .max_by_key(|(_, length)| *length)
            .map(|(episode, _)| ParsedEpisodeInfo {
                release_title: title.to_string(),
                series_title: series.title.clone(),
                season_number: 0,
                episode_numbers: vec![episode.episode_number],
                special: true,
                ..Default::default()
            })
    }
}

/// Lookup without a catalog: every parsed season/episode number is taken at face value.
#[derive(Debug, Clone, Default)]
pub struct ParsedNumberingService;

impl ParsingService for ParsedNumberingService {
    fn get_episodes(
        &self,
        parsed_episode_info: &ParsedEpisodeInfo,
        series: &Series,
        _scene_source: bool,
    ) -> Result<Vec<Episode>> {
        if parsed_episode_info.full_season || parsed_episode_info.is_partial_season {
            return Ok(Vec::new());
        }

        Ok(parsed_episode_info
            .episode_numbers
            .iter()
            .map(|number| Episode::new(series.id, parsed_episode_info.season_number, *number))
            .collect())
    }

    fn parse_special_episode_title(&self, _title: &str, _series: &Series) -> Option<ParsedEpisodeInfo> {
        None
    }
}

/// Lowercase, accent-free, punctuation-free form used to compare titles.
pub(crate) fn normalize_for_match(value: &str) -> String {
    value
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serrosion_domain::QualityProfile;

    fn parsed(season: u32, episodes: Vec<u32>) -> ParsedEpisodeInfo {
        ParsedEpisodeInfo {
            series_title: "Series Title".to_string(),
            season_number: season,
            episode_numbers: episodes,
            ..Default::default()
        }
    }

    fn catalog(series: &Series) -> CatalogParsingService {
        let mut special = Episode::new(series.id, 0, 3);
        special.title = Some("Behind the Scenes".to_string());

        let mut remapped = Episode::new(series.id, 2, 1);
        remapped.scene_season_number = Some(1);
        remapped.scene_episode_number = Some(11);

        CatalogParsingService::new(vec![
            Episode::new(series.id, 1, 1),
            Episode::new(series.id, 1, 2),
            remapped,
            special,
        ])
    }

    #[test]
    fn resolves_listed_episodes_only() {
        let series = Series::new("Series Title", QualityProfile::any());
        let service = catalog(&series);

        let episodes = service
            .get_episodes(&parsed(1, vec![1, 2, 9]), &series, false)
            .expect("lookup should succeed");

        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[1].episode_number, 2);
    }

    #[test]
    fn scene_numbering_applies_only_for_scene_sources() {
        let series = Series::new("Series Title", QualityProfile::any());
        let service = catalog(&series);

        let scene = service
            .get_episodes(&parsed(1, vec![11]), &series, true)
            .expect("lookup should succeed");
        assert_eq!(scene.len(), 1);
        assert_eq!(scene[0].season_number, 2);

        let plain = service
            .get_episodes(&parsed(1, vec![11]), &series, false)
            .expect("lookup should succeed");
        assert!(plain.is_empty());
    }

    #[test]
    fn full_season_returns_whole_season_and_partial_returns_nothing() {
        let series = Series::new("Series Title", QualityProfile::any());
        let service = catalog(&series);

        let mut season = parsed(1, vec![]);
        season.full_season = true;
        assert_eq!(service.get_episodes(&season, &series, false).unwrap().len(), 2);

        season.is_partial_season = true;
        assert!(service.get_episodes(&season, &series, false).unwrap().is_empty());
    }

    #[test]
    fn special_title_matches_season_zero_episode() {
        let series = Series::new("Series Title", QualityProfile::any());
        let service = catalog(&series);

        let special = service
            .parse_special_episode_title("Series.Title.Behind.The.Scenes.720p", &series)
            .expect("special should match");
        assert_eq!(special.season_number, 0);
        assert_eq!(special.episode_numbers, vec![3]);
        assert!(special.special);

        assert!(service
            .parse_special_episode_title("Series.Title.Bloopers", &series)
            .is_none());
    }

    #[test]
    fn normalization_ignores_case_accents_and_punctuation() {
        assert_eq!(normalize_for_match("Café.Behind-the_Scenes!"), "cafe behind the scenes");
        assert_eq!(normalize_for_match("  ...  "), "");
    }

    #[test]
    fn parsed_numbering_trusts_numbers() {
        let series = Series::new("Series Title", QualityProfile::any());
        let episodes = ParsedNumberingService
            .get_episodes(&parsed(4, vec![7, 8]), &series, true)
            .expect("lookup should succeed");

        assert_eq!(episodes.len(), 2);
        assert!(episodes.iter().all(|episode| episode.season_number == 4));
        assert_eq!(episodes[1].episode_number, 8);
    }
}
