// SPDX-License-Identifier: GPL-3.0-or-later
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub mod quality;

pub use quality::{
    Quality, QualityDetectionSource, QualityModel, QualityModelComparer, QualityProfile,
    QualitySource, Resolution, Revision, UnknownQualityName,
};

// ============================================================================
// Value Objects & IDs
// ============================================================================

macro_rules! uuid_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(SeriesId);
uuid_id!(EpisodeId);
uuid_id!(EpisodeFileId);
uuid_id!(ProfileId);

// ============================================================================
// Entities
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    pub title: String,
    pub profile: QualityProfile,
}

impl Series {
    pub fn new(title: impl Into<String>, profile: QualityProfile) -> Self {
        Self {
            id: SeriesId::new(),
            title: title.into(),
            profile,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeFile {
    pub id: EpisodeFileId,
    pub series_id: SeriesId,
    pub path: PathBuf,
    pub quality: QualityModel,
}

impl EpisodeFile {
    pub fn new(series_id: SeriesId, path: impl Into<PathBuf>, quality: QualityModel) -> Self {
        Self {
            id: EpisodeFileId::new(),
            series_id,
            path: path.into(),
            quality,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    pub series_id: SeriesId,
    pub season_number: u32,
    pub episode_number: u32,
    pub absolute_episode_number: Option<u32>,
    pub scene_season_number: Option<u32>,
    pub scene_episode_number: Option<u32>,
    pub title: Option<String>,
    pub episode_file: Option<EpisodeFile>,
}

impl Episode {
    pub fn new(series_id: SeriesId, season_number: u32, episode_number: u32) -> Self {
        Self {
            id: EpisodeId::new(),
            series_id,
            season_number,
            episode_number,
            absolute_episode_number: None,
            scene_season_number: None,
            scene_episode_number: None,
            title: None,
            episode_file: None,
        }
    }
}

/// Item reported by a download client for a finished or in-progress job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadClientItem {
    pub download_id: String,
    pub title: String,
}

impl DownloadClientItem {
    pub fn new(download_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            download_id: download_id.into(),
            title: title.into(),
        }
    }
}

// ============================================================================
// Parsing results
// ============================================================================

/// Episode identity extracted from a release title, folder name or file name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedEpisodeInfo {
    pub release_title: String,
    pub series_title: String,
    pub season_number: u32,
    pub episode_numbers: Vec<u32>,
    pub absolute_episode_numbers: Vec<u32>,
    pub special: bool,
    pub full_season: bool,
    pub is_partial_season: bool,
    pub quality: QualityModel,
    pub release_group: Option<String>,
}

impl ParsedEpisodeInfo {
    /// Whether the identity could describe a special that only the series'
    /// special-episode catalog can resolve.
    pub fn is_possible_special_episode(&self) -> bool {
        if self.special {
            return true;
        }

        self.absolute_episode_numbers.is_empty()
            && (self.episode_numbers.is_empty() || self.season_number == 0)
            && !self.full_season
            && !self.series_title.trim().is_empty()
    }
}

/// Container-level facts read from a media file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaInfo {
    pub width: u32,
    pub height: u32,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
}

// ============================================================================
// Import pipeline
// ============================================================================

/// Working record for one candidate file, mutated in place while a decision is made.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalEpisode {
    pub path: PathBuf,
    pub size: u64,
    pub series: Series,
    pub file_episode_info: Option<ParsedEpisodeInfo>,
    pub folder_episode_info: Option<ParsedEpisodeInfo>,
    pub download_client_episode_info: Option<ParsedEpisodeInfo>,
    pub scene_source: bool,
    pub parsed_episode_info: Option<ParsedEpisodeInfo>,
    pub episodes: Vec<Episode>,
    pub media_info: Option<MediaInfo>,
    pub quality: QualityModel,
}

impl LocalEpisode {
    pub fn new(path: impl Into<PathBuf>, series: Series) -> Self {
        Self {
            path: path.into(),
            size: 0,
            series,
            file_episode_info: None,
            folder_episode_info: None,
            download_client_episode_info: None,
            scene_source: false,
            parsed_episode_info: None,
            episodes: Vec::new(),
            media_info: None,
            quality: QualityModel::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// False when no identity was resolved, so an unparsed file reads as an
    /// invalid episode rather than failing the decision.
    pub fn is_partial_season(&self) -> bool {
        self.parsed_episode_info
            .as_ref()
            .is_some_and(|info| info.is_partial_season)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub reason: String,
}

impl Rejection {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reason)
    }
}

/// Verdict for one file: accepted when `rejections` is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportDecision {
    pub local_episode: LocalEpisode,
    pub rejections: Vec<Rejection>,
}

impl ImportDecision {
    pub fn new(local_episode: LocalEpisode, rejections: Vec<Rejection>) -> Self {
        Self {
            local_episode,
            rejections,
        }
    }

    pub fn rejected(local_episode: LocalEpisode, rejection: Rejection) -> Self {
        Self::new(local_episode, vec![rejection])
    }

    pub fn approved(&self) -> bool {
        self.rejections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(series_title: &str, season: u32, episodes: Vec<u32>) -> ParsedEpisodeInfo {
        ParsedEpisodeInfo {
            series_title: series_title.to_string(),
            season_number: season,
            episode_numbers: episodes,
            ..Default::default()
        }
    }

    #[test]
    fn regular_episode_is_not_a_possible_special() {
        assert!(!parsed("Series Title", 1, vec![1]).is_possible_special_episode());
    }

    #[test]
    fn season_zero_or_missing_episodes_is_a_possible_special() {
        assert!(parsed("Series Title", 0, vec![5]).is_possible_special_episode());
        assert!(parsed("Series Title", 3, vec![]).is_possible_special_episode());
    }

    #[test]
    fn full_season_is_not_a_possible_special() {
        let mut info = parsed("Series Title", 1, vec![]);
        info.full_season = true;
        assert!(!info.is_possible_special_episode());
    }

    #[test]
    fn explicit_special_flag_wins() {
        let mut info = parsed("", 1, vec![2]);
        info.special = true;
        assert!(info.is_possible_special_episode());
    }

    #[test]
    fn unresolved_local_episode_is_not_a_partial_season() {
        let series = Series::new("Series Title", QualityProfile::any());
        let mut local = LocalEpisode::new("/downloads/Series.Title.S01.Part.1/info.nfo", series);
        assert!(!local.is_partial_season());

        local.parsed_episode_info = Some(ParsedEpisodeInfo {
            is_partial_season: true,
            ..Default::default()
        });
        assert!(local.is_partial_season());
    }

    #[test]
    fn decision_without_rejections_is_approved() {
        let series = Series::new("Series Title", QualityProfile::any());
        let local = LocalEpisode::new("/tv/Series.Title.S01E01.mkv", series);

        let accepted = ImportDecision::new(local.clone(), Vec::new());
        assert!(accepted.approved());

        let rejected = ImportDecision::rejected(local, Rejection::new("Sample"));
        assert!(!rejected.approved());
        assert_eq!(rejected.rejections[0].to_string(), "Sample");
    }

    #[test]
    fn decision_serializes_reasons() {
        let series = Series::new("Series Title", QualityProfile::any());
        let local = LocalEpisode::new("/tv/file.mkv", series);
        let decision = ImportDecision::rejected(local, Rejection::new("Sample"));

        let value = serde_json::to_value(&decision).expect("decision should serialize");
        assert_eq!(value["rejections"][0]["reason"], "Sample");
        assert_eq!(value["local_episode"]["path"], "/tv/file.mkv");
    }
}
