// SPDX-License-Identifier: GPL-3.0-or-later
use crate::media_file_extensions::MediaFileExtensions;
use crate::parsing::TitleParser;
use lazy_static::lazy_static;
use regex::Regex;
use serrosion_domain::{
    ParsedEpisodeInfo, Quality, QualityDetectionSource, QualityModel, Revision,
};
use std::path::Path;
use tracing::debug;

lazy_static! {
    static ref SEASON_EPISODE_REGEX: Regex = Regex::new(
        r"(?i)^(?P<title>.*?)(?:^|[ ._\-\[(])S(?P<season>\d{1,4})(?P<episodes>(?:[ ._]?E\d{1,4})+)(?:-E?(?P<last>\d{1,4}))?(?:v\d)?(?:[ ._\-\])]|$)"
    )
    .expect("season/episode regex is valid");
    static ref CROSS_FORMAT_REGEX: Regex = Regex::new(
        r"(?i)^(?P<title>.*?)(?:^|[ ._\-\[(])(?P<season>\d{1,2})x(?P<episode>\d{2,3})(?:[ ._\-\])]|$)"
    )
    .expect("NxNN regex is valid");
    static ref SEASON_PACK_REGEX: Regex = Regex::new(
        r"(?i)^(?P<title>.*?)(?:^|[ ._\-\[(])(?:S|Season[ ._-]?)(?P<season>\d{1,2})(?:[ ._-]+(?:Part|Vol(?:ume)?)[ ._-]?(?P<part>\d{1,2}))?(?:[ ._\-\])]|$)"
    )
    .expect("season pack regex is valid");
    static ref EPISODE_NUMBER_REGEX: Regex =
        Regex::new(r"(?i)E(?P<episode>\d{1,4})").expect("episode number regex is valid");
    static ref RESOLUTION_REGEX: Regex = Regex::new(
        r"(?i)\b(?:(?P<r2160>2160p|4k|uhd)|(?P<r1080>1080[pi])|(?P<r720>720p)|(?P<r480>480p|576p))\b"
    )
    .expect("resolution regex is valid");
    static ref SOURCE_REGEX: Regex = Regex::new(
        r"(?i)\b(?:(?P<rawhd>raw-?hd)|(?P<bluray>blu-?ray|bdrip|brrip|bd)|(?P<web>web-?dl|webrip|web|amzn|nf)|(?P<hdtv>hdtv|pdtv|dsr|tvrip)|(?P<dvd>dvd-?rip|dvd)|(?P<sdtv>sdtv))\b"
    )
    .expect("source regex is valid");
    static ref PROPER_REGEX: Regex =
        Regex::new(r"(?i)\b(?:proper|repack|rerip)\b").expect("proper regex is valid");
    static ref VERSION_REGEX: Regex =
        Regex::new(r"(?i)(?:\b|\d)v(?P<version>[2-9])\b").expect("version regex is valid");
    static ref REAL_REGEX: Regex = Regex::new(r"\bREAL\b").expect("real regex is valid");
    static ref RELEASE_GROUP_REGEX: Regex =
        Regex::new(r"-(?P<group>[a-zA-Z0-9]+)$").expect("release group regex is valid");
}

/// Release group suffixes that are really part of a quality token.
const NOT_RELEASE_GROUPS: &[&str] = &["dl", "rip", "hd", "ray"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceToken {
    RawHd,
    Bluray,
    Web,
    Television,
    Dvd,
    Sdtv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResolutionToken {
    R2160p,
    R1080p,
    R720p,
    R480p,
}

/// Regex-based parser for scene-style release, folder and file names.
#[derive(Debug, Clone, Default)]
pub struct ReleaseTitleParser {
    extensions: MediaFileExtensions,
}

impl ReleaseTitleParser {
    pub fn new(extensions: MediaFileExtensions) -> Self {
        Self { extensions }
    }

    fn parse_with_extension(&self, title: &str, extension: Option<&str>) -> Option<ParsedEpisodeInfo> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let mut parsed = parse_numbering(title)?;
        parsed.release_title = title.to_string();
        parsed.quality = self.detect_quality(title, extension);
        parsed.release_group = detect_release_group(title);

        debug!(
            target: "parsing",
            title,
            season = parsed.season_number,
            episodes = ?parsed.episode_numbers,
            quality = %parsed.quality,
            "parsed release title"
        );

        Some(parsed)
    }

    fn detect_quality(&self, title: &str, extension: Option<&str>) -> QualityModel {
        let revision = detect_revision(title);
        let source = detect_source(title);
        let resolution = detect_resolution(title);

        let quality = match (source, resolution) {
            (Some(SourceToken::RawHd), _) => Some(Quality::RawHd),
            (Some(SourceToken::Bluray), Some(ResolutionToken::R2160p)) => Some(Quality::Bluray2160p),
            (Some(SourceToken::Bluray), Some(ResolutionToken::R1080p)) => Some(Quality::Bluray1080p),
            (Some(SourceToken::Bluray), Some(ResolutionToken::R480p)) => Some(Quality::Dvd),
            (Some(SourceToken::Bluray), _) => Some(Quality::Bluray720p),
            (Some(SourceToken::Web), Some(ResolutionToken::R2160p)) => Some(Quality::WebDl2160p),
            (Some(SourceToken::Web), Some(ResolutionToken::R1080p)) => Some(Quality::WebDl1080p),
            (Some(SourceToken::Web), Some(ResolutionToken::R720p)) => Some(Quality::WebDl720p),
            (Some(SourceToken::Web), _) => Some(Quality::WebDl480p),
            (Some(SourceToken::Television), Some(ResolutionToken::R2160p)) => Some(Quality::Hdtv2160p),
            (Some(SourceToken::Television), Some(ResolutionToken::R1080p)) => Some(Quality::Hdtv1080p),
            (Some(SourceToken::Television), Some(ResolutionToken::R720p)) => Some(Quality::Hdtv720p),
            (Some(SourceToken::Television), _) => Some(Quality::Sdtv),
            (Some(SourceToken::Dvd), _) => Some(Quality::Dvd),
            (Some(SourceToken::Sdtv), _) => Some(Quality::Sdtv),
            (None, Some(ResolutionToken::R2160p)) => Some(Quality::Hdtv2160p),
            (None, Some(ResolutionToken::R1080p)) => Some(Quality::Hdtv1080p),
            (None, Some(ResolutionToken::R720p)) => Some(Quality::Hdtv720p),
            (None, Some(ResolutionToken::R480p)) => Some(Quality::Sdtv),
            (None, None) => None,
        };

        if let Some(quality) = quality {
            return QualityModel::with_revision(quality, revision)
                .detected_by(QualityDetectionSource::Name);
        }

        match extension.and_then(|extension| self.extensions.quality_for_extension(extension)) {
            Some(quality) if quality != Quality::Unknown => {
                QualityModel::with_revision(quality, revision)
                    .detected_by(QualityDetectionSource::Extension)
            }
            _ => QualityModel::with_revision(Quality::Unknown, revision),
        }
    }

    fn split_extension<'a>(&self, title: &'a str) -> (&'a str, Option<&'a str>) {
        match title.rsplit_once('.') {
            Some((stem, extension)) if self.extensions.contains(extension) => (stem, Some(extension)),
            _ => (title, None),
        }
    }
}

impl TitleParser for ReleaseTitleParser {
    fn parse_title(&self, title: &str) -> Option<ParsedEpisodeInfo> {
        let (stem, extension) = self.split_extension(title.trim());
        self.parse_with_extension(stem, extension)
    }

    /// File name first, then the parent folder joined with the file name.
    fn parse_path(&self, path: &Path) -> Option<ParsedEpisodeInfo> {
        let stem = path.file_stem().and_then(|stem| stem.to_str())?;
        let extension = path.extension().and_then(|extension| extension.to_str());

        if let Some(parsed) = self.parse_with_extension(stem, extension) {
            return Some(parsed);
        }

        let folder = path
            .parent()
            .and_then(|parent| parent.file_name())
            .and_then(|name| name.to_str())?;

        self.parse_with_extension(&format!("{folder} {stem}"), extension)
    }
}

fn parse_numbering(title: &str) -> Option<ParsedEpisodeInfo> {
    if let Some(caps) = SEASON_EPISODE_REGEX.captures(title) {
        let season = caps.name("season")?.as_str().parse::<u32>().ok()?;
        let mut episodes: Vec<u32> = EPISODE_NUMBER_REGEX
            .captures_iter(caps.name("episodes")?.as_str())
            .filter_map(|episode| episode.name("episode")?.as_str().parse().ok())
            .collect();

        if let (Some(first), Some(last)) = (
            episodes.first().copied(),
            caps.name("last").and_then(|last| last.as_str().parse::<u32>().ok()),
        ) {
            if last > first {
                episodes = (first..=last).collect();
            }
        }

        return Some(ParsedEpisodeInfo {
            series_title: clean_series_title(caps.name("title").map_or("", |m| m.as_str())),
            season_number: season,
            episode_numbers: episodes,
            ..Default::default()
        });
    }

    if let Some(caps) = CROSS_FORMAT_REGEX.captures(title) {
        return Some(ParsedEpisodeInfo {
            series_title: clean_series_title(caps.name("title").map_or("", |m| m.as_str())),
            season_number: caps.name("season")?.as_str().parse().ok()?,
            episode_numbers: vec![caps.name("episode")?.as_str().parse().ok()?],
            ..Default::default()
        });
    }

    if let Some(caps) = SEASON_PACK_REGEX.captures(title) {
        let partial = caps.name("part").is_some();
        return Some(ParsedEpisodeInfo {
            series_title: clean_series_title(caps.name("title").map_or("", |m| m.as_str())),
            season_number: caps.name("season")?.as_str().parse().ok()?,
            full_season: true,
            is_partial_season: partial,
            ..Default::default()
        });
    }

    None
}

fn clean_series_title(raw: &str) -> String {
    raw.replace(['.', '_'], " ")
        .trim_matches(|c: char| c.is_whitespace() || c == '-' || c == '[' || c == '(')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn detect_source(title: &str) -> Option<SourceToken> {
    let caps = SOURCE_REGEX.captures(title)?;
    let source = if caps.name("rawhd").is_some() {
        SourceToken::RawHd
    } else if caps.name("bluray").is_some() {
        SourceToken::Bluray
    } else if caps.name("web").is_some() {
        SourceToken::Web
    } else if caps.name("hdtv").is_some() {
        SourceToken::Television
    } else if caps.name("dvd").is_some() {
        SourceToken::Dvd
    } else {
        SourceToken::Sdtv
    };
    Some(source)
}

fn detect_resolution(title: &str) -> Option<ResolutionToken> {
    let caps = RESOLUTION_REGEX.captures(title)?;
    let resolution = if caps.name("r2160").is_some() {
        ResolutionToken::R2160p
    } else if caps.name("r1080").is_some() {
        ResolutionToken::R1080p
    } else if caps.name("r720").is_some() {
        ResolutionToken::R720p
    } else {
        ResolutionToken::R480p
    };
    Some(resolution)
}

fn detect_revision(title: &str) -> Revision {
    let mut revision = Revision::default();

    if PROPER_REGEX.is_match(title) {
        revision.version = 2;
    }

    if let Some(version) = VERSION_REGEX
        .captures(title)
        .and_then(|caps| caps.name("version")?.as_str().parse::<u32>().ok())
    {
        revision.version = version;
    }

    revision.real = REAL_REGEX.find_iter(title).count() as i32;
    revision
}

fn detect_release_group(title: &str) -> Option<String> {
    let group = RELEASE_GROUP_REGEX.captures(title)?.name("group")?.as_str();

    if NOT_RELEASE_GROUPS
        .iter()
        .any(|ignored| ignored.eq_ignore_ascii_case(group))
        || group.chars().all(|c| c.is_ascii_digit())
        || RESOLUTION_REGEX.is_match(group)
    {
        return None;
    }

    Some(group.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serrosion_domain::QualitySource;

    fn parser() -> ReleaseTitleParser {
        ReleaseTitleParser::default()
    }

    #[test]
    fn parses_standard_episode() {
        let parsed = parser()
            .parse_title("Series.Title.S01E01.720p.HDTV-RlsGrp")
            .expect("title should parse");

        assert_eq!(parsed.series_title, "Series Title");
        assert_eq!(parsed.season_number, 1);
        assert_eq!(parsed.episode_numbers, vec![1]);
        assert_eq!(parsed.quality.quality, Quality::Hdtv720p);
        assert_eq!(parsed.quality.detection_source, QualityDetectionSource::Name);
        assert_eq!(parsed.release_group.as_deref(), Some("RlsGrp"));
        assert!(!parsed.full_season);
    }

    #[test]
    fn parses_multi_episode_forms() {
        let joined = parser().parse_title("Series.Title.S02E03E04.1080p.WEB-DL").unwrap();
        assert_eq!(joined.episode_numbers, vec![3, 4]);
        assert_eq!(joined.quality.quality, Quality::WebDl1080p);
        assert_eq!(joined.release_group, None);

        let ranged = parser().parse_title("Series Title - S02E03-E06 - Title").unwrap();
        assert_eq!(ranged.episode_numbers, vec![3, 4, 5, 6]);
        assert_eq!(ranged.series_title, "Series Title");
    }

    #[test]
    fn parses_cross_format() {
        let parsed = parser().parse_title("Series Title 3x07 HDTV").unwrap();
        assert_eq!(parsed.season_number, 3);
        assert_eq!(parsed.episode_numbers, vec![7]);
        assert_eq!(parsed.quality.quality, Quality::Sdtv);
    }

    #[test]
    fn parses_full_and_partial_season_packs() {
        let full = parser().parse_title("Series.Title.S01.1080p.BluRay-GROUP").unwrap();
        assert!(full.full_season);
        assert!(!full.is_partial_season);
        assert!(full.episode_numbers.is_empty());
        assert_eq!(full.quality.quality, Quality::Bluray1080p);

        let partial = parser().parse_title("Series Title Season 2 Part 1 720p WEBRip").unwrap();
        assert!(partial.full_season);
        assert!(partial.is_partial_season);
        assert_eq!(partial.season_number, 2);
    }

    #[test]
    fn special_season_is_a_possible_special() {
        let parsed = parser().parse_title("Series.Title.S00E05.720p.HDTV").unwrap();
        assert_eq!(parsed.season_number, 0);
        assert!(parsed.is_possible_special_episode());
    }

    #[test]
    fn unparseable_titles_return_none() {
        assert!(parser().parse_title("").is_none());
        assert!(parser().parse_title("Just Some Words").is_none());
        assert!(parser().parse_title("Series.Title.Behind.The.Scenes.720p").is_none());
    }

    #[test]
    fn extension_fallback_marks_detection_source() {
        let parsed = parser()
            .parse_path(Path::new("/downloads/Series.Title.S01E01.mkv"))
            .expect("path should parse");

        assert_eq!(parsed.quality.quality, Quality::Hdtv720p);
        assert_eq!(parsed.quality.detection_source, QualityDetectionSource::Extension);

        let titled = parser().parse_title("Series.Title.S01E01.avi").unwrap();
        assert_eq!(titled.quality.quality, Quality::Sdtv);
        assert_eq!(titled.quality.detection_source, QualityDetectionSource::Extension);
    }

    #[test]
    fn unknown_quality_without_extension() {
        let parsed = parser().parse_title("Series.Title.S01E01").unwrap();
        assert_eq!(parsed.quality.quality, Quality::Unknown);
        assert_eq!(parsed.quality.quality_source(), QualitySource::Unknown);
    }

    #[test]
    fn parse_path_falls_back_to_folder_name() {
        let parsed = parser()
            .parse_path(Path::new("/downloads/Series.Title.S01E02.720p.HDTV-GRP/grp-720p.mkv"))
            .expect("folder should supply numbering");

        assert_eq!(parsed.season_number, 1);
        assert_eq!(parsed.episode_numbers, vec![2]);
    }

    #[test]
    fn detects_revisions() {
        let proper = parser().parse_title("Series.Title.S01E01.PROPER.720p.HDTV-GRP").unwrap();
        assert_eq!(proper.quality.revision.version, 2);

        let versioned = parser().parse_title("Series.Title.S01E01v3.720p.HDTV-GRP").unwrap();
        assert_eq!(versioned.quality.revision.version, 3);

        let real = parser().parse_title("Series.Title.S01E01.REAL.PROPER.720p.HDTV-GRP").unwrap();
        assert_eq!(real.quality.revision.real, 1);
    }
}
