// SPDX-License-Identifier: GPL-3.0-or-later
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

use crate::ProfileId;

// ============================================================================
// Quality tiers
// ============================================================================

/// Coarse resolution + source class of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Quality {
    #[default]
    Unknown,
    Sdtv,
    WebDl480p,
    Dvd,
    Hdtv720p,
    Hdtv1080p,
    RawHd,
    WebDl720p,
    Bluray720p,
    WebDl1080p,
    Bluray1080p,
    Hdtv2160p,
    WebDl2160p,
    Bluray2160p,
}

impl Quality {
    /// Every tier, lowest weight first.
    pub const ALL: [Quality; 14] = [
        Quality::Unknown,
        Quality::Sdtv,
        Quality::WebDl480p,
        Quality::Dvd,
        Quality::Hdtv720p,
        Quality::Hdtv1080p,
        Quality::RawHd,
        Quality::WebDl720p,
        Quality::Bluray720p,
        Quality::WebDl1080p,
        Quality::Bluray1080p,
        Quality::Hdtv2160p,
        Quality::WebDl2160p,
        Quality::Bluray2160p,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Sdtv => "SDTV",
            Self::WebDl480p => "WEBDL-480p",
            Self::Dvd => "DVD",
            Self::Hdtv720p => "HDTV-720p",
            Self::Hdtv1080p => "HDTV-1080p",
            Self::RawHd => "Raw-HD",
            Self::WebDl720p => "WEBDL-720p",
            Self::Bluray720p => "Bluray-720p",
            Self::WebDl1080p => "WEBDL-1080p",
            Self::Bluray1080p => "Bluray-1080p",
            Self::Hdtv2160p => "HDTV-2160p",
            Self::WebDl2160p => "WEBDL-2160p",
            Self::Bluray2160p => "Bluray-2160p",
        }
    }

    pub fn source(&self) -> QualitySource {
        match self {
            Self::Bluray720p | Self::Bluray1080p | Self::Bluray2160p => QualitySource::Bluray,
            Self::WebDl480p | Self::WebDl720p | Self::WebDl1080p | Self::WebDl2160p => {
                QualitySource::Web
            }
            Self::Dvd => QualitySource::Dvd,
            Self::RawHd | Self::Hdtv720p | Self::Hdtv1080p | Self::Hdtv2160p | Self::Sdtv => {
                QualitySource::Television
            }
            Self::Unknown => QualitySource::Unknown,
        }
    }

    /// Concrete tier for a source at a resolution.
    ///
    /// Only Bluray, Web and Television sources have resolution variants, so DVD and
    /// Unknown sources never produce a tier here.
    pub fn from_source_and_resolution(source: QualitySource, resolution: Resolution) -> Option<Self> {
        match (source, resolution) {
            (QualitySource::Bluray, Resolution::R2160p) => Some(Self::Bluray2160p),
            (QualitySource::Bluray, Resolution::R1080p) => Some(Self::Bluray1080p),
            (QualitySource::Bluray, Resolution::R720p) => Some(Self::Bluray720p),
            (QualitySource::Web, Resolution::R2160p) => Some(Self::WebDl2160p),
            (QualitySource::Web, Resolution::R1080p) => Some(Self::WebDl1080p),
            (QualitySource::Web, Resolution::R720p) => Some(Self::WebDl720p),
            (QualitySource::Television, Resolution::R2160p) => Some(Self::Hdtv2160p),
            (QualitySource::Television, Resolution::R1080p) => Some(Self::Hdtv1080p),
            (QualitySource::Television, Resolution::R720p) => Some(Self::Hdtv720p),
            _ => None,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown quality name: {0}")]
pub struct UnknownQualityName(pub String);

impl FromStr for Quality {
    type Err = UnknownQualityName;

    /// Accepts display names and their compact forms, ignoring case and dashes
    /// (`WEBDL-1080p`, `webdl1080p`, `Raw-HD`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = compact(s);
        Quality::ALL
            .into_iter()
            .find(|quality| compact(quality.name()) == wanted)
            .ok_or_else(|| UnknownQualityName(s.to_string()))
    }
}

fn compact(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Where a release was captured from. Always derived from [`Quality`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualitySource {
    Unknown,
    Television,
    Web,
    Dvd,
    Bluray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    R720p,
    R1080p,
    R2160p,
}

impl Resolution {
    /// Resolution class for a pixel width; widths of 854 and below carry no override.
    pub fn from_width(width: u32) -> Option<Self> {
        if width > 1920 {
            Some(Self::R2160p)
        } else if width > 1280 {
            Some(Self::R1080p)
        } else if width > 854 {
            Some(Self::R720p)
        } else {
            None
        }
    }
}

/// How the quality of a file was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityDetectionSource {
    #[default]
    Unknown,
    Name,
    Extension,
    MediaInfo,
}

// ============================================================================
// Revision
// ============================================================================

/// Proper/repack counter. Ordered by `version`, then `real`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Revision {
    pub version: u32,
    pub real: i32,
}

impl Revision {
    pub fn new(version: u32, real: i32) -> Self {
        Self { version, real }
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self { version: 1, real: 0 }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.version)?;
        if self.real > 0 {
            write!(f, " real{}", self.real)?;
        }
        Ok(())
    }
}

// ============================================================================
// Quality model
// ============================================================================

/// A quality tier with its revision and provenance.
///
/// Equality and hashing consider only `quality` and `revision`; the detection
/// source is bookkeeping and is not persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityModel {
    pub quality: Quality,
    pub revision: Revision,
    #[serde(skip)]
    pub detection_source: QualityDetectionSource,
}

impl QualityModel {
    pub fn new(quality: Quality) -> Self {
        Self {
            quality,
            revision: Revision::default(),
            detection_source: QualityDetectionSource::Unknown,
        }
    }

    pub fn with_revision(quality: Quality, revision: Revision) -> Self {
        Self {
            quality,
            revision,
            detection_source: QualityDetectionSource::Unknown,
        }
    }

    pub fn detected_by(mut self, source: QualityDetectionSource) -> Self {
        self.detection_source = source;
        self
    }

    pub fn quality_source(&self) -> QualitySource {
        self.quality.source()
    }
}

impl PartialEq for QualityModel {
    fn eq(&self, other: &Self) -> bool {
        self.quality == other.quality && self.revision == other.revision
    }
}

impl Eq for QualityModel {}

impl Hash for QualityModel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.quality.hash(state);
        self.revision.hash(state);
    }
}

impl fmt::Display for QualityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quality, self.revision)
    }
}

// ============================================================================
// Quality profile
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityProfile {
    pub id: ProfileId,
    pub name: String,
    /// Allowed qualities, lowest ranked first.
    pub items: Vec<Quality>,
}

impl QualityProfile {
    pub fn new(name: impl Into<String>, items: Vec<Quality>) -> Self {
        Self {
            id: ProfileId::new(),
            name: name.into(),
            items,
        }
    }

    /// Profile allowing every tier in default weight order.
    pub fn any() -> Self {
        Self::new("Any", Quality::ALL.to_vec())
    }

    pub fn index_of(&self, quality: Quality) -> Option<usize> {
        self.items.iter().position(|item| *item == quality)
    }
}

/// Ranks quality models by their position in a profile, then by revision.
#[derive(Debug, Clone, Copy)]
pub struct QualityModelComparer<'a> {
    profile: &'a QualityProfile,
}

impl<'a> QualityModelComparer<'a> {
    pub fn new(profile: &'a QualityProfile) -> Self {
        Self { profile }
    }

    /// Qualities missing from the profile rank below every quality it contains.
    pub fn compare_quality(&self, left: Quality, right: Quality) -> Ordering {
        self.profile.index_of(left).cmp(&self.profile.index_of(right))
    }

    pub fn compare(&self, left: &QualityModel, right: &QualityModel) -> Ordering {
        self.compare_quality(left.quality, right.quality)
            .then_with(|| left.revision.cmp(&right.revision))
    }
}
