// SPDX-License-Identifier: GPL-3.0-or-later

//! Recognized video container extensions and their fallback qualities.

use serrosion_domain::Quality;
use std::collections::HashMap;
use std::path::Path;

/// Known media extensions with the quality assumed when nothing else is known.
pub const MEDIA_FILE_EXTENSIONS: &[(&str, Quality)] = &[
    ("webm", Quality::Unknown),
    ("m4v", Quality::Sdtv),
    ("3gp", Quality::Sdtv),
    ("nsv", Quality::Sdtv),
    ("ty", Quality::Sdtv),
    ("strm", Quality::Sdtv),
    ("rm", Quality::Sdtv),
    ("rmvb", Quality::Sdtv),
    ("m3u", Quality::Sdtv),
    ("ifo", Quality::Sdtv),
    ("mov", Quality::Sdtv),
    ("qt", Quality::Sdtv),
    ("divx", Quality::Sdtv),
    ("xvid", Quality::Sdtv),
    ("bivx", Quality::Sdtv),
    ("nrg", Quality::Sdtv),
    ("pva", Quality::Sdtv),
    ("wmv", Quality::Sdtv),
    ("asf", Quality::Sdtv),
    ("asx", Quality::Sdtv),
    ("ogm", Quality::Sdtv),
    ("ogv", Quality::Sdtv),
    ("m2v", Quality::Sdtv),
    ("avi", Quality::Sdtv),
    ("bin", Quality::Dvd),
    ("dat", Quality::Sdtv),
    ("dvr-ms", Quality::Sdtv),
    ("mpg", Quality::Sdtv),
    ("mpeg", Quality::Sdtv),
    ("mp4", Quality::Sdtv),
    ("avc", Quality::Sdtv),
    ("vp3", Quality::Sdtv),
    ("svq3", Quality::Sdtv),
    ("nuv", Quality::Sdtv),
    ("viv", Quality::Sdtv),
    ("dv", Quality::Sdtv),
    ("fli", Quality::Sdtv),
    ("flv", Quality::Sdtv),
    ("wpl", Quality::Sdtv),
    ("img", Quality::Dvd),
    ("iso", Quality::Dvd),
    ("vob", Quality::Dvd),
    ("mkv", Quality::Hdtv720p),
    ("mk3d", Quality::Hdtv720p),
    ("ts", Quality::Sdtv),
    ("wtv", Quality::Sdtv),
    ("m2ts", Quality::Hdtv720p),
];

#[derive(Debug, Clone)]
pub struct MediaFileExtensions {
    extensions: HashMap<String, Quality>,
}

impl MediaFileExtensions {
    /// Built-in list plus `extra` extensions (with or without a leading dot).
    pub fn with_extra(extra: &[String]) -> Self {
        let mut extensions: HashMap<String, Quality> = MEDIA_FILE_EXTENSIONS
            .iter()
            .map(|(extension, quality)| (extension.to_string(), *quality))
            .collect();

        for extension in extra {
            let normalized = extension.trim().trim_start_matches('.').to_ascii_lowercase();
            if !normalized.is_empty() {
                extensions.entry(normalized).or_insert(Quality::Unknown);
            }
        }

        Self { extensions }
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.extensions
            .contains_key(&extension.trim_start_matches('.').to_ascii_lowercase())
    }

    pub fn is_media_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| self.contains(extension))
    }

    pub fn quality_for_extension(&self, extension: &str) -> Option<Quality> {
        self.extensions
            .get(&extension.trim_start_matches('.').to_ascii_lowercase())
            .copied()
    }
}

impl Default for MediaFileExtensions {
    fn default() -> Self {
        Self::with_extra(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_extensions_case_insensitively() {
        let extensions = MediaFileExtensions::default();
        assert!(extensions.is_media_file(Path::new("/tv/Series.Title.S01E01.MKV")));
        assert!(extensions.is_media_file(Path::new("/tv/Series.Title.S01E01.avi")));
        assert!(!extensions.is_media_file(Path::new("/tv/Series.Title.S01E01.nfo")));
        assert!(!extensions.is_media_file(Path::new("/tv/no_extension")));
    }

    #[test]
    fn extra_extensions_are_added() {
        let extensions = MediaFileExtensions::with_extra(&[".Y4M".to_string(), " ".to_string()]);
        assert!(extensions.contains("y4m"));
        assert_eq!(extensions.quality_for_extension("y4m"), Some(Quality::Unknown));
    }

    #[test]
    fn fallback_quality_by_extension() {
        let extensions = MediaFileExtensions::default();
        assert_eq!(extensions.quality_for_extension(".mkv"), Some(Quality::Hdtv720p));
        assert_eq!(extensions.quality_for_extension("iso"), Some(Quality::Dvd));
        assert_eq!(extensions.quality_for_extension("srt"), None);
    }
}
