// SPDX-License-Identifier: GPL-3.0-or-later
use crate::parsing::TitleParser;
use serrosion_domain::Quality;

/// Whether `title` looks like an untouched scene release name, e.g.
/// `Series.Title.S01E01.720p.HDTV-GROUP`.
pub fn is_scene_title(parser: &dyn TitleParser, title: &str) -> bool {
    if !title.contains('.') || title.contains(' ') {
        return false;
    }

    let Some(parsed) = parser.parse_title(title) else {
        return false;
    };

    parsed.release_group.is_some()
        && parsed.quality.quality != Quality::Unknown
        && !parsed.series_title.trim().is_empty()
}
