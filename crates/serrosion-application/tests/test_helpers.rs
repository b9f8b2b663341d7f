// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared setup for pipeline tests: real files on disk, default collaborators.

use serrosion_application::{build_decision_maker, CatalogParsingService, ImportDecisionMaker};
use serrosion_config::AppConfig;
use serrosion_domain::{Episode, QualityProfile, Series};
use serrosion_infrastructure::Providers;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const MB: u64 = 1024 * 1024;

/// Creates `relative` under `root` with the given length (sparse where supported).
pub fn create_file(root: &Path, relative: &str, size: u64) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create parent directory");
    }
    let file = File::create(&path).expect("failed to create file");
    file.set_len(size).expect("failed to size file");
    path
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.media_info.enabled = false;
    config
}

/// Series with seasons 0 and 1; the special S00E01 is titled "Behind the Scenes".
pub fn series_with_catalog() -> (Series, Vec<Episode>) {
    let series = Series::new("Series Title", QualityProfile::any());
    let mut episodes: Vec<Episode> = (1..=10).map(|number| Episode::new(series.id, 1, number)).collect();

    let mut special = Episode::new(series.id, 0, 1);
    special.title = Some("Behind the Scenes".to_string());
    episodes.push(special);

    (series, episodes)
}

pub fn decision_maker(config: &AppConfig, providers: &Providers, episodes: Vec<Episode>) -> ImportDecisionMaker {
    build_decision_maker(config, providers, Arc::new(CatalogParsingService::new(episodes)))
}
