// SPDX-License-Identifier: GPL-3.0-or-later

//! Turns a batch of candidate files into one [`ImportDecision`] per file.
//!
//! Every failure while handling a single file becomes a rejection on that file's
//! decision; nothing escapes the batch.

use crate::augmenting::{AugmentingError, AugmentingService};
use crate::parsing::TitleParser;
use crate::specifications::ImportSpecification;
use serrosion_domain::{
    DownloadClientItem, ImportDecision, LocalEpisode, ParsedEpisodeInfo, Rejection, Series,
};
use serrosion_infrastructure::{DetectSample, DetectSampleResult, MediaFileService};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

pub const REJECTION_UNABLE_TO_PARSE: &str = "Unable to parse file";
pub const REJECTION_UNEXPECTED: &str = "Unexpected error processing file";
pub const REJECTION_PARTIAL_SEASON: &str = "Partial season packs are not supported";
pub const REJECTION_INVALID_EPISODE: &str = "Invalid season or episode";

pub struct ImportDecisionMaker {
    specifications: Vec<Box<dyn ImportSpecification>>,
    augmenting_service: AugmentingService,
    media_file_service: Arc<dyn MediaFileService>,
    title_parser: Arc<dyn TitleParser>,
    detect_sample: Arc<dyn DetectSample>,
}

impl ImportDecisionMaker {
    pub fn new(
        specifications: Vec<Box<dyn ImportSpecification>>,
        augmenting_service: AugmentingService,
        media_file_service: Arc<dyn MediaFileService>,
        title_parser: Arc<dyn TitleParser>,
        detect_sample: Arc<dyn DetectSample>,
    ) -> Self {
        Self {
            specifications,
            augmenting_service,
            media_file_service,
            title_parser,
            detect_sample,
        }
    }

    pub fn augmenter_names(&self) -> Vec<&'static str> {
        self.augmenting_service.augmenter_names()
    }

    pub fn specification_names(&self) -> Vec<&'static str> {
        self.specifications.iter().map(|spec| spec.name()).collect()
    }

    /// Decisions for files found without a download job or folder context.
    /// Episode numbers are taken as-is, without scene numbering.
    pub fn get_import_decisions(&self, files: &[PathBuf], series: &Series) -> Vec<ImportDecision> {
        self.get_import_decisions_with(files, series, None, None, false)
    }

    #[tracing::instrument(skip_all, fields(series = %series.title, files = files.len()))]
    pub fn get_import_decisions_with(
        &self,
        files: &[PathBuf],
        series: &Series,
        download_client_item: Option<&DownloadClientItem>,
        folder_info: Option<&ParsedEpisodeInfo>,
        scene_source: bool,
    ) -> Vec<ImportDecision> {
        let new_files = self.media_file_service.filter_existing_files(files, series);

        info!(
            target: "import",
            total = files.len(),
            new = new_files.len(),
            "analyzing files for import"
        );

        let download_client_item_info =
            download_client_item.and_then(|item| self.title_parser.parse_title(&item.title));

        let other_files = self.has_other_video_files(
            &new_files,
            series,
            download_client_item_info.as_ref(),
            folder_info,
        );

        let decisions: Vec<ImportDecision> = new_files
            .iter()
            .map(|file| {
                let mut local_episode = LocalEpisode::new(file.clone(), series.clone());
                local_episode.file_episode_info = self.title_parser.parse_path(file);
                local_episode.download_client_episode_info = download_client_item_info.clone();
                local_episode.folder_episode_info = folder_info.cloned();
                local_episode.scene_source = scene_source;

                self.get_decision(local_episode, download_client_item, other_files)
            })
            .collect();

        let approved = decisions.iter().filter(|decision| decision.approved()).count();
        info!(
            target: "import",
            decisions = decisions.len(),
            approved,
            rejected = decisions.len() - approved,
            "import decisions complete"
        );

        decisions
    }

    /// True when more than one candidate is a real (non-sample) video.
    fn has_other_video_files(
        &self,
        files: &[PathBuf],
        series: &Series,
        download_client_item_info: Option<&ParsedEpisodeInfo>,
        folder_info: Option<&ParsedEpisodeInfo>,
    ) -> bool {
        let is_special = download_client_item_info.is_some_and(|info| info.is_possible_special_episode())
            || folder_info.is_some_and(|info| info.is_possible_special_episode());

        let real_files = files
            .iter()
            .filter(|file| self.detect_sample.is_sample(series, file, is_special) != DetectSampleResult::Sample)
            .count();

        debug!(target: "import", real_files, is_special, "counted non-sample video files");
        real_files > 1
    }

    fn get_decision(
        &self,
        mut local_episode: LocalEpisode,
        download_client_item: Option<&DownloadClientItem>,
        other_files: bool,
    ) -> ImportDecision {
        match self.augmenting_service.augment(&mut local_episode, other_files) {
            Ok(()) => {}
            Err(AugmentingError::UnableToParse(_)) => {
                debug!(target: "import", path = %local_episode.path.display(), "unable to parse file");
                return ImportDecision::rejected(local_episode, Rejection::new(REJECTION_UNABLE_TO_PARSE));
            }
            Err(err) => {
                error!(
                    target: "import",
                    path = %local_episode.path.display(),
                    error = %err,
                    "couldn't import file"
                );
                return ImportDecision::rejected(local_episode, Rejection::new(REJECTION_UNEXPECTED));
            }
        }

        if local_episode.episodes.is_empty() {
            let reason = if local_episode.is_partial_season() {
                REJECTION_PARTIAL_SEASON
            } else {
                REJECTION_INVALID_EPISODE
            };
            debug!(target: "import", path = %local_episode.path.display(), reason, "no episodes resolved");
            return ImportDecision::rejected(local_episode, Rejection::new(reason));
        }

        let rejections = self.evaluate_specifications(&local_episode, download_client_item);
        log_decision(local_episode.path(), &rejections);
        ImportDecision::new(local_episode, rejections)
    }

    fn evaluate_specifications(
        &self,
        local_episode: &LocalEpisode,
        download_client_item: Option<&DownloadClientItem>,
    ) -> Vec<Rejection> {
        self.specifications
            .iter()
            .filter_map(|spec| match spec.is_satisfied_by(local_episode, download_client_item) {
                Ok(decision) if decision.accepted => None,
                Ok(decision) => Some(Rejection::new(decision.reason.unwrap_or_default())),
                Err(err) => {
                    error!(
                        target: "import",
                        specification = spec.name(),
                        path = %local_episode.path.display(),
                        error = %err,
                        "specification failed"
                    );
                    Some(Rejection::new(format!("{}: {}", spec.name(), err)))
                }
            })
            .collect()
    }
}

fn log_decision(path: &Path, rejections: &[Rejection]) {
    if rejections.is_empty() {
        debug!(target: "import", path = %path.display(), "file accepted");
    } else {
        let reasons: Vec<&str> = rejections.iter().map(|rejection| rejection.reason.as_str()).collect();
        debug!(target: "import", path = %path.display(), ?reasons, "file rejected");
    }
}
