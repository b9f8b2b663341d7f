// SPDX-License-Identifier: GPL-3.0-or-later
use serrosion_config::AppConfig;
pub mod augmenting;
pub mod decision_maker;
pub mod media_file_extensions;
pub mod parsing;
pub mod release_parsing;
pub mod scene_checker;
pub mod specifications;

pub use augmenting::{
    AugmentEpisodes, AugmentLocalEpisode, AugmentQuality, AugmentingError, AugmentingService,
};
pub use decision_maker::ImportDecisionMaker;
pub use media_file_extensions::MediaFileExtensions;
pub use parsing::{CatalogParsingService, ParsedNumberingService, ParsingService, TitleParser};
pub use release_parsing::ReleaseTitleParser;
pub use scene_checker::is_scene_title;
pub use specifications::{
    FullSeasonSpecification, ImportSpecification, NotSampleSpecification, SpecificationDecision,
    UpgradeSpecification,
};

use serrosion_infrastructure::{DetectSample, Providers};
use std::sync::Arc;
use tracing::info;


/// Quality first, so episode resolution sees the final quality.
pub fn default_augmenters(parsing_service: Arc<dyn ParsingService>) -> Vec<Box<dyn AugmentLocalEpisode>> {
    vec![
        Box::new(AugmentQuality::new()),
        Box::new(AugmentEpisodes::new(parsing_service)),
    ]
}

pub fn default_specifications(detect_sample: Arc<dyn DetectSample>) -> Vec<Box<dyn ImportSpecification>> {
    vec![
        Box::new(NotSampleSpecification::new(detect_sample)),
        Box::new(FullSeasonSpecification),
        Box::new(UpgradeSpecification),
    ]
}

/// Wires the default augmenters, specifications and parser around `providers`.
pub fn build_decision_maker(
    config: &AppConfig,
    providers: &Providers,
    parsing_service: Arc<dyn ParsingService>,
) -> ImportDecisionMaker {
    let extensions = MediaFileExtensions::with_extra(&config.import.extra_media_extensions);
    let title_parser: Arc<dyn TitleParser> = Arc::new(ReleaseTitleParser::new(extensions.clone()));

    let augmenting_service = AugmentingService::new(
        default_augmenters(parsing_service.clone()),
        parsing_service,
        title_parser.clone(),
        providers.disk.clone(),
        providers.media_info.clone(),
        extensions,
    );

    let decision_maker = ImportDecisionMaker::new(
        default_specifications(providers.sample_detector.clone()),
        augmenting_service,
        providers.media_files.clone(),
        title_parser,
        providers.sample_detector.clone(),
    );

    info!(
        target: "application",
        augmenters = ?decision_maker.augmenter_names(),
        specifications = ?decision_maker.specification_names(),
        "import decision maker initialized"
    );

    decision_maker
}
