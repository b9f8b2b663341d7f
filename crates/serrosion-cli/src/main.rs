// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serrosion_application::{
    build_decision_maker, MediaFileExtensions, ParsedNumberingService, ReleaseTitleParser,
    TitleParser,
};
use serrosion_config::{load as load_config, AppConfig, ProfileConfig};
use serrosion_domain::{DownloadClientItem, ImportDecision, Quality, QualityProfile, Series};
use serrosion_infrastructure::Providers;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Decide which downloaded files can be imported for a series
#[derive(Parser, Debug)]
#[command(name = "serrosion")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Title of the series the files belong to
    #[arg(long)]
    series: String,

    /// Release title of the folder the files were found in
    #[arg(long)]
    folder_title: Option<String>,

    /// Title of the download client job that produced the files
    #[arg(long)]
    download_title: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Disable scene numbering lookups
    #[arg(long)]
    no_scene_source: bool,

    /// Print decisions as JSON
    #[arg(long)]
    json: bool,

    /// Candidate media files
    #[arg(value_name = "FILES", required = true)]
    files: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
struct DecisionSummary {
    path: String,
    approved: bool,
    quality: String,
    episodes: Vec<String>,
    rejections: Vec<String>,
}

impl From<&ImportDecision> for DecisionSummary {
    fn from(decision: &ImportDecision) -> Self {
        let local = &decision.local_episode;
        Self {
            path: local.path.display().to_string(),
            approved: decision.approved(),
            quality: local.quality.to_string(),
            episodes: local
                .episodes
                .iter()
                .map(|episode| format!("S{:02}E{:02}", episode.season_number, episode.episode_number))
                .collect(),
            rejections: decision
                .rejections
                .iter()
                .map(|rejection| rejection.reason.clone())
                .collect(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    init_tracing(&config);

    let profile = build_profile(&config.profile)?;
    let series = Series::new(args.series.clone(), profile);

    let providers = Providers::from_config(&config);
    let decision_maker = build_decision_maker(&config, &providers, Arc::new(ParsedNumberingService));

    let parser = ReleaseTitleParser::new(MediaFileExtensions::with_extra(
        &config.import.extra_media_extensions,
    ));
    let folder_info = args
        .folder_title
        .as_deref()
        .and_then(|title| parser.parse_title(title));
    let download_client_item = args
        .download_title
        .as_deref()
        .map(|title| DownloadClientItem::new("cli", title));

    let scene_source = config.import.scene_source && !args.no_scene_source;
    let decisions = decision_maker.get_import_decisions_with(
        &args.files,
        &series,
        download_client_item.as_ref(),
        folder_info.as_ref(),
        scene_source,
    );

    let summaries: Vec<DecisionSummary> = decisions.iter().map(DecisionSummary::from).collect();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        for summary in &summaries {
            println!("{}", render_line(summary));
        }
    }

    info!(target: "cli", decisions = summaries.len(), "done");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.telemetry.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn build_profile(profile: &ProfileConfig) -> Result<QualityProfile> {
    let items = if profile.qualities.is_empty() {
        Quality::ALL.to_vec()
    } else {
        profile
            .qualities
            .iter()
            .map(|name| name.parse::<Quality>())
            .collect::<Result<Vec<_>, _>>()
            .context("invalid quality in profile")?
    };

    Ok(QualityProfile::new(profile.name.clone(), items))
}

fn render_line(summary: &DecisionSummary) -> String {
    let episodes = if summary.episodes.is_empty() {
        "-".to_string()
    } else {
        summary.episodes.join(",")
    };

    if summary.approved {
        format!("APPROVED  {}  [{}]  {}", episodes, summary.quality, summary.path)
    } else {
        format!(
            "REJECTED  {}  [{}]  {}  ({})",
            episodes,
            summary.quality,
            summary.path,
            summary.rejections.join("; ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serrosion_domain::{LocalEpisode, Rejection};

    #[test]
    fn args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_flags_and_files() {
        let args = Args::try_parse_from([
            "serrosion",
            "--series",
            "Series Title",
            "--folder-title",
            "Series.Title.S01E01.720p.HDTV-GRP",
            "--no-scene-source",
            "--json",
            "/downloads/a.mkv",
            "/downloads/b.mkv",
        ])
        .expect("arguments should parse");

        assert_eq!(args.series, "Series Title");
        assert!(args.no_scene_source);
        assert!(args.json);
        assert_eq!(args.files.len(), 2);
        assert!(args.download_title.is_none());
    }

    #[test]
    fn files_are_required() {
        assert!(Args::try_parse_from(["serrosion", "--series", "Series Title"]).is_err());
    }

    #[test]
    fn empty_profile_allows_every_quality() {
        let profile = build_profile(&ProfileConfig::default()).unwrap();
        assert_eq!(profile.items.len(), Quality::ALL.len());
        assert_eq!(profile.name, "Any");
    }

    #[test]
    fn profile_qualities_are_parsed_in_order() {
        let config = ProfileConfig {
            name: "HD".to_string(),
            qualities: vec!["HDTV-720p".to_string(), "webdl1080p".to_string()],
        };

        let profile = build_profile(&config).unwrap();

        assert_eq!(profile.name, "HD");
        assert_eq!(profile.items, vec![Quality::Hdtv720p, Quality::WebDl1080p]);
    }

    #[test]
    fn unknown_profile_quality_is_an_error() {
        let config = ProfileConfig {
            qualities: vec!["VHS".to_string()],
            ..ProfileConfig::default()
        };
        assert!(build_profile(&config).is_err());
    }

    #[test]
    fn renders_rejected_line_with_reasons() {
        let series = Series::new("Series Title", QualityProfile::any());
        let local = LocalEpisode::new("/downloads/sample.mkv", series);
        let decision = ImportDecision::new(
            local,
            vec![Rejection::new("Sample"), Rejection::new("Invalid season or episode")],
        );

        let line = render_line(&DecisionSummary::from(&decision));

        assert!(line.starts_with("REJECTED"));
        assert!(line.ends_with("(Sample; Invalid season or episode)"));
    }
}
