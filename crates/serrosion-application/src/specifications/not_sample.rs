// SPDX-License-Identifier: GPL-3.0-or-later
use super::{ImportSpecification, SpecificationDecision};
use anyhow::Result;
use serrosion_domain::{DownloadClientItem, LocalEpisode};
use serrosion_infrastructure::{DetectSample, DetectSampleResult};
use std::sync::Arc;
use tracing::debug;

pub struct NotSampleSpecification {
    detect_sample: Arc<dyn DetectSample>,
}

impl NotSampleSpecification {
    pub fn new(detect_sample: Arc<dyn DetectSample>) -> Self {
        Self { detect_sample }
    }
}

impl ImportSpecification for NotSampleSpecification {
    fn name(&self) -> &'static str {
        "NotSampleSpecification"
    }

    fn is_satisfied_by(
        &self,
        local_episode: &LocalEpisode,
        _download_client_item: Option<&DownloadClientItem>,
    ) -> Result<SpecificationDecision> {
        let is_special = local_episode
            .parsed_episode_info
            .as_ref()
            .is_some_and(|info| info.special || info.season_number == 0);

        match self
            .detect_sample
            .is_sample(&local_episode.series, &local_episode.path, is_special)
        {
            DetectSampleResult::Sample => {
                debug!(target: "import", path = %local_episode.path.display(), "rejecting sample");
                Ok(SpecificationDecision::reject("Sample"))
            }
            DetectSampleResult::NotSample | DetectSampleResult::Indeterminate => {
                Ok(SpecificationDecision::accept())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serrosion_domain::{ParsedEpisodeInfo, QualityProfile, Series};
    use std::path::Path;
    use std::sync::Mutex;

    struct FixedDetector {
        result: DetectSampleResult,
        specials: Mutex<Vec<bool>>,
    }

    impl FixedDetector {
        fn new(result: DetectSampleResult) -> Arc<Self> {
            Arc::new(Self {
                result,
                specials: Mutex::new(Vec::new()),
            })
        }
    }

    impl DetectSample for FixedDetector {
        fn is_sample(&self, _series: &Series, _path: &Path, is_special: bool) -> DetectSampleResult {
            self.specials.lock().unwrap().push(is_special);
            self.result
        }
    }

    fn local_episode(season: u32) -> LocalEpisode {
        let series = Series::new("Series Title", QualityProfile::any());
        let mut local = LocalEpisode::new("/downloads/Series.Title.S01E01.mkv", series);
        local.parsed_episode_info = Some(ParsedEpisodeInfo {
            series_title: "Series Title".to_string(),
            season_number: season,
            episode_numbers: vec![1],
            ..Default::default()
        });
        local
    }

    #[test]
    fn rejects_samples() {
        let spec = NotSampleSpecification::new(FixedDetector::new(DetectSampleResult::Sample));

        let decision = spec.is_satisfied_by(&local_episode(1), None).unwrap();

        assert_eq!(decision, SpecificationDecision::reject("Sample"));
    }

    #[test]
    fn accepts_real_and_indeterminate_files() {
        for result in [DetectSampleResult::NotSample, DetectSampleResult::Indeterminate] {
            let spec = NotSampleSpecification::new(FixedDetector::new(result));
            assert!(spec.is_satisfied_by(&local_episode(1), None).unwrap().accepted);
        }
    }

    #[test]
    fn passes_special_hint_for_season_zero() {
        let detector = FixedDetector::new(DetectSampleResult::NotSample);
        let spec = NotSampleSpecification::new(detector.clone());

        spec.is_satisfied_by(&local_episode(0), None).unwrap();
        spec.is_satisfied_by(&local_episode(2), None).unwrap();

        assert_eq!(*detector.specials.lock().unwrap(), vec![true, false]);
    }
}
