// SPDX-License-Identifier: GPL-3.0-or-later

//! Import rules evaluated against an augmented [`LocalEpisode`].

mod full_season;
mod not_sample;
mod upgrade;

pub use full_season::FullSeasonSpecification;
pub use not_sample::NotSampleSpecification;
pub use upgrade::UpgradeSpecification;

use anyhow::Result;
use serrosion_domain::{DownloadClientItem, LocalEpisode};

/// Outcome of a single rule. A rejection always carries a reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecificationDecision {
    pub accepted: bool,
    pub reason: Option<String>,
}

impl SpecificationDecision {
    pub fn accept() -> Self {
        Self {
            accepted: true,
            reason: None,
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            reason: Some(reason.into()),
        }
    }
}

/// A pluggable accept/reject rule.
///
/// Returning `Err` marks the rule itself as broken; the decision maker turns that
/// into a rejection naming the rule.
pub trait ImportSpecification: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_satisfied_by(
        &self,
        local_episode: &LocalEpisode,
        download_client_item: Option<&DownloadClientItem>,
    ) -> Result<SpecificationDecision>;
}
