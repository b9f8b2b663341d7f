// SPDX-License-Identifier: GPL-3.0-or-later
mod episodes;
mod quality;

pub use episodes::AugmentEpisodes;
pub use quality::AugmentQuality;

use anyhow::Result;
use serrosion_domain::LocalEpisode;

/// A step that fills in part of a [`LocalEpisode`] once its parsed identity is known.
///
/// Failures are logged by the caller and never abort the remaining augmenters.
pub trait AugmentLocalEpisode: Send + Sync {
    fn name(&self) -> &'static str;

    fn augment(&self, local_episode: &mut LocalEpisode, other_files: bool) -> Result<()>;
}
