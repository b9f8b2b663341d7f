// SPDX-License-Identifier: GPL-3.0-or-later

//! Media info extraction through `ffprobe`.

use crate::providers::VideoFileInfoReader;
use serde::Deserialize;
use serrosion_domain::MediaInfo;
use std::path::Path;
use std::process::Command;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

/// [`VideoFileInfoReader`] that shells out to `ffprobe`.
#[derive(Debug, Clone)]
pub struct FfprobeMediaInfoReader {
    ffprobe_path: String,
}

impl FfprobeMediaInfoReader {
    pub fn new(ffprobe_path: impl Into<String>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }
}

impl Default for FfprobeMediaInfoReader {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl VideoFileInfoReader for FfprobeMediaInfoReader {
    fn get_media_info(&self, path: &Path) -> Option<MediaInfo> {
        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "quiet", "-print_format", "json", "-show_streams"])
            .arg(path)
            .output();

        let output = match output {
            Ok(output) if output.status.success() => output,
            Ok(output) => {
                debug!(target: "infrastructure", path = %path.display(), status = %output.status, "ffprobe could not read file");
                return None;
            }
            Err(err) => {
                debug!(target: "infrastructure", path = %path.display(), error = %err, "failed to run ffprobe");
                return None;
            }
        };

        match serde_json::from_slice::<FfprobeOutput>(&output.stdout) {
            Ok(probe) => media_info_from_probe(probe),
            Err(err) => {
                debug!(target: "infrastructure", path = %path.display(), error = %err, "unexpected ffprobe output");
                None
            }
        }
    }
}

/// Reader used when media info extraction is disabled.
#[derive(Debug, Default, Clone)]
pub struct DisabledMediaInfoReader;

impl VideoFileInfoReader for DisabledMediaInfoReader {
    fn get_media_info(&self, _path: &Path) -> Option<MediaInfo> {
        None
    }
}

fn media_info_from_probe(probe: FfprobeOutput) -> Option<MediaInfo> {
    let stream_of = |kind: &str| {
        probe
            .streams
            .iter()
            .find(|stream| stream.codec_type.as_deref() == Some(kind))
    };

    let video = stream_of("video")?;
    let audio_codec = stream_of("audio").and_then(|stream| stream.codec_name.clone());

    Some(MediaInfo {
        width: video.width.unwrap_or(0),
        height: video.height.unwrap_or(0),
        video_codec: video.codec_name.clone(),
        audio_codec,
    })
}
