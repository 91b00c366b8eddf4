use crate::config::Settings;

use super::filter::FilterChain;

/// Typed values substituted into the command template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamParams {
    pub webcam_url: String,
    pub stream_url: String,
    pub frame_rate: u32,
    pub gop_size: u32,
    pub filter: FilterChain,
}

impl StreamParams {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            webcam_url: settings.webcam_url.clone(),
            stream_url: settings.stream_url.clone(),
            frame_rate: settings.frame_rate,
            gop_size: gop_size(settings.frame_rate),
            filter: FilterChain::from_webcam(&settings.webcam),
        }
    }
}

/// Keyframe interval: one full frame every two seconds of video.
pub fn gop_size(frame_rate: u32) -> u32 {
    frame_rate.saturating_mul(2)
}
