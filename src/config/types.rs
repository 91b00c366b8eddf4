use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_COMMAND: &str = "ffmpeg -re -f mjpeg -framerate {frame_rate} -i {webcam_url} \
     -ar 44100 -ac 2 -acodec pcm_s16le -f s16le -ac 2 -i /dev/zero \
     -acodec aac -ab 128k -strict experimental \
     -s 640x480 -vcodec h264 -pix_fmt yuv420p -g {gop_size} -vb 700k \
     -framerate {frame_rate} -r {frame_rate} -filter:v {filter} -f flv {stream_url}";

/// Orientation of the printer webcam, as configured globally on the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebcamSettings {
    pub flip_h: bool,
    pub flip_v: bool,
    pub rotate_90: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Log destination for the terminal UI. Stdio mode always logs to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Plugin settings. Owned and persisted by the host; the controller only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub embed_url: String,
    pub stream_url: String,
    pub webcam_url: String,
    /// Command template run inside the container.
    pub cmd: String,
    pub frame_rate: u32,
    pub docker_image: String,
    pub docker_container: String,
    pub auto_start: bool,
    /// Last streaming state shown in the UI. Advisory only.
    pub streaming: bool,
    pub webcam: WebcamSettings,
    pub logging: LoggingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            embed_url: String::new(),
            stream_url: "rtmp://a.rtmp.youtube.com/live2/xxxx-xxxx-xxxx-xxxx".to_string(),
            webcam_url: "http://localhost:8080/?action=stream".to_string(),
            cmd: DEFAULT_COMMAND.to_string(),
            frame_rate: 5,
            docker_image: "adilinden/rpi-ffmpeg:latest".to_string(),
            docker_container: "WebcamStreamer".to_string(),
            auto_start: false,
            streaming: false,
            webcam: WebcamSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}
