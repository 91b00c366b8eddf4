use std::path::Path;

use anyhow::{Context, Result};

use super::types::Settings;

pub const CONFIG_FILE: &str = "webcamstreamer.yaml";

/// Load settings from `webcamstreamer.yaml` in the given directory.
///
/// A missing file is not an error: the defaults are returned instead.
pub fn load(dir: &Path) -> Result<Settings> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Settings::default());
    }
    load_from(&path)
}

/// Load settings from an explicit file path.
pub fn load_from(path: &Path) -> Result<Settings> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let settings: Settings = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(settings)
}
