use std::fmt;

use crate::config::WebcamSettings;

/// A single ffmpeg video filter applied to the webcam feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    HFlip,
    VFlip,
    TransposeCclock,
    Null,
}

impl Filter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::HFlip => "hflip",
            Filter::VFlip => "vflip",
            Filter::TransposeCclock => "transpose=cclock",
            Filter::Null => "null",
        }
    }
}

/// Ordered, never-empty filter chain, rendered comma-separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChain(Vec<Filter>);

impl FilterChain {
    /// Horizontal flip, then vertical flip, then rotation. `null` when nothing applies.
    pub fn from_webcam(webcam: &WebcamSettings) -> Self {
        let mut filters = Vec::new();
        if webcam.flip_h {
            filters.push(Filter::HFlip);
        }
        if webcam.flip_v {
            filters.push(Filter::VFlip);
        }
        if webcam.rotate_90 {
            filters.push(Filter::TransposeCclock);
        }
        if filters.is_empty() {
            filters.push(Filter::Null);
        }
        Self(filters)
    }

    pub fn filters(&self) -> &[Filter] {
        &self.0
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, filter) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(filter.as_str())?;
        }
        Ok(())
    }
}
