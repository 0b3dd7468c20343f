//! Run configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::integration::DEFAULT_QUIT_KEY;
use crate::tracker::{BoundingBox, TrackerKind};

/// Parameters for one tracking run.
#[derive(Debug, Clone)]
pub struct TrackingConfig {
    pub video_path: PathBuf,
    pub tracker_kind: TrackerKind,
    /// Object location in the first frame.
    pub initial_bbox: BoundingBox,
    pub window_name: String,
    /// Window size relative to the video dimensions.
    pub window_scale: f64,
    /// Pause after each displayed frame.
    pub frame_delay: Duration,
    pub quit_key: u8,
    /// Directory holding model files for trackers that need them (GOTURN).
    pub model_dir: PathBuf,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            video_path: PathBuf::from("race_car.mp4"),
            tracker_kind: TrackerKind::Goturn,
            initial_bbox: BoundingBox::new(1300.0, 405.0, 160.0, 120.0),
            window_name: "Object Tracker".to_string(),
            window_scale: 0.5,
            frame_delay: Duration::from_millis(50),
            quit_key: DEFAULT_QUIT_KEY,
            model_dir: PathBuf::from("."),
        }
    }
}

impl TrackingConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.initial_bbox.is_valid() {
            return Err(Error::InvalidBoundingBox(self.initial_bbox));
        }
        if !(self.window_scale.is_finite() && self.window_scale > 0.0) {
            return Err(Error::InvalidConfig {
                field: "window_scale",
                value: self.window_scale.to_string(),
            });
        }
        Ok(())
    }
}

/// Parse `X,Y,W,H` into a box.
pub fn parse_bbox(s: &str) -> Result<BoundingBox> {
    let invalid = || Error::InvalidConfig {
        field: "bbox",
        value: s.to_string(),
    };
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f32>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>>>()?;
    match values.as_slice() {
        &[x, y, w, h] => Ok(BoundingBox::new(x, y, w, h)),
        _ => Err(invalid()),
    }
}
