//! Error type shared by sources, trackers, sinks and the frame loop.

use std::path::PathBuf;

use thiserror::Error;

use crate::tracker::{BoundingBox, TrackerKind};

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to open video source: {}", path.display())]
    SourceOpen { path: PathBuf },

    #[error("video source produced no frames")]
    EmptySource,

    #[error("video source error: {0}")]
    Source(String),

    #[error("unknown tracker kind: {0}")]
    UnknownTrackerKind(String),

    #[error("invalid bounding box {0}")]
    InvalidBoundingBox(BoundingBox),

    #[error("missing tracker model file: {}", path.display())]
    MissingAsset { path: PathBuf },

    #[error("{0} tracker failed to initialize")]
    TrackerInit(TrackerKind),

    #[error("{0} tracker updated before init")]
    NotInitialized(TrackerKind),

    #[error("{kind} tracker error: {message}")]
    Tracker { kind: TrackerKind, message: String },

    #[error("display error: {0}")]
    Display(String),

    #[error("invalid configuration value: {field} = {value}")]
    InvalidConfig { field: &'static str, value: String },

    #[cfg(feature = "opencv-backend")]
    #[error(transparent)]
    OpenCv(#[from] opencv::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
