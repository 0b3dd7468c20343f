//! Single-object video tracking.
//!
//! A [`FrameLoop`] seeds one [`Tracker`] with a [`BoundingBox`] on the first
//! frame of a [`VideoSource`], then updates it frame by frame, drawing either
//! the box or a failure notice and handing each frame to a [`FrameSink`].
//!
//! Trackers, sources and sinks backed by OpenCV are available with the
//! `opencv-backend` feature; the in-memory [`FrameSequence`],
//! [`RecordingSink`] and [`ScriptedTracker`] need no native libraries.

pub mod config;
pub mod error;
pub mod integration;
pub mod tracker;

pub use config::TrackingConfig;
pub use error::{Error, Result};
pub use integration::{
    Canvas, Color, Frame, FrameLoop, FrameSequence, FrameSink, LoopSummary, Overlay,
    RecordingSink, Termination, VideoSource, annotate,
};
pub use tracker::{BoundingBox, Point, ScriptEnd, ScriptedTracker, TrackState, Tracker, TrackerKind};

#[cfg(feature = "opencv-backend")]
pub use integration::opencv_backend;
