//! Integration module for running a tracker over a video and presenting the result.
//!
//! This module provides the frame source and display traits, the per-frame
//! overlays and the `FrameLoop` that ties a `Tracker` to both. The OpenCV
//! backend lives behind the `opencv-backend` feature.

mod frame;
mod frame_loop;
mod overlay;
mod sink;
mod source;

pub use frame::{Caption, Frame};
pub use frame_loop::{DEFAULT_QUIT_KEY, FrameLoop, LoopSummary, Termination};
pub use overlay::{
    BOX_THICKNESS, Canvas, Color, FAILURE_ORIGIN, FAILURE_TEXT, LABEL_ORIGIN, Overlay, annotate,
    render_all,
};
pub use sink::{FrameSink, RecordingSink, ShownFrame};
pub use source::{FrameSequence, VideoSource};

#[cfg(feature = "opencv-backend")]
pub mod opencv_backend;
