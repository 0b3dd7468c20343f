//! FrameLoop: read, track, annotate, display.

use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::overlay::annotate;
use super::sink::FrameSink;
use super::source::VideoSource;
use crate::error::{Error, Result};
use crate::tracker::{BoundingBox, TrackState, Tracker, TrackerKind};

/// Key that stops the loop unless overridden.
pub const DEFAULT_QUIT_KEY: u8 = b'q';

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The source ran out of frames.
    EndOfStream,
    /// The quit key was pressed.
    Quit,
}

/// Counters describing a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopSummary {
    /// Update iterations performed (the seed frame is not counted).
    pub frames: usize,
    pub tracked: usize,
    pub lost: usize,
    /// Box from the most recent successful update, or the seed.
    pub last_bbox: BoundingBox,
    pub termination: Termination,
}

/// Drives one tracker over a video source and presents each annotated frame.
///
/// The source, tracker and sink are owned by the loop and dropped with it,
/// so backends that release handles in `Drop` are released on every exit
/// path.
pub struct FrameLoop<S, T, D>
where
    S: VideoSource,
{
    source: S,
    tracker: T,
    sink: D,
    bbox: BoundingBox,
    state: TrackState,
    quit_key: u8,
    frame_delay: Duration,
}

impl<S, T, D> FrameLoop<S, T, D>
where
    S: VideoSource,
    T: Tracker<S::Frame>,
    D: FrameSink<S::Frame>,
{
    /// Read the seed frame and initialize `tracker` on it with `seed`.
    ///
    /// The seed frame is read exactly once and is not displayed.
    pub fn start(mut source: S, mut tracker: T, sink: D, seed: BoundingBox) -> Result<Self> {
        if !seed.is_valid() {
            return Err(Error::InvalidBoundingBox(seed));
        }

        let first = source.next_frame()?.ok_or(Error::EmptySource)?;
        tracker.init(&first, seed)?;
        info!(
            tracker = %tracker.kind(),
            bbox = %seed,
            dimensions = ?source.dimensions(),
            "tracker initialized"
        );

        Ok(Self {
            source,
            tracker,
            sink,
            bbox: seed,
            state: TrackState::Tracked,
            quit_key: DEFAULT_QUIT_KEY,
            frame_delay: Duration::ZERO,
        })
    }

    /// Stop when this key is polled from the sink.
    pub fn with_quit_key(mut self, key: u8) -> Self {
        self.quit_key = key;
        self
    }

    /// Pause between frames, after the key poll.
    pub fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = delay;
        self
    }

    pub fn kind(&self) -> TrackerKind {
        self.tracker.kind()
    }

    /// Box from the most recent successful update, or the seed.
    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Process one frame.
    ///
    /// Returns `None` at end of stream, otherwise this frame's outcome.
    pub fn step(&mut self) -> Result<Option<TrackState>> {
        let Some(mut frame) = self.source.next_frame()? else {
            return Ok(None);
        };

        let update = self.tracker.update(&frame)?;
        let state = TrackState::of(&update);
        if let Some(bbox) = update {
            self.bbox = bbox;
        }

        match (self.state, state) {
            (TrackState::Tracked, TrackState::Lost) => {
                warn!(tracker = %self.kind(), last_bbox = %self.bbox, "tracking lost")
            }
            (TrackState::Lost, TrackState::Tracked) => {
                warn!(tracker = %self.kind(), bbox = %self.bbox, "tracking regained")
            }
            _ => debug!(?state, bbox = %self.bbox, "frame processed"),
        }
        self.state = state;

        let overlays = annotate(update.as_ref(), self.kind());
        self.sink.show(&mut frame, &overlays)?;
        Ok(Some(state))
    }

    /// Run until end of stream or the quit key.
    pub fn run(mut self) -> Result<LoopSummary> {
        let mut frames = 0;
        let mut tracked = 0;

        let termination = loop {
            match self.step()? {
                None => break Termination::EndOfStream,
                Some(state) => {
                    frames += 1;
                    if state == TrackState::Tracked {
                        tracked += 1;
                    }
                }
            }

            if self.sink.poll_key()? == Some(self.quit_key) {
                break Termination::Quit;
            }

            if !self.frame_delay.is_zero() {
                thread::sleep(self.frame_delay);
            }
        };

        let summary = LoopSummary {
            frames,
            tracked,
            lost: frames - tracked,
            last_bbox: self.bbox,
            termination,
        };
        info!(
            frames = summary.frames,
            tracked = summary.tracked,
            lost = summary.lost,
            termination = ?summary.termination,
            "tracking finished"
        );
        Ok(summary)
    }

    /// Stop the loop and hand back its parts.
    pub fn into_parts(self) -> (S, T, D) {
        (self.source, self.tracker, self.sink)
    }
}
