//! The single-object tracker capability and a scripted implementation.

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::tracker::kind::TrackerKind;
use crate::tracker::rect::BoundingBox;

/// A stateful single-object tracking algorithm over frames of type `F`.
///
/// `init` must be called once before the first `update`. Implementations
/// return `Err(Error::NotInitialized)` when that order is violated.
pub trait Tracker<F> {
    /// The algorithm this tracker runs.
    fn kind(&self) -> TrackerKind;

    /// Seed the tracker with the object's location in the starting frame.
    fn init(&mut self, frame: &F, bbox: BoundingBox) -> Result<()>;

    /// Estimate the object's location in `frame`.
    ///
    /// `Ok(None)` is a per-frame tracking failure, not an error.
    fn update(&mut self, frame: &F) -> Result<Option<BoundingBox>>;
}

impl<F, T: Tracker<F> + ?Sized> Tracker<F> for Box<T> {
    fn kind(&self) -> TrackerKind {
        (**self).kind()
    }

    fn init(&mut self, frame: &F, bbox: BoundingBox) -> Result<()> {
        (**self).init(frame, bbox)
    }

    fn update(&mut self, frame: &F) -> Result<Option<BoundingBox>> {
        (**self).update(frame)
    }
}

/// What a `ScriptedTracker` answers once its script is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScriptEnd {
    /// Keep reporting the last box it returned (or the seed box).
    #[default]
    Hold,
    /// Report tracking failure.
    Fail,
}

/// Tracker that replays a fixed sequence of outcomes, ignoring frame content.
///
/// Useful for replaying annotations recorded elsewhere and for exercising a
/// frame loop without a vision backend.
#[derive(Debug, Clone)]
pub struct ScriptedTracker {
    kind: TrackerKind,
    script: VecDeque<Option<BoundingBox>>,
    end: ScriptEnd,
    last: Option<BoundingBox>,
    initialized: bool,
    updates: usize,
}

impl ScriptedTracker {
    /// Create a tracker answering `script` in order, then following `end`.
    pub fn new(
        kind: TrackerKind,
        script: impl IntoIterator<Item = Option<BoundingBox>>,
        end: ScriptEnd,
    ) -> Self {
        Self {
            kind,
            script: script.into_iter().collect(),
            end,
            last: None,
            initialized: false,
            updates: 0,
        }
    }

    /// A tracker that always reports the seed box.
    pub fn stationary(kind: TrackerKind) -> Self {
        Self::new(kind, [], ScriptEnd::Hold)
    }

    /// A tracker that never locates the object.
    pub fn always_failing(kind: TrackerKind) -> Self {
        Self::new(kind, [], ScriptEnd::Fail)
    }

    /// Number of `update` calls answered so far.
    pub fn updates(&self) -> usize {
        self.updates
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl<F> Tracker<F> for ScriptedTracker {
    fn kind(&self) -> TrackerKind {
        self.kind
    }

    fn init(&mut self, _frame: &F, bbox: BoundingBox) -> Result<()> {
        self.last = Some(bbox);
        self.initialized = true;
        Ok(())
    }

    fn update(&mut self, _frame: &F) -> Result<Option<BoundingBox>> {
        if !self.initialized {
            return Err(Error::NotInitialized(self.kind));
        }
        self.updates += 1;

        let outcome = match self.script.pop_front() {
            Some(outcome) => outcome,
            None => match self.end {
                ScriptEnd::Hold => self.last,
                ScriptEnd::Fail => None,
            },
        };
        if let Some(bbox) = outcome {
            self.last = Some(bbox);
        }
        Ok(outcome)
    }
}
