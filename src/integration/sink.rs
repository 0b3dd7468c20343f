//! Trait for annotated-frame consumers.

use std::collections::VecDeque;

use super::overlay::{Canvas, Overlay, render_all};
use crate::error::Result;

/// Trait for displays that show annotated frames and report key presses.
pub trait FrameSink<F> {
    /// Draw `overlays` onto `frame` and present it.
    fn show(&mut self, frame: &mut F, overlays: &[Overlay]) -> Result<()>;

    /// The key pressed since the last poll, if any, as its low byte.
    fn poll_key(&mut self) -> Result<Option<u8>>;
}

/// One presented frame as seen by a `RecordingSink`.
#[derive(Debug, Clone)]
pub struct ShownFrame<F> {
    pub frame: F,
    pub overlays: Vec<Overlay>,
}

impl<F> ShownFrame<F> {
    /// Rectangle overlays drawn on this frame.
    pub fn rectangles(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter().filter(|o| o.is_rectangle())
    }

    /// Whether a text overlay with exactly `text` was drawn.
    pub fn has_text(&self, text: &str) -> bool {
        self.overlays.iter().any(|o| o.as_text() == Some(text))
    }
}

/// Headless sink that renders and keeps every frame it is shown.
///
/// Key presses are scripted: each poll returns the next queued key,
/// then `None` once the queue is empty.
#[derive(Debug, Clone)]
pub struct RecordingSink<F> {
    shown: Vec<ShownFrame<F>>,
    keys: VecDeque<Option<u8>>,
}

impl<F> Default for RecordingSink<F> {
    fn default() -> Self {
        Self {
            shown: Vec::new(),
            keys: VecDeque::new(),
        }
    }
}

impl<F> RecordingSink<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the results of successive `poll_key` calls.
    pub fn with_keys(keys: impl IntoIterator<Item = Option<u8>>) -> Self {
        Self {
            shown: Vec::new(),
            keys: keys.into_iter().collect(),
        }
    }

    /// Press `key` on the `n`th poll (1-based); earlier polls see no key.
    pub fn pressing_on(key: u8, n: usize) -> Self {
        let mut keys = vec![None; n.saturating_sub(1)];
        keys.push(Some(key));
        Self::with_keys(keys)
    }

    pub fn shown(&self) -> &[ShownFrame<F>] {
        &self.shown
    }

    pub fn into_shown(self) -> Vec<ShownFrame<F>> {
        self.shown
    }
}

impl<F: Canvas + Clone> FrameSink<F> for RecordingSink<F> {
    fn show(&mut self, frame: &mut F, overlays: &[Overlay]) -> Result<()> {
        render_all(frame, overlays)?;
        self.shown.push(ShownFrame {
            frame: frame.clone(),
            overlays: overlays.to_vec(),
        });
        Ok(())
    }

    fn poll_key(&mut self) -> Result<Option<u8>> {
        Ok(self.keys.pop_front().flatten())
    }
}
