//! Trait for frame producers.

use std::collections::VecDeque;

use super::frame::Frame;
use crate::error::Result;

/// Trait for decoded video frame producers.
///
/// Implement this trait to feed any video backend into a `FrameLoop`.
///
/// # Example
///
/// ```ignore
/// use boxtrack_rs::{Frame, VideoSource};
///
/// struct Camera { /* device handle */ }
///
/// impl VideoSource for Camera {
///     type Frame = Frame;
///
///     fn dimensions(&self) -> Option<(u32, u32)> {
///         Some((1280, 720))
///     }
///
///     fn next_frame(&mut self) -> boxtrack_rs::Result<Option<Frame>> {
///         // Grab and decode the next image
///         Ok(None)
///     }
/// }
/// ```
pub trait VideoSource {
    /// Decoded frame type handed to trackers and sinks.
    type Frame;

    /// Frame width and height in pixels, when known before decoding.
    fn dimensions(&self) -> Option<(u32, u32)>;

    /// Decode the next frame.
    ///
    /// `Ok(None)` marks the end of the stream.
    fn next_frame(&mut self) -> Result<Option<Self::Frame>>;
}

/// Frames held in memory, yielded in order.
#[derive(Debug, Clone, Default)]
pub struct FrameSequence {
    frames: VecDeque<Frame>,
    dimensions: Option<(u32, u32)>,
}

impl FrameSequence {
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        let frames: VecDeque<Frame> = frames.into_iter().collect();
        let dimensions = frames
            .front()
            .map(|f| (f.width() as u32, f.height() as u32));
        Self { frames, dimensions }
    }

    /// `count` black frames of the given size.
    pub fn blank(width: usize, height: usize, count: usize) -> Self {
        Self::new((0..count).map(|_| Frame::new(width, height)))
    }

    /// Frames not yet read.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl VideoSource for FrameSequence {
    type Frame = Frame;

    fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    fn next_frame(&mut self) -> Result<Option<Frame>> {
        Ok(self.frames.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_yields_in_order_then_ends() {
        let mut source = FrameSequence::new([Frame::new(4, 2), Frame::new(4, 2)]);
        assert_eq!(source.dimensions(), Some((4, 2)));

        assert!(source.next_frame().unwrap().is_some());
        assert_eq!(source.remaining(), 1);
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_none());
        assert!(source.next_frame().unwrap().is_none());
        // Dimensions stay known after the stream drains.
        assert_eq!(source.dimensions(), Some((4, 2)));
    }

    #[test]
    fn test_empty_sequence_has_no_dimensions() {
        let source = FrameSequence::default();
        assert_eq!(source.dimensions(), None);
    }
}
