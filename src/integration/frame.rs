//! In-memory BGR image buffer.

use ndarray::{Array3, ArrayView3, s};

use super::overlay::{Canvas, Color};
use crate::error::{Error, Result};
use crate::tracker::Point;

/// Text drawn onto a `Frame`.
///
/// A raster frame carries no font, so text overlays are kept alongside the
/// pixels instead of being rasterized.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub text: String,
    pub origin: Point,
    pub color: Color,
}

/// A decoded image: shape (rows, cols, 3), BGR.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pixels: Array3<u8>,
    captions: Vec<Caption>,
}

impl Frame {
    /// A black frame of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: Array3::zeros((height, width, 3)),
            captions: Vec::new(),
        }
    }

    /// A frame filled with one color.
    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        let mut frame = Self::new(width, height);
        for (c, value) in color.to_bgr().into_iter().enumerate() {
            frame.pixels.slice_mut(s![.., .., c]).fill(value);
        }
        frame
    }

    /// Wrap an existing (rows, cols, 3) buffer.
    pub fn from_array(pixels: Array3<u8>) -> Result<Self> {
        if pixels.dim().2 != 3 {
            return Err(Error::Source(format!(
                "expected 3 color channels, got {}",
                pixels.dim().2
            )));
        }
        Ok(Self {
            pixels,
            captions: Vec::new(),
        })
    }

    /// Wrap a row-major interleaved BGR byte buffer.
    pub fn from_bgr_bytes(width: usize, height: usize, bytes: Vec<u8>) -> Result<Self> {
        let pixels = Array3::from_shape_vec((height, width, 3), bytes)
            .map_err(|e| Error::Source(format!("frame buffer shape mismatch: {e}")))?;
        Self::from_array(pixels)
    }

    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    pub fn pixels(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    /// BGR value at column `x`, row `y`, if inside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some([
            self.pixels[[y, x, 0]],
            self.pixels[[y, x, 1]],
            self.pixels[[y, x, 2]],
        ])
    }

    pub fn captions(&self) -> &[Caption] {
        &self.captions
    }

    /// Paint the inclusive box (x1, y1)..=(x2, y2), keeping only the part inside the frame.
    fn fill_clipped(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, bgr: [u8; 3]) {
        let width = self.width() as i64;
        let height = self.height() as i64;
        let (x1, x2) = ((x1 as i64).max(0), (x2 as i64).min(width - 1));
        let (y1, y2) = ((y1 as i64).max(0), (y2 as i64).min(height - 1));
        if x1 > x2 || y1 > y2 {
            return;
        }
        let (x1, x2, y1, y2) = (x1 as usize, x2 as usize, y1 as usize, y2 as usize);
        for (c, value) in bgr.into_iter().enumerate() {
            self.pixels
                .slice_mut(s![y1..=y2, x1..=x2, c])
                .fill(value);
        }
    }
}

impl Canvas for Frame {
    /// Outline with a border `thickness` pixels wide, centered on the edge
    /// lines through the corners. Parts of the border outside the frame are
    /// clipped, never moved onto the frame edge.
    fn draw_rectangle(
        &mut self,
        top_left: Point,
        bottom_right: Point,
        color: Color,
        thickness: i32,
    ) -> Result<()> {
        let bgr = color.to_bgr();
        let thickness = thickness.max(1);
        // Offsets of the border band around each edge line: 2 -> -1..=0, 3 -> -1..=1
        let lo = -(thickness / 2);
        let hi = lo + thickness - 1;

        let (left, right) = (top_left.x.min(bottom_right.x), top_left.x.max(bottom_right.x));
        let (top, bottom) = (top_left.y.min(bottom_right.y), top_left.y.max(bottom_right.y));

        // Top & bottom
        for y in [top, bottom] {
            self.fill_clipped(left + lo, y + lo, right + hi, y + hi, bgr);
        }

        // Left & right
        for x in [left, right] {
            self.fill_clipped(x + lo, top + lo, x + hi, bottom + hi, bgr);
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        color: Color,
        _scale: f64,
        _thickness: i32,
    ) -> Result<()> {
        self.captions.push(Caption {
            text: text.to_string(),
            origin,
            color,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let frame = Frame::new(64, 48);
        assert_eq!(frame.width(), 64);
        assert_eq!(frame.height(), 48);
        assert_eq!(frame.pixel(63, 47), Some([0, 0, 0]));
        assert_eq!(frame.pixel(64, 0), None);
    }

    #[test]
    fn test_from_bgr_bytes_shape_mismatch() {
        assert!(Frame::from_bgr_bytes(4, 4, vec![0; 47]).is_err());
        let frame = Frame::from_bgr_bytes(4, 4, vec![7; 48]).unwrap();
        assert_eq!(frame.pixel(3, 3), Some([7, 7, 7]));
    }

    #[test]
    fn test_draw_rectangle_border() {
        let mut frame = Frame::new(20, 20);
        frame
            .draw_rectangle(Point::new(2, 3), Point::new(10, 12), Color::BOX, 2)
            .unwrap();

        let blue = Some([255, 0, 0]);
        let black = Some([0, 0, 0]);
        assert_eq!(frame.pixel(2, 3), blue);
        assert_eq!(frame.pixel(10, 12), blue);
        assert_eq!(frame.pixel(1, 2), blue); // band straddles the edge line
        assert_eq!(frame.pixel(9, 11), blue);
        assert_eq!(frame.pixel(3, 4), black);
        assert_eq!(frame.pixel(6, 7), black); // interior untouched
        assert_eq!(frame.pixel(11, 12), black); // outside
    }

    #[test]
    fn test_draw_rectangle_odd_thickness_is_centered() {
        let mut frame = Frame::new(20, 20);
        frame
            .draw_rectangle(Point::new(5, 5), Point::new(12, 12), Color::BOX, 3)
            .unwrap();

        let blue = Some([255, 0, 0]);
        assert_eq!(frame.pixel(4, 8), blue);
        assert_eq!(frame.pixel(6, 8), blue);
        assert_eq!(frame.pixel(3, 8), Some([0, 0, 0]));
        assert_eq!(frame.pixel(7, 8), Some([0, 0, 0]));
    }

    #[test]
    fn test_draw_rectangle_off_frame_draws_nothing() {
        let mut frame = Frame::filled(10, 10, Color::bgr(1, 2, 3));
        frame
            .draw_rectangle(Point::new(-5, -5), Point::new(50, 50), Color::FAILURE, 1)
            .unwrap();
        assert_eq!(frame.pixel(0, 0), Some([1, 2, 3]));
        assert_eq!(frame.pixel(9, 9), Some([1, 2, 3]));
        assert_eq!(frame.pixel(5, 5), Some([1, 2, 3]));

        let mut frame = Frame::new(100, 100);
        frame
            .draw_rectangle(Point::new(150, 10), Point::new(200, 40), Color::BOX, 2)
            .unwrap();
        assert!(frame.pixels().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_draw_rectangle_partly_off_frame() {
        let mut frame = Frame::new(100, 100);
        frame
            .draw_rectangle(Point::new(80, 10), Point::new(130, 40), Color::BOX, 2)
            .unwrap();

        let blue = Some([255, 0, 0]);
        assert_eq!(frame.pixel(80, 25), blue); // left edge
        assert_eq!(frame.pixel(99, 10), blue); // top edge, clipped at the frame
        assert_eq!(frame.pixel(99, 40), blue); // bottom edge, clipped at the frame
        // Right edge lies off-frame: column 99 is interior, not border.
        assert_eq!(frame.pixel(99, 25), Some([0, 0, 0]));
    }

    #[test]
    fn test_draw_text_is_captioned() {
        let mut frame = Frame::new(8, 8);
        frame
            .draw_text("KCF Tracker", Point::new(80, 60), Color::LABEL, 1.0, 3)
            .unwrap();
        assert_eq!(frame.captions().len(), 1);
        assert_eq!(frame.captions()[0].text, "KCF Tracker");
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 0]));
    }
}
