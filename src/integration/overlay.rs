//! Per-frame annotations and the drawing surface they render onto.

use crate::error::Result;
use crate::tracker::{BoundingBox, Point, TrackerKind};

/// Text shown in place of the box when the tracker loses the object.
pub const FAILURE_TEXT: &str = "Tracking failure detected";

/// Where the failure text is drawn.
pub const FAILURE_ORIGIN: Point = Point { x: 80, y: 140 };

/// Where the tracker label is drawn.
pub const LABEL_ORIGIN: Point = Point { x: 80, y: 60 };

/// Border thickness of the tracked box.
pub const BOX_THICKNESS: i32 = 2;

pub const TEXT_SCALE: f64 = 1.0;
pub const TEXT_THICKNESS: i32 = 3;

/// Pixel color in BGR channel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Color {
    pub const BOX: Color = Color::bgr(255, 0, 0);
    pub const LABEL: Color = Color::bgr(50, 170, 50);
    pub const FAILURE: Color = Color::bgr(0, 0, 255);

    pub const fn bgr(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }

    pub fn to_bgr(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }
}

/// A single drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Rectangle {
        top_left: Point,
        bottom_right: Point,
        color: Color,
        thickness: i32,
    },
    Text {
        text: String,
        origin: Point,
        color: Color,
        scale: f64,
        thickness: i32,
    },
}

impl Overlay {
    /// Outline `bbox` from (x, y) to (x + width, y + height).
    pub fn bounding_box(bbox: &BoundingBox) -> Self {
        let (top_left, bottom_right) = bbox.corners();
        Overlay::Rectangle {
            top_left,
            bottom_right,
            color: Color::BOX,
            thickness: BOX_THICKNESS,
        }
    }

    pub fn text(text: impl Into<String>, origin: Point, color: Color) -> Self {
        Overlay::Text {
            text: text.into(),
            origin,
            color,
            scale: TEXT_SCALE,
            thickness: TEXT_THICKNESS,
        }
    }

    /// Draw this primitive onto `canvas`.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<()> {
        match self {
            Overlay::Rectangle {
                top_left,
                bottom_right,
                color,
                thickness,
            } => canvas.draw_rectangle(*top_left, *bottom_right, *color, *thickness),
            Overlay::Text {
                text,
                origin,
                color,
                scale,
                thickness,
            } => canvas.draw_text(text, *origin, *color, *scale, *thickness),
        }
    }

    pub fn is_rectangle(&self) -> bool {
        matches!(self, Overlay::Rectangle { .. })
    }

    /// The text of a `Text` overlay.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Overlay::Text { text, .. } => Some(text),
            Overlay::Rectangle { .. } => None,
        }
    }
}

/// A surface overlays can be drawn on.
pub trait Canvas {
    fn draw_rectangle(
        &mut self,
        top_left: Point,
        bottom_right: Point,
        color: Color,
        thickness: i32,
    ) -> Result<()>;

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        color: Color,
        scale: f64,
        thickness: i32,
    ) -> Result<()>;
}

/// Build the overlays for one frame, in drawing order.
///
/// A successful update draws the returned box; a failed one draws the
/// failure text and no box. The tracker label is always drawn last.
pub fn annotate(update: Option<&BoundingBox>, kind: TrackerKind) -> Vec<Overlay> {
    let status = match update {
        Some(bbox) => Overlay::bounding_box(bbox),
        None => Overlay::text(FAILURE_TEXT, FAILURE_ORIGIN, Color::FAILURE),
    };
    vec![status, Overlay::text(kind.label(), LABEL_ORIGIN, Color::LABEL)]
}

/// Render every overlay in order.
pub fn render_all<C: Canvas + ?Sized>(canvas: &mut C, overlays: &[Overlay]) -> Result<()> {
    for overlay in overlays {
        overlay.render(canvas)?;
    }
    Ok(())
}
