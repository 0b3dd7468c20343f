/// Integer pixel coordinate, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box in pixel units.
///
/// Stored as TLWH: Top-Left X, Top-Left Y, Width, Height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl BoundingBox {
    /// Create a new box from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a box from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// A box can seed a tracker only with finite coordinates and a positive extent.
    pub fn is_valid(&self) -> bool {
        self.to_tlwh().iter().all(|v| v.is_finite()) && self.width > 0.0 && self.height > 0.0
    }

    /// Integer drawing corners: (x, y) and (x + width, y + height).
    ///
    /// Coordinates are truncated toward zero, so a box returned with
    /// sub-pixel precision is drawn on the pixel grid it started in.
    pub fn corners(&self) -> (Point, Point) {
        let [x1, y1, x2, y2] = self.to_tlbr();
        (
            Point::new(x1 as i32, y1 as i32),
            Point::new(x2 as i32, y2 as i32),
        )
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_conversions() {
        let bbox = BoundingBox::new(10.0, 20.0, 30.0, 40.0);

        assert_eq!(bbox.to_tlwh(), [10.0, 20.0, 30.0, 40.0]);
        assert_eq!(bbox.to_tlbr(), [10.0, 20.0, 40.0, 60.0]);
        assert_eq!(bbox.center(), (25.0, 40.0));
        assert_eq!(bbox.area(), 1200.0);
    }

    #[test]
    fn test_from_tlbr() {
        let bbox = BoundingBox::from_tlbr(10.0, 20.0, 40.0, 60.0);
        assert_eq!(bbox.to_tlwh(), [10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_corners() {
        let bbox = BoundingBox::new(1300.0, 405.0, 160.0, 120.0);
        let (p1, p2) = bbox.corners();
        assert_eq!(p1, Point::new(1300, 405));
        assert_eq!(p2, Point::new(1460, 525));
    }

    #[test]
    fn test_corners_truncate() {
        let bbox = BoundingBox::new(10.7, 20.2, 5.6, 5.6);
        let (p1, p2) = bbox.corners();
        assert_eq!(p1, Point::new(10, 20));
        // 10.7 + 5.6 = 16.3, 20.2 + 5.6 = 25.8
        assert_eq!(p2, Point::new(16, 25));
    }

    #[test]
    fn test_is_valid() {
        assert!(BoundingBox::new(0.0, 0.0, 1.0, 1.0).is_valid());
        assert!(!BoundingBox::new(0.0, 0.0, 0.0, 10.0).is_valid());
        assert!(!BoundingBox::new(0.0, 0.0, 10.0, -1.0).is_valid());
        assert!(!BoundingBox::new(f32::NAN, 0.0, 10.0, 10.0).is_valid());
    }
}
