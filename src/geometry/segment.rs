use crate::math::{Point2, TOLERANCE};

/// An ordered pair of points forming a line segment.
///
/// Blueprint outlines only ever produce axis-aligned segments; the
/// containment check below relies on that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Point2,
    end: Point2,
}

impl Segment {
    /// Creates a segment from `start` to `end`.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point2 {
        &self.end
    }

    /// Whether the segment runs parallel to the y axis.
    #[must_use]
    pub fn is_vertical(&self) -> bool {
        (self.start.x - self.end.x).abs() < TOLERANCE
    }

    /// Whether the segment runs parallel to the x axis.
    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        (self.start.y - self.end.y).abs() < TOLERANCE
    }

    /// Bounded segment-segment intersection test.
    ///
    /// Touching endpoints and collinear overlap both count as an
    /// intersection: two rooms whose walls share even a single point are
    /// overlapping as far as the layout is concerned.
    #[must_use]
    pub fn intersects(&self, other: &Segment) -> bool {
        let d1 = cross(&other.start, &other.end, &self.start);
        let d2 = cross(&other.start, &other.end, &self.end);
        let d3 = cross(&self.start, &self.end, &other.start);
        let d4 = cross(&self.start, &self.end, &other.end);

        if ((d1 > TOLERANCE && d2 < -TOLERANCE) || (d1 < -TOLERANCE && d2 > TOLERANCE))
            && ((d3 > TOLERANCE && d4 < -TOLERANCE) || (d3 < -TOLERANCE && d4 > TOLERANCE))
        {
            return true;
        }

        // Collinear / touching cases.
        (d1.abs() < TOLERANCE && other.in_bounding_box(&self.start))
            || (d2.abs() < TOLERANCE && other.in_bounding_box(&self.end))
            || (d3.abs() < TOLERANCE && self.in_bounding_box(&other.start))
            || (d4.abs() < TOLERANCE && self.in_bounding_box(&other.end))
    }

    /// Point containment, approximated by the axis-aligned bounding box.
    ///
    /// This is only a true on-segment test for axis-aligned segments,
    /// exactly the segments a rectilinear outline produces. Callers must
    /// not rely on it for anything diagonal.
    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        self.in_bounding_box(p)
    }

    fn in_bounding_box(&self, p: &Point2) -> bool {
        let min_x = self.start.x.min(self.end.x);
        let max_x = self.start.x.max(self.end.x);
        let min_y = self.start.y.min(self.end.y);
        let max_y = self.start.y.max(self.end.y);
        p.x >= min_x - TOLERANCE
            && p.x <= max_x + TOLERANCE
            && p.y >= min_y - TOLERANCE
            && p.y <= max_y + TOLERANCE
    }
}

/// Cross product of `(b - a)` and `(c - a)`.
fn cross(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}
