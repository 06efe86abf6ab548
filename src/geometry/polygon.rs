use crate::error::GeometryError;
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{Segment, Transform};

/// Winding of a polygon ring, decided by the sign of the shoelace sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
    /// The signed area vanishes (collapsed or self-cancelling ring).
    Degenerate,
}

/// A closed ring of vertices.
///
/// The ring is implicitly closed: the last vertex connects back to the
/// first. Bounding box, boundary segments and orientation are computed once
/// at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point2>,
    min: Point2,
    max: Point2,
    orientation: Orientation,
}

impl Polygon {
    /// Creates a polygon from a vertex ring.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::RingTooSmall`] for fewer than 3 vertices.
    pub fn new(vertices: Vec<Point2>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::RingTooSmall(vertices.len()));
        }
        Ok(Self::from_ring(vertices))
    }

    /// Builds from a ring already known to have enough vertices.
    fn from_ring(vertices: Vec<Point2>) -> Self {
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for v in &vertices {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
        }
        let orientation = calculate_orientation(&vertices);
        Self {
            vertices,
            min,
            max,
            orientation,
        }
    }

    /// Returns the vertex ring.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Minimum corner of the bounding box.
    #[must_use]
    pub fn min(&self) -> &Point2 {
        &self.min
    }

    /// Maximum corner of the bounding box.
    #[must_use]
    pub fn max(&self) -> &Point2 {
        &self.max
    }

    /// Bounding box extent along x.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Bounding box extent along y.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Ring winding, fixed at construction.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The boundary segments, one per vertex, closing back to the first.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        let n = self.vertices.len();
        (0..n)
            .map(|i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
            .collect()
    }

    /// Returns this polygon shifted by `by`.
    #[must_use]
    pub fn translate(&self, by: &Vector2) -> Polygon {
        Self::from_ring(self.vertices.iter().map(|v| v + by).collect())
    }

    /// Maps every vertex through `transform`.
    ///
    /// Mirror transforms reverse the winding, so the ring is re-reversed
    /// afterwards to keep the orientation stable under transformation.
    #[must_use]
    pub fn transform(&self, transform: Transform) -> Polygon {
        let mapped = Self::from_ring(self.vertices.iter().map(|v| transform.apply(v)).collect());
        if transform.is_mirror() {
            mapped.reverse_orientation()
        } else {
            mapped
        }
    }

    /// Reverses the winding by fixing the first vertex and reversing the
    /// rest of the ring.
    #[must_use]
    pub fn reverse_orientation(&self) -> Polygon {
        let mut reversed = Vec::with_capacity(self.vertices.len());
        if let Some(first) = self.vertices.first() {
            reversed.push(*first);
            reversed.extend(self.vertices.iter().skip(1).rev().copied());
        }
        Self::from_ring(reversed)
    }

    /// Whether any boundary segment of `self` intersects any boundary
    /// segment of `other`. Touching outlines count as overlapping.
    #[must_use]
    pub fn overlaps(&self, other: &Polygon) -> bool {
        let own = self.segments();
        let theirs = other.segments();
        own.iter().any(|a| theirs.iter().any(|b| a.intersects(b)))
    }

    /// Whether `p` lies on the boundary of the polygon.
    #[must_use]
    pub fn on_boundary(&self, p: &Point2) -> bool {
        self.segments().iter().any(|s| s.contains_point(p))
    }

    /// Point containment: boundary points count as contained, interior
    /// points are decided by an even-odd ray cast.
    ///
    /// The crossing rule is half-open in y, so rays grazing vertices or
    /// running along horizontal edges do not miscount.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        if p.x < self.min.x - TOLERANCE
            || p.x > self.max.x + TOLERANCE
            || p.y < self.min.y - TOLERANCE
            || p.y > self.max.y + TOLERANCE
        {
            return false;
        }
        if self.on_boundary(p) {
            return true;
        }

        let n = self.vertices.len();
        let mut inside = false;
        for i in 0..n {
            let a = &self.vertices[i];
            let b = &self.vertices[(i + 1) % n];
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Strict interior containment: contained but not on the boundary.
    #[must_use]
    pub fn contains_interior(&self, p: &Point2) -> bool {
        self.contains(p) && !self.on_boundary(p)
    }
}

/// Shoelace-style winding sum over the closed ring: positive sums are
/// clockwise under this kernel's convention.
fn calculate_orientation(vertices: &[Point2]) -> Orientation {
    let n = vertices.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = &vertices[i];
        let b = &vertices[(i + 1) % n];
        sum += (b.x - a.x) * (b.y + a.y);
    }
    if sum > TOLERANCE {
        Orientation::Clockwise
    } else if sum < -TOLERANCE {
        Orientation::CounterClockwise
    } else {
        Orientation::Degenerate
    }
}
