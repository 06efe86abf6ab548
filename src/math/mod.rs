pub mod cardinal;

pub use cardinal::{cardinal_cos, cardinal_sin};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-9;

/// Distance at which two points count as adjacent (one grid step).
pub const ADJACENCY_DELTA: f64 = 1.0;

/// Component-wise equality within [`TOLERANCE`].
#[must_use]
pub fn points_equal(a: &Point2, b: &Point2) -> bool {
    (a.x - b.x).abs() < TOLERANCE && (a.y - b.y).abs() < TOLERANCE
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point2, b: &Point2) -> f64 {
    (a - b).norm()
}

/// Manhattan distance between two points.
#[must_use]
pub fn manhattan_distance(a: &Point2, b: &Point2) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Checks whether `b` is within Euclidean distance `delta` of `a`.
///
/// With the default [`ADJACENCY_DELTA`] this is the "one grid step apart"
/// test used for door adjacency.
#[must_use]
pub fn is_adjacent(a: &Point2, b: &Point2, delta: f64) -> bool {
    distance(a, b) <= delta + TOLERANCE
}

/// Rotates `p` by `degrees` clockwise around the origin.
///
/// Exact at the four cardinal multiples (see [`cardinal_cos`]), so
/// repeated quarter turns compose without rounding drift.
#[must_use]
pub fn rotate(p: &Point2, degrees: f64) -> Point2 {
    Point2::new(
        p.x * cardinal_cos(degrees) + p.y * cardinal_sin(degrees),
        -p.x * cardinal_sin(degrees) + p.y * cardinal_cos(degrees),
    )
}

/// The four axis-adjacent points at `offset` distance from `p`,
/// in +x, -x, +y, -y order.
#[must_use]
pub fn adjacent_points(p: &Point2, offset: f64) -> [Point2; 4] {
    [
        Point2::new(p.x + offset, p.y),
        Point2::new(p.x - offset, p.y),
        Point2::new(p.x, p.y + offset),
        Point2::new(p.x, p.y - offset),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn manhattan_vs_euclidean() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert_abs_diff_eq!(distance(&a, &b), 5.0, epsilon = TOLERANCE);
        assert_abs_diff_eq!(manhattan_distance(&a, &b), 7.0, epsilon = TOLERANCE);
    }

    #[test]
    fn adjacency_is_a_unit_threshold() {
        let a = Point2::new(2.0, 2.0);
        assert!(is_adjacent(&a, &Point2::new(3.0, 2.0), ADJACENCY_DELTA));
        assert!(is_adjacent(&a, &Point2::new(2.0, 1.0), ADJACENCY_DELTA));
        // diagonal neighbor is sqrt(2) away
        assert!(!is_adjacent(&a, &Point2::new(3.0, 3.0), ADJACENCY_DELTA));
    }

    #[test]
    fn four_axis_neighbors() {
        let p = Point2::new(1.0, -1.0);
        let around = adjacent_points(&p, 1.0);
        assert_eq!(around.len(), 4);
        for q in &around {
            assert!((manhattan_distance(&p, q) - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn cardinal_rotation_is_exact() {
        let p = Point2::new(3.0, 7.0);
        assert!(points_equal(&rotate(&p, 90.0), &Point2::new(7.0, -3.0)));
        // four quarter turns land exactly on the start, no drift
        let mut q = p;
        for _ in 0..4 {
            q = rotate(&q, 90.0);
        }
        assert_eq!(q.x, p.x);
        assert_eq!(q.y, p.y);
    }
}
