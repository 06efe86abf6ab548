use crate::math::Point2;

/// The discrete set of transforms a blueprint may undergo.
///
/// Rotations are clockwise by convention: [`Transform::Rotate90`] maps
/// `(x, y)` to `(y, -x)`. The set is closed; arbitrary-angle rotation is
/// deliberately not part of the layout model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    /// No changes to the base shape.
    Identity,
    /// Rotation 90° clockwise.
    Rotate90,
    /// Rotation 180°.
    Rotate180,
    /// Rotation 270° clockwise.
    Rotate270,
    /// Mirror along the x axis.
    MirrorX,
    /// Mirror along the y axis.
    MirrorY,
}

impl Transform {
    /// All transform variants, in declaration order.
    pub const ALL: [Transform; 6] = [
        Transform::Identity,
        Transform::Rotate90,
        Transform::Rotate180,
        Transform::Rotate270,
        Transform::MirrorX,
        Transform::MirrorY,
    ];

    /// The four rotations (including identity), in declaration order.
    pub const ROTATIONS: [Transform; 4] = [
        Transform::Identity,
        Transform::Rotate90,
        Transform::Rotate180,
        Transform::Rotate270,
    ];

    /// Maps a point through this transform.
    #[must_use]
    pub fn apply(self, p: &Point2) -> Point2 {
        match self {
            Transform::Identity => Point2::new(p.x, p.y),
            Transform::Rotate90 => Point2::new(p.y, -p.x),
            Transform::Rotate180 => Point2::new(-p.x, -p.y),
            Transform::Rotate270 => Point2::new(-p.y, p.x),
            Transform::MirrorX => Point2::new(p.x, -p.y),
            Transform::MirrorY => Point2::new(-p.x, p.y),
        }
    }

    /// Whether this transform reverses ring orientation.
    #[must_use]
    pub fn is_mirror(self) -> bool {
        matches!(self, Transform::MirrorX | Transform::MirrorY)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::points_equal;

    #[test]
    fn rotation_formula_table() {
        let p = Point2::new(2.0, 1.0);
        assert!(points_equal(
            &Transform::Identity.apply(&p),
            &Point2::new(2.0, 1.0)
        ));
        assert!(points_equal(
            &Transform::Rotate90.apply(&p),
            &Point2::new(1.0, -2.0)
        ));
        assert!(points_equal(
            &Transform::Rotate180.apply(&p),
            &Point2::new(-2.0, -1.0)
        ));
        assert!(points_equal(
            &Transform::Rotate270.apply(&p),
            &Point2::new(-1.0, 2.0)
        ));
    }

    #[test]
    fn mirror_formula_table() {
        let p = Point2::new(2.0, 1.0);
        assert!(points_equal(
            &Transform::MirrorX.apply(&p),
            &Point2::new(2.0, -1.0)
        ));
        assert!(points_equal(
            &Transform::MirrorY.apply(&p),
            &Point2::new(-2.0, 1.0)
        ));
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        let p = Point2::new(3.0, -7.0);
        let mut q = p;
        for _ in 0..4 {
            q = Transform::Rotate90.apply(&q);
        }
        assert!(points_equal(&p, &q));
    }

    #[test]
    fn rotations_agree_with_cardinal_trig() {
        use crate::math::{cardinal_cos, cardinal_sin};
        let p = Point2::new(5.0, 2.0);
        for (t, degrees) in [
            (Transform::Rotate90, 90.0),
            (Transform::Rotate180, 180.0),
            (Transform::Rotate270, 270.0),
        ] {
            let by_formula = t.apply(&p);
            let by_trig = Point2::new(
                p.x * cardinal_cos(degrees) + p.y * cardinal_sin(degrees),
                -p.x * cardinal_sin(degrees) + p.y * cardinal_cos(degrees),
            );
            assert!(points_equal(&by_formula, &by_trig));
        }
    }
}
