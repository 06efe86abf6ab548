//! Enumerates the ways a candidate blueprint can attach to a door.
//!
//! Attachment is anchored at the door's *outer point*: the axis-adjacent
//! point next to the door that lies outside the owning outline. A candidate
//! fits when one of its doors, after an allowed transform, can be shifted
//! onto that outer point without the two outlines overlapping.

use crate::geometry::Transform;
use crate::math::adjacent_points;

use super::RoomBlueprint;

/// A candidate placement of one blueprint against another's door.
#[derive(Debug, Clone)]
pub struct PossibleFit {
    source_door: usize,
    candidate_door: usize,
    transform: Transform,
    placed: RoomBlueprint,
}

impl PossibleFit {
    /// Door index on the source blueprint.
    #[must_use]
    pub fn source_door(&self) -> usize {
        self.source_door
    }

    /// Door index on the placed candidate.
    #[must_use]
    pub fn candidate_door(&self) -> usize {
        self.candidate_door
    }

    /// The transform applied to the candidate before shifting.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// The candidate instance, transformed and shifted into place.
    #[must_use]
    pub fn placed(&self) -> &RoomBlueprint {
        &self.placed
    }

    /// Consumes the fit, returning the placed instance.
    #[must_use]
    pub fn into_placed(self) -> RoomBlueprint {
        self.placed
    }
}

/// Enumerates every fit of `candidate` against door `source_door` of
/// `source`.
///
/// Tries each transform in the candidate's allowed set and each of its
/// doors, shifting the candidate so that door lands on the source door's
/// outer point and keeping placements whose outline does not overlap the
/// source outline. A door whose four adjacent points all lie inside the
/// source outline has no outer point; that degenerate geometry yields an
/// empty result, not an error, as does an out-of-range door index.
#[must_use]
pub fn find_fits(
    source: &RoomBlueprint,
    source_door: usize,
    candidate: &RoomBlueprint,
) -> Vec<PossibleFit> {
    let Some(door) = source.doors().get(source_door) else {
        return Vec::new();
    };
    let Some(outer) = adjacent_points(door, 1.0)
        .into_iter()
        .find(|p| !source.outline().contains(p))
    else {
        return Vec::new();
    };

    let mut fits = Vec::new();
    for &transform in candidate.allowed_transforms() {
        let transformed = candidate.transform(transform);
        for (index, candidate_door) in transformed.doors().iter().enumerate() {
            let shifted = transformed.shift(&(outer - candidate_door));
            if !source.outline().overlaps(shifted.outline()) {
                fits.push(PossibleFit {
                    source_door,
                    candidate_door: index,
                    transform,
                    placed: shifted,
                });
            }
        }
    }
    fits
}

/// Enumerates fits of every catalogue blueprint against one source door.
#[must_use]
pub fn find_all_fits(
    source: &RoomBlueprint,
    source_door: usize,
    catalogue: &[RoomBlueprint],
) -> Vec<PossibleFit> {
    catalogue
        .iter()
        .flat_map(|candidate| find_fits(source, source_door, candidate))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;
    use crate::math::{is_adjacent, Point2, ADJACENCY_DELTA};

    fn square(doors: Vec<Point2>) -> RoomBlueprint {
        let outline = Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 0.0),
        ])
        .unwrap();
        RoomBlueprint::normal("square", outline, doors, vec![Transform::Identity]).unwrap()
    }

    fn four_door_square() -> RoomBlueprint {
        square(vec![
            Point2::new(0.0, 2.0),
            Point2::new(2.0, 4.0),
            Point2::new(4.0, 2.0),
            Point2::new(2.0, 0.0),
        ])
    }

    #[test]
    fn only_the_facing_door_fits_without_overlap() {
        let source = four_door_square();
        let candidate = four_door_square();
        // door 2 sits at (4, 2); its outer point is (5, 2). Shifting any
        // candidate door onto it aligns the doors, but only the west-facing
        // candidate door keeps the outlines apart; the other three drag the
        // candidate back across the source.
        let fits = find_fits(&source, 2, &candidate);
        assert_eq!(fits.len(), 1);
        let fit = &fits[0];
        assert_eq!(fit.source_door(), 2);
        assert_eq!(fit.candidate_door(), 0);
        assert!(!source.outline().overlaps(fit.placed().outline()));
        let placed_door = fit.placed().doors()[fit.candidate_door()];
        assert!(is_adjacent(
            &source.doors()[2],
            &placed_door,
            ADJACENCY_DELTA
        ));
    }

    #[test]
    fn one_fit_per_aligning_transform() {
        let source = four_door_square();
        let outline = Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 0.0),
        ])
        .unwrap();
        let candidate = RoomBlueprint::normal(
            "spinner",
            outline,
            vec![
                Point2::new(0.0, 2.0),
                Point2::new(2.0, 4.0),
                Point2::new(4.0, 2.0),
                Point2::new(2.0, 0.0),
            ],
            Transform::ROTATIONS.to_vec(),
        )
        .unwrap();
        // every rotation turns exactly one candidate door to face the
        // source, so each contributes exactly one placement
        let fits = find_fits(&source, 2, &candidate);
        assert_eq!(fits.len(), 4);
        for transform in Transform::ROTATIONS {
            assert_eq!(fits.iter().filter(|f| f.transform() == transform).count(), 1);
        }
    }

    #[test]
    fn wrong_facing_door_forces_overlap() {
        let source = four_door_square();
        // an east door can not attach east of the source
        let candidate = square(vec![Point2::new(4.0, 2.0)]);
        assert!(find_fits(&source, 2, &candidate).is_empty());
    }

    #[test]
    fn out_of_range_door_yields_nothing() {
        let source = four_door_square();
        assert!(find_fits(&source, 9, &four_door_square()).is_empty());
    }

    #[test]
    fn catalogue_fits_accumulate() {
        let source = four_door_square();
        let catalogue = vec![square(vec![Point2::new(0.0, 2.0)]), four_door_square()];
        let fits = find_all_fits(&source, 2, &catalogue);
        assert_eq!(fits.len(), 2);
    }
}
