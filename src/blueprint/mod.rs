pub mod fit;
pub mod mutated;

pub use fit::{find_all_fits, find_fits, PossibleFit};
pub use mutated::MutatedRoomBlueprint;

use crate::error::BlueprintError;
use crate::geometry::{Orientation, Polygon, Transform};
use crate::math::{is_adjacent, points_equal, Point2, Vector2, ADJACENCY_DELTA};

/// The role a room plays in the dungeon, without its geometric payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomKind {
    /// The unique room the player starts in.
    Spawn,
    /// A connecting room.
    Normal,
    /// A terminal room ending a path.
    Final,
}

/// Kind-specific payload of a blueprint.
///
/// Spawn and final rooms carry one extra point each; behaviour only differs
/// in the extra containment invariant and in carrying that point through
/// transforms, so a tagged variant replaces any deeper hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum BlueprintKind {
    Spawn { spawn_point: Point2 },
    Normal,
    Final { stairs_point: Point2 },
}

impl BlueprintKind {
    /// The fieldless role tag for this payload.
    #[must_use]
    pub fn kind(&self) -> RoomKind {
        match self {
            BlueprintKind::Spawn { .. } => RoomKind::Spawn,
            BlueprintKind::Normal => RoomKind::Normal,
            BlueprintKind::Final { .. } => RoomKind::Final,
        }
    }

    fn map_point(&self, f: impl Fn(&Point2) -> Point2) -> BlueprintKind {
        match self {
            BlueprintKind::Spawn { spawn_point } => BlueprintKind::Spawn {
                spawn_point: f(spawn_point),
            },
            BlueprintKind::Normal => BlueprintKind::Normal,
            BlueprintKind::Final { stairs_point } => BlueprintKind::Final {
                stairs_point: f(stairs_point),
            },
        }
    }

    fn special_point(&self) -> Option<(&'static str, &Point2)> {
        match self {
            BlueprintKind::Spawn { spawn_point } => Some(("spawn", spawn_point)),
            BlueprintKind::Normal => None,
            BlueprintKind::Final { stairs_point } => Some(("stairs", stairs_point)),
        }
    }
}

/// A reusable room shape with designated door positions.
///
/// Blueprints are immutable values: every mutation operation returns a new
/// instance, and construction rejects any blueprint violating the model's
/// invariants (rectilinear clockwise outline of at least 4 unique vertices,
/// unique non-adjacent doors on exactly one outline edge each).
#[derive(Debug, Clone, PartialEq)]
pub struct RoomBlueprint {
    name: String,
    outline: Polygon,
    doors: Vec<Point2>,
    allowed_transforms: Vec<Transform>,
    kind: BlueprintKind,
}

impl RoomBlueprint {
    /// Creates and validates a blueprint.
    ///
    /// An empty `allowed_transforms` list is treated as identity-only.
    ///
    /// # Errors
    ///
    /// Returns the specific [`BlueprintError`] for the first violated
    /// invariant; on failure no usable value exists.
    pub fn new(
        name: impl Into<String>,
        outline: Polygon,
        doors: Vec<Point2>,
        allowed_transforms: Vec<Transform>,
        kind: BlueprintKind,
    ) -> Result<Self, BlueprintError> {
        let name = name.into();
        let allowed_transforms = if allowed_transforms.is_empty() {
            vec![Transform::Identity]
        } else {
            allowed_transforms
        };
        let blueprint = Self {
            name,
            outline,
            doors,
            allowed_transforms,
            kind,
        };
        blueprint.validate()?;
        Ok(blueprint)
    }

    /// Shorthand for a normal room blueprint.
    ///
    /// # Errors
    ///
    /// See [`RoomBlueprint::new`].
    pub fn normal(
        name: impl Into<String>,
        outline: Polygon,
        doors: Vec<Point2>,
        allowed_transforms: Vec<Transform>,
    ) -> Result<Self, BlueprintError> {
        Self::new(name, outline, doors, allowed_transforms, BlueprintKind::Normal)
    }

    /// Shorthand for a spawn room blueprint with its spawn point.
    ///
    /// # Errors
    ///
    /// See [`RoomBlueprint::new`].
    pub fn spawn(
        name: impl Into<String>,
        outline: Polygon,
        doors: Vec<Point2>,
        allowed_transforms: Vec<Transform>,
        spawn_point: Point2,
    ) -> Result<Self, BlueprintError> {
        Self::new(
            name,
            outline,
            doors,
            allowed_transforms,
            BlueprintKind::Spawn { spawn_point },
        )
    }

    /// Shorthand for a final room blueprint with its stairs point.
    ///
    /// # Errors
    ///
    /// See [`RoomBlueprint::new`].
    pub fn final_room(
        name: impl Into<String>,
        outline: Polygon,
        doors: Vec<Point2>,
        allowed_transforms: Vec<Transform>,
        stairs_point: Point2,
    ) -> Result<Self, BlueprintError> {
        Self::new(
            name,
            outline,
            doors,
            allowed_transforms,
            BlueprintKind::Final { stairs_point },
        )
    }

    fn validate(&self) -> Result<(), BlueprintError> {
        let name = || self.name.clone();

        if self.doors.is_empty() {
            return Err(BlueprintError::NoDoors { name: name() });
        }
        let vertices = self.outline.vertices();
        if vertices.len() < 4 {
            return Err(BlueprintError::TooFewVertices {
                name: name(),
                count: vertices.len(),
            });
        }
        if self.outline.orientation() != Orientation::Clockwise {
            return Err(BlueprintError::NotClockwise { name: name() });
        }
        let unique_vertices = vertices
            .iter()
            .all(|v| vertices.iter().filter(|&w| points_equal(v, w)).count() == 1);
        if !unique_vertices {
            return Err(BlueprintError::DuplicateVertex { name: name() });
        }
        let rectilinear = self
            .outline
            .segments()
            .iter()
            .all(|s| s.is_vertical() || s.is_horizontal());
        if !rectilinear {
            return Err(BlueprintError::NotRectilinear { name: name() });
        }
        let unique_doors = self
            .doors
            .iter()
            .all(|d| self.doors.iter().filter(|&e| points_equal(d, e)).count() == 1);
        if !unique_doors {
            return Err(BlueprintError::DuplicateDoor { name: name() });
        }
        let segments = self.outline.segments();
        for door in &self.doors {
            let edge_count = segments.iter().filter(|s| s.contains_point(door)).count();
            if edge_count != 1 {
                return Err(BlueprintError::DoorOffBoundary {
                    name: name(),
                    x: door.x,
                    y: door.y,
                });
            }
        }
        let doors_apart = self.doors.iter().all(|d| {
            !self
                .doors
                .iter()
                .any(|e| !points_equal(d, e) && is_adjacent(d, e, ADJACENCY_DELTA))
        });
        if !doors_apart {
            return Err(BlueprintError::AdjacentDoors { name: name() });
        }
        if let Some((label, point)) = self.kind.special_point() {
            if !self.outline.contains_interior(point) {
                return Err(BlueprintError::SpecialPointOutsideOutline {
                    name: name(),
                    point: label,
                });
            }
        }
        Ok(())
    }

    /// Rebuilds from parts that already satisfy the invariants.
    ///
    /// Every mutation below only permutes axes, translates, or both, which
    /// preserves each validated property, so no fallible re-check is needed.
    fn from_parts(
        name: String,
        outline: Polygon,
        doors: Vec<Point2>,
        allowed_transforms: Vec<Transform>,
        kind: BlueprintKind,
    ) -> Self {
        let blueprint = Self {
            name,
            outline,
            doors,
            allowed_transforms,
            kind,
        };
        debug_assert!(blueprint.validate().is_ok());
        blueprint
    }

    /// Human-readable identifier of the blueprint.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The outline polygon.
    #[must_use]
    pub fn outline(&self) -> &Polygon {
        &self.outline
    }

    /// The door positions, in index order.
    #[must_use]
    pub fn doors(&self) -> &[Point2] {
        &self.doors
    }

    /// Number of doors.
    #[must_use]
    pub fn door_count(&self) -> usize {
        self.doors.len()
    }

    /// The transforms this blueprint may legally undergo.
    #[must_use]
    pub fn allowed_transforms(&self) -> &[Transform] {
        &self.allowed_transforms
    }

    /// The kind payload.
    #[must_use]
    pub fn kind(&self) -> &BlueprintKind {
        &self.kind
    }

    /// The fieldless role tag.
    #[must_use]
    pub fn room_kind(&self) -> RoomKind {
        self.kind.kind()
    }

    /// Applies `transform` to outline, doors and kind payload.
    ///
    /// A transform outside [`Self::allowed_transforms`] leaves the
    /// blueprint unchanged.
    #[must_use]
    pub fn transform(&self, transform: Transform) -> RoomBlueprint {
        if !self.allowed_transforms.contains(&transform) {
            return self.clone();
        }
        Self::from_parts(
            self.name.clone(),
            self.outline.transform(transform),
            self.doors.iter().map(|d| transform.apply(d)).collect(),
            self.allowed_transforms.clone(),
            self.kind.map_point(|p| transform.apply(p)),
        )
    }

    /// Shifts the whole blueprint by `by`.
    #[must_use]
    pub fn shift(&self, by: &Vector2) -> RoomBlueprint {
        Self::from_parts(
            self.name.clone(),
            self.outline.translate(by),
            self.doors.iter().map(|d| d + by).collect(),
            self.allowed_transforms.clone(),
            self.kind.map_point(|p| p + by),
        )
    }

    /// Shifts the blueprint so the outline's minimum corner sits at the
    /// origin, yielding canonical relative coordinates.
    #[must_use]
    pub fn normalize(&self) -> RoomBlueprint {
        let min = self.outline.min();
        self.shift(&Vector2::new(-min.x, -min.y))
    }

    /// Geometric equality within tolerance: same outline ring, same doors,
    /// same kind payload. Name and allowed transforms are ignored.
    #[must_use]
    pub fn same_geometry(&self, other: &RoomBlueprint) -> bool {
        self.outline.vertices().len() == other.outline.vertices().len()
            && self
                .outline
                .vertices()
                .iter()
                .zip(other.outline.vertices())
                .all(|(a, b)| points_equal(a, b))
            && self.doors.len() == other.doors.len()
            && self
                .doors
                .iter()
                .zip(&other.doors)
                .all(|(a, b)| points_equal(a, b))
            && match (self.kind.special_point(), other.kind.special_point()) {
                (None, None) => true,
                (Some((la, pa)), Some((lb, pb))) => la == lb && points_equal(pa, pb),
                _ => false,
            }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn square_outline() -> Polygon {
        Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 0.0),
        ])
        .unwrap()
    }

    fn two_door_square() -> RoomBlueprint {
        RoomBlueprint::normal(
            "corridor",
            square_outline(),
            vec![Point2::new(0.0, 2.0), Point2::new(4.0, 2.0)],
            Transform::ALL.to_vec(),
        )
        .unwrap()
    }

    #[test]
    fn valid_blueprint_constructs() {
        let bp = two_door_square();
        assert_eq!(bp.door_count(), 2);
        assert_eq!(bp.room_kind(), RoomKind::Normal);
    }

    #[test]
    fn zero_doors_rejected() {
        let result = RoomBlueprint::normal("bad", square_outline(), vec![], vec![]);
        assert!(matches!(result, Err(BlueprintError::NoDoors { .. })));
    }

    #[test]
    fn counter_clockwise_outline_rejected() {
        let ccw = square_outline().reverse_orientation();
        let result = RoomBlueprint::normal("bad", ccw, vec![Point2::new(0.0, 2.0)], vec![]);
        assert!(matches!(result, Err(BlueprintError::NotClockwise { .. })));
    }

    #[test]
    fn triangle_outline_rejected() {
        let triangle = Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(4.0, 4.0),
        ])
        .unwrap();
        let result = RoomBlueprint::normal("bad", triangle, vec![Point2::new(0.0, 2.0)], vec![]);
        assert!(matches!(result, Err(BlueprintError::TooFewVertices { .. })));
    }

    #[test]
    fn diagonal_edge_rejected() {
        let slanted = Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(4.0, 4.0),
            Point2::new(3.0, 0.0),
        ])
        .unwrap();
        let result = RoomBlueprint::normal("bad", slanted, vec![Point2::new(0.0, 2.0)], vec![]);
        assert!(matches!(result, Err(BlueprintError::NotRectilinear { .. })));
    }

    #[test]
    fn duplicate_vertex_rejected() {
        let pinched = Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 0.0),
        ])
        .unwrap();
        let result = RoomBlueprint::normal("bad", pinched, vec![Point2::new(0.0, 2.0)], vec![]);
        assert!(matches!(result, Err(BlueprintError::DuplicateVertex { .. })));
    }

    #[test]
    fn door_off_boundary_rejected() {
        let result = RoomBlueprint::normal(
            "bad",
            square_outline(),
            vec![Point2::new(2.0, 2.0)],
            vec![],
        );
        assert!(matches!(result, Err(BlueprintError::DoorOffBoundary { .. })));
    }

    #[test]
    fn corner_door_rejected() {
        // a corner lies on two edges, not exactly one
        let result = RoomBlueprint::normal(
            "bad",
            square_outline(),
            vec![Point2::new(0.0, 0.0)],
            vec![],
        );
        assert!(matches!(result, Err(BlueprintError::DoorOffBoundary { .. })));
    }

    #[test]
    fn adjacent_doors_rejected() {
        let result = RoomBlueprint::normal(
            "bad",
            square_outline(),
            vec![Point2::new(0.0, 2.0), Point2::new(0.0, 3.0)],
            vec![],
        );
        assert!(matches!(result, Err(BlueprintError::AdjacentDoors { .. })));
    }

    #[test]
    fn duplicate_doors_rejected() {
        let result = RoomBlueprint::normal(
            "bad",
            square_outline(),
            vec![Point2::new(0.0, 2.0), Point2::new(0.0, 2.0)],
            vec![],
        );
        assert!(matches!(result, Err(BlueprintError::DuplicateDoor { .. })));
    }

    #[test]
    fn spawn_point_on_boundary_rejected() {
        let result = RoomBlueprint::spawn(
            "bad",
            square_outline(),
            vec![Point2::new(0.0, 2.0)],
            vec![],
            Point2::new(0.0, 1.0),
        );
        assert!(matches!(
            result,
            Err(BlueprintError::SpecialPointOutsideOutline { point: "spawn", .. })
        ));
    }

    #[test]
    fn stairs_point_inside_accepted() {
        let bp = RoomBlueprint::final_room(
            "end",
            square_outline(),
            vec![Point2::new(0.0, 2.0)],
            vec![],
            Point2::new(2.0, 2.0),
        )
        .unwrap();
        assert_eq!(bp.room_kind(), RoomKind::Final);
    }

    #[test]
    fn shift_round_trip_restores_coordinates() {
        let bp = two_door_square();
        let shifted = bp.shift(&Vector2::new(7.0, -3.0));
        let back = shifted.shift(&Vector2::new(-7.0, 3.0));
        assert!(bp.same_geometry(&back));
    }

    #[test]
    fn normalize_is_idempotent() {
        let bp = two_door_square().shift(&Vector2::new(11.0, 5.0));
        let normalized = bp.normalize();
        assert!((normalized.outline().min().x).abs() < crate::math::TOLERANCE);
        assert!((normalized.outline().min().y).abs() < crate::math::TOLERANCE);
        assert!(normalized.same_geometry(&normalized.normalize()));
    }

    #[test]
    fn four_quarter_rotations_restore_geometry() {
        let bp = two_door_square();
        let mut rotated = bp.clone();
        for _ in 0..4 {
            rotated = rotated.transform(Transform::Rotate90);
        }
        assert!(bp.same_geometry(&rotated));
    }

    #[test]
    fn disallowed_transform_is_a_no_op() {
        let bp = RoomBlueprint::normal(
            "fixed",
            square_outline(),
            vec![Point2::new(0.0, 2.0)],
            vec![Transform::Identity],
        )
        .unwrap();
        assert!(bp.same_geometry(&bp.transform(Transform::Rotate90)));
    }

    #[test]
    fn mirror_transform_keeps_blueprint_valid() {
        let bp = two_door_square();
        let mirrored = bp.transform(Transform::MirrorX);
        assert_eq!(
            mirrored.outline().orientation(),
            crate::geometry::Orientation::Clockwise
        );
        assert_eq!(mirrored.door_count(), 2);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn shift_round_trip(dx in -1000i32..1000, dy in -1000i32..1000) {
                let bp = two_door_square();
                let v = Vector2::new(f64::from(dx), f64::from(dy));
                let back = bp.shift(&v).shift(&(-v));
                prop_assert!(bp.same_geometry(&back));
            }

            #[test]
            fn normalize_lands_on_the_origin(dx in -1000i32..1000, dy in -1000i32..1000) {
                let v = Vector2::new(f64::from(dx), f64::from(dy));
                let normalized = two_door_square().shift(&v).normalize();
                prop_assert!(normalized.outline().min().x.abs() < crate::math::TOLERANCE);
                prop_assert!(normalized.outline().min().y.abs() < crate::math::TOLERANCE);
            }

            #[test]
            fn every_allowed_transform_preserves_validity(index in 0usize..6) {
                let transform = Transform::ALL[index];
                let transformed = two_door_square().transform(transform);
                prop_assert_eq!(transformed.door_count(), 2);
                prop_assert_eq!(
                    transformed.outline().orientation(),
                    crate::geometry::Orientation::Clockwise
                );
            }
        }
    }
}
