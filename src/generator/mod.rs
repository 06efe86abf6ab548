//! Dungeon generation: options, the placed-room arena and the two
//! generation strategies.
//!
//! Both generators are constructed with a seed, a blueprint catalogue and
//! validated [`GeneratorOptions`]; construction fails fast when the
//! catalogue cannot possibly satisfy the request. Failing to *place* a
//! room later is not an error: a run may legitimately end with fewer rooms
//! than asked for, and callers wanting a guarantee re-run with a new seed.

pub mod dungeon;
pub mod placer;
pub mod rng;
pub mod single_path;
pub mod topology_driven;

pub use dungeon::{Dungeon, DungeonRoom, RoomId};
pub use placer::{DoorPassage, PartitionPlacer, RoomStructure};
pub use rng::GenerationRng;
pub use single_path::SinglePathGenerator;
pub use topology_driven::TopologyGenerator;

use crate::blueprint::RoomBlueprint;
use crate::error::GenerationError;

/// Validated generation options shared by all generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    number_of_rooms: usize,
    maximum_room_distance: usize,
    max_iterations: usize,
    max_placement_attempts: usize,
}

impl GeneratorOptions {
    /// Creates options for `number_of_rooms` rooms with at most
    /// `maximum_room_distance` hops from the spawn room.
    ///
    /// The iteration cap defaults to `max(100, number_of_rooms)` so a run
    /// terminates even when dead ends occur; the placement-attempt budget
    /// of the partition placer defaults to 512.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::NumberOfRoomsTooSmall`] unless
    /// `number_of_rooms > 1`, and
    /// [`GenerationError::RoomDistanceOutOfRange`] unless
    /// `1 <= maximum_room_distance < number_of_rooms`.
    pub fn new(
        number_of_rooms: usize,
        maximum_room_distance: usize,
    ) -> Result<Self, GenerationError> {
        if number_of_rooms <= 1 {
            return Err(GenerationError::NumberOfRoomsTooSmall(number_of_rooms));
        }
        if maximum_room_distance < 1 || maximum_room_distance >= number_of_rooms {
            return Err(GenerationError::RoomDistanceOutOfRange {
                distance: maximum_room_distance,
                rooms: number_of_rooms,
            });
        }
        Ok(Self {
            number_of_rooms,
            maximum_room_distance,
            max_iterations: number_of_rooms.max(100),
            max_placement_attempts: 512,
        })
    }

    /// Overrides the iteration cap of the sequential generator.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::IterationCapTooSmall`] when the cap
    /// could end a run before `number_of_rooms` rooms were even possible.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Result<Self, GenerationError> {
        if max_iterations < self.number_of_rooms {
            return Err(GenerationError::IterationCapTooSmall {
                iterations: max_iterations,
                rooms: self.number_of_rooms,
            });
        }
        self.max_iterations = max_iterations;
        Ok(self)
    }

    /// Overrides the partition placer's placement-attempt budget.
    #[must_use]
    pub fn with_max_placement_attempts(mut self, max_placement_attempts: usize) -> Self {
        self.max_placement_attempts = max_placement_attempts.max(1);
        self
    }

    /// Requested room count.
    #[must_use]
    pub fn number_of_rooms(&self) -> usize {
        self.number_of_rooms
    }

    /// Maximum depth of any room.
    #[must_use]
    pub fn maximum_room_distance(&self) -> usize {
        self.maximum_room_distance
    }

    /// Upper bound on frontier expansion rounds.
    #[must_use]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Upper bound on probed placements per vertex in the partition
    /// placer.
    #[must_use]
    pub fn max_placement_attempts(&self) -> usize {
        self.max_placement_attempts
    }
}

/// Checks that the catalogue can possibly satisfy the requested room
/// count: more than two rooms need at least one single-door and one
/// multi-door blueprint to both grow and terminate a path.
pub(crate) fn validate_catalogue(
    blueprints: &[RoomBlueprint],
    options: &GeneratorOptions,
) -> Result<(), GenerationError> {
    if options.number_of_rooms() > 2 {
        let single_door = blueprints.iter().filter(|b| b.door_count() == 1).count();
        let multi_door = blueprints.iter().filter(|b| b.door_count() >= 2).count();
        if single_door == 0 || multi_door == 0 {
            return Err(GenerationError::InfeasibleCatalogue {
                rooms: options.number_of_rooms(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;
    use crate::math::Point2;

    #[test]
    fn option_bounds_enforced() {
        assert!(matches!(
            GeneratorOptions::new(1, 1),
            Err(GenerationError::NumberOfRoomsTooSmall(1))
        ));
        assert!(matches!(
            GeneratorOptions::new(3, 0),
            Err(GenerationError::RoomDistanceOutOfRange { .. })
        ));
        assert!(matches!(
            GeneratorOptions::new(3, 3),
            Err(GenerationError::RoomDistanceOutOfRange { .. })
        ));
        assert!(GeneratorOptions::new(3, 2).is_ok());
    }

    #[test]
    fn iteration_cap_must_cover_room_count() {
        let options = GeneratorOptions::new(150, 10).unwrap();
        assert_eq!(options.max_iterations(), 150);
        assert!(matches!(
            options.with_max_iterations(100),
            Err(GenerationError::IterationCapTooSmall { .. })
        ));
        let raised = options.with_max_iterations(400).unwrap();
        assert_eq!(raised.max_iterations(), 400);
    }

    #[test]
    fn catalogue_feasibility() {
        let outline = || {
            Polygon::new(vec![
                Point2::new(0.0, 0.0),
                Point2::new(0.0, 4.0),
                Point2::new(4.0, 4.0),
                Point2::new(4.0, 0.0),
            ])
            .unwrap()
        };
        let single = RoomBlueprint::normal(
            "single",
            outline(),
            vec![Point2::new(0.0, 2.0)],
            vec![],
        )
        .unwrap();
        let double = RoomBlueprint::normal(
            "double",
            outline(),
            vec![Point2::new(0.0, 2.0), Point2::new(4.0, 2.0)],
            vec![],
        )
        .unwrap();

        let options = GeneratorOptions::new(5, 4).unwrap();
        assert!(validate_catalogue(&[single.clone(), double.clone()], &options).is_ok());
        assert!(matches!(
            validate_catalogue(&[single.clone()], &options),
            Err(GenerationError::InfeasibleCatalogue { rooms: 5 })
        ));
        assert!(matches!(
            validate_catalogue(&[double], &options),
            Err(GenerationError::InfeasibleCatalogue { rooms: 5 })
        ));

        // two rooms need no multi-door blueprint
        let pair_options = GeneratorOptions::new(2, 1).unwrap();
        assert!(validate_catalogue(&[single], &pair_options).is_ok());
    }
}
