use crate::geometry::Transform;
use crate::math::Vector2;

use super::RoomBlueprint;

/// A blueprint instance fitted into a dungeon structure: the chosen
/// blueprint after a specific transform sequence and shift have been
/// applied.
///
/// This is the bridge between an abstract topology vertex and concretely
/// positioned geometry. `blueprint` holds the placed instance; `transforms`
/// and `shift` record how it got there so a consumer can replay the same
/// mutation onto its own representation of the room (schematics, meshes).
#[derive(Debug, Clone)]
pub struct MutatedRoomBlueprint {
    id: String,
    blueprint: RoomBlueprint,
    transforms: Vec<Transform>,
    shift: Vector2,
}

impl MutatedRoomBlueprint {
    /// Creates a placement record.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        blueprint: RoomBlueprint,
        transforms: Vec<Transform>,
        shift: Vector2,
    ) -> Self {
        Self {
            id: id.into(),
            blueprint,
            transforms,
            shift,
        }
    }

    /// Identifier of the placed room.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The placed blueprint instance (transformed and shifted).
    #[must_use]
    pub fn blueprint(&self) -> &RoomBlueprint {
        &self.blueprint
    }

    /// The transforms applied to the catalogue blueprint, in order.
    #[must_use]
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// The shift applied after transforming.
    #[must_use]
    pub fn shift(&self) -> &Vector2 {
        &self.shift
    }
}
