//! The generated dungeon: an arena of placed rooms.
//!
//! Rooms live in a slotmap keyed by [`RoomId`]; door-to-room wiring is part
//! of each room record but is only ever written through
//! [`Dungeon::connect`], keeping every mutation of the layout auditable.
//! Rooms are never removed during a generation run, and consumers treat
//! the finished dungeon as read-only.

use slotmap::new_key_type;
use slotmap::SlotMap;

use crate::blueprint::{RoomBlueprint, RoomKind};
use crate::error::GenerationError;

new_key_type! {
    /// Identifier of a placed room.
    pub struct RoomId;
}

/// A placed blueprint instance in the generated dungeon.
#[derive(Debug, Clone)]
pub struct DungeonRoom {
    id: RoomId,
    depth: usize,
    blueprint: RoomBlueprint,
    doors: Vec<Option<RoomId>>,
}

impl DungeonRoom {
    /// The room's identifier in its dungeon.
    #[must_use]
    pub fn id(&self) -> RoomId {
        self.id
    }

    /// Graph distance from the spawn room.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The originating blueprint, in its placed (absolute) coordinates.
    #[must_use]
    pub fn blueprint(&self) -> &RoomBlueprint {
        &self.blueprint
    }

    /// The room's role, derived from its blueprint.
    #[must_use]
    pub fn kind(&self) -> RoomKind {
        self.blueprint.room_kind()
    }

    /// Door index to connected room, `None` for open doors.
    #[must_use]
    pub fn doors(&self) -> &[Option<RoomId>] {
        &self.doors
    }

    /// The room behind door `index`, if connected.
    #[must_use]
    pub fn door(&self, index: usize) -> Option<RoomId> {
        self.doors.get(index).copied().flatten()
    }

    /// Indices of doors not yet connected to another room.
    #[must_use]
    pub fn open_doors(&self) -> Vec<usize> {
        self.doors
            .iter()
            .enumerate()
            .filter(|(_, target)| target.is_none())
            .map(|(index, _)| index)
            .collect()
    }
}

/// Arena of placed rooms, mutated only by [`Dungeon::insert`] and
/// [`Dungeon::connect`].
#[derive(Debug, Clone, Default)]
pub struct Dungeon {
    rooms: SlotMap<RoomId, DungeonRoom>,
    spawn: Option<RoomId>,
}

impl Dungeon {
    /// Creates an empty dungeon.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of placed rooms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether no room has been placed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// The spawn room's id, once a spawn-kind room has been placed.
    #[must_use]
    pub fn spawn(&self) -> Option<RoomId> {
        self.spawn
    }

    /// Returns a room by id.
    #[must_use]
    pub fn get(&self, id: RoomId) -> Option<&DungeonRoom> {
        self.rooms.get(id)
    }

    /// Iterates over all rooms in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &DungeonRoom> {
        self.rooms.values()
    }

    /// Number of rooms with the given kind.
    #[must_use]
    pub fn count_of_kind(&self, kind: RoomKind) -> usize {
        self.iter().filter(|room| room.kind() == kind).count()
    }

    /// Places a room at `depth` with all doors open, returning its id.
    /// The first spawn-kind room becomes the dungeon's spawn.
    pub fn insert(&mut self, depth: usize, blueprint: RoomBlueprint) -> RoomId {
        let doors = vec![None; blueprint.door_count()];
        let id = self.rooms.insert_with_key(|id| DungeonRoom {
            id,
            depth,
            blueprint,
            doors,
        });
        if self.spawn.is_none() {
            if let Some(room) = self.rooms.get(id) {
                if room.kind() == RoomKind::Spawn {
                    self.spawn = Some(id);
                }
            }
        }
        id
    }

    /// Wires door `door_a` of room `a` to door `door_b` of room `b`,
    /// bidirectionally.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::RoomNotFound`] for unknown ids,
    /// [`GenerationError::DoorIndexOutOfRange`] for bad door indices, and
    /// [`GenerationError::DoorAlreadyConnected`] when either door is
    /// taken.
    pub fn connect(
        &mut self,
        a: RoomId,
        door_a: usize,
        b: RoomId,
        door_b: usize,
    ) -> Result<(), GenerationError> {
        self.check_door(a, door_a)?;
        self.check_door(b, door_b)?;
        if let Some(room) = self.rooms.get_mut(a) {
            room.doors[door_a] = Some(b);
        }
        if let Some(room) = self.rooms.get_mut(b) {
            room.doors[door_b] = Some(a);
        }
        Ok(())
    }

    fn check_door(&self, id: RoomId, door: usize) -> Result<(), GenerationError> {
        let room = self
            .rooms
            .get(id)
            .ok_or_else(|| GenerationError::RoomNotFound(format!("{id:?}")))?;
        match room.doors.get(door) {
            None => Err(GenerationError::DoorIndexOutOfRange {
                door,
                doors: room.doors.len(),
            }),
            Some(Some(_)) => Err(GenerationError::DoorAlreadyConnected {
                room: format!("{id:?}"),
                door,
            }),
            Some(None) => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;
    use crate::math::Point2;

    fn blueprint(doors: usize) -> RoomBlueprint {
        let outline = Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 0.0),
        ])
        .unwrap();
        let door_points = [
            Point2::new(0.0, 2.0),
            Point2::new(4.0, 2.0),
            Point2::new(2.0, 4.0),
            Point2::new(2.0, 0.0),
        ];
        RoomBlueprint::normal("room", outline, door_points[..doors].to_vec(), vec![]).unwrap()
    }

    #[test]
    fn insert_opens_all_doors() {
        let mut dungeon = Dungeon::new();
        let id = dungeon.insert(0, blueprint(3));
        let room = dungeon.get(id).unwrap();
        assert_eq!(room.open_doors(), vec![0, 1, 2]);
        assert_eq!(room.depth(), 0);
    }

    #[test]
    fn connect_is_bidirectional() {
        let mut dungeon = Dungeon::new();
        let a = dungeon.insert(0, blueprint(2));
        let b = dungeon.insert(1, blueprint(2));
        dungeon.connect(a, 1, b, 0).unwrap();
        assert_eq!(dungeon.get(a).unwrap().door(1), Some(b));
        assert_eq!(dungeon.get(b).unwrap().door(0), Some(a));
        assert_eq!(dungeon.get(a).unwrap().open_doors(), vec![0]);
    }

    #[test]
    fn double_connect_rejected() {
        let mut dungeon = Dungeon::new();
        let a = dungeon.insert(0, blueprint(2));
        let b = dungeon.insert(1, blueprint(2));
        let c = dungeon.insert(1, blueprint(2));
        dungeon.connect(a, 0, b, 0).unwrap();
        assert!(matches!(
            dungeon.connect(a, 0, c, 0),
            Err(GenerationError::DoorAlreadyConnected { .. })
        ));
    }

    #[test]
    fn bad_door_index_rejected() {
        let mut dungeon = Dungeon::new();
        let a = dungeon.insert(0, blueprint(1));
        let b = dungeon.insert(1, blueprint(1));
        assert!(matches!(
            dungeon.connect(a, 7, b, 0),
            Err(GenerationError::DoorIndexOutOfRange { door: 7, doors: 1 })
        ));
    }

    #[test]
    fn first_spawn_room_is_recorded() {
        let outline = Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 0.0),
        ])
        .unwrap();
        let spawn = RoomBlueprint::spawn(
            "start",
            outline,
            vec![Point2::new(0.0, 2.0)],
            vec![],
            Point2::new(2.0, 2.0),
        )
        .unwrap();
        let mut dungeon = Dungeon::new();
        let normal = dungeon.insert(1, blueprint(1));
        let spawn_id = dungeon.insert(0, spawn);
        assert_eq!(dungeon.spawn(), Some(spawn_id));
        assert_ne!(dungeon.spawn(), Some(normal));
        assert_eq!(dungeon.count_of_kind(RoomKind::Spawn), 1);
    }
}
