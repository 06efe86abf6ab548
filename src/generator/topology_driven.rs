//! The topology-driven generator.
//!
//! Realizes an explicit target [`Topology`] as placed geometry: the
//! catalogue is filtered down to blueprints whose door counts occur as
//! vertex degrees (failing construction when a degree has no match), the
//! topology is decomposed into balanced partitions, and the partition
//! placer materializes the vertices one partition at a time. Partitions
//! adjacent in the topology depend on each other's door choices, so they
//! are processed strictly in sequence.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use tracing::debug;

use crate::blueprint::{RoomBlueprint, RoomKind};
use crate::error::{GenerationError, Result};
use crate::graph::{BfsDecomposer, OrderedPartition};
use crate::topology::Topology;

use super::dungeon::{Dungeon, RoomId};
use super::placer::{PartitionPlacer, RoomStructure};
use super::rng::GenerationRng;
use super::{validate_catalogue, GeneratorOptions};

/// Generates a dungeon realizing a target topology.
#[derive(Debug)]
pub struct TopologyGenerator {
    topology: Topology,
    rng: GenerationRng,
    blueprints: Vec<RoomBlueprint>,
    options: GeneratorOptions,
}

impl TopologyGenerator {
    /// Creates a generator for `topology` from a seed, a catalogue and
    /// options.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::NoBlueprintForDoorCount`] when some
    /// vertex degree has no matching blueprint,
    /// [`GenerationError::NoBlueprintForVertex`] when a vertex's kind
    /// constraint filters every candidate away, or the shared
    /// catalogue-feasibility errors.
    pub fn new(
        topology: Topology,
        seed: u64,
        blueprints: Vec<RoomBlueprint>,
        options: GeneratorOptions,
    ) -> std::result::Result<Self, GenerationError> {
        validate_catalogue(&blueprints, &options)?;
        let blueprints = Self::filter_blueprints(blueprints, &topology)?;
        Ok(Self {
            topology,
            rng: GenerationRng::new(seed),
            blueprints,
            options,
        })
    }

    /// Keeps the blueprints whose door count occurs as a vertex degree and
    /// checks that every vertex retains at least one candidate.
    fn filter_blueprints(
        blueprints: Vec<RoomBlueprint>,
        topology: &Topology,
    ) -> std::result::Result<Vec<RoomBlueprint>, GenerationError> {
        let needed: BTreeSet<usize> = topology
            .vertex_keys()
            .map(|key| topology.degree(key))
            .collect();
        for &door_count in &needed {
            if !blueprints
                .iter()
                .any(|blueprint| blueprint.door_count() == door_count)
            {
                return Err(GenerationError::NoBlueprintForDoorCount(door_count));
            }
        }
        let total = blueprints.len();
        let filtered: Vec<RoomBlueprint> = blueprints
            .into_iter()
            .filter(|blueprint| needed.contains(&blueprint.door_count()))
            .collect();
        for vertex in topology.vertex_keys() {
            let degree = topology.degree(vertex);
            let constraint = topology.constraint(vertex);
            let viable = filtered.iter().any(|blueprint| {
                blueprint.door_count() == degree
                    && constraint.map_or(true, |kinds| kinds.contains(&blueprint.room_kind()))
            });
            if !viable {
                return Err(GenerationError::NoBlueprintForVertex {
                    vertex: vertex.to_owned(),
                });
            }
        }
        debug!(kept = filtered.len(), total, "filtered blueprint catalogue");
        Ok(filtered)
    }

    /// Runs the generation, consuming the generator so a seed always maps
    /// to exactly one run.
    ///
    /// A vertex that cannot be placed ends the run with the rooms placed
    /// so far, an undershot result rather than an error.
    ///
    /// # Errors
    ///
    /// Internal wiring errors only.
    pub fn generate(mut self) -> Result<Dungeon> {
        let partitions = BfsDecomposer::default().decompose(self.topology.graph());
        let partitions = Self::order_by_adjacency(partitions, &self.topology);
        debug!(
            seed = self.rng.seed(),
            partitions = partitions.len(),
            vertices = self.topology.len(),
            "decomposed target topology"
        );

        let placer = PartitionPlacer::new(
            &self.topology,
            &self.blueprints,
            self.options.max_placement_attempts(),
        );
        let mut structure = RoomStructure::new();
        for partition in &partitions {
            if !placer.place_partition(partition, &mut structure, &mut self.rng)? {
                debug!(
                    placed = structure.len(),
                    requested = self.topology.len(),
                    "placement exhausted, returning partial dungeon"
                );
                break;
            }
        }

        Self::into_dungeon(&self.topology, &structure)
    }

    /// Reorders partitions so each one (after the first) shares a topology
    /// edge with an earlier one; placement inside a partition can then
    /// always anchor on an already-placed neighbor.
    fn order_by_adjacency(
        mut partitions: Vec<OrderedPartition>,
        topology: &Topology,
    ) -> Vec<OrderedPartition> {
        if partitions.is_empty() {
            return partitions;
        }
        let mut ordered = vec![partitions.remove(0)];
        while !partitions.is_empty() {
            let next = partitions
                .iter()
                .position(|candidate| {
                    ordered
                        .iter()
                        .any(|placed| placed.is_next_to(topology.graph(), candidate))
                })
                .unwrap_or(0);
            ordered.push(partitions.remove(next));
        }
        ordered
    }

    /// Converts the placed structure into the dungeon arena, wiring doors
    /// from the structure's passages and measuring depths from the spawn
    /// room (the unique spawn-kind room if one was placed, else the first
    /// room placed).
    fn into_dungeon(topology: &Topology, structure: &RoomStructure) -> Result<Dungeon> {
        let mut dungeon = Dungeon::new();
        let Some(first_placed) = structure.placement_order().first() else {
            return Ok(dungeon);
        };

        let spawn_vertices: Vec<&str> = structure
            .placement_order()
            .iter()
            .filter(|&key| {
                structure
                    .room(key)
                    .map_or(false, |room| room.blueprint().room_kind() == RoomKind::Spawn)
            })
            .map(String::as_str)
            .collect();
        let spawn_vertex = match spawn_vertices.as_slice() {
            [only] => *only,
            _ => first_placed.as_str(),
        };

        let mut ids: BTreeMap<&str, RoomId> = BTreeMap::new();
        for key in structure.placement_order() {
            let Some(room) = structure.room(key) else {
                continue;
            };
            let depth = topology.shortest_distance(spawn_vertex, key).unwrap_or(0);
            let id = dungeon.insert(depth, room.blueprint().clone());
            ids.insert(key.as_str(), id);
        }
        for edge in structure.graph().edges() {
            let (Some(&from), Some(&to)) = (ids.get(edge.from()), ids.get(edge.to())) else {
                continue;
            };
            let passage = edge.descriptor();
            dungeon.connect(from, passage.from_door, to, passage.to_door)?;
        }
        Ok(dungeon)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Polygon, Transform};
    use crate::math::Point2;

    fn square() -> Polygon {
        Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 0.0),
        ])
        .unwrap()
    }

    fn spawn_blueprint() -> RoomBlueprint {
        RoomBlueprint::spawn(
            "spawn",
            square(),
            vec![Point2::new(4.0, 2.0)],
            vec![],
            Point2::new(2.0, 2.0),
        )
        .unwrap()
    }

    fn corridor_blueprint() -> RoomBlueprint {
        RoomBlueprint::normal(
            "corridor",
            square(),
            vec![Point2::new(0.0, 2.0), Point2::new(4.0, 2.0)],
            vec![],
        )
        .unwrap()
    }

    fn final_blueprint() -> RoomBlueprint {
        RoomBlueprint::final_room(
            "stairs",
            square(),
            vec![Point2::new(0.0, 2.0)],
            vec![],
            Point2::new(2.0, 2.0),
        )
        .unwrap()
    }

    fn path_topology() -> Topology {
        Topology::new(
            vec![
                ("a".to_owned(), Some(vec![RoomKind::Spawn])),
                ("b".to_owned(), None),
                ("c".to_owned(), Some(vec![RoomKind::Final])),
            ],
            vec![
                ("a".to_owned(), "b".to_owned()),
                ("b".to_owned(), "c".to_owned()),
            ],
        )
        .unwrap()
    }

    #[test]
    fn path_topology_is_realized() {
        let catalogue = vec![spawn_blueprint(), corridor_blueprint(), final_blueprint()];
        let options = GeneratorOptions::new(3, 2).unwrap();
        let generator = TopologyGenerator::new(path_topology(), 0, catalogue, options).unwrap();
        let dungeon = generator.generate().unwrap();

        assert_eq!(dungeon.len(), 3);
        assert_eq!(dungeon.count_of_kind(RoomKind::Spawn), 1);
        assert_eq!(dungeon.count_of_kind(RoomKind::Final), 1);

        let spawn_id = dungeon.spawn().unwrap();
        let spawn = dungeon.get(spawn_id).unwrap();
        assert_eq!(spawn.depth(), 0);
        let corridor_id = spawn.door(0).unwrap();
        let corridor = dungeon.get(corridor_id).unwrap();
        assert_eq!(corridor.depth(), 1);
        assert_eq!(corridor.open_doors(), Vec::<usize>::new());
        let stairs_id = corridor
            .doors()
            .iter()
            .flatten()
            .find(|&&id| id != spawn_id)
            .copied()
            .unwrap();
        assert_eq!(dungeon.get(stairs_id).unwrap().depth(), 2);

        let rooms: Vec<_> = dungeon.iter().collect();
        for (i, first) in rooms.iter().enumerate() {
            for second in &rooms[i + 1..] {
                assert!(!first
                    .blueprint()
                    .outline()
                    .overlaps(second.blueprint().outline()));
            }
        }
    }

    #[test]
    fn missing_door_count_fails_construction() {
        // the star's hub needs a 4-door blueprint the catalogue lacks
        let topology = Topology::unconstrained(
            &["hub", "n", "e", "s", "w"],
            &[("hub", "n"), ("hub", "e"), ("hub", "s"), ("hub", "w")],
        )
        .unwrap();
        let catalogue = vec![spawn_blueprint(), corridor_blueprint(), final_blueprint()];
        let options = GeneratorOptions::new(5, 2).unwrap();
        assert!(matches!(
            TopologyGenerator::new(topology, 0, catalogue, options),
            Err(GenerationError::NoBlueprintForDoorCount(4))
        ));
    }

    #[test]
    fn unsatisfiable_kind_constraint_fails_construction() {
        let topology = Topology::new(
            vec![
                ("a".to_owned(), Some(vec![RoomKind::Final])),
                ("b".to_owned(), None),
                ("c".to_owned(), Some(vec![RoomKind::Final])),
            ],
            vec![
                ("a".to_owned(), "b".to_owned()),
                ("b".to_owned(), "c".to_owned()),
            ],
        )
        .unwrap();
        // only one single-door blueprint and it is a spawn room
        let catalogue = vec![spawn_blueprint(), corridor_blueprint()];
        let options = GeneratorOptions::new(3, 2).unwrap();
        assert!(matches!(
            TopologyGenerator::new(topology, 0, catalogue, options),
            Err(GenerationError::NoBlueprintForVertex { .. })
        ));
    }

    #[test]
    fn four_cycle_is_realized_with_rotations() {
        let topology = Topology::unconstrained(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")],
        )
        .unwrap();
        let corner = RoomBlueprint::normal(
            "corner",
            square(),
            vec![Point2::new(4.0, 2.0), Point2::new(2.0, 0.0)],
            Transform::ROTATIONS.to_vec(),
        )
        .unwrap();
        // the extra single-door room satisfies the base feasibility check
        // and is filtered out against this all-degree-2 topology
        let catalogue = vec![corner, final_blueprint()];
        let options = GeneratorOptions::new(4, 3).unwrap();
        let generator = TopologyGenerator::new(topology, 0, catalogue, options).unwrap();
        let dungeon = generator.generate().unwrap();

        assert_eq!(dungeon.len(), 4);
        for room in dungeon.iter() {
            assert!(room.open_doors().is_empty());
            assert_eq!(room.doors().len(), 2);
        }
    }

    #[test]
    fn geometric_dead_end_returns_partial_dungeon() {
        // the terminal room only offers an east door and may not rotate,
        // so it can never sit east of the corridor without overlapping
        let blocked_final = RoomBlueprint::final_room(
            "blocked",
            square(),
            vec![Point2::new(4.0, 2.0)],
            vec![],
            Point2::new(2.0, 2.0),
        )
        .unwrap();
        let catalogue = vec![spawn_blueprint(), corridor_blueprint(), blocked_final];
        let options = GeneratorOptions::new(3, 2).unwrap();
        let generator = TopologyGenerator::new(path_topology(), 0, catalogue, options).unwrap();
        let dungeon = generator.generate().unwrap();
        assert!(dungeon.len() < 3);
        assert!(!dungeon.is_empty());
    }
}
