//! Neighbor-constrained placement of blueprints into a partitioned
//! topology.
//!
//! The placer fills one topology vertex at a time. A vertex whose placed
//! neighbors are known must receive a blueprint that simultaneously
//! satisfies door adjacency to *every* one of them and overlaps no placed
//! room, a harder search than the single-door fit finder. It is run as a
//! bounded enumeration over (candidate x transform x anchor-door pairing):
//! the first placed neighbor anchors the shift exactly like the fit
//! finder's outer-point alignment, after which adjacency to the remaining
//! neighbors is a deterministic check. Among valid placements the one
//! growing the structure's bounding box least wins, which keeps layouts
//! compact and later vertices placeable.

use std::collections::BTreeSet;

use tracing::debug;
use tracing::trace;

use crate::blueprint::{MutatedRoomBlueprint, RoomBlueprint};
use crate::error::TopologyError;
use crate::geometry::{Polygon, Transform};
use crate::graph::{Flippable, Graph, OrderedPartition};
use crate::math::{adjacent_points, is_adjacent, points_equal, Vector2, ADJACENCY_DELTA};
use crate::topology::Topology;

use super::rng::GenerationRng;

/// Door pairing carried by a structure edge: `from_door` belongs to the
/// edge's `from` room, `to_door` to its `to` room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorPassage {
    pub from_door: usize,
    pub to_door: usize,
}

impl Flippable for DoorPassage {
    fn flip(&self) -> Self {
        DoorPassage {
            from_door: self.to_door,
            to_door: self.from_door,
        }
    }
}

/// The rooms placed so far, keyed by topology vertex, with door passages
/// as edges.
#[derive(Debug, Clone, Default)]
pub struct RoomStructure {
    graph: Graph<MutatedRoomBlueprint, DoorPassage>,
    placement_order: Vec<String>,
}

impl RoomStructure {
    /// Creates an empty structure.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of placed rooms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    /// Whether nothing has been placed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Whether `key` has been placed.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.graph.contains(key)
    }

    /// The placement at `key`, if any.
    #[must_use]
    pub fn room(&self, key: &str) -> Option<&MutatedRoomBlueprint> {
        self.graph.vertex(key)
    }

    /// Vertex keys in the order they were placed.
    #[must_use]
    pub fn placement_order(&self) -> &[String] {
        &self.placement_order
    }

    /// All placements, in placement order.
    pub fn rooms(&self) -> impl Iterator<Item = &MutatedRoomBlueprint> {
        self.placement_order
            .iter()
            .filter_map(|key| self.graph.vertex(key))
    }

    /// The underlying graph view.
    #[must_use]
    pub fn graph(&self) -> &Graph<MutatedRoomBlueprint, DoorPassage> {
        &self.graph
    }

    /// Records a placement.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicateVertex`] when the key is taken.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        placement: MutatedRoomBlueprint,
    ) -> Result<(), TopologyError> {
        let key = key.into();
        self.graph.add_vertex(key.clone(), placement)?;
        self.placement_order.push(key);
        Ok(())
    }

    /// Wires door `from_door` of `from` to door `to_door` of `to`.
    ///
    /// # Errors
    ///
    /// See [`Graph::add_edge`].
    pub fn connect(
        &mut self,
        from: &str,
        from_door: usize,
        to: &str,
        to_door: usize,
    ) -> Result<(), TopologyError> {
        self.graph
            .add_edge(from, to, DoorPassage { from_door, to_door })
    }

    /// Door indices of `key` not yet used by a passage.
    #[must_use]
    pub fn free_doors(&self, key: &str) -> Vec<usize> {
        let Some(room) = self.graph.vertex(key) else {
            return Vec::new();
        };
        let used: BTreeSet<usize> = self
            .graph
            .incident_edges(key)
            .filter_map(|edge| edge.with_perspective(key).ok())
            .map(|edge| edge.descriptor().from_door)
            .collect();
        (0..room.blueprint().door_count())
            .filter(|index| !used.contains(index))
            .collect()
    }

    /// Whether `outline` overlaps any placed room.
    #[must_use]
    pub fn overlaps_any(&self, outline: &Polygon) -> bool {
        self.rooms()
            .any(|room| room.blueprint().outline().overlaps(outline))
    }
}

/// A door link a placement commits to: the new room's `own_door` meets
/// `neighbor`'s `neighbor_door` across the wall gap.
#[derive(Debug, Clone)]
struct Link {
    neighbor: String,
    neighbor_door: usize,
    own_door: usize,
}

/// Places the vertices of topology partitions into a [`RoomStructure`].
#[derive(Debug, Clone, Copy)]
pub struct PartitionPlacer<'a> {
    topology: &'a Topology,
    blueprints: &'a [RoomBlueprint],
    attempt_budget: usize,
}

impl<'a> PartitionPlacer<'a> {
    /// Creates a placer over a filtered catalogue. `attempt_budget` bounds
    /// the number of probed placements per vertex.
    #[must_use]
    pub fn new(topology: &'a Topology, blueprints: &'a [RoomBlueprint], attempt_budget: usize) -> Self {
        Self {
            topology,
            blueprints,
            attempt_budget: attempt_budget.max(1),
        }
    }

    /// Places every vertex of `partition` into `structure`.
    ///
    /// Vertices are taken in partition order, deferring any vertex whose
    /// placed neighbors do not exist yet (only the very first room of an
    /// empty structure is placed freely). Returns `Ok(false)`, not an
    /// error, as soon as one vertex cannot be placed; the structure keeps
    /// everything placed so far.
    ///
    /// # Errors
    ///
    /// Internal wiring errors only.
    pub fn place_partition(
        &self,
        partition: &OrderedPartition,
        structure: &mut RoomStructure,
        rng: &mut GenerationRng,
    ) -> Result<bool, TopologyError> {
        let mut pending: Vec<String> = partition
            .vertices()
            .iter()
            .filter(|vertex| !structure.contains(vertex.as_str()))
            .cloned()
            .collect();

        while !pending.is_empty() {
            let next = if structure.is_empty() {
                0
            } else {
                match pending.iter().position(|vertex| {
                    self.topology
                        .neighbors(vertex)
                        .any(|neighbor| structure.contains(neighbor))
                }) {
                    Some(index) => index,
                    None => {
                        debug!(
                            remaining = pending.len(),
                            "partition detached from placed structure"
                        );
                        return Ok(false);
                    }
                }
            };
            let vertex = pending.remove(next);
            if !self.place_vertex(&vertex, structure, rng)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Places one vertex. Returns `Ok(false)` when no valid placement was
    /// found within the attempt budget.
    fn place_vertex(
        &self,
        vertex: &str,
        structure: &mut RoomStructure,
        rng: &mut GenerationRng,
    ) -> Result<bool, TopologyError> {
        let degree = self.topology.degree(vertex);
        let constraint = self.topology.constraint(vertex);
        let mut candidates: Vec<&RoomBlueprint> = self
            .blueprints
            .iter()
            .filter(|blueprint| blueprint.door_count() == degree)
            .filter(|blueprint| {
                constraint.map_or(true, |kinds| kinds.contains(&blueprint.room_kind()))
            })
            .collect();
        if candidates.is_empty() {
            debug!(vertex, degree, "no candidate blueprint");
            return Ok(false);
        }
        rng.shuffle(&mut candidates);

        let neighbors: Vec<String> = self
            .topology
            .neighbors(vertex)
            .filter(|neighbor| structure.contains(neighbor))
            .map(str::to_owned)
            .collect();

        if neighbors.is_empty() {
            // first room of the structure: free placement, zero shift
            for candidate in candidates {
                if !structure.overlaps_any(candidate.outline()) {
                    let placement = MutatedRoomBlueprint::new(
                        vertex,
                        (*candidate).clone(),
                        Vec::new(),
                        Vector2::zeros(),
                    );
                    structure.insert(vertex, placement)?;
                    trace!(vertex, "placed freely");
                    return Ok(true);
                }
            }
            return Ok(false);
        }

        let Some(found) = self.search_placement(vertex, &candidates, &neighbors, structure) else {
            debug!(vertex, neighbors = neighbors.len(), "no valid placement");
            return Ok(false);
        };
        let (placement, links) = found;
        structure.insert(vertex, placement)?;
        for link in links {
            structure.connect(vertex, link.own_door, &link.neighbor, link.neighbor_door)?;
        }
        trace!(vertex, "placed against neighbors");
        Ok(true)
    }

    /// Bounded enumeration over (candidate x transform x anchor pairing),
    /// keeping the valid placement with the smallest grown bounding box.
    fn search_placement(
        &self,
        vertex: &str,
        candidates: &[&RoomBlueprint],
        neighbors: &[String],
        structure: &RoomStructure,
    ) -> Option<(MutatedRoomBlueprint, Vec<Link>)> {
        let anchor = neighbors.first()?;
        let anchor_room = structure.room(anchor)?;
        let anchor_doors = structure.free_doors(anchor);

        let mut attempts = 0_usize;
        let mut best: Option<(f64, MutatedRoomBlueprint, Vec<Link>)> = None;

        'search: for candidate in candidates {
            for &transform in candidate.allowed_transforms() {
                let oriented = candidate.transform(transform);
                for &anchor_door in &anchor_doors {
                    let door_position = anchor_room.blueprint().doors()[anchor_door];
                    let Some(outer) = adjacent_points(&door_position, 1.0)
                        .into_iter()
                        .find(|p| !anchor_room.blueprint().outline().contains(p))
                    else {
                        continue;
                    };
                    for (own_door, own_position) in oriented.doors().iter().enumerate() {
                        attempts += 1;
                        if attempts > self.attempt_budget {
                            debug!(vertex, attempts, "placement attempt budget exhausted");
                            break 'search;
                        }
                        let shift = outer - own_position;
                        let placed = oriented.shift(&shift);
                        if structure.overlaps_any(placed.outline()) {
                            continue;
                        }
                        let Some(links) = Self::match_neighbors(
                            &placed,
                            own_door,
                            anchor,
                            anchor_door,
                            neighbors,
                            structure,
                        ) else {
                            continue;
                        };
                        let score = grown_bounding_box_area(structure, placed.outline());
                        if best.as_ref().map_or(true, |(current, ..)| score < *current) {
                            let transforms = if transform == Transform::Identity {
                                Vec::new()
                            } else {
                                vec![transform]
                            };
                            let placement =
                                MutatedRoomBlueprint::new(vertex, placed, transforms, shift);
                            best = Some((score, placement, links));
                        }
                    }
                }
            }
        }

        best.map(|(_, placement, links)| (placement, links))
    }

    /// Completes the anchor pairing with one door link per remaining
    /// neighbor, or `None` if some neighbor cannot be reached.
    fn match_neighbors(
        placed: &RoomBlueprint,
        anchor_own_door: usize,
        anchor: &str,
        anchor_door: usize,
        neighbors: &[String],
        structure: &RoomStructure,
    ) -> Option<Vec<Link>> {
        let mut links = vec![Link {
            neighbor: anchor.to_owned(),
            neighbor_door: anchor_door,
            own_door: anchor_own_door,
        }];
        let mut used_doors: BTreeSet<usize> = [anchor_own_door].into_iter().collect();

        for neighbor in neighbors.iter().skip(1) {
            let room = structure.room(neighbor)?;
            let mut matched = None;
            'doors: for free_door in structure.free_doors(neighbor) {
                let their_position = room.blueprint().doors()[free_door];
                for (own_door, own_position) in placed.doors().iter().enumerate() {
                    if used_doors.contains(&own_door) {
                        continue;
                    }
                    if is_adjacent(own_position, &their_position, ADJACENCY_DELTA)
                        && !points_equal(own_position, &their_position)
                    {
                        matched = Some(Link {
                            neighbor: neighbor.clone(),
                            neighbor_door: free_door,
                            own_door,
                        });
                        break 'doors;
                    }
                }
            }
            let link = matched?;
            used_doors.insert(link.own_door);
            links.push(link);
        }
        Some(links)
    }
}

/// Area of the structure's bounding box after adding `outline`.
fn grown_bounding_box_area(structure: &RoomStructure, outline: &Polygon) -> f64 {
    let mut min_x = outline.min().x;
    let mut min_y = outline.min().y;
    let mut max_x = outline.max().x;
    let mut max_y = outline.max().y;
    for room in structure.rooms() {
        let placed = room.blueprint().outline();
        min_x = min_x.min(placed.min().x);
        min_y = min_y.min(placed.min().y);
        max_x = max_x.max(placed.max().x);
        max_y = max_y.max(placed.max().y);
    }
    (max_x - min_x) * (max_y - min_y)
}
