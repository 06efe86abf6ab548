//! The sequential random-walk generator.
//!
//! Grows a single path of rooms from a randomly chosen spawn blueprint:
//! each round, every frontier room tries to attach one new room through one
//! of its open doors, until the requested room count, the depth limit or
//! the iteration cap stops the walk. There is no backtracking: a run that
//! ends short of the target, or without a final room, is a valid result,
//! and callers wanting more re-run with a different seed.

use tracing::debug;
use tracing::trace;

use crate::blueprint::{find_all_fits, PossibleFit, RoomBlueprint, RoomKind};
use crate::error::{GenerationError, Result};

use super::dungeon::{Dungeon, RoomId};
use super::rng::GenerationRng;
use super::{validate_catalogue, GeneratorOptions};

/// Grows a dungeon as one random path from spawn to a final room.
#[derive(Debug)]
pub struct SinglePathGenerator {
    rng: GenerationRng,
    blueprints: Vec<RoomBlueprint>,
    options: GeneratorOptions,
    spawn_blueprint: RoomBlueprint,
}

impl SinglePathGenerator {
    /// Creates a generator from a seed, a catalogue and options.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MissingSpawnBlueprint`] when the
    /// catalogue offers no spawn room, or the shared catalogue-feasibility
    /// errors.
    pub fn new(
        seed: u64,
        blueprints: Vec<RoomBlueprint>,
        options: GeneratorOptions,
    ) -> std::result::Result<Self, GenerationError> {
        validate_catalogue(&blueprints, &options)?;
        let mut rng = GenerationRng::new(seed);
        let spawns: Vec<RoomBlueprint> = blueprints
            .iter()
            .filter(|b| b.room_kind() == RoomKind::Spawn)
            .cloned()
            .collect();
        let spawn_blueprint = rng
            .pick(&spawns)
            .ok_or(GenerationError::MissingSpawnBlueprint)?
            .clone();
        Ok(Self {
            rng,
            blueprints,
            options,
            spawn_blueprint,
        })
    }

    /// Runs the generation, consuming the generator so a seed always maps
    /// to exactly one run.
    ///
    /// # Errors
    ///
    /// Internal wiring errors only; running out of fits is not an error
    /// but an undershot result.
    pub fn generate(mut self) -> Result<Dungeon> {
        let mut dungeon = Dungeon::new();
        let spawn_id = dungeon.insert(0, self.spawn_blueprint.clone());

        let mut frontier = vec![spawn_id];
        let mut iterations = 0;
        while !frontier.is_empty() && iterations < self.options.max_iterations() {
            let mut next_frontier = Vec::new();
            for room_id in frontier {
                next_frontier.extend(self.populate(room_id, &mut dungeon)?);
            }
            frontier = next_frontier;
            iterations += 1;
        }

        debug!(
            seed = self.rng.seed(),
            rooms = dungeon.len(),
            requested = self.options.number_of_rooms(),
            iterations,
            "single path generation finished"
        );
        Ok(dungeon)
    }

    /// Tries to attach one new room to `room_id`, returning the new
    /// frontier entries (empty when the room is done or nothing fits).
    fn populate(&mut self, room_id: RoomId, dungeon: &mut Dungeon) -> Result<Vec<RoomId>> {
        if dungeon.len() >= self.options.number_of_rooms() {
            return Ok(Vec::new());
        }
        let Some(room) = dungeon.get(room_id) else {
            return Ok(Vec::new());
        };
        let depth = room.depth();
        if depth >= self.options.maximum_room_distance() {
            return Ok(Vec::new());
        }

        let fits = self.collect_fits(room_id, dungeon);
        // one step before the distance cap only a final room may follow;
        // before that, only a room that can keep the path growing
        let wants_final = self.options.maximum_room_distance() - depth == 1;
        let suitable: Vec<&PossibleFit> = fits
            .iter()
            .filter(|fit| {
                if wants_final {
                    fit.placed().room_kind() == RoomKind::Final
                } else {
                    fit.placed().room_kind() == RoomKind::Normal && fit.placed().door_count() >= 2
                }
            })
            .collect();

        let Some(&chosen) = self.rng.pick(&suitable) else {
            trace!(?room_id, depth, wants_final, "no suitable fit; pruning branch");
            return Ok(Vec::new());
        };

        let source_door = chosen.source_door();
        let candidate_door = chosen.candidate_door();
        let placed = chosen.placed().clone();
        let new_id = dungeon.insert(depth + 1, placed);
        dungeon.connect(room_id, source_door, new_id, candidate_door)?;
        trace!(?room_id, ?new_id, depth = depth + 1, "attached room");
        Ok(vec![new_id])
    }

    /// All fits over the room's open doors, excluding spawn candidates and
    /// any placement overlapping an already generated room.
    fn collect_fits(&self, room_id: RoomId, dungeon: &Dungeon) -> Vec<PossibleFit> {
        let Some(room) = dungeon.get(room_id) else {
            return Vec::new();
        };
        let mut fits = Vec::new();
        for door in room.open_doors() {
            for fit in find_all_fits(room.blueprint(), door, &self.blueprints) {
                if fit.placed().room_kind() == RoomKind::Spawn {
                    continue;
                }
                let collides = dungeon
                    .iter()
                    .any(|other| fit.placed().outline().overlaps(other.blueprint().outline()));
                if !collides {
                    fits.push(fit);
                }
            }
        }
        fits
    }
}
