pub mod bounds;

use crate::creature::{Creature, Species};
use bounds::{Bounds, Vec2};
use std::collections::HashMap;

/// Population registry for the arena. Owns every living creature grouped
/// by species, and stages spawns/deaths so the per-tick pass never
/// mutates a group it is iterating. Mutations land at `commit`, the hard
/// phase boundary between ticks.
#[derive(Debug, Clone)]
pub struct World {
    bounds: Bounds,
    creatures: HashMap<u64, Creature>,
    groups: HashMap<Species, Vec<u64>>,
    pending_spawn: Vec<Creature>,
    pending_remove: Vec<u64>,
}

impl World {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            bounds: Bounds::new(width, height),
            creatures: HashMap::new(),
            groups: HashMap::new(),
            pending_spawn: Vec::new(),
            pending_remove: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Insert a creature into its species group, creating the group
    /// lazily.
    pub fn register(&mut self, creature: Creature) {
        let id = creature.id;
        self.groups.entry(creature.species()).or_default().push(id);
        self.creatures.insert(id, creature);
    }

    /// Remove a creature from its group and the arena. Unknown or
    /// already-removed ids are a silent no-op, so double-staged
    /// removals are harmless.
    pub fn unregister(&mut self, id: u64) {
        if let Some(creature) = self.creatures.remove(&id) {
            if let Some(group) = self.groups.get_mut(&creature.species()) {
                group.retain(|&member| member != id);
            }
        }
    }

    pub fn get(&self, id: u64) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Creature> {
        self.creatures.get_mut(&id)
    }

    /// Group membership in insertion order. Dead creatures stay
    /// resident here until the commit that removes them.
    pub fn members(&self, species: Species) -> &[u64] {
        self.groups.get(&species).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn creatures(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.values()
    }

    pub fn population(&self) -> usize {
        self.creatures.len()
    }

    pub fn living_count(&self, species: Species) -> usize {
        self.members(species)
            .iter()
            .filter(|id| self.creatures.get(id).is_some_and(Creature::is_alive))
            .count()
    }

    /// Stage a creature to join the arena at the next commit. It is
    /// invisible to queries until then.
    pub fn queue_spawn(&mut self, creature: Creature) {
        self.pending_spawn.push(creature);
    }

    pub fn pending_spawns(&self) -> &[Creature] {
        &self.pending_spawn
    }

    /// Stage a death: mark the creature dead now (so it drops out of
    /// living queries) and remove it at the next commit. Returns whether
    /// this call performed the kill; repeat calls are no-ops.
    pub fn queue_kill(&mut self, id: u64) -> bool {
        match self.creatures.get_mut(&id) {
            Some(creature) if creature.alive => {
                creature.alive = false;
                self.pending_remove.push(id);
                true
            }
            _ => false,
        }
    }

    /// All living members of `species` within `range` of `center`,
    /// excluding `exclude`. A naive linear scan over the species group
    /// is the baseline contract.
    pub fn living_within(
        &self,
        species: Species,
        center: Vec2,
        range: f64,
        exclude: u64,
    ) -> Vec<&Creature> {
        self.members(species)
            .iter()
            .filter(|&&id| id != exclude)
            .filter_map(|id| self.creatures.get(id))
            .filter(|c| c.is_alive() && center.distance_to(c.pos) <= range)
            .collect()
    }

    /// Drain staged spawns, then staged removals. Returns
    /// (births, deaths) for the tick.
    pub fn commit(&mut self) -> (u64, u64) {
        let spawns = std::mem::take(&mut self.pending_spawn);
        let births = spawns.len() as u64;
        for creature in spawns {
            self.register(creature);
        }

        let removals = std::mem::take(&mut self.pending_remove);
        let deaths = removals.len() as u64;
        for id in removals {
            self.unregister(id);
        }

        (births, deaths)
    }
}
