use super::SimulationState;
use crate::config::Config;
use crate::creature::metabolism::{plant_upkeep, step_cost};
use crate::creature::reproduction::PartnerTraits;
use crate::creature::{Creature, Species};
use crate::world::bounds::{Bounds, Vec2};
use rand::Rng;
use std::cmp::Ordering;

const WANDER_FACTOR: f64 = 1.0;
const RUN_FACTOR: f64 = 2.0;

impl SimulationState {
    /// Advance the simulation by one tick of `dt` seconds: process every
    /// live creature species by species, then commit the staged spawns
    /// and removals at the tick boundary.
    pub fn tick(&mut self, dt: f64, config: &Config) {
        for species in Species::ALL {
            let ids: Vec<u64> = self.world.members(species).to_vec();
            for id in ids {
                self.process_creature(id, dt, config);
            }
        }

        let (births, deaths) = self.world.commit();
        self.total_births += births;
        self.total_deaths += deaths;
        self.tick += 1;
        self.elapsed += dt;
    }

    fn process_creature(&mut self, id: u64, dt: f64, config: &Config) {
        let species = match self.world.get_mut(id) {
            Some(creature) if creature.is_alive() => {
                creature.age += dt;
                creature.species()
            }
            _ => return,
        };

        match species {
            Species::Plant => self.process_plant(id, dt, config),
            Species::Herbivore | Species::Carnivore => self.process_animal(id, dt, config),
        }
    }

    fn process_plant(&mut self, id: u64, dt: f64, _config: &Config) {
        let starved = match self.world.get(id) {
            Some(plant) => plant.metabolism.starved(),
            None => return,
        };
        if starved {
            self.world.queue_kill(id);
            return;
        }

        let bounds = self.world.bounds();
        let offspring_id = self.next_creature_id;
        let sprout = match self.world.get_mut(id) {
            Some(plant) => plant.try_sprout(offspring_id, &bounds, &mut self.rng),
            None => None,
        };
        if let Some(clone) = sprout {
            self.next_creature_id += 1;
            self.world.queue_spawn(clone);
        }

        if let Some(plant) = self.world.get_mut(id) {
            let upkeep = plant_upkeep(dt, plant.radius, plant.nutrition());
            plant.metabolism.drain(upkeep);
        }
    }

    fn process_animal(&mut self, id: u64, dt: f64, config: &Config) {
        self.check_animal_needs(id, config);

        // A creature the necessity check starved out acts no further.
        let flags = match self.world.get(id) {
            Some(creature) if creature.is_alive() => {
                creature.animal().map(|a| (a.danger, a.hungry, a.horny))
            }
            _ => return,
        };
        let Some((danger, hungry, horny)) = flags else { return };

        let distance = if danger {
            self.travel(id, dt, RUN_FACTOR, config)
        } else if hungry {
            self.hunt(id, dt, config)
        } else if horny {
            self.seek_mate(id, dt, config)
        } else {
            self.travel(id, dt, WANDER_FACTOR, config)
        };

        if let Some(creature) = self.world.get_mut(id) {
            creature.metabolism.drain(step_cost(distance, creature.radius, dt));
        }
    }

    /// Starvation, hunger and mating-urge flags, plus the herbivore's
    /// predator scan.
    fn check_animal_needs(&mut self, id: u64, config: &Config) {
        let starved = match self.world.get(id) {
            Some(creature) => creature.metabolism.starved(),
            None => return,
        };
        if starved {
            self.world.queue_kill(id);
            return;
        }

        let urge_roll = self.rng.gen_bool(config.creature.mate_urge_chance);
        if let Some(creature) = self.world.get_mut(id) {
            let hungry = creature.metabolism.is_hungry();
            let ready = creature.metabolism.can_spare_for_breeding(creature.radius);
            if let Some(state) = creature.animal_mut() {
                state.hungry = hungry;
                if urge_roll {
                    state.horny = ready;
                }
            }
        }

        let (pos, vision, species) = match self.world.get(id) {
            Some(creature) => match creature.animal() {
                Some(state) => (creature.pos, state.vision, creature.species()),
                None => return,
            },
            None => return,
        };

        // Only herbivores have predators to watch for.
        if species != Species::Herbivore {
            return;
        }

        let nearest_threat = self
            .world
            .living_within(Species::Carnivore, pos, vision, id)
            .into_iter()
            .min_by(|a, b| distance_order(pos, a, b))
            .map(|threat| threat.pos);

        let destiny =
            nearest_threat.map(|threat| flee_destination(pos, threat, vision, self.world.bounds(), &mut self.rng));

        if let Some(state) = self.world.get_mut(id).and_then(Creature::animal_mut) {
            match destiny {
                Some(point) => {
                    state.danger = true;
                    state.destiny = point;
                }
                None => state.danger = false,
            }
        }
    }

    /// Move toward the current destiny. Arrival, or a step that would
    /// leave the arena, re-rolls the destiny and retries; the loop is
    /// bounded, and past the cap the tick is spent standing still.
    fn travel(&mut self, id: u64, dt: f64, factor: f64, config: &Config) -> f64 {
        let bounds = self.world.bounds();

        for _ in 0..config.creature.max_move_retries {
            let (pos, destiny, speed) = match self.world.get(id) {
                Some(creature) => match creature.animal() {
                    Some(state) => (creature.pos, state.destiny, state.speed),
                    None => return 0.0,
                },
                None => return 0.0,
            };

            let heading = destiny - pos;
            if heading.length() <= config.creature.arrival_distance {
                self.retarget(id);
                continue;
            }

            let step = heading.normalized() * (speed * factor * dt);
            let next = pos + step;
            if !bounds.contains(next) {
                self.retarget(id);
                continue;
            }

            if let Some(creature) = self.world.get_mut(id) {
                creature.pos = next;
            }
            return step.length();
        }

        0.0
    }

    fn retarget(&mut self, id: u64) {
        let destiny = self.world.bounds().random_point(&mut self.rng);
        if let Some(state) = self.world.get_mut(id).and_then(Creature::animal_mut) {
            state.destiny = destiny;
        }
    }

    /// Chase the best-scoring prey in vision; kill and absorb it once in
    /// capture reach. Herbivores weigh distance against plant nutrition,
    /// carnivores take the nearest herbivore no bigger than themselves.
    fn hunt(&mut self, id: u64, dt: f64, config: &Config) -> f64 {
        let target = {
            let Some(hunter) = self.world.get(id) else { return 0.0 };
            let Some(state) = hunter.animal() else { return 0.0 };
            let pos = hunter.pos;

            match hunter.species() {
                Species::Herbivore => self
                    .world
                    .living_within(Species::Plant, pos, state.vision, id)
                    .into_iter()
                    .min_by(|a, b| {
                        forage_score(pos, a)
                            .partial_cmp(&forage_score(pos, b))
                            .unwrap_or(Ordering::Equal)
                    })
                    .map(|prey| (prey.id, prey.pos, prey.metabolism.yield_for_predator(prey.radius))),
                Species::Carnivore => self
                    .world
                    .living_within(Species::Herbivore, pos, state.vision, id)
                    .into_iter()
                    .filter(|prey| prey.radius <= hunter.radius)
                    .min_by(|a, b| distance_order(pos, a, b))
                    .map(|prey| (prey.id, prey.pos, prey.metabolism.yield_for_predator(prey.radius))),
                Species::Plant => None,
            }
        };

        let Some((prey_id, prey_pos, energy_yield)) = target else {
            return self.travel(id, dt, WANDER_FACTOR, config);
        };

        let in_reach = match self.world.get_mut(id) {
            Some(hunter) => {
                let in_reach = hunter.pos.distance_to(prey_pos) <= config.creature.capture_distance;
                if let Some(state) = hunter.animal_mut() {
                    state.destiny = prey_pos;
                }
                in_reach
            }
            None => return 0.0,
        };

        // First stager wins; a prey already staged dead yields nothing.
        if in_reach && self.world.queue_kill(prey_id) {
            if let Some(hunter) = self.world.get_mut(id) {
                hunter.metabolism.gain(energy_yield);
            }
        }

        self.travel(id, dt, RUN_FACTOR, config)
    }

    /// Run toward the nearest eligible mate; in breeding reach, the
    /// gender-true party alone spawns the offspring, so a mutual
    /// encounter produces exactly one child.
    fn seek_mate(&mut self, id: u64, dt: f64, config: &Config) -> f64 {
        let found = {
            let Some(seeker) = self.world.get(id) else { return 0.0 };
            let Some(state) = seeker.animal() else { return 0.0 };
            let pos = seeker.pos;
            let gender = state.gender;
            let species = seeker.species();
            // Carnivores demand mutual receptiveness.
            let mutual = species == Species::Carnivore;

            self.world
                .living_within(species, pos, state.vision, id)
                .into_iter()
                .filter(|candidate| {
                    candidate
                        .animal()
                        .is_some_and(|a| a.gender != gender && (!mutual || a.horny))
                })
                .min_by(|a, b| distance_order(pos, a, b))
                .map(|mate| (mate.pos, PartnerTraits::of(mate)))
        };

        let Some((mate_pos, partner)) = found else {
            return self.travel(id, dt, WANDER_FACTOR, config);
        };

        let bounds = self.world.bounds();
        let offspring_id = self.next_creature_id;
        let offspring = match self.world.get_mut(id) {
            Some(seeker) => {
                let in_reach = seeker.pos.distance_to(mate_pos) <= config.creature.capture_distance;
                let initiates = seeker.animal().is_some_and(|state| state.gender);
                if let Some(state) = seeker.animal_mut() {
                    state.destiny = mate_pos;
                }
                match partner {
                    Some(partner) if in_reach && initiates => {
                        seeker.conceive(&partner, offspring_id, &bounds, &mut self.rng)
                    }
                    _ => None,
                }
            }
            None => return 0.0,
        };

        if let Some(child) = offspring {
            self.next_creature_id += 1;
            self.world.queue_spawn(child);
        }

        self.travel(id, dt, RUN_FACTOR, config)
    }
}

fn distance_order(from: Vec2, a: &Creature, b: &Creature) -> Ordering {
    from.distance_to(a.pos)
        .partial_cmp(&from.distance_to(b.pos))
        .unwrap_or(Ordering::Equal)
}

/// Lower is better: closer and more nutritious plants win.
fn forage_score(from: Vec2, plant: &Creature) -> f64 {
    from.distance_to(plant.pos) - plant.nutrition() * (1.0 + plant.radius)
}

/// A point `vision` away from the threat along the away-vector, clamped
/// into the arena. Standing exactly on the threat degenerates to a
/// random scramble.
fn flee_destination(
    pos: Vec2,
    threat: Vec2,
    vision: f64,
    bounds: Bounds,
    rng: &mut impl Rng,
) -> Vec2 {
    let away = pos - threat;
    if away.length() == 0.0 {
        return bounds.random_point(rng);
    }
    bounds.clamp(pos + away.normalized() * vision)
}
