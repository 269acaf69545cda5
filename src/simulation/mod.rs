pub mod tick;

use crate::config::Config;
use crate::creature::Creature;
use crate::stats::SimulationMetrics;
use crate::world::World;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// The whole simulation: the registry, the seeded random source every
/// per-tick roll draws from, and the running counters.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub world: World,
    pub rng: ChaCha12Rng,
    pub tick: u64,
    pub elapsed: f64,
    pub next_creature_id: u64,
    pub total_births: u64,
    pub total_deaths: u64,
}

impl SimulationState {
    /// Bootstrap an initial population from the config: random plants,
    /// then alternating-gender herbivores and carnivores so both
    /// genders of each species are present from the start.
    pub fn new(config: &Config) -> Self {
        let mut state = Self {
            world: World::new(config.world.width, config.world.height),
            rng: ChaCha12Rng::seed_from_u64(config.simulation.seed),
            tick: 0,
            elapsed: 0.0,
            next_creature_id: 0,
            total_births: 0,
            total_deaths: 0,
        };

        let bounds = state.world.bounds();
        let max_energy = config.creature.max_energy;

        for _ in 0..config.population.plants {
            let id = state.fresh_id();
            let plant = Creature::random_plant(id, &bounds, max_energy, &mut state.rng);
            state.world.register(plant);
        }

        for i in 0..config.population.herbivores {
            let id = state.fresh_id();
            let gender = i % 2 == 0;
            let herbivore =
                Creature::random_herbivore(id, &bounds, gender, max_energy, &mut state.rng);
            state.world.register(herbivore);
        }

        for i in 0..config.population.carnivores {
            let id = state.fresh_id();
            let gender = i % 2 == 0;
            let carnivore =
                Creature::random_carnivore(id, &bounds, gender, max_energy, &mut state.rng);
            state.world.register(carnivore);
        }

        state
    }

    pub fn fresh_id(&mut self) -> u64 {
        let id = self.next_creature_id;
        self.next_creature_id += 1;
        id
    }

    pub fn metrics(&self) -> SimulationMetrics {
        let creatures: Vec<&Creature> = self.world.creatures().collect();
        SimulationMetrics::compute(
            self.tick,
            self.elapsed,
            &creatures,
            self.total_births,
            self.total_deaths,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::Species;

    #[test]
    fn test_bootstrap_population() {
        let config = Config::default();
        let sim = SimulationState::new(&config);

        assert_eq!(sim.tick, 0);
        assert_eq!(sim.world.living_count(Species::Plant), config.population.plants);
        assert_eq!(sim.world.living_count(Species::Herbivore), config.population.herbivores);
        assert_eq!(sim.world.living_count(Species::Carnivore), config.population.carnivores);
    }

    #[test]
    fn test_bootstrap_has_both_genders() {
        let config = Config::default();
        let sim = SimulationState::new(&config);

        for species in [Species::Herbivore, Species::Carnivore] {
            let genders: Vec<bool> = sim
                .world
                .members(species)
                .iter()
                .filter_map(|&id| sim.world.get(id))
                .filter_map(|c| c.animal().map(|a| a.gender))
                .collect();

            assert!(genders.iter().any(|&g| g));
            assert!(genders.iter().any(|&g| !g));
        }
    }

    #[test]
    fn test_same_seed_same_bootstrap() {
        let config = Config::default();
        let a = SimulationState::new(&config);
        let b = SimulationState::new(&config);

        for (&id_a, &id_b) in a
            .world
            .members(Species::Herbivore)
            .iter()
            .zip(b.world.members(Species::Herbivore))
        {
            let ca = a.world.get(id_a).unwrap();
            let cb = b.world.get(id_b).unwrap();
            assert_eq!(ca.pos, cb.pos);
            assert_eq!(ca.radius, cb.radius);
        }
    }

    #[test]
    fn test_metrics_counts_population() {
        let config = Config::default();
        let sim = SimulationState::new(&config);
        let metrics = sim.metrics();

        assert_eq!(
            metrics.population,
            config.population.plants + config.population.herbivores + config.population.carnivores
        );
        assert_eq!(metrics.avg_energy, config.creature.max_energy);
    }
}
