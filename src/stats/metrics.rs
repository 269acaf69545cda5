use crate::creature::{Creature, Species};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationMetrics {
    pub tick: u64,
    pub elapsed: f64,
    pub population: usize,
    pub plants: usize,
    pub herbivores: usize,
    pub carnivores: usize,
    pub avg_energy: f64,
    pub avg_age: f64,
    pub total_births: u64,
    pub total_deaths: u64,
}

impl SimulationMetrics {
    pub fn compute(
        tick: u64,
        elapsed: f64,
        creatures: &[&Creature],
        total_births: u64,
        total_deaths: u64,
    ) -> Self {
        let population = creatures.len();

        if population == 0 {
            return Self {
                tick,
                elapsed,
                population: 0,
                plants: 0,
                herbivores: 0,
                carnivores: 0,
                avg_energy: 0.0,
                avg_age: 0.0,
                total_births,
                total_deaths,
            };
        }

        let plants = creatures.iter().filter(|c| c.species() == Species::Plant).count();
        let herbivores = creatures.iter().filter(|c| c.species() == Species::Herbivore).count();
        let carnivores = creatures.iter().filter(|c| c.species() == Species::Carnivore).count();

        let total_energy: f64 = creatures.iter().map(|c| c.energy()).sum();
        let total_age: f64 = creatures.iter().map(|c| c.age).sum();

        Self {
            tick,
            elapsed,
            population,
            plants,
            herbivores,
            carnivores,
            avg_energy: total_energy / population as f64,
            avg_age: total_age / population as f64,
            total_births,
            total_deaths,
        }
    }
}
