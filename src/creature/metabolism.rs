use serde::{Deserialize, Serialize};

/// Full color-channel scale; nutrition is a 0-255 channel value.
pub const CHANNEL_MAX: f64 = 255.0;

const PLANT_UPKEEP_FACTOR: f64 = 1.05;
const SPROUT_COST_FACTOR: f64 = 1.1;

/// Energy account of a single creature. Energy may go negative under
/// drain; starvation is detected as `energy <= 0` at the next necessity
/// check. Gains are deliberately uncapped: a predator keeps the full
/// yield of a large kill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metabolism {
    energy: f64,
    max_energy: f64,
}

impl Metabolism {
    pub fn new(max_energy: f64) -> Self {
        Self {
            energy: max_energy,
            max_energy,
        }
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn max_energy(&self) -> f64 {
        self.max_energy
    }

    pub fn drain(&mut self, amount: f64) {
        self.energy -= amount;
    }

    pub fn gain(&mut self, amount: f64) {
        self.energy += amount;
    }

    pub fn starved(&self) -> bool {
        self.energy <= 0.0
    }

    pub fn is_hungry(&self) -> bool {
        self.energy < self.max_energy / 2.0
    }

    /// Whether there is enough of a reserve to consider breeding:
    /// the breeding cost (one radius worth of energy) plus a margin.
    pub fn can_spare_for_breeding(&self, radius: f64) -> bool {
        self.energy > 10.0 + radius
    }

    /// Energy a predator extracts from this creature's corpse.
    pub fn yield_for_predator(&self, radius: f64) -> f64 {
        self.max_energy / 2.0 * radius
    }
}

/// Passive per-tick upkeep of a plant. Higher nutrition (green channel)
/// lowers upkeep: food value and metabolic efficiency are one trait.
pub fn plant_upkeep(dt: f64, radius: f64, nutrition: f64) -> f64 {
    dt * radius * (PLANT_UPKEEP_FACTOR - nutrition / CHANNEL_MAX)
}

/// One-off cost a plant pays when it sprouts a clone.
pub fn sprout_cost(radius: f64, nutrition: f64) -> f64 {
    1.0 + radius * (SPROUT_COST_FACTOR - nutrition / CHANNEL_MAX)
}

/// Per-tick cost of an animal: movement scaled by bulk, plus passive
/// metabolism for the elapsed time.
pub fn step_cost(distance: f64, radius: f64, dt: f64) -> f64 {
    distance * (1.0 + radius) + dt * radius
}
