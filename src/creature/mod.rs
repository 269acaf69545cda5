pub mod metabolism;
pub mod reproduction;

use crate::world::bounds::{Bounds, Vec2};
use metabolism::Metabolism;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;

const RADIUS_RANGE: Range<f64> = 2.0..10.0;
const VISION_RANGE: Range<f64> = 20.0..120.0;
const SPEED_RANGE: Range<f64> = 15.0..25.0;
const TRAIT_CHANNEL_RANGE: Range<f64> = 100.0..255.0;

/// Discriminator for the concrete creature kind; keys the registry's
/// species groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Plant,
    Herbivore,
    Carnivore,
}

impl Species {
    /// Fixed processing order; keeps iteration stable within a run.
    pub const ALL: [Species; 3] = [Species::Plant, Species::Herbivore, Species::Carnivore];
}

/// RGB color in 0-255 channels, kept as floats because channels are
/// genetic traits blended at breeding time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise average, the inheritance rule for offspring color.
    pub fn blend(&self, other: Color) -> Color {
        Color::new(
            (self.r + other.r) / 2.0,
            (self.g + other.g) / 2.0,
            (self.b + other.b) / 2.0,
        )
    }

    pub fn as_rgb8(&self) -> [u8; 3] {
        [
            self.r.round().clamp(0.0, 255.0) as u8,
            self.g.round().clamp(0.0, 255.0) as u8,
            self.b.round().clamp(0.0, 255.0) as u8,
        ]
    }
}

/// State shared by both animal species: urge flags, movement target and
/// the perception/locomotion traits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalState {
    pub gender: bool,
    pub danger: bool,
    pub hungry: bool,
    pub horny: bool,
    pub destiny: Vec2,
    pub vision: f64,
    pub speed: f64,
}

impl AnimalState {
    fn new(gender: bool, destiny: Vec2, vision: f64, speed: f64) -> Self {
        Self {
            gender,
            danger: false,
            hungry: false,
            horny: false,
            destiny,
            vision,
            speed,
        }
    }
}

/// Closed set of creature variants. Herbivore and Carnivore share the
/// animal template; a plant carries no extra state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Kind {
    Plant,
    Herbivore(AnimalState),
    Carnivore(AnimalState),
}

impl Kind {
    pub fn species(&self) -> Species {
        match self {
            Kind::Plant => Species::Plant,
            Kind::Herbivore(_) => Species::Herbivore,
            Kind::Carnivore(_) => Species::Carnivore,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub id: u64,
    pub pos: Vec2,
    pub radius: f64,
    pub color: Color,
    pub metabolism: Metabolism,
    pub alive: bool,
    pub offspring_count: u32,
    pub age: f64,
    pub kind: Kind,
}

impl Creature {
    pub fn plant(id: u64, bounds: &Bounds, pos: Vec2, radius: f64, color: Color, max_energy: f64) -> Self {
        Self {
            id,
            pos: bounds.clamp(pos),
            radius,
            color,
            metabolism: Metabolism::new(max_energy),
            alive: true,
            offspring_count: 0,
            age: 0.0,
            kind: Kind::Plant,
        }
    }

    pub fn herbivore(
        id: u64,
        bounds: &Bounds,
        pos: Vec2,
        radius: f64,
        color: Color,
        gender: bool,
        vision: f64,
        speed: f64,
        max_energy: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let destiny = bounds.random_point(rng);
        Self {
            id,
            pos: bounds.clamp(pos),
            radius,
            color,
            metabolism: Metabolism::new(max_energy),
            alive: true,
            offspring_count: 0,
            age: 0.0,
            kind: Kind::Herbivore(AnimalState::new(gender, destiny, vision, speed)),
        }
    }

    pub fn carnivore(
        id: u64,
        bounds: &Bounds,
        pos: Vec2,
        radius: f64,
        color: Color,
        gender: bool,
        vision: f64,
        speed: f64,
        max_energy: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let destiny = bounds.random_point(rng);
        Self {
            id,
            pos: bounds.clamp(pos),
            radius,
            color,
            metabolism: Metabolism::new(max_energy),
            alive: true,
            offspring_count: 0,
            age: 0.0,
            kind: Kind::Carnivore(AnimalState::new(gender, destiny, vision, speed)),
        }
    }

    /// Plant with rolled position, size and nutrition channel.
    pub fn random_plant(id: u64, bounds: &Bounds, max_energy: f64, rng: &mut impl Rng) -> Self {
        let pos = bounds.random_point(rng);
        let radius = rng.gen_range(RADIUS_RANGE);
        let color = Color::new(0.0, rng.gen_range(TRAIT_CHANNEL_RANGE), 0.0);
        Self::plant(id, bounds, pos, radius, color, max_energy)
    }

    /// Herbivore (blue-coded) with rolled position and traits.
    pub fn random_herbivore(
        id: u64,
        bounds: &Bounds,
        gender: bool,
        max_energy: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let pos = bounds.random_point(rng);
        let radius = rng.gen_range(RADIUS_RANGE);
        let color = Color::new(0.0, 0.0, rng.gen_range(TRAIT_CHANNEL_RANGE));
        let vision = rng.gen_range(VISION_RANGE);
        let speed = rng.gen_range(SPEED_RANGE);
        Self::herbivore(id, bounds, pos, radius, color, gender, vision, speed, max_energy, rng)
    }

    /// Carnivore (red-coded) with rolled position and traits.
    pub fn random_carnivore(
        id: u64,
        bounds: &Bounds,
        gender: bool,
        max_energy: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let pos = bounds.random_point(rng);
        let radius = rng.gen_range(RADIUS_RANGE);
        let color = Color::new(rng.gen_range(TRAIT_CHANNEL_RANGE), 0.0, 0.0);
        let vision = rng.gen_range(VISION_RANGE);
        let speed = rng.gen_range(SPEED_RANGE);
        Self::carnivore(id, bounds, pos, radius, color, gender, vision, speed, max_energy, rng)
    }

    pub fn species(&self) -> Species {
        self.kind.species()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn energy(&self) -> f64 {
        self.metabolism.energy()
    }

    /// A plant's food value to herbivores, read off its green channel.
    pub fn nutrition(&self) -> f64 {
        self.color.g
    }

    pub fn animal(&self) -> Option<&AnimalState> {
        match &self.kind {
            Kind::Plant => None,
            Kind::Herbivore(state) | Kind::Carnivore(state) => Some(state),
        }
    }

    pub fn animal_mut(&mut self) -> Option<&mut AnimalState> {
        match &mut self.kind {
            Kind::Plant => None,
            Kind::Herbivore(state) | Kind::Carnivore(state) => Some(state),
        }
    }
}
