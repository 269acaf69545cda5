use crate::creature::{Creature, Species};
use crate::stats::SimulationMetrics;
use crate::world::bounds::Bounds;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "frame")]
    Frame {
        metrics: SimulationMetrics,
        creatures: Vec<CreatureSnapshot>,
    },
    #[serde(rename = "full_state")]
    FullState {
        metrics: SimulationMetrics,
        world_width: f64,
        world_height: f64,
        creatures: Vec<CreatureSnapshot>,
    },
}

/// Everything an external renderer needs per creature: a filled circle
/// at the (rounded) position and radius, in the given color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureSnapshot {
    pub id: u64,
    pub species: Species,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: [u8; 3],
}

impl From<&Creature> for CreatureSnapshot {
    fn from(creature: &Creature) -> Self {
        Self {
            id: creature.id,
            species: creature.species(),
            x: creature.pos.x,
            y: creature.pos.y,
            radius: creature.radius,
            color: creature.color.as_rgb8(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "get_state")]
    GetState,
}

impl ServerMessage {
    pub fn frame(metrics: SimulationMetrics, creatures: &[&Creature]) -> Self {
        let snapshots = creatures.iter().copied().map(CreatureSnapshot::from).collect();
        ServerMessage::Frame {
            metrics,
            creatures: snapshots,
        }
    }

    pub fn full_state(metrics: SimulationMetrics, bounds: Bounds, creatures: &[&Creature]) -> Self {
        let snapshots = creatures.iter().copied().map(CreatureSnapshot::from).collect();
        ServerMessage::FullState {
            metrics,
            world_width: bounds.width,
            world_height: bounds.height,
            creatures: snapshots,
        }
    }
}
