use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub world: WorldConfig,
    pub population: PopulationConfig,
    pub creature: CreatureConfig,
    pub simulation: SimulationConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    pub plants: usize,
    pub herbivores: usize,
    pub carnivores: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatureConfig {
    pub max_energy: f64,
    pub capture_distance: f64,
    pub arrival_distance: f64,
    pub max_move_retries: u32,
    pub mate_urge_chance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub ticks_per_second: u64,
    pub log_interval_secs: u64,
    pub seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub enabled: bool,
    pub address: String,
    pub port: u16,
    pub update_rate_hz: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig {
                width: 800.0,
                height: 800.0,
            },
            population: PopulationConfig {
                plants: 50,
                herbivores: 15,
                carnivores: 15,
            },
            creature: CreatureConfig {
                max_energy: 3000.0,
                capture_distance: 10.0,
                arrival_distance: 5.0,
                max_move_retries: 8,
                mate_urge_chance: 0.001,
            },
            simulation: SimulationConfig {
                ticks_per_second: 60,
                log_interval_secs: 10,
                seed: 42,
            },
            server: ServerConfig {
                enabled: true,
                address: "0.0.0.0".to_string(),
                port: 8080,
                update_rate_hz: 10,
            },
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
