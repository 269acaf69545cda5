pub mod metrics;

pub use metrics::SimulationMetrics;
