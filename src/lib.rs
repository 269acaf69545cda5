pub mod config;
pub mod creature;
pub mod server;
pub mod simulation;
pub mod stats;
pub mod world;
