use clap::Parser;
use ecosim_server::config::Config;
use ecosim_server::server;
use ecosim_server::simulation::SimulationState;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{interval, Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "ecosim-server")]
#[command(about = "Closed-ecosystem simulation server", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config.json")]
    config: String,

    #[arg(long)]
    no_server: bool,

    /// Override the configured random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks (for headless runs)
    #[arg(long)]
    max_ticks: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = if std::path::Path::new(&args.config).exists() {
        log::info!("Loading config from: {}", args.config);
        Config::load_from_file(&args.config)?
    } else {
        log::info!("Config file not found, using defaults and saving to: {}", args.config);
        let config = Config::default();
        config.save_to_file(&args.config)?;
        config
    };

    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }

    log::info!("Initializing simulation with seed {}...", config.simulation.seed);
    let state = Arc::new(RwLock::new(SimulationState::new(&config)));

    if !args.no_server && config.server.enabled {
        let server_state = state.clone();
        let server_config = config.clone();
        tokio::spawn(async move {
            if let Err(e) = server::run_server(server_config, server_state).await {
                log::error!("Server error: {}", e);
            }
        });
        log::info!("WebSocket server started on {}:{}", config.server.address, config.server.port);
    }

    run_simulation(state, config, args.max_ticks).await;

    Ok(())
}

async fn run_simulation(
    state: Arc<RwLock<SimulationState>>,
    config: Config,
    max_ticks: Option<u64>,
) {
    let tick_duration = Duration::from_millis(1000 / config.simulation.ticks_per_second.max(1));
    let mut tick_interval = interval(tick_duration);

    let log_interval = Duration::from_secs(config.simulation.log_interval_secs);
    let mut last_log = Instant::now();
    let mut last_tick = Instant::now();

    loop {
        tick_interval.tick().await;

        // All rates are per unit time, so feed the tick the wall-clock
        // delta instead of assuming the interval fired on schedule.
        let dt = last_tick.elapsed().as_secs_f64();
        last_tick = Instant::now();

        let mut sim_state = state.write().await;
        if dt > 0.0 {
            sim_state.tick(dt, &config);
        }

        if last_log.elapsed() >= log_interval {
            let metrics = sim_state.metrics();
            log::info!(
                "Tick: {} | Population: {} (plants {}, herbivores {}, carnivores {}) | Avg Energy: {:.2} | Births: {} | Deaths: {}",
                metrics.tick,
                metrics.population,
                metrics.plants,
                metrics.herbivores,
                metrics.carnivores,
                metrics.avg_energy,
                metrics.total_births,
                metrics.total_deaths
            );
            last_log = Instant::now();
        }

        if sim_state.world.population() == 0 {
            log::warn!("All creatures have died! Simulation ended.");
            break;
        }

        if max_ticks.is_some_and(|max| sim_state.tick >= max) {
            log::info!("Reached tick limit at {}, stopping.", sim_state.tick);
            break;
        }
    }
}
