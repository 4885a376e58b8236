use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use tracing::{info, level_filters::LevelFilter, trace};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};
use uptime_monitoring::{
    api::{ApiConfig, ApiState, spawn_api_server},
    config::{Config, read_config_file},
    persistence::JsonFileStore,
    probe::Prober,
    registry::TargetRegistry,
    scheduler::Scheduler,
    stats::StatsAggregator,
};

#[derive(Debug, Clone, Parser)]
struct Args {
    /// Config file
    #[arg(short)]
    file: Option<String>,
}

fn init() {
    let filter = filter::Targets::new().with_targets(vec![
        ("uptime_monitoring", LevelFilter::TRACE),
        ("hub", LevelFilter::TRACE),
    ]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();
    dotenv::dotenv().ok();

    let args = Args::parse();
    trace!("started with args: {args:?}");

    let config = match &args.file {
        Some(path) => read_config_file(path)?,
        None => Config::default(),
    };

    let stats = StatsAggregator::new();
    let scheduler = Scheduler::new(
        Prober::new(Duration::from_millis(config.probe_timeout_ms)),
        stats.clone(),
        Duration::from_millis(config.interval_ms),
    );
    let store = JsonFileStore::new(&config.targets_file);

    let mut registry = TargetRegistry::new(scheduler, stats, Box::new(store));
    registry.bootstrap().await;

    let state = ApiState::new(registry);

    let api_config = ApiConfig {
        bind_addr: SocketAddr::from(([0, 0, 0, 0], config.listen_port())),
        enable_cors: true,
        static_dir: config.static_dir.clone(),
    };
    spawn_api_server(api_config, state.clone()).await?;

    tokio::signal::ctrl_c().await?;

    info!("shutting down, stopping all monitors");
    state.registry.write().await.shutdown().await;

    Ok(())
}
