use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use hostpulse::config::{self, Config, ConfigError};
use hostpulse::report::{self, View};
use hostpulse::system::{Sampler, SysinfoProbe};
use hostpulse::{driver, logging};

#[derive(Parser)]
#[command(
    name = "hostpulse",
    about = "Sample host telemetry and report it periodically"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sampling period in milliseconds
    #[arg(long)]
    refresh_rate: Option<u64>,

    /// Network interface to track (default: busiest non-loopback)
    #[arg(long)]
    interface: Option<String>,

    /// What to print on each report
    #[arg(long, value_enum)]
    view: Option<View>,

    /// Number of rows in the top view
    #[arg(long)]
    top: Option<usize>,

    /// Stop after this many reports; 0 runs until Ctrl-C
    #[arg(long, default_value_t = 0)]
    iterations: u64,

    /// Log filter, e.g. `debug` or `hostpulse=trace`
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let (config, config_error) = load_config_for_cli(&cli)?;
    logging::init(&config.logging)?;
    if let Some(error) = config_error {
        warn!(%error, "invalid config, using defaults");
    }

    run(config, cli.iterations).await
}

async fn run(config: Config, iterations: u64) -> Result<()> {
    let refresh = Duration::from_millis(config.general.refresh_rate_ms);
    let view = config.general.view;
    let top = config.general.top_processes;

    // Blocking: the first sample happens here so the first report has data.
    let sampler = Sampler::new(SysinfoProbe::new(), config.sampler_options());
    let handle = sampler.handle();
    let task = driver::spawn(sampler, refresh);
    info!(?view, refresh_ms = config.general.refresh_rate_ms, "hostpulse running");

    let mut reports = tokio::time::interval(Duration::from_millis(
        config.general.report_interval_ms,
    ));
    reports.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut printed = 0u64;

    loop {
        tokio::select! {
            _ = reports.tick() => {
                println!("{}", report::render(view, &handle, top)?);
                if view != View::Json {
                    println!();
                }
                printed += 1;
                if iterations > 0 && printed >= iterations {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    task.shutdown().await;
    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Result<(Config, Option<ConfigError>)> {
    let loaded = match &cli.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };
    let (mut config, config_error) = config::or_default(loaded);

    if let Some(rate) = cli.refresh_rate {
        config.general.refresh_rate_ms = rate;
    }
    if let Some(ref interface) = cli.interface {
        config.network.interface = Some(interface.clone());
    }
    if let Some(view) = cli.view {
        config.general.view = view;
    }
    if let Some(top) = cli.top {
        config.general.top_processes = top;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    validate(&config)?;
    Ok((config, config_error))
}

fn validate(config: &Config) -> Result<()> {
    if config.general.refresh_rate_ms == 0 {
        return Err(eyre!("refresh_rate_ms must be greater than 0"));
    }
    if config.general.report_interval_ms == 0 {
        return Err(eyre!("report_interval_ms must be greater than 0"));
    }
    Ok(())
}
