//! Game day runner binary

use clap::Parser;
use game_day::cli::Cli;
use game_day::report::{GameDayReport, exit_code};
use game_day::{Config, ScenarioContext};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    initialize_tracing();

    let cli = Cli::parse();

    info!("Starting game day runner v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env().validated() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration validation failed: {}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Runner configuration - Mode: {}, Timeout: {}s",
        config.endpoint_mode,
        config.http_timeout.as_secs()
    );

    let ctx = match ScenarioContext::new(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Failed to initialize HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(game_day) = cli.game_day(&ctx) else {
        if let Err(e) = Cli::print_help() {
            error!("Failed to print help: {}", e);
        }
        return ExitCode::FAILURE;
    };

    let results = game_day.run().await;
    let mut code = exit_code(&results);

    if let Some(path) = &cli.output {
        match GameDayReport::new(results).write_to(path).await {
            Ok(()) => println!("\nResults written to: {}", path.display()),
            Err(e) => {
                error!("Failed to write results to {}: {}", path.display(), e);
                eprintln!("Failed to write results to {}: {}", path.display(), e);
                code = 1;
            }
        }
    }

    ExitCode::from(code)
}

/// Initialize structured logging on stderr
fn initialize_tracing() {
    let log_level = std::env::var("GAME_DAY_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .json();

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
