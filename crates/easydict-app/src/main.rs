use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use easydict_app::backend::DesktopBackend;
use easydict_app::controller::AppController;
use easydict_app::profile;
use easydict_app::state::AppState;
use easydict_ocr::{XcapGrabber, platform_recognizer};
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Desktop translation helper
#[derive(Debug, Parser)]
#[command(name = "easydict", version)]
struct Args {
    /// Settings file, defaults to the per-user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.with_ansi(atty::is(atty::Stream::Stderr)).init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.log_format);

    let config_path = match args.config {
        Some(path) => path,
        None => profile::default_config_path()?,
    };
    let config = profile::load_config(&config_path);
    let state = Arc::new(AppState::new(config.clone(), config_path));

    let controller = AppController::new(state.clone(), &config);
    let capture = controller.capture_service(Arc::new(XcapGrabber), platform_recognizer("auto"));

    let client = reqwest::Client::builder()
        .user_agent("Mozilla/5.0")
        .build()
        .context("Failed to build HTTP client")?;
    let backend = Arc::new(DesktopBackend::new(state, client, capture.clone()));

    let mut tasks = controller.spawn_tasks(backend, capture, config);
    tracing::info!("EasyDict started");

    tokio::select! {
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for ctrl+c: {}", e);
            }
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task exited"),
                Ok(Err(e)) => tracing::error!("Task failed: {:#}", e),
                Err(e) => tracing::error!("Task panicked: {}", e),
            }
        }
    }

    controller.shutdown();
    tasks.abort_all();
    Ok(())
}
