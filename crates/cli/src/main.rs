mod notifier;
mod surface;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ticketview_core::{
    load_config, load_config_with_defaults, validate_config, Config, HttpTicketService,
    RequestOutcome, TicketModalController,
};

use notifier::StderrNotifier;
use surface::FileSurface;

#[derive(Parser, Debug)]
#[command(version, about = "Fetch a rendered ticket and save it as PNG")]
struct Args {
    /// Identifier of the ticket to render
    ticket_id: String,
    /// Configuration file
    #[arg(long, env = "TICKETVIEW_CONFIG", default_value = "ticketview.toml")]
    config: PathBuf,
    /// Ticket service root, overrides service.base_url (config file optional when set)
    #[arg(long)]
    base_url: Option<String>,
    /// Directory the ticket is saved into, overrides output.dir
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(outcome) if outcome.is_displayed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<RequestOutcome> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = resolve_config(&args)?;

    validate_config(&config).context("Configuration validation failed")?;
    info!("Ticket service: {}", config.service.base_url);

    let service = HttpTicketService::new(config.service.clone())
        .context("Failed to create ticket service client")?;
    let surface = Arc::new(FileSurface::new(config.output.dir.clone()));
    let controller =
        TicketModalController::new(Arc::new(service), surface.clone(), Arc::new(StderrNotifier));

    let outcome = controller.request_and_show(args.ticket_id.as_str()).await;

    if outcome.is_displayed() {
        if let Some(path) = surface.save().await? {
            println!("{}", path.display());
        }
        controller.close();
    }

    Ok(outcome)
}

fn resolve_config(args: &Args) -> Result<Config> {
    let mut config = match &args.base_url {
        Some(base_url) if !args.config.exists() => {
            info!("No configuration file at {:?}, using defaults", args.config);
            load_config_with_defaults(&args.config, Config::with_base_url(base_url.clone()))
                .context("Failed to load config from environment")?
        }
        _ => {
            info!("Loading configuration from {:?}", args.config);
            load_config(&args.config)
                .with_context(|| format!("Failed to load config from {:?}", args.config))?
        }
    };

    if let Some(base_url) = &args.base_url {
        config.service.base_url = base_url.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output.dir = dir.clone();
    }

    Ok(config)
}
