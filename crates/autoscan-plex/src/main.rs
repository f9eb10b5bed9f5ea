use std::path::PathBuf;

use anyhow::Context;
use autoscan_core::prelude::*;
use autoscan_plex::{PlexTarget, load_config, new_target};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "autoscan-plex")]
#[command(about = "Trigger Plex library scans for changed folders", long_about = None)]
struct Args {
    /// Path to the YAML config file
    #[arg(short, long, default_value = "config.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Connect to every configured Plex server and check it responds
    Check,
    /// Send scan requests for the given folders to every configured Plex server
    Scan {
        #[arg(required = true)]
        folders: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = load_config(&args.config)
        .with_context(|| format!("failed loading config {}", args.config.display()))?;
    if config.targets.plex.is_empty() {
        warn!("No plex targets configured in {:?}", args.config);
        return Ok(());
    }

    let mut targets = Vec::with_capacity(config.targets.plex.len());
    for target_config in &config.targets.plex {
        let target = new_target(target_config)
            .await
            .with_context(|| format!("failed initialising plex target {}", target_config.url))?;
        info!(url = %target_config.url, libraries = target.catalog().len(), "Plex target ready");
        targets.push(target);
    }

    match args.command {
        Command::Check => check(&targets).await,
        Command::Scan { folders } => scan(&targets, &folders).await,
    }
}

async fn check(targets: &[PlexTarget]) -> anyhow::Result<()> {
    for target in targets {
        target.available().await.context("plex target unavailable")?;
    }
    info!("All plex targets available");
    Ok(())
}

async fn scan(targets: &[PlexTarget], folders: &[String]) -> anyhow::Result<()> {
    let mut moved = 0usize;
    for target in targets {
        let mut events = target.subscribe();
        for folder in folders {
            if let Err(err) = target.scan(&Scan::new(folder.as_str())).await {
                if err.is_fatal() {
                    error!(folder = %folder, "Plex target can not accept scans");
                }
                return Err(err).with_context(|| format!("failed scanning {folder}"));
            }
            while let Ok(TargetEvent::ScanMoved { .. }) = events.try_recv() {
                moved += 1;
            }
        }
    }
    info!(folders = folders.len(), scans = moved, "Scans moved to plex");
    Ok(())
}
