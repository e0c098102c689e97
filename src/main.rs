//! SDFBS Dashboard - terminal client for the SDFBS storage backend
//!
//! This is the binary entry point. All logic lives in the library crates.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use sdash_api::HttpApi;
use sdash_app::config::{self, Settings};
use sdash_core::{logging, Mode};

/// SDFBS Dashboard - monitor and drive an SDFBS storage server
#[derive(Parser, Debug)]
#[command(name = "sdash")]
#[command(about = "Terminal dashboard for the SDFBS file-storage backend", long_about = None)]
struct Args {
    /// Server base URL (overrides the config file)
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Mode to open: simple, distributed, production or secure
    #[arg(long, value_parser = parse_mode)]
    mode: Option<Mode>,

    /// Path to config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Load the mode once and print it as JSON instead of starting the TUI
    #[arg(long)]
    headless: bool,
}

fn parse_mode(value: &str) -> Result<Mode, String> {
    value.parse().map_err(|e: sdash_core::Error| e.to_string())
}

fn settings_for(args: &Args) -> Settings {
    if args.config.is_none() {
        if let Some(path) = config::default_config_path() {
            if let Err(e) = config::init_config_file(&path) {
                tracing::warn!("Could not write default config: {}", e);
            }
        }
    }

    let mut settings = config::load_settings(args.config.as_deref());
    if let Some(server) = &args.server {
        settings.server.base_url = server.clone();
    }
    if let Some(mode) = args.mode {
        settings.behavior.start_mode = mode;
    }
    settings
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {e}");
    }

    let settings = settings_for(&args);
    let api = HttpApi::with_timeout(&settings.server.base_url, settings.server.timeout())
        .wrap_err("Invalid server configuration")?;
    let api = Arc::new(api);

    if args.headless {
        sdfbs_dashboard::run_headless(api, settings).await?;
    } else {
        sdfbs_dashboard::run(api, settings).await?;
    }
    Ok(())
}
