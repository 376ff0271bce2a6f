//! `loradeck` — terminal console for LoRaWAN network servers.
//!
//! Built on [ratatui](https://ratatui.rs). Screens are navigable via
//! number keys (1-3): device location search, gateway remote control,
//! and multicast-group management.
//!
//! Logs are written to a file (default `/tmp/loradeck.log`) to avoid
//! corrupting the terminal UI.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and
//! app launch.

mod action;
mod app;
mod component;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use secrecy::SecretString;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use loradeck_api::ApiClient;

use crate::app::{App, AppSettings};

/// Terminal console for LoRaWAN network servers.
#[derive(Parser, Debug)]
#[command(name = "loradeck", version, about)]
struct Cli {
    /// Network server URL (e.g., https://lns.example.com:8080)
    #[arg(short = 'u', long, env = "LORADECK_URL")]
    url: Option<String>,

    /// API token
    #[arg(short = 't', long, env = "LORADECK_API_TOKEN")]
    token: Option<String>,

    /// Config file path (defaults to the platform config directory)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Log file path (defaults to /tmp/loradeck.log)
    #[arg(long, default_value = "/tmp/loradeck.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("loradeck={log_level}")));

    let log_dir = cli.log_file.parent().unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("loradeck.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Resolve the server connection from CLI flags over the config file.
fn build_client(cli: &Cli) -> Result<(Arc<ApiClient>, String, AppSettings)> {
    let config = match cli.config {
        Some(ref path) => loradeck_config::load_config_from(path)?,
        None => loradeck_config::load_config()?,
    };

    let url = cli.url.clone().unwrap_or_else(|| config.server.url.clone());

    let token = match cli.token {
        Some(ref token) => SecretString::from(token.clone()),
        None => loradeck_config::resolve_token(&config.server)?,
    };

    let base_url: url::Url = url
        .parse()
        .map_err(|e| eyre!("invalid server URL {url:?}: {e}"))?;
    let label = base_url
        .host_str()
        .map(ToOwned::to_owned)
        .ok_or_else(|| eyre!("server URL has no host: {url}"))?;

    let transport = loradeck_config::to_transport(&config.server);
    let client = ApiClient::new(base_url, token, &transport)?;

    let settings = AppSettings {
        default_center: (config.map.default_latitude, config.map.default_longitude),
        default_limit: config.search.default_limit,
    };

    Ok((Arc::new(client), label, settings))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let (client, server_label, settings) = build_client(&cli)?;

    info!(server = %server_label, "starting loradeck");

    let mut app = App::new(client, server_label, settings);
    app.run().await?;

    Ok(())
}
