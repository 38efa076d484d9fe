//! tienda — terminal admin client for the store catalog backend.

mod action;
mod app;
mod component;
mod config;
mod event;
mod form;
mod money;
mod table;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tienda_api::CatalogClient;

use crate::app::App;

#[derive(Parser, Debug)]
#[command(author, version, about = "Administrador de productos en la terminal")]
struct Cli {
    /// Base URL of the catalog API (overrides the config file)
    #[arg(long, env = "TIENDA_URL")]
    url: Option<String>,

    /// Log file path. The UI owns the terminal, so logs never go to stdout.
    #[arg(long, default_value = "/tmp/tienda.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing. Returns the guard that flushes buffered log lines
/// on shutdown; it must stay alive for the lifetime of the program.
fn setup_tracing(cli: &Cli) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tienda={default_level},tienda_api={default_level}")));

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.log_file)
        .wrap_err_with(|| format!("no se pudo abrir el log en {}", cli.log_file.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = setup_tracing(&cli)?;
    tui::install_hooks()?;

    let mut config = config::load_config().wrap_err("la configuración no es válida")?;
    if let Some(url) = cli.url {
        config.api_url = url;
    }
    let transport = config.transport()?;

    info!(url = %config.api_url, "starting against catalog API");
    let client = CatalogClient::new(&config.api_url, &transport)?;

    App::new(client, config.api_url.clone()).run().await
}
