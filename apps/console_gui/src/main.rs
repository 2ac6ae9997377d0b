use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod config;
mod controller;
mod preferences;
mod ui;

use backend_bridge::commands::BackendCommand;
use config::{load_settings, CliOverrides};
use controller::{
    events::UiEvent,
    reducer::{ConsoleController, ControllerSettings},
};
use preferences::JsonFilePreferenceStore;
use ui::ConsoleApp;

const APP_NAME: &str = "SentinalGrid Console";

#[derive(Parser, Debug)]
#[command(name = "sentinalgrid-console", about = "Operator console for outbound campaigns")]
struct Args {
    /// Path to a TOML config file (defaults to ./console.toml when present).
    #[arg(long, env = "CONSOLE_CONFIG")]
    config: Option<PathBuf>,
    /// Base URL of the campaign service.
    #[arg(long)]
    api_base: Option<String>,
    /// Email attached to new campaigns.
    #[arg(long)]
    user_email: Option<String>,
    /// Directory for local preferences.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_settings(
        args.config.as_deref(),
        &CliOverrides {
            api_base: args.api_base,
            user_email: args.user_email,
            data_dir: args.data_dir,
        },
    )
    .context("failed to load console configuration")?;
    tracing::info!(
        api_base = %config.api_base,
        data_dir = %config.data_dir.display(),
        "starting console"
    );

    let preferences = JsonFilePreferenceStore::in_dir(&config.data_dir);
    let controller = ConsoleController::new(
        ControllerSettings {
            notification_ttl: config.notification_ttl,
            launch_refresh_delay: config.launch_refresh_delay,
        },
        Box::new(preferences),
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([1180.0, 760.0])
            .with_min_inner_size([860.0, 560.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |_cc| Ok(Box::new(ConsoleApp::new(cmd_tx, ui_rx, controller)))),
    )
    .map_err(|err| anyhow::anyhow!("console window failed: {err}"))
}
