mod backend_bridge;
mod controller;
mod media;
mod ui;

use anyhow::Context;
use clap::Parser;
use client_core::{load_settings, PredictionClient};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::PredictorApp;

const APP_TITLE: &str = "Animal Voice Detection";

#[derive(Parser, Debug)]
struct Args {
    /// Prediction endpoint, overriding predictor.toml and APP__ENDPOINT_URL.
    #[arg(long)]
    endpoint: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let settings = load_settings()
        .context("failed to load predictor settings")?
        .with_endpoint(args.endpoint);
    settings.validate()?;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(8);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, PredictionClient::new(&settings));
    tracing::info!(endpoint = %settings.endpoint_url, "animal voice detection ready");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([720.0, 780.0])
            .with_min_inner_size([480.0, 520.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    let endpoint_url = settings.endpoint_url;
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(PredictorApp::new(cmd_tx, ui_rx, endpoint_url)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop app exited with an error: {err}"))
}
