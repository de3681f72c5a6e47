use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{load_settings, Action, PageSession, Phase, PredictionClient};
use shared::domain::StagedFile;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(about = "Classify an animal sound with the prediction service")]
struct Args {
    /// Audio file to classify (.mp3, .wav, .flac, .ogg, .m4a).
    file: PathBuf,
    /// Prediction endpoint, overriding predictor.toml and APP__ENDPOINT_URL.
    #[arg(long)]
    endpoint: Option<String>,
    /// Print the result as JSON instead of a text report.
    #[arg(long)]
    json: bool,
}

/// Reads `path` with a MIME type guessed from its extension, as the desktop picker does.
fn stage_file(path: &Path) -> Result<StagedFile> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = mime_guess::from_path(path).first_raw().map(str::to_string);
    Ok(StagedFile::from_parts(name, mime_type, bytes))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = load_settings()
        .context("failed to load predictor settings")?
        .with_endpoint(args.endpoint);
    settings.validate()?;

    let file = stage_file(&args.file)?;

    let mut session = PageSession::new();
    session.dispatch(Action::FilePicked {
        path: args.file.clone(),
        file,
    });
    if session.selected_file().is_none() {
        eprintln!("{}", session.error_message().unwrap_or_default());
        return Ok(ExitCode::FAILURE);
    }
    if let Some(label) = session.file_label() {
        eprintln!("Analyzing {} ({}) via {}", label.name, label.size_text, settings.endpoint_url);
    }

    let client = PredictionClient::new(&settings);
    session.submit_with(&client).await;

    match (session.phase(), session.results()) {
        (Phase::Succeeded, Some(view)) => {
            if args.json {
                println!("{}", render::render_json(view)?);
            } else {
                print!("{}", render::render_results(view));
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            eprintln!("{}", session.error_message().unwrap_or_default());
            Ok(ExitCode::FAILURE)
        }
    }
}
