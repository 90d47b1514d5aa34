mod app;
mod charts;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use app::QuakeAtlasApp;
use clap::Parser;
use data::loader::{load_file, LoadOptions};
use eframe::egui;
use state::AppState;

/// Catalogue looked up in the working directory when `--data` is not given.
const DEFAULT_DATASET: &str = "turkey_earthquakes(1915-2024_feb).csv";

/// Interactive explorer for the Turkey earthquake catalogue.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Catalogue file (.csv, .tsv, .json or .parquet).
    #[arg(short, long, env = "QUAKE_ATLAS_DATA")]
    data: Option<PathBuf>,

    /// Field delimiter for text catalogues, overriding the extension default.
    #[arg(long)]
    delimiter: Option<char>,

    /// Keep events outside the Turkey study area.
    #[arg(long)]
    no_study_area: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut options = LoadOptions::default();
    if cli.no_study_area {
        options.study_area = None;
    }
    if let Some(delimiter) = cli.delimiter {
        if !delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got {delimiter:?}");
        }
        options.delimiter = Some(delimiter as u8);
    }

    let path = dataset_path(cli.data)?;
    let dataset = load_file(&path, &options)
        .with_context(|| format!("loading earthquake catalogue {}", path.display()))?;
    log::info!("Loaded {} earthquakes from {}", dataset.len(), path.display());

    let source_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let state = AppState::new(Arc::new(dataset), source_name);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Turkey Earthquake Analysis",
        native_options,
        Box::new(move |_cc| Ok(Box::new(QuakeAtlasApp::new(state)))),
    )
    .map_err(|e| anyhow!("dashboard window failed: {e}"))
}

/// The explicit path, else the default catalogue, else whatever the user picks.
fn dataset_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let default = PathBuf::from(DEFAULT_DATASET);
    if default.exists() {
        return Ok(default);
    }

    log::info!("{DEFAULT_DATASET} not found in the working directory, asking for a file");
    rfd::FileDialog::new()
        .set_title("Open earthquake catalogue")
        .add_filter("Supported files", &["csv", "tsv", "tab", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "tsv", "tab"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
        .context("no earthquake catalogue selected (pass --data PATH)")
}
