//! Standalone mirrorball viewer binary.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use log::LevelFilter;
use mirrorball::{error::MirrorballError, options::Options, viewer::Viewer};

/// Command line parameters for the mirrorball viewer.
#[derive(Debug, Parser)]
#[command(name = "mirrorball", version, about)]
struct Args {
    /// TOML options file; missing fields use defaults.
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Directory holding `models/`, `textures/` and `shaders/`.
    #[arg(long, short = 'a', default_value = "assets")]
    assets: PathBuf,

    /// Override the window width.
    #[arg(long)]
    width: Option<u32>,

    /// Override the window height.
    #[arg(long)]
    height: Option<u32>,

    /// Write the default options to this path and exit.
    #[arg(long, value_name = "PATH")]
    write_default_config: Option<PathBuf>,

    /// Write the options JSON schema to this path and exit.
    #[arg(long, value_name = "PATH")]
    schema: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), MirrorballError> {
    if let Some(path) = &args.write_default_config {
        Options::default().save(path)?;
        log::info!("wrote default options to {}", path.display());
        return Ok(());
    }
    if let Some(path) = &args.schema {
        Options::save_schema(path)?;
        log::info!("wrote options schema to {}", path.display());
        return Ok(());
    }

    let mut options = match &args.config {
        Some(path) => {
            log::info!("loading options from {}", path.display());
            Options::load(path)?
        }
        None => Options::default(),
    };
    if let Some(width) = args.width {
        options.window.width = width;
    }
    if let Some(height) = args.height {
        options.window.height = height;
    }

    Viewer::builder()
        .with_options(options)
        .with_assets_root(args.assets)
        .build()
        .run()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("wgpu_core", LevelFilter::Warn)
        .filter_module("wgpu_hal", LevelFilter::Warn)
        .filter_module("naga", LevelFilter::Warn)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
