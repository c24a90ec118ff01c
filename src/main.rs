//! Retouch - instruction-driven image editing with a pretrained diffusion
//! pipeline, via a desktop GUI or a headless CLI run.

mod adapters;
mod app;
mod backend;
mod cassette;
mod cli;
mod config;
mod context;
mod error;
mod output;
mod params;
mod ports;
mod session;

use std::process;

use clap::Parser;

use crate::backend::parse_backend;
use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::EditError;
use crate::output::{resolve_output_path, save_image};
use crate::params::{validate_image_guidance, validate_steps, validate_text_guidance};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    // An instruction argument means one headless edit; otherwise the GUI runs.
    let result = if cli.instruction.is_some() { run(cli).await } else { app::run(&cli) };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), EditError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(EditError::Config)?;

    // Resolve backend
    let backend = parse_backend(&cli.backend).map_err(EditError::InvalidArgument)?;
    log::debug!("backend: {backend:?}");

    // Validate parameters
    validate_steps(cli.steps).map_err(EditError::InvalidArgument)?;
    validate_image_guidance(cli.image_guidance).map_err(EditError::InvalidArgument)?;
    validate_text_guidance(cli.text_guidance).map_err(EditError::InvalidArgument)?;

    // Build session and context (live / recording / replaying)
    let edit_session = cli.session();
    let (ctx, recording_session) = ServiceContext::from_env(backend, &config)?;

    // Edit
    let outcome = session::submit(ctx.editor.as_ref(), &edit_session).await?;

    // Save
    let output_path = resolve_output_path(cli.output.as_deref());
    save_image(&outcome.image, &output_path)?;
    eprintln!("Saved: {}", output_path.display());

    // Finish recording if active
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    Ok(())
}
