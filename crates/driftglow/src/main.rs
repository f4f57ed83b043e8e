//! Entry point for the driftglow preview daemon: parses the CLI, initialises
//! tracing, and hands the window configuration to the renderer.

mod cli;

use anyhow::Result;
use renderer::window::{run_preview, PreviewConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = cli::parse();
    initialise_tracing();

    let mut config = PreviewConfig::default();
    if let Some(size) = args.size.as_deref() {
        config.surface_size = cli::parse_surface_size(size)?;
    }

    run_preview(config)
}

fn initialise_tracing() {
    let default_filter =
        "warn,driftglow=info,renderer=info,naga=error,wgpu=error,wgpu_core=error,wgpu_hal=error,winit=error";
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
