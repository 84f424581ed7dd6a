use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use waitplot::{cli::Cli, PlotRenderer};

/// Log to stderr, `warn` and above unless `RUST_LOG` says otherwise.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let output = PlotRenderer::default()
        .render(&cli.filename)
        .with_context(|| format!("failed to plot {}", cli.filename.display()))?;
    println!("Plot saved to {}", output.display());
    Ok(())
}
