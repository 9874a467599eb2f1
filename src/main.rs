use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use supportviz::{chart, cli::Cli, dataset, stats};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let mut rng = StdRng::seed_from_u64(dataset::DEFAULT_SEED);
    let data = dataset::generate_support_data(&mut rng)
        .context("Failed to generate support dataset")?;
    tracing::debug!(records = data.len(), seed = dataset::DEFAULT_SEED, "dataset generated");

    chart::set_theme(chart::Theme::default());

    let output = Path::new(chart::OUTPUT_FILE);
    chart::render_chart(&data, output)
        .with_context(|| format!("Failed to render chart to {}", output.display()))?;

    stats::print_report(&data)?;

    chart::show(output);

    Ok(())
}
