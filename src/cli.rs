//! CLI argument parsing for Supportviz

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "supportviz")]
#[command(version)]
#[command(
    about = "Render a violin chart of synthetic customer-support response times",
    long_about = None
)]
pub struct Cli {
    /// Enable debug tracing output on stderr (honors RUST_LOG)
    #[arg(long = "debug")]
    pub debug: bool,
}
