//! Command-line interface for the `logfan` binary

pub mod demo;

use clap::Parser;

pub use demo::Demo;

#[derive(Parser, Debug)]
#[command(name = "logfan")]
#[command(about = "Logfan - structured logging with multi-sink fan-out", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Run the demonstration sequence against the configured sinks
    #[arg(long)]
    pub demo: bool,
}

/// Print a top-level failure and exit non-zero.
pub fn handle_error(err: &anyhow::Error) -> ! {
    eprintln!("Error: {err:#}");
    std::process::exit(1);
}
