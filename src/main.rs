//! Logfan CLI entry point.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use logfan::cli::{Cli, Demo};
use logfan::{Emit, LoggerRegistry};

fn run(cli: &Cli) -> anyhow::Result<()> {
    let registry = LoggerRegistry::from_env().context("failed to configure logging")?;
    let logger = registry
        .get_logger("main")
        .context("failed to create the main logger")?;

    logger.info("Application started");
    if cli.demo {
        Demo::new(&logger).run();
    }
    logger.info("Application finished");

    registry.flush_all();
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        logfan::cli::handle_error(&err);
    }
}
