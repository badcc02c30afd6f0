use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use std::io::{stdin, stdout};

use fourinarow_ai::{config::Config, session::Session};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level '{}'", level))?,
    };

    // stdout carries the protocol, logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;
    init_tracing(&config.log_level)?;

    info!(
        strategy = ?config.strategy,
        evaluator = ?config.evaluator,
        depth = config.depth,
        "agent ready"
    );

    let mut session = Session::new(config.strategy(), config.show_board);
    let stdin = stdin();
    session.run(stdin.lock(), stdout())?;

    info!("input closed, shutting down");
    Ok(())
}
