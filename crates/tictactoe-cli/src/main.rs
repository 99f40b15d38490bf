//! Terminal front end for the Tic-Tac-Toe engine.

use std::io;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod protocol;
mod render;
mod session;

use config::Config;
use session::Session;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries the game.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Starting Tic-Tac-Toe...");

    let mut session = Session::new(&config)?;
    session.run(io::stdin().lock(), io::stdout().lock())
}
