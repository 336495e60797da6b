use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use tax_cli::{app, cli::Cli, logging, settings::Settings};

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    cli.apply_to(&mut settings);

    logging::init_logging(&settings.logging)?;
    debug!(?settings, "settings resolved");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    app::run(cli, &settings, &mut out)
}
