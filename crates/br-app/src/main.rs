use std::path::Path;

use anyhow::{Context, Result};
use br_core::brf::BrfAlphabet;
use br_core::config::BrailleConfig;
use clap::Parser;

mod batch;
mod cli;
mod commands;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config
    let config = resolve_config(&cli.config)?;

    // 4. Alphabet BRF : construit une seule fois, avant toute traduction
    let brf = BrfAlphabet::builtin().context("Table BRF interne invalide")?;

    // 5. Exécuter la commande
    commands::run(&cli.command, &config, &brf)
}

/// Missing config file means defaults; an unreadable or invalid one is an error.
fn resolve_config(path: &Path) -> Result<BrailleConfig> {
    if path.exists() {
        br_core::config::load_config(path)
    } else {
        log::debug!(
            "Config introuvable : {}. Utilisation des défauts.",
            path.display()
        );
        Ok(BrailleConfig::default())
    }
}
