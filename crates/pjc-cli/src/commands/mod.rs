//! CLI command implementations.
//!
//! Every command loads the tournament file, applies its change and saves it back.

pub mod arrive;
pub mod init;
pub mod ranking;
pub mod schedule;
pub mod score;
pub mod status;

use std::path::Path;

use anyhow::{Context, Result, bail};
use pjc_core::{Config, Tournament};
use serde_json::{Map, Value};
use tracing::debug;

/// Load the configuration file, or the defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            debug!("No config file, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn load_tournament(config: &Config) -> Result<Tournament> {
    let path = config.tournament_path();
    if !path.exists() {
        bail!(
            "Tournament file {} not found, run `pjc init` first",
            path.display()
        );
    }
    Tournament::load(config.edition, &path)
        .with_context(|| format!("Failed to load tournament {}", path.display()))
}

pub fn save_tournament(config: &Config, tournament: &Tournament) -> Result<()> {
    let path = config.tournament_path();
    tournament
        .save(&path)
        .with_context(|| format!("Failed to save tournament {}", path.display()))
}

/// Parse `name=value` score items. Values are integers or booleans.
pub fn parse_items(items: &[String]) -> Result<Map<String, Value>> {
    let mut fields = Map::new();
    for item in items {
        let Some((name, value)) = item.split_once('=') else {
            bail!("Invalid score item '{}', expected name=value", item);
        };
        let value = match value.trim() {
            "true" | "yes" => Value::from(true),
            "false" | "no" => Value::from(false),
            text => match text.parse::<u32>() {
                Ok(number) => Value::from(number),
                Err(_) => bail!("Invalid value '{}' for score item '{}'", text, name),
            },
        };
        fields.insert(name.trim().to_string(), value);
    }
    Ok(fields)
}
