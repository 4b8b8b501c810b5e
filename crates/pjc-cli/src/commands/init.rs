//! Create the tournament file from the roster and planning sheets.

use std::fs::File;

use anyhow::{Context, Result, bail};
use pjc_core::{Config, Tournament};
use tracing::{info, warn};

pub fn run(config: &Config, force: bool) -> Result<()> {
    let tournament_path = config.tournament_path();
    if tournament_path.exists() && !force {
        bail!(
            "Tournament file {} already exists (use --force to overwrite)",
            tournament_path.display()
        );
    }

    let mut tournament = Tournament::new(config.edition);
    info!("Creating {} edition tournament", config.edition);

    let teams_path = config.teams_path();
    let teams = File::open(&teams_path)
        .with_context(|| format!("Failed to open roster {}", teams_path.display()))?;
    tournament
        .import_teams(teams)
        .with_context(|| format!("Failed to import roster {}", teams_path.display()))?;

    let planning_path = config.planning_path();
    if planning_path.exists() {
        let planning = File::open(&planning_path)
            .with_context(|| format!("Failed to open planning {}", planning_path.display()))?;
        tournament
            .import_plannings(planning)
            .with_context(|| format!("Failed to import planning {}", planning_path.display()))?;
    } else {
        warn!(
            "Planning sheet {} not found, keeping default planning",
            planning_path.display()
        );
    }

    // Arrivals are not registered yet, so every team is scheduled
    tournament.consolidate_planning(false);
    tournament.assign_tables_and_juries(false);

    super::save_tournament(config, &tournament)?;
    println!(
        "Tournament created with {} teams: {}",
        tournament.team_count(false),
        tournament_path.display()
    );
    Ok(())
}
