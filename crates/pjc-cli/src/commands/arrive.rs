//! Register the arrival (or the withdrawal) of a team.

use anyhow::Result;
use pjc_core::{Config, TeamNum};

pub fn run(config: &Config, team_num: TeamNum, present: bool) -> Result<()> {
    let mut tournament = super::load_tournament(config)?;
    tournament.set_team_present(team_num, present)?;
    super::save_tournament(config, &tournament)?;

    let team = tournament.get_team(team_num)?;
    println!(
        "Team {} ({}) is {}",
        team_num,
        team.name,
        if present { "present" } else { "absent" }
    );
    println!(
        "{} of {} teams present",
        tournament.team_count(true),
        tournament.team_count(false)
    );
    Ok(())
}
