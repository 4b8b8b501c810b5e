//! Match tables, jury and slot times of the teams.

use anyhow::Result;
use pjc_core::{Config, TeamNum, report};

pub fn run(config: &Config, team_num: Option<TeamNum>) -> Result<()> {
    let tournament = super::load_tournament(config)?;
    print!("{}", report::format_schedule(&tournament, team_num)?);
    Ok(())
}
