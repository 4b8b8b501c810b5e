//! Progress of the present teams against the phase deadlines.

use anyhow::Result;
use chrono::{Local, NaiveTime};
use pjc_core::{Config, planning, report};

pub fn run(config: &Config, at: Option<&str>, json: bool) -> Result<()> {
    let tournament = super::load_tournament(config)?;
    let now = match at {
        Some(text) => planning::parse_hhmm(text)?,
        None => current_time(),
    };
    let progress = tournament.get_progress(now);

    if json {
        println!("{}", serde_json::to_string_pretty(&progress)?);
    } else {
        println!("Status at {}", planning::format_hhmm(now));
        print!("{}", report::format_progress(&tournament, &progress));
    }
    Ok(())
}

fn current_time() -> NaiveTime {
    Local::now().time()
}
