//! Final ranking of the competing teams.

use anyhow::Result;
use pjc_core::{Config, report};
use serde_json::json;

pub fn run(config: &Config, as_json: bool) -> Result<()> {
    let tournament = super::load_tournament(config)?;

    if as_json {
        let ranking: Vec<_> = tournament
            .get_final_ranking()
            .into_iter()
            .map(|(rank, teams)| json!({ "rank": rank, "teams": teams }))
            .collect();
        let document = json!({
            "ranking": ranking,
            "scores": tournament.get_final_scores(),
        });
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print!("{}", report::format_final_ranking(&tournament));
    }
    Ok(())
}
