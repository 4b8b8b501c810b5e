//! Score entry for the three competition phases.

use anyhow::{Context, Result, anyhow};
use pjc_core::{Config, Score, ScoreKind, TeamNum, Tournament};
use serde_json::{Map, Value};

pub fn run_robotics(
    config: &Config,
    team_num: TeamNum,
    round_num: usize,
    items: &[String],
    clear: bool,
) -> Result<()> {
    let mut tournament = super::load_tournament(config)?;
    if clear {
        tournament.clear_robotics_score(team_num, round_num)?;
        let message = format!("Robotics round {} score of team {} cleared", round_num, team_num);
        return finish(config, &tournament, &message);
    }

    let kind = tournament.robotics_round(round_num)?.kind();
    let score = decode(kind, items)?;
    let robotics = score
        .as_robotics()
        .copied()
        .ok_or_else(|| anyhow!("Round {} does not accept {} scores", round_num, kind))?;
    tournament.set_robotics_score(team_num, round_num, robotics)?;
    finish(config, &tournament, &summary(team_num, &score))
}

pub fn run_research(
    config: &Config,
    team_num: TeamNum,
    items: &[String],
    clear: bool,
) -> Result<()> {
    let mut tournament = super::load_tournament(config)?;
    if clear {
        tournament.clear_research_evaluation(team_num)?;
        let message = format!("Research evaluation of team {} cleared", team_num);
        return finish(config, &tournament, &message);
    }

    let mut fields = super::parse_items(items)?;
    mark_shown(&mut fields);
    let score = decode_fields(ScoreKind::Research, &fields)?;
    let research = score
        .as_research()
        .copied()
        .ok_or_else(|| anyhow!("Not a research evaluation"))?;
    tournament.set_research_evaluation(team_num, research)?;
    finish(config, &tournament, &summary(team_num, &score))
}

pub fn run_jury(config: &Config, team_num: TeamNum, items: &[String], clear: bool) -> Result<()> {
    let mut tournament = super::load_tournament(config)?;
    if clear {
        tournament.clear_jury_evaluation(team_num)?;
        let message = format!("Jury evaluation of team {} cleared", team_num);
        return finish(config, &tournament, &message);
    }

    let score = decode(ScoreKind::Jury, items)?;
    let jury = score
        .as_jury()
        .copied()
        .ok_or_else(|| anyhow!("Not a jury evaluation"))?;
    tournament.set_jury_evaluation(team_num, jury)?;
    finish(config, &tournament, &summary(team_num, &score))
}

/// Research marks imply the work was presented, unless `shown` is given explicitly.
fn mark_shown(fields: &mut Map<String, Value>) {
    if !fields.is_empty() && !fields.contains_key("shown") {
        fields.insert("shown".to_string(), Value::from(true));
    }
}

fn decode(kind: ScoreKind, items: &[String]) -> Result<Score> {
    decode_fields(kind, &super::parse_items(items)?)
}

fn decode_fields(kind: ScoreKind, fields: &Map<String, Value>) -> Result<Score> {
    Score::from_fields(kind, fields).with_context(|| {
        format!(
            "Invalid {} score, expected items: {}",
            kind,
            kind.item_names().join(", ")
        )
    })
}

fn summary(team_num: TeamNum, score: &Score) -> String {
    let items: Vec<String> = score
        .items()
        .into_iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect();
    format!(
        "Team {} {}: {} points ({})",
        team_num,
        score.kind(),
        score.evaluate(),
        items.join(", ")
    )
}

fn finish(config: &Config, tournament: &Tournament, message: &str) -> Result<()> {
    super::save_tournament(config, tournament)?;
    println!("{}", message);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pjc_core::RoboticsKind;

    #[test]
    fn test_decode_jury() {
        let score = decode(ScoreKind::Jury, &["evaluation=17".to_string()]).unwrap();
        assert_eq!(score.evaluate(), 17);
        assert_eq!(
            summary(3, &score),
            "Team 3 jury evaluation: 17 points (evaluation=17)"
        );
    }

    #[test]
    fn test_research_marks_imply_shown() {
        let items: Vec<String> = ["topic=15", "research=17", "presentation=12", "poster=18"]
            .iter()
            .map(|item| item.to_string())
            .collect();
        let mut fields = crate::commands::parse_items(&items).unwrap();
        mark_shown(&mut fields);
        let score = decode_fields(ScoreKind::Research, &fields).unwrap();
        assert_eq!(score.evaluate(), 62);

        let items = vec!["shown=no".to_string(), "topic=15".to_string()];
        let mut fields = crate::commands::parse_items(&items).unwrap();
        mark_shown(&mut fields);
        let score = decode_fields(ScoreKind::Research, &fields).unwrap();
        assert_eq!(score.evaluate(), 0);

        let mut fields = Map::new();
        mark_shown(&mut fields);
        assert!(fields.is_empty());
    }

    #[test]
    fn test_decode_rejects_foreign_items() {
        let items = vec!["total_time=90".to_string(), "evaluation=12".to_string()];
        assert!(decode(ScoreKind::Robotics(RoboticsKind::Y2016Round1), &items).is_err());
    }
}
