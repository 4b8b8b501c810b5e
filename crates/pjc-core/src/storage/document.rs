use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::planning::{SLOT_COUNT, TeamPlanning, format_hhmm, parse_hhmm};
use crate::round::Round;
use crate::score::{Edition, Score, ScoreKind};
use crate::team::{LevelRecord, Team, TeamNum};
use crate::tournament::Tournament;

/// Item fields of one score, keyed by item name.
pub type ScoreFields = Map<String, Value>;

/// Scores of a phase, keyed by team number.
pub type RoundEntries = BTreeMap<TeamNum, ScoreFields>;

/// Persisted form of a tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentDocument {
    /// Missing in documents written before editions were recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<Edition>,
    pub teams: BTreeMap<TeamNum, TeamEntry>,
    /// Phase deadlines, as HH:MM
    pub planning: Vec<String>,
    pub start_time: String,
    pub robotics_rounds: Vec<RoundEntries>,
    pub research_evaluations: RoundEntries,
    pub jury_evaluations: RoundEntries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub name: String,
    pub school: Option<String>,
    pub level: LevelRecord,
    pub city: String,
    pub department: String,
    pub present: bool,
    /// (HH:MM, table) for the 3 matches, then (HH:MM, jury) for the presentation
    pub planning: Option<Vec<(String, Option<u8>)>>,
}

impl TeamEntry {
    fn from_team(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            school: team.school.clone(),
            level: LevelRecord::from_team(team),
            city: team.city.clone(),
            department: team.department.clone(),
            present: team.present,
            planning: team.planning.map(|planning| {
                planning
                    .assignments()
                    .iter()
                    .map(|&(time, num)| (format_hhmm(time), num))
                    .collect()
            }),
        }
    }

    fn to_team(&self, num: TeamNum) -> Result<Team> {
        let mut team = Team::new(
            num,
            self.name.clone(),
            self.level.level()?,
            self.city.clone(),
            self.department.clone(),
        )?
        .present(self.present);
        team.school = self.school.clone();
        team.level_orig = self.level.orig.clone();
        if let Some(slots) = &self.planning {
            let slots = slots
                .iter()
                .map(|(time, num)| Ok((parse_hhmm(time)?, *num)))
                .collect::<Result<Vec<_>>>()?;
            team.planning = Some(TeamPlanning::from_assignments(&slots)?);
        }
        Ok(team)
    }
}

fn round_entries(round: &Round) -> RoundEntries {
    round
        .scores()
        .iter()
        .map(|(&team_num, score)| (team_num, score.to_fields()))
        .collect()
}

fn decode_round(
    kind: ScoreKind,
    entries: &RoundEntries,
    teams: &BTreeMap<TeamNum, Team>,
) -> Result<Round> {
    let mut round = Round::new(kind);
    for (&team_num, fields) in entries {
        if !teams.contains_key(&team_num) {
            return Err(Error::TeamNotFound(team_num));
        }
        round.add_team_score(team_num, Score::from_fields(kind, fields)?)?;
    }
    Ok(round)
}

impl Tournament {
    pub fn serialize(&self) -> TournamentDocument {
        TournamentDocument {
            edition: Some(self.edition()),
            teams: self
                .teams_map()
                .iter()
                .map(|(&num, team)| (num, TeamEntry::from_team(team)))
                .collect(),
            planning: self.planning().iter().map(|&t| format_hhmm(t)).collect(),
            start_time: format_hhmm(self.start_time()),
            robotics_rounds: self.robotics_rounds().iter().map(round_entries).collect(),
            research_evaluations: round_entries(self.research_evaluations()),
            jury_evaluations: round_entries(self.jury_evaluations()),
        }
    }

    /// Restore the state from a document, decoding robotics scores with the
    /// kinds of this tournament edition, round by round.
    ///
    /// Nothing is modified if any part of the document is invalid.
    ///
    /// A team number repeated within `teams` or within a phase map is not
    /// detected: JSON decoding keeps the last entry.
    pub fn deserialize(&mut self, document: &TournamentDocument) -> Result<()> {
        let edition = self.edition();
        if let Some(actual) = document.edition
            && actual != edition
        {
            return Err(Error::EditionMismatch {
                expected: edition.to_string(),
                actual: actual.to_string(),
            });
        }
        let kinds = edition.robotics_kinds();
        if document.robotics_rounds.len() != kinds.len() {
            return Err(Error::RoundCountMismatch {
                expected: kinds.len(),
                actual: document.robotics_rounds.len(),
            });
        }

        let teams = document
            .teams
            .iter()
            .map(|(&num, entry)| Ok((num, entry.to_team(num)?)))
            .collect::<Result<BTreeMap<_, _>>>()?;

        let planning: [NaiveTime; SLOT_COUNT] = document
            .planning
            .iter()
            .map(|t| parse_hhmm(t))
            .collect::<Result<Vec<_>>>()?
            .try_into()
            .map_err(|times: Vec<NaiveTime>| {
                Error::InvalidPlanning(format!(
                    "expected {} phase deadlines, got {}",
                    SLOT_COUNT,
                    times.len()
                ))
            })?;
        let start_time = parse_hhmm(&document.start_time)?;

        let robotics_rounds = kinds
            .iter()
            .zip(&document.robotics_rounds)
            .map(|(&kind, entries)| decode_round(ScoreKind::Robotics(kind), entries, &teams))
            .collect::<Result<Vec<_>>>()?;
        let research_evaluations =
            decode_round(ScoreKind::Research, &document.research_evaluations, &teams)?;
        let jury_evaluations = decode_round(ScoreKind::Jury, &document.jury_evaluations, &teams)?;

        debug!(
            "Decoded {} teams and {} robotics rounds",
            teams.len(),
            robotics_rounds.len()
        );
        self.replace_state(
            teams,
            robotics_rounds,
            research_evaluations,
            jury_evaluations,
            planning,
            start_time,
        );
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.serialize())?)
    }

    pub fn from_json(edition: Edition, json: &str) -> Result<Self> {
        let document: TournamentDocument = serde_json::from_str(json)?;
        let mut tournament = Self::new(edition);
        tournament.deserialize(&document)?;
        Ok(tournament)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        info!("Tournament saved to {}", path.display());
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(edition: Edition, path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let tournament = Self::from_json(edition, &content)?;
        info!(
            "Tournament loaded from {} ({} teams)",
            path.display(),
            tournament.team_count(false)
        );
        Ok(tournament)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{Collection, JuryEvaluationScore, RoboticsActions, RoboticsScore};
    use crate::team::ScholarLevel;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn sample() -> Tournament {
        let mut tournament = Tournament::new(Edition::Y2016);
        let planning = TeamPlanning::from_assignments(&[
            (hm(9, 0), Some(1)),
            (hm(10, 0), Some(2)),
            (hm(11, 0), None),
            (hm(14, 0), Some(3)),
        ])
        .unwrap();
        let team = Team::new(4, "Robots", ScholarLevel::Cm2, "Nice", "06")
            .unwrap()
            .with_planning(planning)
            .present(true);
        tournament.add_team(team).unwrap();
        tournament
            .set_robotics_score(
                4,
                1,
                RoboticsScore::new(90, RoboticsActions::Y2016Round1(Collection { collected: 8 })),
            )
            .unwrap();
        tournament
            .set_jury_evaluation(4, JuryEvaluationScore::new(12))
            .unwrap();
        tournament
    }

    #[test]
    fn test_document_shape() {
        let value = serde_json::to_value(sample().serialize()).unwrap();
        assert_eq!(value["edition"], "2016");
        assert_eq!(value["start_time"], "00:00");
        assert_eq!(value["planning"][0], "15:00");
        assert_eq!(value["teams"]["4"]["level"]["code"], 8);
        assert_eq!(value["teams"]["4"]["level"]["label"], "CM2");
        assert_eq!(
            value["teams"]["4"]["planning"][2],
            serde_json::json!(["11:00", null])
        );
        assert_eq!(value["robotics_rounds"][0]["4"]["collected"], 8);
        assert_eq!(value["robotics_rounds"][0]["4"]["total_time"], 90);
        assert_eq!(value["jury_evaluations"]["4"]["evaluation"], 12);
    }

    #[test]
    fn test_edition_mismatch_leaves_state() {
        let document = sample().serialize();
        let mut other = Tournament::new(Edition::Y2014);
        let result = other.deserialize(&document);
        assert!(matches!(result, Err(Error::EditionMismatch { .. })));
        assert_eq!(other.team_count(false), 0);
    }

    #[test]
    fn test_round_count_mismatch() {
        let mut document = sample().serialize();
        document.edition = None;
        document.robotics_rounds.pop();
        let mut tournament = Tournament::new(Edition::Y2016);
        assert!(matches!(
            tournament.deserialize(&document),
            Err(Error::RoundCountMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_invalid_score_is_atomic() {
        let original = sample();
        let mut document = original.serialize();
        document.jury_evaluations.values_mut().for_each(|fields| {
            fields.insert("evaluation".to_string(), Value::from("twelve"));
        });
        let mut tournament = sample();
        tournament.reset();
        let before = tournament.clone();
        assert!(tournament.deserialize(&document).is_err());
        assert_eq!(tournament, before);
    }

    #[test]
    fn test_scores_of_unknown_teams_are_rejected() {
        let mut document = sample().serialize();
        document.teams.clear();
        let mut tournament = Tournament::new(Edition::Y2016);
        assert!(matches!(
            tournament.deserialize(&document),
            Err(Error::TeamNotFound(4))
        ));
    }

    #[test]
    fn test_out_of_range_table_is_rejected() {
        let mut value = serde_json::to_value(sample().serialize()).unwrap();
        value["teams"]["4"]["planning"][1][1] = Value::from(7);
        let json = value.to_string();
        assert!(matches!(
            Tournament::from_json(Edition::Y2016, &json),
            Err(Error::InvalidPlanning(_))
        ));

        let mut document = sample().serialize();
        let planning = document.teams.get_mut(&4).unwrap().planning.as_mut().unwrap();
        planning[3].1 = Some(42);
        let mut tournament = Tournament::new(Edition::Y2016);
        assert!(matches!(
            tournament.deserialize(&document),
            Err(Error::InvalidPlanning(_))
        ));
        assert_eq!(tournament.team_count(false), 0);
    }

    #[test]
    fn test_repeated_team_key_keeps_last_entry() {
        let json = r#"{
            "edition": "2016",
            "teams": {
                "1": {
                    "name": "Robots",
                    "school": null,
                    "level": {"code": 8, "label": "CM2", "orig": null},
                    "city": "Nice",
                    "department": "06",
                    "present": true,
                    "planning": null
                }
            },
            "planning": ["15:00", "16:00", "17:00", "17:00"],
            "start_time": "00:00",
            "robotics_rounds": [
                {"1": {"total_time": 90, "collected": 8}, "1": {"total_time": 140, "collected": 8}},
                {},
                {}
            ],
            "research_evaluations": {},
            "jury_evaluations": {}
        }"#;
        let tournament = Tournament::from_json(Edition::Y2016, json).unwrap();
        assert_eq!(tournament.get_robotics_score(1, 1).unwrap().evaluate(), 18);
    }
}
