//! Import of the team roster and team plannings from CSV sheets.
//!
//! Roster rows are `num,name,level,school,city,department`, without header.
//!
//! The planning sheet starts with a header row made of leading empty cells
//! followed by HH:MM time columns. Each team row holds the team number in its
//! first cell, and the `M1`, `M2`, `M3` and `EXP` markers under the time
//! columns of its matches and presentation. The team block ends at the first
//! row without team number.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

use chrono::NaiveTime;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::planning::{TeamPlanning, parse_hhmm};
use crate::team::{ScholarLevel, Team, TeamNum, parse_team_num};
use crate::tournament::Tournament;

/// Planning sheet markers, in slot order.
pub const SLOT_MARKERS: [&str; 4] = ["M1", "M2", "M3", "EXP"];

const ROSTER_COLUMNS: usize = 6;

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}

/// Read the roster sheet. Imported teams are not present yet.
pub fn read_teams<R: Read>(reader: R) -> Result<Vec<Team>> {
    let mut teams = Vec::new();
    for record in csv_reader(reader).records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        if record.len() < ROSTER_COLUMNS {
            return Err(Error::InvalidRosterRow {
                line,
                message: format!("expected {} columns, got {}", ROSTER_COLUMNS, record.len()),
            });
        }
        let cell = |index: usize| record.get(index).unwrap_or("").trim();

        let num = parse_team_num(cell(0))?;
        let level_text = cell(2);
        let level = ScholarLevel::decode(level_text).map_err(|e| Error::InvalidRosterRow {
            line,
            message: e.to_string(),
        })?;
        let mut team = Team::new(num, cell(1), level, cell(4), cell(5))?;
        team.level_orig = Some(level_text.to_string());
        if !cell(3).is_empty() {
            team = team.with_school(cell(3));
        }
        debug!("Read team {} ({})", team, level);
        teams.push(team);
    }
    Ok(teams)
}

/// Read the planning sheet, keyed by team number.
pub fn read_plannings<R: Read>(reader: R) -> Result<BTreeMap<TeamNum, TeamPlanning>> {
    let mut records = csv_reader(reader).into_records();
    let Some(header) = records.next() else {
        return Ok(BTreeMap::new());
    };
    let header = header?;

    let x0 = header
        .iter()
        .position(|cell| !cell.trim().is_empty())
        .ok_or_else(|| Error::InvalidPlanning("no time slot in header".to_string()))?;
    let time_slots = header
        .iter()
        .skip(x0)
        .map(|cell| match cell.trim() {
            "" => Ok(None),
            text => parse_hhmm(text).map(Some),
        })
        .collect::<Result<Vec<Option<NaiveTime>>>>()?;

    let mut plannings = BTreeMap::new();
    let mut in_teams = false;
    for record in records {
        let record = record?;
        let num_cell = record.get(0).unwrap_or("").trim();
        if num_cell.is_empty() {
            if in_teams {
                break;
            }
            continue;
        }
        in_teams = true;

        let num = parse_team_num(num_cell)?;
        let cells: Vec<&str> = record.iter().skip(x0).map(str::trim).collect();
        let times = SLOT_MARKERS
            .iter()
            .map(|&marker| {
                cells
                    .iter()
                    .position(|&cell| cell == marker)
                    .and_then(|index| time_slots.get(index).copied().flatten())
                    .ok_or_else(|| {
                        Error::InvalidPlanning(format!("team {}: no time for {}", num, marker))
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        plannings.insert(num, TeamPlanning::new(&times)?);
    }
    Ok(plannings)
}

impl Tournament {
    /// Register the teams of a roster sheet.
    ///
    /// No team is added if one of them is invalid or already registered.
    pub fn import_teams<R: Read>(&mut self, reader: R) -> Result<usize> {
        let teams = read_teams(reader)?;
        let mut seen = BTreeSet::new();
        for team in &teams {
            if self.get_team(team.num()).is_ok() || !seen.insert(team.num()) {
                return Err(Error::DuplicatedTeam(team.num()));
            }
        }
        let count = teams.len();
        for team in teams {
            self.add_team(team)?;
        }
        info!("Imported {} teams", count);
        Ok(count)
    }

    /// Attach the plannings of a planning sheet to the registered teams.
    ///
    /// Rows of unknown teams are skipped.
    pub fn import_plannings<R: Read>(&mut self, reader: R) -> Result<usize> {
        let mut count = 0;
        for (num, planning) in read_plannings(reader)? {
            if self.get_team(num).is_err() {
                warn!("Planning of unknown team {} skipped", num);
                continue;
            }
            self.set_team_planning(num, Some(planning))?;
            count += 1;
        }
        info!("Imported {} team plannings", count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Edition;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    const ROSTER: &str = "\
1,Les Castors,CM1,École Jean Moulin,Grasse,06
2,RoboKids,4ème B,,Nice,06
";

    const PLANNING: &str = "\
,,09:00,09:10,09:20,10:00,10:30,11:00
,,,,,,,
1,Les Castors,M1,,M2,,EXP,M3
2,RoboKids,,M1,,M2,M3,EXP
,,,,,,,
9,Trailing,M1,M2,M3,EXP,,
";

    #[test]
    fn test_read_teams() {
        let teams = read_teams(ROSTER.as_bytes()).unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].level, ScholarLevel::Cm1);
        assert_eq!(teams[0].school.as_deref(), Some("École Jean Moulin"));
        assert!(!teams[0].present);
        assert!(teams[1].is_open());
        assert_eq!(teams[1].level, ScholarLevel::Quatrieme);
        assert_eq!(teams[1].level_orig.as_deref(), Some("4ème B"));
    }

    #[test]
    fn test_read_teams_rejects_short_rows() {
        let result = read_teams("1,Les Castors,CM1\n".as_bytes());
        assert!(matches!(result, Err(Error::InvalidRosterRow { .. })));
    }

    #[test]
    fn test_read_plannings() {
        let plannings = read_plannings(PLANNING.as_bytes()).unwrap();
        assert_eq!(plannings.len(), 2);
        assert_eq!(
            plannings[&1].times(),
            [hm(9, 0), hm(9, 20), hm(11, 0), hm(10, 30)]
        );
        assert_eq!(
            plannings[&2].times(),
            [hm(9, 10), hm(10, 0), hm(10, 30), hm(11, 0)]
        );
    }

    #[test]
    fn test_missing_marker() {
        let sheet = ",09:00,09:10\n1,M1,M2\n";
        assert!(matches!(
            read_plannings(sheet.as_bytes()),
            Err(Error::InvalidPlanning(_))
        ));
    }

    #[test]
    fn test_import_into_tournament() {
        let mut tournament = Tournament::new(Edition::Y2016);
        assert_eq!(tournament.import_teams(ROSTER.as_bytes()).unwrap(), 2);
        assert!(matches!(
            tournament.import_teams(ROSTER.as_bytes()),
            Err(Error::DuplicatedTeam(1))
        ));
        assert_eq!(tournament.team_count(false), 2);

        let sheet = "\
,,09:00,09:10,09:20,10:00
1,Les Castors,M1,M2,M3,EXP
3,Unknown,M1,M2,M3,EXP
2,RoboKids,EXP,M3,M2,M1
";
        assert_eq!(tournament.import_plannings(sheet.as_bytes()).unwrap(), 2);
        assert!(tournament.get_team(2).unwrap().planning.is_some());
    }
}
