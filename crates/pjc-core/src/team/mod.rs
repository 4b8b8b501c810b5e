//! Team roster types.

mod level;

pub use level::*;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::planning::TeamPlanning;

/// Team number, positive and unique for the whole event.
pub type TeamNum = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    num: TeamNum,
    pub name: String,
    /// None for open teams, not attached to a school
    pub school: Option<String>,
    pub level: ScholarLevel,
    /// Roster text the level was decoded from, if any
    pub level_orig: Option<String>,
    pub city: String,
    pub department: String,
    /// False for teams not arrived yet or withdrawn
    pub present: bool,
    pub planning: Option<TeamPlanning>,
}

impl Team {
    pub fn new(
        num: TeamNum,
        name: impl Into<String>,
        level: ScholarLevel,
        city: impl Into<String>,
        department: impl Into<String>,
    ) -> Result<Self> {
        if num == 0 {
            return Err(Error::InvalidTeamNumber(num.to_string()));
        }
        Ok(Self {
            num,
            name: name.into(),
            school: None,
            level,
            level_orig: None,
            city: city.into(),
            department: department.into(),
            present: false,
            planning: None,
        })
    }

    pub fn with_school(mut self, school: impl Into<String>) -> Self {
        self.school = Some(school.into());
        self
    }

    pub fn with_planning(mut self, planning: TeamPlanning) -> Self {
        self.planning = Some(planning);
        self
    }

    pub fn present(mut self, present: bool) -> Self {
        self.present = present;
        self
    }

    pub fn num(&self) -> TeamNum {
        self.num
    }

    pub fn bonus(&self) -> i64 {
        self.level.bonus_points()
    }

    pub fn is_open(&self) -> bool {
        self.school.is_none()
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.num, self.name)
    }
}

/// Parse a team number from text, rejecting zero and non-numeric values.
pub fn parse_team_num(text: &str) -> Result<TeamNum> {
    match text.trim().parse::<TeamNum>() {
        Ok(num) if num > 0 => Ok(num),
        _ => Err(Error::InvalidTeamNumber(text.to_string())),
    }
}

/// Persisted form of a scholar level: code, display label and original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRecord {
    pub code: u8,
    pub label: String,
    pub orig: Option<String>,
}

impl LevelRecord {
    pub fn from_team(team: &Team) -> Self {
        Self {
            code: team.level.code(),
            label: team.level.label().to_string(),
            orig: team.level_orig.clone(),
        }
    }

    /// The code is authoritative, the label is informative only.
    pub fn level(&self) -> Result<ScholarLevel> {
        ScholarLevel::from_code(self.code)
    }
}
