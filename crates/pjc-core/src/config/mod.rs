//! Configuration.
//!
//! This module contains:
//! - `Config` - operator settings loaded from a TOML file
//! - Competition timing and default planning constants

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::score::Edition;

/// Match and planning slot timing.
pub mod timing {
    /// Duration of a robotics match, in seconds. Time bonus is counted from it.
    pub const MATCH_DURATION_SECS: u32 = 150;

    /// Nominal duration of a match slot, in minutes.
    pub const MATCH_SLOT_MINUTES: i64 = 10;

    /// Nominal duration of a research presentation slot, in minutes.
    pub const PRESENTATION_SLOT_MINUTES: i64 = 30;

    pub const TABLE_COUNT: u8 = 3;
    pub const JURY_COUNT: u8 = 3;
}

/// Planning used until the team schedules are consolidated.
pub mod planning {
    use chrono::NaiveTime;

    /// Phase deadlines: match 1, match 2, match 3, presentation.
    pub const DEFAULT_DEADLINES: [(u32, u32); 4] = [(15, 0), (16, 0), (17, 0), (17, 0)];

    pub const DEFAULT_START_TIME: (u32, u32) = (0, 0);

    pub fn default_deadlines() -> [NaiveTime; 4] {
        DEFAULT_DEADLINES.map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN))
    }

    pub fn default_start_time() -> NaiveTime {
        let (h, m) = DEFAULT_START_TIME;
        NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
    }
}

/// Operator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub edition: Edition,
    /// Directory holding the input and output files
    pub data_dir: PathBuf,
    /// Team roster CSV, relative to `data_dir`
    pub teams_file: String,
    /// Team planning CSV, relative to `data_dir`
    pub planning_file: String,
    /// Persisted tournament JSON, relative to `data_dir`
    pub tournament_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            edition: Edition::default(),
            data_dir: PathBuf::from("."),
            teams_file: "teams.csv".to_string(),
            planning_file: "planning.csv".to_string(),
            tournament_file: "tournament.json".to_string(),
        }
    }
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParseError(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn teams_path(&self) -> PathBuf {
        self.data_dir.join(&self.teams_file)
    }

    pub fn planning_path(&self) -> PathBuf {
        self.data_dir.join(&self.planning_file)
    }

    pub fn tournament_path(&self) -> PathBuf {
        self.data_dir.join(&self.tournament_file)
    }
}
