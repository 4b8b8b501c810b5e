use thiserror::Error;

use crate::score::ScoreKind;
use crate::team::TeamNum;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unrecognized scholar level: {0}")]
    InvalidScholarLevel(String),

    #[error("Invalid planning: {0}")]
    InvalidPlanning(String),

    #[error("Invalid time (expected HH:MM): {0}")]
    InvalidTime(String),

    #[error("Invalid team number: {0}")]
    InvalidTeamNumber(String),

    #[error("Invalid roster row {line}: {message}")]
    InvalidRosterRow { line: u64, message: String },

    #[error("Team {0} already registered")]
    DuplicatedTeam(TeamNum),

    #[error("Team {0} not found")]
    TeamNotFound(TeamNum),

    #[error("Invalid robotics round number: {0}")]
    InvalidRoundNumber(usize),

    #[error("No {phase} score for team {team}")]
    ScoreNotFound { team: TeamNum, phase: String },

    #[error("Score type mismatch: expected {expected}, got {actual}")]
    ScoreTypeMismatch {
        expected: ScoreKind,
        actual: ScoreKind,
    },

    #[error("Edition mismatch: expected {expected}, got {actual}")]
    EditionMismatch { expected: String, actual: String },

    #[error("Robotics round count mismatch: expected {expected}, got {actual}")]
    RoundCountMismatch { expected: usize, actual: usize },

    #[error("Invalid score data for {kind}: {message}")]
    InvalidScoreData { kind: ScoreKind, message: String },

    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
