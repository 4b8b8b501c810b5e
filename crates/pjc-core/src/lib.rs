pub mod config;
pub mod error;
pub mod planning;
pub mod ranking;
pub mod report;
pub mod round;
pub mod score;
pub mod storage;
pub mod team;
pub mod tournament;

pub use config::Config;
pub use error::{Error, Result};
pub use planning::{PlanningConsolidation, TeamPlanning};
pub use ranking::RoundScorePoints;
pub use round::Round;
pub use score::{
    Edition, ItemValue, JuryEvaluationScore, ResearchEvaluationScore, RoboticsActions,
    RoboticsKind, RoboticsScore, Score, ScoreKind,
};
pub use storage::TournamentDocument;
pub use team::{ScholarLevel, Team, TeamNum};
pub use tournament::{
    CompiledScore, CompletionStatus, FinalRanking, FinalScore, PhaseStatus, TeamProgress,
    Tournament,
};
