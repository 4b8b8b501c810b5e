//! CLI argument definitions for pjc.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pjc")]
#[command(about = "Junior robotics cup tournament manager", version)]
pub struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", env = "PJC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import the roster and planning sheets and create the tournament file
    Init {
        /// Overwrite an existing tournament file
        #[arg(long)]
        force: bool,
    },
    /// Register the arrival of a team
    Arrive {
        /// Team number
        team: u32,
        /// Register the team as absent instead
        #[arg(long)]
        absent: bool,
    },
    /// Record or clear a team score
    Score {
        #[command(subcommand)]
        phase: ScorePhase,
    },
    /// Show the phase progress of the present teams
    Status {
        /// Time of day to check deadlines against (HH:MM, default: now)
        #[arg(long, value_name = "HH:MM")]
        at: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the final ranking
    Ranking {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the team schedules
    Schedule {
        /// Show a single team
        #[arg(long)]
        team: Option<u32>,
    },
}

#[derive(Subcommand)]
pub enum ScorePhase {
    /// Robotics match score
    Robotics {
        /// Team number
        team: u32,
        /// Round number (1-based)
        round: usize,
        /// Score items as name=value
        items: Vec<String>,
        /// Clear the score instead
        #[arg(long, conflicts_with = "items")]
        clear: bool,
    },
    /// Research work evaluation
    Research {
        /// Team number
        team: u32,
        /// Score items as name=value
        items: Vec<String>,
        /// Clear the score instead
        #[arg(long, conflicts_with = "items")]
        clear: bool,
    },
    /// Jury evaluation
    Jury {
        /// Team number
        team: u32,
        /// Score items as name=value
        items: Vec<String>,
        /// Clear the score instead
        #[arg(long, conflicts_with = "items")]
        clear: bool,
    },
}
