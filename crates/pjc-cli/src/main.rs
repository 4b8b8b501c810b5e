mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command, ScorePhase};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pjc=info,pjc_core=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = commands::load_config(args.config.as_deref())?;

    match args.command {
        Command::Init { force } => commands::init::run(&config, force),
        Command::Arrive { team, absent } => commands::arrive::run(&config, team, !absent),
        Command::Score { phase } => match phase {
            ScorePhase::Robotics {
                team,
                round,
                items,
                clear,
            } => commands::score::run_robotics(&config, team, round, &items, clear),
            ScorePhase::Research { team, items, clear } => {
                commands::score::run_research(&config, team, &items, clear)
            }
            ScorePhase::Jury { team, items, clear } => {
                commands::score::run_jury(&config, team, &items, clear)
            }
        },
        Command::Status { at, json } => commands::status::run(&config, at.as_deref(), json),
        Command::Ranking { json } => commands::ranking::run(&config, json),
        Command::Schedule { team } => commands::schedule::run(&config, team),
    }
}
