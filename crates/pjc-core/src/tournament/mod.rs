//! The tournament aggregate.
//!
//! `Tournament` owns the team roster, the robotics rounds of its edition, the
//! research and jury evaluation rounds and the phase planning. Every mutation
//! goes through its methods and leaves it unchanged when failing.

mod results;
mod schedule;

pub use results::*;

use std::collections::BTreeMap;

use chrono::NaiveTime;
use tracing::{debug, info};

use crate::config::planning::{default_deadlines, default_start_time};
use crate::error::{Error, Result};
use crate::planning::{SLOT_COUNT, TeamPlanning};
use crate::round::Round;
use crate::score::{
    Edition, JuryEvaluationScore, ResearchEvaluationScore, RoboticsScore, Score, ScoreKind,
};
use crate::team::{Team, TeamNum};

#[derive(Debug, Clone, PartialEq)]
pub struct Tournament {
    edition: Edition,
    teams: BTreeMap<TeamNum, Team>,
    robotics_rounds: Vec<Round>,
    research_evaluations: Round,
    jury_evaluations: Round,
    /// Phase deadlines: match 1, match 2, match 3, presentation
    planning: [NaiveTime; SLOT_COUNT],
    start_time: NaiveTime,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new(Edition::default())
    }
}

impl Tournament {
    pub fn new(edition: Edition) -> Self {
        Self {
            edition,
            teams: BTreeMap::new(),
            robotics_rounds: Self::make_robotics_rounds(edition),
            research_evaluations: Round::new(ScoreKind::Research),
            jury_evaluations: Round::new(ScoreKind::Jury),
            planning: default_deadlines(),
            start_time: default_start_time(),
        }
    }

    fn make_robotics_rounds(edition: Edition) -> Vec<Round> {
        edition
            .robotics_kinds()
            .iter()
            .map(|&kind| Round::new(ScoreKind::Robotics(kind)))
            .collect()
    }

    pub fn edition(&self) -> Edition {
        self.edition
    }

    // Roster

    /// Register a team. Returns the number of registered teams.
    pub fn add_team(&mut self, team: Team) -> Result<usize> {
        if self.teams.contains_key(&team.num()) {
            return Err(Error::DuplicatedTeam(team.num()));
        }
        debug!("Adding team {}", team);
        self.teams.insert(team.num(), team);
        Ok(self.teams.len())
    }

    pub fn get_team(&self, team_num: TeamNum) -> Result<&Team> {
        self.teams
            .get(&team_num)
            .ok_or(Error::TeamNotFound(team_num))
    }

    fn get_team_mut(&mut self, team_num: TeamNum) -> Result<&mut Team> {
        self.teams
            .get_mut(&team_num)
            .ok_or(Error::TeamNotFound(team_num))
    }

    fn check_team(&self, team_num: TeamNum) -> Result<()> {
        self.get_team(team_num).map(|_| ())
    }

    /// Teams sorted by number.
    pub fn teams(&self, present_only: bool) -> impl Iterator<Item = &Team> + '_ {
        self.teams
            .values()
            .filter(move |team| !present_only || team.present)
    }

    pub fn team_nums(&self, present_only: bool) -> Vec<TeamNum> {
        self.teams(present_only).map(Team::num).collect()
    }

    pub fn team_count(&self, present_only: bool) -> usize {
        self.teams(present_only).count()
    }

    /// Register the arrival (or the withdrawal) of a team.
    pub fn set_team_present(&mut self, team_num: TeamNum, present: bool) -> Result<()> {
        let team = self.get_team_mut(team_num)?;
        team.present = present;
        info!(
            "Team {} registered as {}",
            team,
            if present { "present" } else { "absent" }
        );
        Ok(())
    }

    pub fn set_team_planning(
        &mut self,
        team_num: TeamNum,
        planning: Option<TeamPlanning>,
    ) -> Result<()> {
        self.get_team_mut(team_num)?.planning = planning;
        Ok(())
    }

    // Planning

    pub fn planning(&self) -> [NaiveTime; SLOT_COUNT] {
        self.planning
    }

    pub fn set_planning(&mut self, planning: [NaiveTime; SLOT_COUNT]) {
        self.planning = planning;
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn set_start_time(&mut self, start_time: NaiveTime) {
        self.start_time = start_time;
    }

    // Rounds

    pub fn robotics_rounds(&self) -> &[Round] {
        &self.robotics_rounds
    }

    pub fn is_valid_round_num(&self, round_num: usize) -> bool {
        (1..=self.robotics_rounds.len()).contains(&round_num)
    }

    /// Robotics round by its 1-based number.
    pub fn robotics_round(&self, round_num: usize) -> Result<&Round> {
        round_num
            .checked_sub(1)
            .and_then(|index| self.robotics_rounds.get(index))
            .ok_or(Error::InvalidRoundNumber(round_num))
    }

    fn robotics_round_mut(&mut self, round_num: usize) -> Result<&mut Round> {
        round_num
            .checked_sub(1)
            .and_then(|index| self.robotics_rounds.get_mut(index))
            .ok_or(Error::InvalidRoundNumber(round_num))
    }

    pub fn research_evaluations(&self) -> &Round {
        &self.research_evaluations
    }

    pub fn jury_evaluations(&self) -> &Round {
        &self.jury_evaluations
    }

    // Score entry

    pub fn set_robotics_score(
        &mut self,
        team_num: TeamNum,
        round_num: usize,
        score: RoboticsScore,
    ) -> Result<()> {
        self.check_team(team_num)?;
        self.robotics_round_mut(round_num)?
            .add_team_score(team_num, score.into())?;
        debug!("Robotics round {} score set for team {}", round_num, team_num);
        Ok(())
    }

    pub fn get_robotics_score(&self, team_num: TeamNum, round_num: usize) -> Result<&RoboticsScore> {
        let round = self.robotics_round(round_num)?;
        let score = round.get_team_score(team_num)?;
        score.as_robotics().ok_or_else(|| mismatch(round, score))
    }

    pub fn clear_robotics_score(&mut self, team_num: TeamNum, round_num: usize) -> Result<()> {
        self.check_team(team_num)?;
        self.robotics_round_mut(round_num)?
            .clear_team_score(team_num);
        debug!("Robotics round {} score cleared for team {}", round_num, team_num);
        Ok(())
    }

    pub fn set_research_evaluation(
        &mut self,
        team_num: TeamNum,
        score: ResearchEvaluationScore,
    ) -> Result<()> {
        self.check_team(team_num)?;
        self.research_evaluations
            .add_team_score(team_num, score.into())?;
        debug!("Research evaluation set for team {}", team_num);
        Ok(())
    }

    pub fn get_research_evaluation(&self, team_num: TeamNum) -> Result<&ResearchEvaluationScore> {
        let score = self.research_evaluations.get_team_score(team_num)?;
        score
            .as_research()
            .ok_or_else(|| mismatch(&self.research_evaluations, score))
    }

    pub fn clear_research_evaluation(&mut self, team_num: TeamNum) -> Result<()> {
        self.check_team(team_num)?;
        self.research_evaluations.clear_team_score(team_num);
        Ok(())
    }

    pub fn set_jury_evaluation(
        &mut self,
        team_num: TeamNum,
        score: JuryEvaluationScore,
    ) -> Result<()> {
        self.check_team(team_num)?;
        self.jury_evaluations
            .add_team_score(team_num, score.into())?;
        debug!("Jury evaluation set for team {}", team_num);
        Ok(())
    }

    pub fn get_jury_evaluation(&self, team_num: TeamNum) -> Result<&JuryEvaluationScore> {
        let score = self.jury_evaluations.get_team_score(team_num)?;
        score
            .as_jury()
            .ok_or_else(|| mismatch(&self.jury_evaluations, score))
    }

    pub fn clear_jury_evaluation(&mut self, team_num: TeamNum) -> Result<()> {
        self.check_team(team_num)?;
        self.jury_evaluations.clear_team_score(team_num);
        Ok(())
    }

    /// Clear every score, keeping the roster, the edition and the planning.
    pub fn reset(&mut self) {
        for round in &mut self.robotics_rounds {
            round.clear();
        }
        self.research_evaluations.clear();
        self.jury_evaluations.clear();
        info!("Tournament scores reset");
    }

    /// Replace the whole state at once. Used when restoring a persisted document.
    pub(crate) fn replace_state(
        &mut self,
        teams: BTreeMap<TeamNum, Team>,
        robotics_rounds: Vec<Round>,
        research_evaluations: Round,
        jury_evaluations: Round,
        planning: [NaiveTime; SLOT_COUNT],
        start_time: NaiveTime,
    ) {
        self.teams = teams;
        self.robotics_rounds = robotics_rounds;
        self.research_evaluations = research_evaluations;
        self.jury_evaluations = jury_evaluations;
        self.planning = planning;
        self.start_time = start_time;
    }

    pub(crate) fn teams_map(&self) -> &BTreeMap<TeamNum, Team> {
        &self.teams
    }
}

fn mismatch(round: &Round, score: &Score) -> Error {
    Error::ScoreTypeMismatch {
        expected: round.kind(),
        actual: score.kind(),
    }
}
