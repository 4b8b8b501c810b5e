//! Cross-phase aggregation: completion status, phase results and final ranking.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use serde::Serialize;
use strum::IntoStaticStr;
use tracing::debug;

use crate::ranking::{RoundScorePoints, group_by_rank, ranking_points, ranking_points_map};
use crate::round::Round;
use crate::team::{Team, TeamNum};

use super::Tournament;

/// Which teams have a score in which phase.
///
/// Every vector is aligned on `team_nums`, which holds all the registered teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionStatus {
    pub team_nums: Vec<TeamNum>,
    /// One vector per robotics round, in round sequence
    pub robotics: Vec<Vec<bool>>,
    pub research: Vec<bool>,
    pub jury: Vec<bool>,
}

impl CompletionStatus {
    /// Robotics completion of the team at `index`, one flag per round.
    pub fn team_robotics(&self, index: usize) -> Vec<bool> {
        self.robotics
            .iter()
            .map(|round| round.get(index).copied().unwrap_or(false))
            .collect()
    }
}

/// Evaluated points of a team in each phase, `None` when not played yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledScore {
    pub robotics: Vec<Option<i64>>,
    pub research: Option<i64>,
    pub jury: Option<i64>,
}

/// Breakdown of the final ranking total of a competing team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinalScore {
    pub team_num: TeamNum,
    pub robotics: RoundScorePoints,
    pub research: RoundScorePoints,
    pub jury: RoundScorePoints,
    pub bonus: i64,
}

impl FinalScore {
    /// Sum of the phase ranking points and of the raw scholar level bonus.
    pub fn total(&self) -> i64 {
        self.robotics.rank + self.research.rank + self.jury.rank + self.bonus
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    #[strum(serialize = "done")]
    Done,
    #[strum(serialize = "not done")]
    NotDone,
    /// Not done while the phase deadline is over
    #[strum(serialize = "late")]
    Late,
}

impl PhaseStatus {
    fn evaluate(done: bool, deadline: Option<NaiveTime>, now: NaiveTime) -> Self {
        match (done, deadline) {
            (true, _) => Self::Done,
            (false, Some(deadline)) if now > deadline => Self::Late,
            _ => Self::NotDone,
        }
    }
}

impl std::fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s: &'static str = self.into();
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamProgress {
    pub team_num: TeamNum,
    pub team_name: String,
    pub robotics: Vec<PhaseStatus>,
    pub research: PhaseStatus,
}

/// Final ranking: rank positions with their teams, best first.
pub type FinalRanking = Vec<(usize, Vec<TeamNum>)>;

impl Tournament {
    pub fn get_completion_status(&self) -> CompletionStatus {
        let team_nums = self.team_nums(false);
        let completion = |round: &Round| -> Vec<bool> {
            team_nums.iter().map(|&num| round.has_score(num)).collect()
        };
        CompletionStatus {
            robotics: self.robotics_rounds.iter().map(completion).collect(),
            research: completion(&self.research_evaluations),
            jury: completion(&self.jury_evaluations),
            team_nums: team_nums.clone(),
        }
    }

    /// Teams having played at least one robotics round and presented their research work.
    ///
    /// A research evaluation entry counts even if the team was marked as not shown.
    pub fn get_competing_teams(&self) -> Vec<TeamNum> {
        let status = self.get_completion_status();
        status
            .team_nums
            .iter()
            .enumerate()
            .filter(|&(index, _)| {
                status.team_robotics(index).into_iter().any(|done| done)
                    && status.research.get(index).copied().unwrap_or(false)
            })
            .map(|(_, &num)| num)
            .collect()
    }

    /// Consolidated robotics results of all the registered teams.
    ///
    /// The score part is the sum of the round ranking points, and the rank part
    /// is the ranking of these sums.
    pub fn get_robotics_results(&self) -> BTreeMap<TeamNum, RoundScorePoints> {
        let team_nums = self.team_nums(false);
        self.robotics_results_for(&team_nums, team_nums.len())
    }

    fn robotics_results_for(
        &self,
        team_nums: &[TeamNum],
        team_count: usize,
    ) -> BTreeMap<TeamNum, RoundScorePoints> {
        let mut total_points: BTreeMap<TeamNum, i64> = BTreeMap::new();
        for round in &self.robotics_rounds {
            for (team_num, points) in round.results_for(team_nums, team_count) {
                if round.has_score(team_num) {
                    *total_points.entry(team_num).or_default() += points.rank;
                }
            }
        }

        let ranks = ranking_points_map(total_points.iter().map(|(&t, &p)| (t, p)), team_count);
        team_nums
            .iter()
            .map(|team_num| {
                let points = RoundScorePoints::new(
                    total_points.get(team_num).copied().unwrap_or(0),
                    ranks.get(team_num).copied().unwrap_or(0),
                );
                (*team_num, points)
            })
            .collect()
    }

    pub fn get_research_evaluation_results(&self) -> BTreeMap<TeamNum, RoundScorePoints> {
        let team_nums = self.team_nums(false);
        self.research_evaluations
            .results_for(&team_nums, team_nums.len())
    }

    pub fn get_jury_evaluation_results(&self) -> BTreeMap<TeamNum, RoundScorePoints> {
        let team_nums = self.team_nums(false);
        self.jury_evaluations.results_for(&team_nums, team_nums.len())
    }

    pub fn get_teams_bonus(&self) -> BTreeMap<TeamNum, i64> {
        self.teams(false)
            .map(|team| (team.num(), team.bonus()))
            .collect()
    }

    /// Evaluated points of every present team in each phase.
    pub fn get_compiled_scores(&self) -> BTreeMap<TeamNum, CompiledScore> {
        let evaluated = |round: &Round, team_num: TeamNum| {
            round.get_team_score(team_num).ok().map(|score| score.evaluate())
        };
        self.teams(true)
            .map(|team| {
                let num = team.num();
                let compiled = CompiledScore {
                    robotics: self
                        .robotics_rounds
                        .iter()
                        .map(|round| evaluated(round, num))
                        .collect(),
                    research: evaluated(&self.research_evaluations, num),
                    jury: evaluated(&self.jury_evaluations, num),
                };
                (num, compiled)
            })
            .collect()
    }

    /// Final ranking total breakdown of the competing teams, by team number.
    ///
    /// Every phase is ranked among the competing teams only, with ranking
    /// points scaled to their count. A phase not played counts as zero.
    pub fn get_final_scores(&self) -> Vec<FinalScore> {
        let competing = self.get_competing_teams();
        let team_count = competing.len();

        let robotics = self.robotics_results_for(&competing, team_count);
        let research = self.research_evaluations.results_for(&competing, team_count);
        let jury = self.jury_evaluations.results_for(&competing, team_count);

        competing
            .iter()
            .map(|&team_num| FinalScore {
                team_num,
                robotics: robotics.get(&team_num).copied().unwrap_or_default(),
                research: research.get(&team_num).copied().unwrap_or_default(),
                jury: jury.get(&team_num).copied().unwrap_or_default(),
                // raw value, not ranked: its weight depends on the team count
                bonus: self.teams.get(&team_num).map(Team::bonus).unwrap_or(0),
            })
            .collect()
    }

    /// Tournament final ranking, grouping ex-aequo teams, best first.
    ///
    /// Only competing teams are ranked.
    pub fn get_final_ranking(&self) -> FinalRanking {
        let scores = self.get_final_scores();
        let ranked = ranking_points(
            scores.iter().map(|score| (score.team_num, score.total())),
            scores.len(),
        );
        let ranking = group_by_rank(&ranked);
        debug!(
            "Final ranking computed for {} competing teams",
            scores.len()
        );
        ranking
    }

    /// Phase status of every present team at the given time of day.
    pub fn get_progress(&self, now: NaiveTime) -> Vec<TeamProgress> {
        let deadline = |index: usize| self.planning.get(index).copied();
        let research_deadline = self.planning.last().copied();
        self.teams(true)
            .map(|team| {
                let num = team.num();
                TeamProgress {
                    team_num: num,
                    team_name: team.name.clone(),
                    robotics: self
                        .robotics_rounds
                        .iter()
                        .enumerate()
                        .map(|(index, round)| {
                            PhaseStatus::evaluate(round.has_score(num), deadline(index), now)
                        })
                        .collect(),
                    research: PhaseStatus::evaluate(
                        self.research_evaluations.has_score(num),
                        research_deadline,
                        now,
                    ),
                }
            })
            .collect()
    }
}
