use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::ranking::{RoundScorePoints, ranking_points, ranking_points_map};
use crate::score::{Score, ScoreKind};
use crate::team::TeamNum;

/// Scores of all the teams for one competition phase.
///
/// A round accepts a single score kind for its whole lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    kind: ScoreKind,
    scores: BTreeMap<TeamNum, Score>,
}

impl Round {
    pub fn new(kind: ScoreKind) -> Self {
        Self {
            kind,
            scores: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> ScoreKind {
        self.kind
    }

    /// Record (or replace) the score of a team.
    pub fn add_team_score(&mut self, team_num: TeamNum, score: Score) -> Result<()> {
        if score.kind() != self.kind {
            return Err(Error::ScoreTypeMismatch {
                expected: self.kind,
                actual: score.kind(),
            });
        }
        self.scores.insert(team_num, score);
        Ok(())
    }

    /// Forget the score of a team, if any.
    pub fn clear_team_score(&mut self, team_num: TeamNum) {
        self.scores.remove(&team_num);
    }

    pub fn clear(&mut self) {
        self.scores.clear();
    }

    pub fn get_team_score(&self, team_num: TeamNum) -> Result<&Score> {
        self.scores.get(&team_num).ok_or_else(|| Error::ScoreNotFound {
            team: team_num,
            phase: self.kind.to_string(),
        })
    }

    pub fn has_score(&self, team_num: TeamNum) -> bool {
        self.scores.contains_key(&team_num)
    }

    pub fn scores(&self) -> &BTreeMap<TeamNum, Score> {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Evaluated points of every recorded team.
    pub fn score_points(&self) -> impl Iterator<Item = (TeamNum, i64)> + '_ {
        self.scores
            .iter()
            .map(|(&team_num, score)| (team_num, score.evaluate()))
    }

    /// Ranking points of the recorded teams, best first.
    pub fn get_ranking_points(&self, team_count: usize) -> Vec<(TeamNum, i64)> {
        ranking_points(self.score_points(), team_count)
    }

    /// Score and ranking points of each team numbered from 1 to `team_count`.
    ///
    /// Teams without a score get `(0, 0)`.
    pub fn get_results(&self, team_count: usize) -> BTreeMap<TeamNum, RoundScorePoints> {
        let team_nums = (1..=team_count as TeamNum).collect::<Vec<_>>();
        self.results_for(&team_nums, team_count)
    }

    /// Score and ranking points of the given teams, ranked among themselves
    /// with ranking points scaled to `team_count`.
    pub fn results_for(
        &self,
        team_nums: &[TeamNum],
        team_count: usize,
    ) -> BTreeMap<TeamNum, RoundScorePoints> {
        let score_points: BTreeMap<TeamNum, i64> = self
            .score_points()
            .filter(|(team_num, _)| team_nums.contains(team_num))
            .collect();
        let ranks = ranking_points_map(score_points.iter().map(|(&t, &p)| (t, p)), team_count);
        team_nums
            .iter()
            .map(|team_num| {
                let points = RoundScorePoints::new(
                    score_points.get(team_num).copied().unwrap_or(0),
                    ranks.get(team_num).copied().unwrap_or(0),
                );
                (*team_num, points)
            })
            .collect()
    }

    /// Teams which have a score for this round, sorted by number.
    pub fn get_completed_teams(&self) -> Vec<TeamNum> {
        self.scores.keys().copied().collect()
    }
}
