//! Conversion of scored points into ranking points.
//!
//! Ranking points are the inverse of ranking positions: among `team_count`
//! teams, the first one gets `team_count` points, the second one
//! `team_count - 1`, and so on. Ex-aequo teams share the points of the best
//! placed of them, and the next count skips as many units as there are
//! ex-aequo ("1, 2, 2, 4" competition ranking).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::team::TeamNum;

/// Collated scored points and ranking points of a team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScorePoints {
    pub score: i64,
    pub rank: i64,
}

impl RoundScorePoints {
    pub fn new(score: i64, rank: i64) -> Self {
        Self { score, rank }
    }
}

/// Returns the ranking points of each team, best team first.
///
/// Teams with equal points keep their team number order.
pub fn ranking_points<I>(score_points: I, team_count: usize) -> Vec<(TeamNum, i64)>
where
    I: IntoIterator<Item = (TeamNum, i64)>,
{
    let mut sorted: Vec<(TeamNum, i64)> = score_points.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut rank_points = team_count as i64;
    let mut ex_aequo = 0;
    let mut last_points = None;
    let mut result = Vec::with_capacity(sorted.len());
    for (team_num, points) in sorted {
        if last_points == Some(points) {
            ex_aequo += 1;
        } else {
            last_points = Some(points);
            ex_aequo = 0;
        }
        result.push((team_num, rank_points + ex_aequo));
        rank_points -= 1;
    }
    result
}

/// Same as [`ranking_points`], keyed by team number.
pub fn ranking_points_map<I>(score_points: I, team_count: usize) -> BTreeMap<TeamNum, i64>
where
    I: IntoIterator<Item = (TeamNum, i64)>,
{
    ranking_points(score_points, team_count).into_iter().collect()
}

/// Groups teams by rank position ("1, 2, 2, 4"), best first.
///
/// `ranked` must be sorted by decreasing points.
pub fn group_by_rank(ranked: &[(TeamNum, i64)]) -> Vec<(usize, Vec<TeamNum>)> {
    let mut result: Vec<(usize, Vec<TeamNum>)> = Vec::new();
    let mut last_points = None;
    for (position, &(team_num, points)) in ranked.iter().enumerate() {
        if last_points == Some(points)
            && let Some((_, teams)) = result.last_mut()
        {
            teams.push(team_num);
        } else {
            result.push((position + 1, vec![team_num]));
            last_points = Some(points);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_points() {
        let result = ranking_points(vec![(1, 10), (2, 30), (3, 20)], 3);
        assert_eq!(result, vec![(2, 3), (3, 2), (1, 1)]);
        let total: i64 = result.iter().map(|(_, p)| p).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn test_ties_share_points_and_skip() {
        let result = ranking_points(
            vec![
                (1, 68),
                (2, 58),
                (3, 58),
                (4, 6),
                (5, 98),
                (6, 6),
                (7, 38),
            ],
            7,
        );
        assert_eq!(
            result,
            vec![(5, 7), (1, 6), (2, 5), (3, 5), (7, 3), (4, 2), (6, 2)]
        );
    }

    #[test]
    fn test_two_tie_groups() {
        let points = vec![
            (1, 90),
            (2, 80),
            (3, 80),
            (4, 70),
            (5, 60),
            (6, 60),
            (7, 60),
            (8, 50),
        ];
        let result = ranking_points_map(points, 8);
        assert_eq!(result[&1], 8);
        assert_eq!(result[&2], 7);
        assert_eq!(result[&3], 7);
        assert_eq!(result[&4], 5);
        assert_eq!(result[&5], 4);
        assert_eq!(result[&6], 4);
        assert_eq!(result[&7], 4);
        assert_eq!(result[&8], 1);
    }

    #[test]
    fn test_fewer_entries_than_teams() {
        let result = ranking_points(vec![(4, 12), (2, 15)], 5);
        assert_eq!(result, vec![(2, 5), (4, 4)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(ranking_points(Vec::new(), 4).is_empty());
    }

    #[test]
    fn test_group_by_rank() {
        let ranked = vec![(3, 13), (5, 13), (1, 12), (4, 11)];
        assert_eq!(
            group_by_rank(&ranked),
            vec![(1, vec![3, 5]), (3, vec![1]), (4, vec![4])]
        );
    }
}
