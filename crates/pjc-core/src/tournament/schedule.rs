use chrono::NaiveTime;
use tracing::{info, warn};

use crate::planning::{self, PlanningConsolidation, TeamPlanning, format_hhmm};

use super::Tournament;

impl Tournament {
    /// Plannings of the teams which have one, in team number order.
    pub fn team_plannings(&self, present_only: bool) -> impl Iterator<Item = &TeamPlanning> + '_ {
        self.teams(present_only)
            .filter_map(|team| team.planning.as_ref())
    }

    /// Derive the phase deadlines and the event start time from the team plannings.
    ///
    /// A phase deadline is the latest start of its slot advanced by the slot
    /// duration, which is when every team is expected to be done with it.
    /// The planning is left untouched when no team has one.
    pub fn consolidate_planning(&mut self, present_only: bool) -> Option<PlanningConsolidation> {
        let Some(consolidation) = planning::consolidate(self.team_plannings(present_only)) else {
            warn!("No team planning to consolidate");
            return None;
        };
        self.planning = consolidation.deadlines();
        self.start_time = consolidation.earliest_start;

        let deadlines: Vec<String> = self.planning.iter().map(|&t| format_hhmm(t)).collect();
        info!(
            "Planning consolidated: start at {}, deadlines {}",
            format_hhmm(self.start_time),
            deadlines.join(", ")
        );
        Some(consolidation)
    }

    /// Round-robin table and jury assignment, in team number order.
    pub fn assign_tables_and_juries(&mut self, present_only: bool) {
        let plannings = self
            .teams
            .values_mut()
            .filter(|team| !present_only || team.present)
            .filter_map(|team| team.planning.as_mut());
        planning::assign_tables_and_juries(plannings);
        info!(
            "Tables and juries assigned to {} teams",
            self.team_plannings(present_only).count()
        );
    }

    /// Bounds of the event: start time and latest phase deadline.
    pub fn get_planning_time_span(&self) -> (NaiveTime, NaiveTime) {
        let end = self
            .planning
            .iter()
            .copied()
            .max()
            .unwrap_or(self.start_time);
        (self.start_time, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Edition;
    use crate::team::{ScholarLevel, Team, TeamNum};

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn team(num: TeamNum, times: [NaiveTime; 4], present: bool) -> Team {
        Team::new(num, format!("Team {num}"), ScholarLevel::Cm1, "Nice", "06")
            .unwrap()
            .with_planning(TeamPlanning::new(&times).unwrap())
            .present(present)
    }

    #[test]
    fn test_consolidate_planning_uses_present_teams() {
        let mut tournament = Tournament::new(Edition::Y2016);
        tournament
            .add_team(team(1, [hm(9, 0), hm(10, 0), hm(11, 0), hm(14, 0)], true))
            .unwrap();
        tournament
            .add_team(team(2, [hm(9, 30), hm(10, 20), hm(11, 40), hm(13, 0)], true))
            .unwrap();
        tournament
            .add_team(team(3, [hm(8, 0), hm(12, 0), hm(13, 0), hm(16, 0)], false))
            .unwrap();

        let consolidation = tournament.consolidate_planning(true).unwrap();
        assert_eq!(consolidation.earliest_start, hm(9, 0));
        assert_eq!(
            tournament.planning(),
            [hm(9, 40), hm(10, 30), hm(11, 50), hm(14, 30)]
        );
        assert_eq!(tournament.start_time(), hm(9, 0));
        assert_eq!(tournament.get_planning_time_span(), (hm(9, 0), hm(14, 30)));
    }

    #[test]
    fn test_consolidate_without_plannings_keeps_defaults() {
        let mut tournament = Tournament::new(Edition::Y2016);
        let before = tournament.planning();
        assert!(tournament.consolidate_planning(true).is_none());
        assert_eq!(tournament.planning(), before);
        assert_eq!(tournament.get_planning_time_span(), (hm(0, 0), hm(17, 0)));
    }

    #[test]
    fn test_assign_skips_absent_teams() {
        let mut tournament = Tournament::new(Edition::Y2016);
        let times = [hm(9, 0), hm(10, 0), hm(11, 0), hm(14, 0)];
        for num in 1..=4 {
            tournament.add_team(team(num, times, num != 2)).unwrap();
        }
        tournament.assign_tables_and_juries(true);

        let planning = |num| tournament.get_team(num).unwrap().planning.unwrap();
        assert_eq!(planning(2).matches()[0].table, None);
        assert_eq!(planning(2).presentation().jury, None);
        assert_eq!(planning(1).matches()[0].table, Some(1));
        assert_eq!(planning(3).matches()[0].table, Some(2));
        assert_eq!(planning(4).matches()[0].table, Some(3));
        assert_eq!(planning(4).presentation().jury, Some(3));

        tournament.assign_tables_and_juries(false);
        let planning = |num| tournament.get_team(num).unwrap().planning.unwrap();
        assert_eq!(planning(2).matches()[0].table, Some(2));
        assert_eq!(planning(4).matches()[0].table, Some(1));
    }

    #[test]
    fn test_consolidate_all_teams() {
        let mut tournament = Tournament::new(Edition::Y2016);
        tournament
            .add_team(team(1, [hm(9, 0), hm(10, 0), hm(11, 0), hm(14, 0)], false))
            .unwrap();
        assert!(tournament.consolidate_planning(true).is_none());
        assert!(tournament.consolidate_planning(false).is_some());
        assert_eq!(tournament.start_time(), hm(9, 0));
    }
}
