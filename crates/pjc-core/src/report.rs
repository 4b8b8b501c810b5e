//! Console output formatting with colored display

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::error::Result;
use crate::planning::format_hhmm;
use crate::team::{Team, TeamNum};
use crate::tournament::{PhaseStatus, TeamProgress, Tournament};

const BORDER_WIDTH: usize = 60;

fn border() -> String {
    "━".repeat(BORDER_WIDTH).dimmed().to_string()
}

/// Format the final ranking with the total breakdown of each team.
pub fn format_final_ranking(tournament: &Tournament) -> String {
    let mut output = String::new();
    let scores = tournament.get_final_scores();
    let ranking = tournament.get_final_ranking();

    let _ = writeln!(output, "{}", border());
    let _ = writeln!(
        output,
        "  {} ({} competing teams)",
        "FINAL RANKING".bold(),
        scores.len()
    );
    let _ = writeln!(output, "{}", border());
    if ranking.is_empty() {
        let _ = writeln!(output, "  {}", "no competing team yet".dimmed());
    }
    let _ = writeln!(
        output,
        "  {:>4}  {:<28} {:>4} {:>4} {:>4} {:>4} {:>5}",
        "RANK", "TEAM", "ROB", "RES", "JURY", "BON", "TOTAL"
    );
    for (rank, team_nums) in &ranking {
        for team_num in team_nums {
            let Some(score) = scores.iter().find(|s| s.team_num == *team_num) else {
                continue;
            };
            let name = tournament
                .get_team(*team_num)
                .map(|team| team.to_string())
                .unwrap_or_else(|_| team_num.to_string());
            let _ = writeln!(
                output,
                "  {}  {:<28} {:>4} {:>4} {:>4} {:>4} {:>5}",
                format_colored_rank(*rank, 4),
                truncate(&name, 28),
                score.robotics.rank,
                score.research.rank,
                score.jury.rank,
                score.bonus,
                score.total().bold()
            );
        }
    }
    let _ = write!(output, "{}", border());
    output
}

/// Format the phase progress table, with the phase deadlines as header.
pub fn format_progress(tournament: &Tournament, progress: &[TeamProgress]) -> String {
    let mut output = String::new();
    let deadlines: Vec<String> = tournament
        .planning()
        .iter()
        .map(|&t| format_hhmm(t))
        .collect();

    let _ = writeln!(output, "{}", border());
    let _ = writeln!(output, "  {}", "PROGRESS".bold());
    let _ = writeln!(output, "{}", border());
    let _ = writeln!(
        output,
        "  {:<32} {}",
        "TEAM",
        deadlines
            .iter()
            .map(|d| format!("{:^9}", d))
            .collect::<Vec<_>>()
            .join("")
    );
    for team in progress {
        let statuses: String = team
            .robotics
            .iter()
            .chain(std::iter::once(&team.research))
            .map(|status| format_colored_status(*status, 9))
            .collect();
        let name = format!("{} - {}", team.team_num, team.team_name);
        let _ = writeln!(output, "  {:<32} {}", truncate(&name, 32), statuses);
    }
    let _ = write!(output, "{}", border());
    output
}

/// Format the schedule of the present teams, or of a single team.
pub fn format_schedule(tournament: &Tournament, team_num: Option<TeamNum>) -> Result<String> {
    let teams: Vec<&Team> = match team_num {
        Some(num) => vec![tournament.get_team(num)?],
        None => tournament.teams(true).collect(),
    };

    let mut output = String::new();
    let (start, end) = tournament.get_planning_time_span();
    let _ = writeln!(output, "{}", border());
    let _ = writeln!(
        output,
        "  {} {} → {}",
        "SCHEDULE".bold(),
        format_hhmm(start),
        format_hhmm(end)
    );
    let _ = writeln!(output, "{}", border());
    for team in teams {
        let _ = writeln!(output, "  {}", team.to_string().bold());
        let Some(planning) = &team.planning else {
            let _ = writeln!(output, "    {}", "no planning".dimmed());
            continue;
        };
        for (index, slot) in planning.matches().iter().enumerate() {
            let _ = writeln!(
                output,
                "    {}  match {}  table {}",
                format_hhmm(slot.time).cyan(),
                index + 1,
                format_assignment(slot.table)
            );
        }
        let presentation = planning.presentation();
        let _ = writeln!(
            output,
            "    {}  research presentation  jury {}",
            format_hhmm(presentation.time).cyan(),
            format_assignment(presentation.jury)
        );
    }
    let _ = write!(output, "{}", border());
    Ok(output)
}

fn format_assignment(num: Option<u8>) -> String {
    match num {
        Some(num) => num.to_string(),
        None => "-".dimmed().to_string(),
    }
}

/// Podium ranks in gold, silver and bronze, right aligned on `width` columns
fn format_colored_rank(rank: usize, width: usize) -> String {
    let text = format!("{:>width$}", rank);
    match rank {
        1 => text.truecolor(255, 200, 0).bold().to_string(),
        2 => text.truecolor(192, 192, 192).bold().to_string(),
        3 => text.truecolor(205, 127, 50).bold().to_string(),
        _ => text,
    }
}

/// Centered on `width` columns before coloring, escape codes having no width
fn format_colored_status(status: PhaseStatus, width: usize) -> String {
    let text = format!("{:^width$}", status.to_string());
    match status {
        PhaseStatus::Done => text.green().to_string(),
        PhaseStatus::NotDone => text.dimmed().to_string(),
        PhaseStatus::Late => text.red().bold().to_string(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(width.saturating_sub(1)).collect();
        truncated.push('…');
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::TeamPlanning;
    use crate::score::{Edition, JuryEvaluationScore, ResearchEvaluationScore};
    use crate::team::ScholarLevel;
    use chrono::NaiveTime;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn tournament() -> Tournament {
        let mut tournament = Tournament::new(Edition::Y2016);
        let planning = TeamPlanning::new(&[hm(9, 0), hm(10, 0), hm(11, 0), hm(14, 0)]).unwrap();
        let team = Team::new(1, "Les Castors", ScholarLevel::Cm1, "Grasse", "06")
            .unwrap()
            .with_planning(planning)
            .present(true);
        tournament.add_team(team).unwrap();
        tournament
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Les Castors de Grasse", 8), "Les Cas…");
    }

    #[test]
    fn test_colored_cells_are_padded_before_coloring() {
        assert_eq!(format_colored_rank(12, 4), "  12");
        let podium = format_colored_rank(1, 4);
        assert!(podium.contains("   1"));
        assert!(podium.len() > 4);

        let late = format_colored_status(PhaseStatus::Late, 9);
        assert!(late.contains("  late   "));
        let not_done = format_colored_status(PhaseStatus::NotDone, 9);
        assert!(not_done.contains("not done "));
    }

    #[test]
    fn test_format_schedule() {
        let output = format_schedule(&tournament(), Some(1)).unwrap();
        assert!(output.contains("1 - Les Castors"));
        assert!(output.contains("match 3"));
        assert!(output.contains("research presentation"));
        assert!(format_schedule(&tournament(), Some(5)).is_err());
    }

    #[test]
    fn test_format_final_ranking_empty() {
        let output = format_final_ranking(&tournament());
        assert!(output.contains("0 competing teams"));
    }

    #[test]
    fn test_format_progress_lists_teams() {
        let mut tournament = tournament();
        tournament
            .set_research_evaluation(1, ResearchEvaluationScore::not_shown())
            .unwrap();
        tournament
            .set_jury_evaluation(1, JuryEvaluationScore::new(10))
            .unwrap();
        let progress = tournament.get_progress(hm(16, 0));
        let output = format_progress(&tournament, &progress);
        assert!(output.contains("1 - Les Castors"));
        assert!(output.contains("late"));
        assert!(output.contains("done"));
    }
}
