//! Team schedules and their consolidation into the event planning.
//!
//! Each team has 3 match slots, played on an assigned table, and 1 research
//! presentation slot, given in front of an assigned jury.

use chrono::{NaiveTime, TimeDelta};
use tracing::debug;

use crate::config::timing::{
    JURY_COUNT, MATCH_SLOT_MINUTES, PRESENTATION_SLOT_MINUTES, TABLE_COUNT,
};
use crate::error::{Error, Result};

pub const MATCH_COUNT: usize = 3;
pub const SLOT_COUNT: usize = MATCH_COUNT + 1;

/// Index of the presentation slot, always the last one.
pub const PRESENTATION_SLOT: usize = MATCH_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSlot {
    pub time: NaiveTime,
    /// Table number, starting at 1
    pub table: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationSlot {
    pub time: NaiveTime,
    /// Jury number, starting at 1
    pub jury: Option<u8>,
}

/// Nominal duration of a planning slot. Only used to compute schedule extents.
pub fn slot_duration(index: usize) -> TimeDelta {
    if index < MATCH_COUNT {
        TimeDelta::minutes(MATCH_SLOT_MINUTES)
    } else {
        TimeDelta::minutes(PRESENTATION_SLOT_MINUTES)
    }
}

/// Last second of the day: slot ends never wrap past midnight.
fn end_of_day() -> NaiveTime {
    NaiveTime::MIN - TimeDelta::seconds(1)
}

/// Start time advanced by the duration of the slot, clamped to the end of the day.
pub fn slot_end(index: usize, start: NaiveTime) -> NaiveTime {
    match start.overflowing_add_signed(slot_duration(index)) {
        (end, 0) => end,
        _ => end_of_day(),
    }
}

fn check_number(what: &str, num: Option<u8>, count: u8) -> Result<Option<u8>> {
    match num {
        Some(n) if !(1..=count).contains(&n) => Err(Error::InvalidPlanning(format!(
            "{} {} out of range 1..={}",
            what, n, count
        ))),
        _ => Ok(num),
    }
}

pub fn parse_hhmm(text: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M").map_err(|_| Error::InvalidTime(text.to_string()))
}

pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamPlanning {
    matches: [MatchSlot; MATCH_COUNT],
    presentation: PresentationSlot,
}

impl TeamPlanning {
    /// Build a planning from its 4 slot start times, the last one being the presentation.
    pub fn new(times: &[NaiveTime]) -> Result<Self> {
        let slots: Vec<_> = times.iter().map(|&time| (time, None)).collect();
        Self::from_assignments(&slots)
    }

    /// Build a planning from 4 (start time, table or jury) pairs.
    ///
    /// Table and jury numbers start at 1 and are bounded by the table and jury counts.
    pub fn from_assignments(slots: &[(NaiveTime, Option<u8>)]) -> Result<Self> {
        let [m1, m2, m3, presentation] = slots else {
            return Err(Error::InvalidPlanning(format!(
                "expected {} slots, got {}",
                SLOT_COUNT,
                slots.len()
            )));
        };
        let slot = |&(time, table): &(NaiveTime, Option<u8>)| -> Result<MatchSlot> {
            Ok(MatchSlot {
                time,
                table: check_number("table", table, TABLE_COUNT)?,
            })
        };
        Ok(Self {
            matches: [slot(m1)?, slot(m2)?, slot(m3)?],
            presentation: PresentationSlot {
                time: presentation.0,
                jury: check_number("jury", presentation.1, JURY_COUNT)?,
            },
        })
    }

    pub fn matches(&self) -> &[MatchSlot; MATCH_COUNT] {
        &self.matches
    }

    pub fn presentation(&self) -> &PresentationSlot {
        &self.presentation
    }

    pub fn set_table(&mut self, match_index: usize, table: Option<u8>) -> Result<()> {
        let slot = self.matches.get_mut(match_index).ok_or_else(|| {
            Error::InvalidPlanning(format!("no match slot {}", match_index + 1))
        })?;
        slot.table = check_number("table", table, TABLE_COUNT)?;
        Ok(())
    }

    pub fn set_jury(&mut self, jury: Option<u8>) -> Result<()> {
        self.presentation.jury = check_number("jury", jury, JURY_COUNT)?;
        Ok(())
    }

    /// Start times of the slots, in slot order.
    pub fn times(&self) -> [NaiveTime; SLOT_COUNT] {
        let [m1, m2, m3] = self.matches;
        [m1.time, m2.time, m3.time, self.presentation.time]
    }

    /// (start time, table or jury) of the slots, in slot order.
    pub fn assignments(&self) -> [(NaiveTime, Option<u8>); SLOT_COUNT] {
        let [m1, m2, m3] = self.matches;
        [
            (m1.time, m1.table),
            (m2.time, m2.table),
            (m3.time, m3.table),
            (self.presentation.time, self.presentation.jury),
        ]
    }

    pub fn slot_time(&self, index: usize) -> Option<NaiveTime> {
        self.times().get(index).copied()
    }

    /// Earliest slot start and latest slot end of the team day.
    pub fn extent(&self) -> (NaiveTime, NaiveTime) {
        let times = self.times();
        let start = times.iter().copied().min().unwrap_or(NaiveTime::MIN);
        let end = times
            .iter()
            .enumerate()
            .map(|(index, &time)| slot_end(index, time))
            .max()
            .unwrap_or(NaiveTime::MIN);
        (start, end)
    }
}

impl std::fmt::Display for TeamPlanning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let times: Vec<String> = self.times().iter().map(|&t| format_hhmm(t)).collect();
        write!(f, "({})", times.join(", "))
    }
}

/// Aggregated slot times of all the teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanningConsolidation {
    /// Latest start time of each slot across teams
    pub latest_starts: [NaiveTime; SLOT_COUNT],
    /// Earliest start time of any slot across teams
    pub earliest_start: NaiveTime,
}

impl PlanningConsolidation {
    /// Time at which every team has completed each slot.
    pub fn deadlines(&self) -> [NaiveTime; SLOT_COUNT] {
        let mut deadlines = self.latest_starts;
        for (index, deadline) in deadlines.iter_mut().enumerate() {
            *deadline = slot_end(index, *deadline);
        }
        deadlines
    }
}

/// Per slot latest start time and overall earliest start time.
///
/// Returns `None` when there is no planning to consolidate.
pub fn consolidate<'a, I>(plannings: I) -> Option<PlanningConsolidation>
where
    I: IntoIterator<Item = &'a TeamPlanning>,
{
    let mut result: Option<PlanningConsolidation> = None;
    for planning in plannings {
        let times = planning.times();
        let consolidation = result.get_or_insert(PlanningConsolidation {
            latest_starts: times,
            earliest_start: times[0],
        });
        for (latest, time) in consolidation.latest_starts.iter_mut().zip(times) {
            if time > *latest {
                *latest = time;
            }
            if time < consolidation.earliest_start {
                consolidation.earliest_start = time;
            }
        }
    }
    result
}

/// Round-robin assignment of tables to matches and of juries to presentations.
///
/// The starting table shifts by one at each match, so that a team plays its
/// matches on different tables.
pub fn assign_tables_and_juries<'a, I>(plannings: I)
where
    I: IntoIterator<Item = &'a mut TeamPlanning>,
{
    let mut plannings: Vec<&mut TeamPlanning> = plannings.into_iter().collect();

    let mut start_table = 0;
    for match_index in 0..MATCH_COUNT {
        let mut table = start_table;
        for planning in plannings.iter_mut() {
            // human friendly numbers start at 1
            planning.matches[match_index].table = Some(table + 1);
            table = (table + 1) % TABLE_COUNT;
        }
        start_table = (start_table + 1) % TABLE_COUNT;
    }

    let mut jury = 0;
    for planning in plannings.iter_mut() {
        planning.presentation.jury = Some(jury + 1);
        jury = (jury + 1) % JURY_COUNT;
    }
    debug!("Assigned tables and juries for {} plannings", plannings.len());
}
