use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{FromRepr, IntoStaticStr};

use crate::config::timing::MATCH_DURATION_SECS;
use crate::error::Result;
use crate::score::{ItemValue, ScoreKind, decode_fields};

/// Robotics round rules, one per edition and round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr)]
pub enum RoboticsKind {
    #[strum(serialize = "2014 round 1")]
    Y2014Round1,
    #[strum(serialize = "2014 round 2")]
    Y2014Round2,
    #[strum(serialize = "2014 round 3")]
    Y2014Round3,
    #[strum(serialize = "2015 round 1")]
    Y2015Round1,
    #[strum(serialize = "2015 round 2")]
    Y2015Round2,
    #[strum(serialize = "2015 round 3")]
    Y2015Round3,
    #[strum(serialize = "2016 round 1")]
    Y2016Round1,
    #[strum(serialize = "2016 round 2")]
    Y2016Round2,
    #[strum(serialize = "2016 round 3")]
    Y2016Round3,
}

impl RoboticsKind {
    /// Action credits meaning the mission is fully completed.
    ///
    /// 2015 round 3 has no fixed objective, so its value can never be reached
    /// and no time bonus is ever granted.
    pub fn max_action_credits(&self) -> i64 {
        match self {
            Self::Y2014Round1 => 10,
            Self::Y2014Round2 => 20,
            Self::Y2014Round3 => 6,
            Self::Y2015Round1 | Self::Y2015Round2 => 12,
            Self::Y2015Round3 => i64::MAX,
            Self::Y2016Round1 => 8,
            Self::Y2016Round2 => 11,
            Self::Y2016Round3 => Placement::MAX_PLACEMENT_POINTS,
        }
    }

    /// Names of the action counters, in display order (`total_time` excluded).
    pub fn action_items(&self) -> &'static [&'static str] {
        match self {
            Self::Y2014Round1 => &["alignments", "dockings", "hits"],
            Self::Y2014Round2 => &[
                "alignments",
                "dockings",
                "hits",
                "channels_ok",
                "channels_wrong",
            ],
            Self::Y2014Round3 => &["buoys_ok", "buoys_wrong"],
            Self::Y2015Round1 | Self::Y2015Round2 => &["sections"],
            Self::Y2015Round3 => &["passengers"],
            Self::Y2016Round1 => &["collected"],
            Self::Y2016Round2 => &["installed", "empty_areas", "homogeneous_areas"],
            Self::Y2016Round3 => &["position", "moved"],
        }
    }

    pub fn label(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for RoboticsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 2014 round 1: buoy/beacon alignments and dockings, penalties for moved buoys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Alignments {
    pub alignments: u32,
    pub dockings: u32,
    pub hits: u32,
}

impl Alignments {
    fn credits(&self) -> i64 {
        i64::from(self.alignments) + i64::from(self.dockings) - i64::from(self.hits)
    }
}

/// 2014 round 2: round 1 actions plus channel selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Channels {
    pub alignments: u32,
    pub dockings: u32,
    pub hits: u32,
    pub channels_ok: u32,
    pub channels_wrong: u32,
}

impl Channels {
    fn credits(&self) -> i64 {
        let base = Alignments {
            alignments: self.alignments,
            dockings: self.dockings,
            hits: self.hits,
        };
        base.credits() + 5 * (i64::from(self.channels_ok) - i64::from(self.channels_wrong))
    }
}

/// 2014 round 3: buoys stored on the right side, penalties for the wrong side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuoyStorage {
    pub buoys_ok: u32,
    pub buoys_wrong: u32,
}

/// 2015 rounds 1 and 2: track sections travelled (3 laps of 4 sections).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Sections {
    pub sections: u32,
}

/// 2015 round 3: passengers transported before the end of the match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Passengers {
    pub passengers: u32,
}

/// 2016 round 1: blocks collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Collection {
    pub collected: u32,
}

/// 2016 round 2: blocks installed in the areas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Installation {
    pub installed: u32,
    pub empty_areas: u32,
    pub homogeneous_areas: u32,
}

impl Installation {
    fn credits(&self) -> i64 {
        // empty areas only count once more than half of the blocks are installed
        let malus = if self.installed > 4 {
            i64::from(self.empty_areas)
        } else {
            0
        };
        i64::from(self.installed) - malus + i64::from(self.homogeneous_areas)
    }
}

/// Final position of the installed block with respect to the line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    FromRepr,
    IntoStaticStr,
)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum BlockPosition {
    #[strum(serialize = "outside")]
    Outside = 0,
    #[strum(serialize = "partly inside")]
    PartlyInside = 1,
    #[default]
    #[strum(serialize = "fully inside")]
    FullyInside = 2,
}

impl BlockPosition {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn placement_points(&self) -> i64 {
        match self {
            Self::Outside => 0,
            Self::PartlyInside => 5,
            Self::FullyInside => 10,
        }
    }
}

impl TryFrom<u8> for BlockPosition {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Self::from_u8(value).ok_or_else(|| format!("invalid block position: {}", value))
    }
}

impl From<BlockPosition> for u8 {
    fn from(position: BlockPosition) -> Self {
        position as u8
    }
}

/// 2016 round 3: block placement, penalties for cable elements moved outside the line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Placement {
    pub position: BlockPosition,
    pub moved: u32,
}

impl Placement {
    const MAX_PLACEMENT_POINTS: i64 = 10;

    fn credits(&self) -> i64 {
        self.position.placement_points() - i64::from(self.moved)
    }
}

/// Counted actions of a robotics match, tagged by the round rules they follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoboticsActions {
    Y2014Round1(Alignments),
    Y2014Round2(Channels),
    Y2014Round3(BuoyStorage),
    Y2015Round1(Sections),
    Y2015Round2(Sections),
    Y2015Round3(Passengers),
    Y2016Round1(Collection),
    Y2016Round2(Installation),
    Y2016Round3(Placement),
}

impl RoboticsActions {
    /// Zeroed counters for a round kind.
    pub fn empty(kind: RoboticsKind) -> Self {
        match kind {
            RoboticsKind::Y2014Round1 => Self::Y2014Round1(Alignments::default()),
            RoboticsKind::Y2014Round2 => Self::Y2014Round2(Channels::default()),
            RoboticsKind::Y2014Round3 => Self::Y2014Round3(BuoyStorage::default()),
            RoboticsKind::Y2015Round1 => Self::Y2015Round1(Sections::default()),
            RoboticsKind::Y2015Round2 => Self::Y2015Round2(Sections::default()),
            RoboticsKind::Y2015Round3 => Self::Y2015Round3(Passengers::default()),
            RoboticsKind::Y2016Round1 => Self::Y2016Round1(Collection::default()),
            RoboticsKind::Y2016Round2 => Self::Y2016Round2(Installation::default()),
            RoboticsKind::Y2016Round3 => Self::Y2016Round3(Placement::default()),
        }
    }

    pub fn kind(&self) -> RoboticsKind {
        match self {
            Self::Y2014Round1(_) => RoboticsKind::Y2014Round1,
            Self::Y2014Round2(_) => RoboticsKind::Y2014Round2,
            Self::Y2014Round3(_) => RoboticsKind::Y2014Round3,
            Self::Y2015Round1(_) => RoboticsKind::Y2015Round1,
            Self::Y2015Round2(_) => RoboticsKind::Y2015Round2,
            Self::Y2015Round3(_) => RoboticsKind::Y2015Round3,
            Self::Y2016Round1(_) => RoboticsKind::Y2016Round1,
            Self::Y2016Round2(_) => RoboticsKind::Y2016Round2,
            Self::Y2016Round3(_) => RoboticsKind::Y2016Round3,
        }
    }

    /// Credits from completed actions minus penalties. May be negative.
    pub fn credits(&self) -> i64 {
        match self {
            Self::Y2014Round1(a) => a.credits(),
            Self::Y2014Round2(a) => a.credits(),
            Self::Y2014Round3(a) => i64::from(a.buoys_ok) - i64::from(a.buoys_wrong),
            Self::Y2015Round1(a) | Self::Y2015Round2(a) => i64::from(a.sections),
            Self::Y2015Round3(a) => i64::from(a.passengers),
            Self::Y2016Round1(a) => i64::from(a.collected),
            Self::Y2016Round2(a) => a.credits(),
            Self::Y2016Round3(a) => a.credits(),
        }
    }

    /// Counter values, in the order given by [`RoboticsKind::action_items`].
    pub fn items(&self) -> Vec<(&'static str, ItemValue)> {
        let values: Vec<ItemValue> = match self {
            Self::Y2014Round1(a) => vec![
                a.alignments.into(),
                a.dockings.into(),
                a.hits.into(),
            ],
            Self::Y2014Round2(a) => vec![
                a.alignments.into(),
                a.dockings.into(),
                a.hits.into(),
                a.channels_ok.into(),
                a.channels_wrong.into(),
            ],
            Self::Y2014Round3(a) => vec![a.buoys_ok.into(), a.buoys_wrong.into()],
            Self::Y2015Round1(a) | Self::Y2015Round2(a) => vec![a.sections.into()],
            Self::Y2015Round3(a) => vec![a.passengers.into()],
            Self::Y2016Round1(a) => vec![a.collected.into()],
            Self::Y2016Round2(a) => vec![
                a.installed.into(),
                a.empty_areas.into(),
                a.homogeneous_areas.into(),
            ],
            Self::Y2016Round3(a) => vec![u32::from(u8::from(a.position)).into(), a.moved.into()],
        };
        self.kind().action_items().iter().copied().zip(values).collect()
    }

    fn decode(kind: RoboticsKind, value: Value) -> Result<Self> {
        let score_kind = ScoreKind::Robotics(kind);
        Ok(match kind {
            RoboticsKind::Y2014Round1 => Self::Y2014Round1(decode_fields(score_kind, value)?),
            RoboticsKind::Y2014Round2 => Self::Y2014Round2(decode_fields(score_kind, value)?),
            RoboticsKind::Y2014Round3 => Self::Y2014Round3(decode_fields(score_kind, value)?),
            RoboticsKind::Y2015Round1 => Self::Y2015Round1(decode_fields(score_kind, value)?),
            RoboticsKind::Y2015Round2 => Self::Y2015Round2(decode_fields(score_kind, value)?),
            RoboticsKind::Y2015Round3 => Self::Y2015Round3(decode_fields(score_kind, value)?),
            RoboticsKind::Y2016Round1 => Self::Y2016Round1(decode_fields(score_kind, value)?),
            RoboticsKind::Y2016Round2 => Self::Y2016Round2(decode_fields(score_kind, value)?),
            RoboticsKind::Y2016Round3 => Self::Y2016Round3(decode_fields(score_kind, value)?),
        })
    }
}

/// Score of one robotics match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoboticsScore {
    /// Final stopwatch value in seconds
    pub total_time: u32,
    pub actions: RoboticsActions,
}

impl RoboticsScore {
    pub fn new(total_time: u32, actions: RoboticsActions) -> Self {
        Self {
            total_time,
            actions,
        }
    }

    pub fn kind(&self) -> RoboticsKind {
        self.actions.kind()
    }

    pub fn max_action_credits(&self) -> i64 {
        self.kind().max_action_credits()
    }

    pub fn evaluate_action_credits(&self) -> i64 {
        self.actions.credits()
    }

    /// Seconds saved on the match duration, granted only when the mission is fulfilled.
    pub fn time_bonus(&self) -> i64 {
        if self.evaluate_action_credits() >= self.max_action_credits()
            && self.total_time < MATCH_DURATION_SECS
        {
            i64::from(MATCH_DURATION_SECS - self.total_time)
        } else {
            0
        }
    }

    pub fn evaluate(&self) -> i64 {
        self.evaluate_action_credits() + self.time_bonus()
    }

    pub fn items(&self) -> Vec<(&'static str, ItemValue)> {
        let mut items = vec![("total_time", self.total_time.into())];
        items.extend(self.actions.items());
        items
    }

    pub(crate) fn from_fields(kind: RoboticsKind, fields: &Map<String, Value>) -> Result<Self> {
        let mut fields = fields.clone();
        let total_time = match fields.remove("total_time") {
            Some(value) => decode_fields(ScoreKind::Robotics(kind), value)?,
            None => 0,
        };
        let actions = RoboticsActions::decode(kind, Value::Object(fields))?;
        Ok(Self::new(total_time, actions))
    }
}
