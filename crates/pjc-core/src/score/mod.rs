//! Score model of the competition phases.
//!
//! This module contains the scores recorded for each phase:
//! - `RoboticsScore` - match time and counted actions, rules depending on the `Edition`
//! - `ResearchEvaluationScore` - research work marks given by the jury
//! - `JuryEvaluationScore` - overall team evaluation given by the jury
//!
//! `Score` gathers them as a closed set of variants tagged by `ScoreKind`.

mod edition;
mod evaluation;
mod robotics;

pub use edition::*;
pub use evaluation::*;
pub use robotics::*;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Concrete score type accepted by a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreKind {
    Robotics(RoboticsKind),
    Research,
    Jury,
}

impl ScoreKind {
    /// Names of the score items, in display order.
    pub fn item_names(&self) -> Vec<&'static str> {
        match self {
            Self::Robotics(kind) => {
                let mut names = vec!["total_time"];
                names.extend_from_slice(kind.action_items());
                names
            }
            Self::Research => vec!["shown", "topic", "research", "presentation", "poster"],
            Self::Jury => vec!["evaluation"],
        }
    }
}

impl std::fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Robotics(kind) => write!(f, "robotics ({})", kind),
            Self::Research => write!(f, "research evaluation"),
            Self::Jury => write!(f, "jury evaluation"),
        }
    }
}

/// Value of a single score item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ItemValue {
    Int(i64),
    Bool(bool),
}

impl From<u32> for ItemValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for ItemValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<ItemValue> for Value {
    fn from(value: ItemValue) -> Self {
        match value {
            ItemValue::Int(v) => Value::from(v),
            ItemValue::Bool(v) => Value::from(v),
        }
    }
}

impl std::fmt::Display for ItemValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    Robotics(RoboticsScore),
    Research(ResearchEvaluationScore),
    Jury(JuryEvaluationScore),
}

impl Score {
    pub fn kind(&self) -> ScoreKind {
        match self {
            Self::Robotics(score) => ScoreKind::Robotics(score.kind()),
            Self::Research(_) => ScoreKind::Research,
            Self::Jury(_) => ScoreKind::Jury,
        }
    }

    /// Point count of the score. Never cached: always computed from the stored items.
    pub fn evaluate(&self) -> i64 {
        match self {
            Self::Robotics(score) => score.evaluate(),
            Self::Research(score) => score.evaluate(),
            Self::Jury(score) => score.evaluate(),
        }
    }

    pub fn items(&self) -> Vec<(&'static str, ItemValue)> {
        match self {
            Self::Robotics(score) => score.items(),
            Self::Research(score) => score.items(),
            Self::Jury(score) => score.items(),
        }
    }

    /// Items as a field dictionary, the persisted form of the score.
    pub fn to_fields(&self) -> Map<String, Value> {
        self.items()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.into()))
            .collect()
    }

    /// Rebuild a score of the given kind from its field dictionary.
    ///
    /// The kind is never guessed from the field names: fields foreign to the
    /// kind are rejected, missing ones default to zero.
    pub fn from_fields(kind: ScoreKind, fields: &Map<String, Value>) -> Result<Self> {
        Ok(match kind {
            ScoreKind::Robotics(robotics_kind) => {
                Self::Robotics(RoboticsScore::from_fields(robotics_kind, fields)?)
            }
            ScoreKind::Research => Self::Research(decode_fields(kind, Value::Object(fields.clone()))?),
            ScoreKind::Jury => Self::Jury(decode_fields(kind, Value::Object(fields.clone()))?),
        })
    }

    pub fn as_robotics(&self) -> Option<&RoboticsScore> {
        match self {
            Self::Robotics(score) => Some(score),
            _ => None,
        }
    }

    pub fn as_research(&self) -> Option<&ResearchEvaluationScore> {
        match self {
            Self::Research(score) => Some(score),
            _ => None,
        }
    }

    pub fn as_jury(&self) -> Option<&JuryEvaluationScore> {
        match self {
            Self::Jury(score) => Some(score),
            _ => None,
        }
    }
}

impl From<RoboticsScore> for Score {
    fn from(score: RoboticsScore) -> Self {
        Self::Robotics(score)
    }
}

impl From<ResearchEvaluationScore> for Score {
    fn from(score: ResearchEvaluationScore) -> Self {
        Self::Research(score)
    }
}

impl From<JuryEvaluationScore> for Score {
    fn from(score: JuryEvaluationScore) -> Self {
        Self::Jury(score)
    }
}

pub(crate) fn decode_fields<T: DeserializeOwned>(kind: ScoreKind, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::InvalidScoreData {
        kind,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_round_trip() {
        let score = Score::from(RoboticsScore::new(
            121,
            RoboticsActions::Y2014Round2(Channels {
                alignments: 3,
                dockings: 2,
                hits: 1,
                channels_ok: 1,
                channels_wrong: 2,
            }),
        ));
        let fields = score.to_fields();
        assert_eq!(fields["total_time"], Value::from(121));
        assert_eq!(fields["channels_wrong"], Value::from(2));

        let decoded = Score::from_fields(score.kind(), &fields).unwrap();
        assert_eq!(decoded, score);
    }

    #[test]
    fn test_research_fields_keep_marks_when_not_shown() {
        let score = Score::from(ResearchEvaluationScore {
            shown: false,
            topic: 4,
            ..Default::default()
        });
        let decoded = Score::from_fields(ScoreKind::Research, &score.to_fields()).unwrap();
        assert_eq!(decoded, score);
        assert_eq!(decoded.evaluate(), 0);
    }

    #[test]
    fn test_from_fields_rejects_wrong_type() {
        let fields = serde_json::json!({"evaluation": "good"});
        let result = Score::from_fields(ScoreKind::Jury, fields.as_object().unwrap());
        assert!(matches!(result, Err(Error::InvalidScoreData { .. })));
    }

    #[test]
    fn test_item_names_match_items() {
        let score = Score::from(ResearchEvaluationScore::new(1, 2, 3, 4));
        let names: Vec<_> = score.items().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, score.kind().item_names());
    }
}
