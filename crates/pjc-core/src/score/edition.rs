use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::score::RoboticsKind;

/// Competition edition, selecting the robotics rules of each round.
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
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum Edition {
    #[serde(rename = "2014")]
    #[strum(serialize = "2014")]
    Y2014,
    #[serde(rename = "2015")]
    #[strum(serialize = "2015")]
    Y2015,
    #[default]
    #[serde(rename = "2016")]
    #[strum(serialize = "2016")]
    Y2016,
}

impl Edition {
    /// Robotics score kinds, in round sequence.
    pub fn robotics_kinds(&self) -> &'static [RoboticsKind] {
        match self {
            Self::Y2014 => &[
                RoboticsKind::Y2014Round1,
                RoboticsKind::Y2014Round2,
                RoboticsKind::Y2014Round3,
            ],
            Self::Y2015 => &[
                RoboticsKind::Y2015Round1,
                RoboticsKind::Y2015Round2,
                RoboticsKind::Y2015Round3,
            ],
            Self::Y2016 => &[
                RoboticsKind::Y2016Round1,
                RoboticsKind::Y2016Round2,
                RoboticsKind::Y2016Round3,
            ],
        }
    }

    pub fn round_count(&self) -> usize {
        self.robotics_kinds().len()
    }

    pub fn year(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Edition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_year() {
        assert_eq!("2014".parse::<Edition>().unwrap(), Edition::Y2014);
        assert_eq!("2016".parse::<Edition>().unwrap(), Edition::Y2016);
        assert!("1999".parse::<Edition>().is_err());
    }

    #[test]
    fn test_every_edition_has_three_rounds() {
        for edition in Edition::iter() {
            assert_eq!(edition.round_count(), 3);
        }
    }

    #[test]
    fn test_serde_uses_year() {
        assert_eq!(serde_json::to_string(&Edition::Y2015).unwrap(), "\"2015\"");
    }
}
