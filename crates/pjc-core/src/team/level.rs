use serde::{Deserialize, Serialize};
use strum::{EnumIter, FromRepr, IntoEnumIterator, IntoStaticStr};

use crate::error::{Error, Result};

/// Grade level of a team, from post-secondary (0) to the youngest pupils (9).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    FromRepr,
    IntoStaticStr,
)]
#[repr(u8)]
pub enum ScholarLevel {
    #[strum(serialize = "post-BAC")]
    PostBac = 0,
    #[strum(serialize = "Terminale")]
    Terminale = 1,
    #[strum(serialize = "1ère")]
    Premiere = 2,
    #[strum(serialize = "2nde")]
    Seconde = 3,
    #[strum(serialize = "3ème")]
    Troisieme = 4,
    #[strum(serialize = "4ème")]
    Quatrieme = 5,
    #[strum(serialize = "5ème")]
    Cinquieme = 6,
    #[strum(serialize = "6ème")]
    Sixieme = 7,
    #[strum(serialize = "CM2")]
    Cm2 = 8,
    #[strum(serialize = "CM1")]
    Cm1 = 9,
}

impl ScholarLevel {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn from_code(code: u8) -> Result<Self> {
        Self::from_u8(code).ok_or_else(|| Error::InvalidScholarLevel(code.to_string()))
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        self.into()
    }

    /// Handicap bonus: the younger the pupils, the larger the bonus.
    pub fn bonus_points(&self) -> i64 {
        i64::from(self.code())
    }

    /// Lowercase free-text spellings recognized when importing rosters.
    pub fn spellings(&self) -> &'static [&'static str] {
        match self {
            Self::PostBac => &["post-bac", "fac", "iut", "ing", ">bac"],
            Self::Terminale => &["terminale", "tale", "tle", "t"],
            Self::Premiere => &["première", "1ère", "1ere", "1e"],
            Self::Seconde => &["seconde", "2nde"],
            Self::Troisieme => &["troisième", "3ème", "3eme", "3e"],
            Self::Quatrieme => &["quatrième", "4ème", "4eme", "4e"],
            Self::Cinquieme => &["cinquième", "5ème", "5eme", "5e"],
            Self::Sixieme => &["sixième", "6ème", "6eme", "6e"],
            Self::Cm2 => &["cm2"],
            Self::Cm1 => &["cm1"],
        }
    }

    /// Decode a level from roster text: its numeric code, its label or one of
    /// its spellings, or else a spelling contained in the text.
    ///
    /// Youngest levels are tried first, since short spellings of the older
    /// levels ("t", "1e") also appear inside longer words.
    pub fn decode(text: &str) -> Result<Self> {
        let text = text.trim();
        if let Ok(code) = text.parse::<u8>() {
            return Self::from_code(code);
        }

        let lowered = text.to_lowercase();
        let exact = Self::iter().find(|level| {
            level.label().to_lowercase() == lowered || level.spellings().contains(&lowered.as_str())
        });
        if let Some(level) = exact {
            return Ok(level);
        }

        Self::iter()
            .rev()
            .find(|level| {
                level
                    .spellings()
                    .iter()
                    .any(|spelling| lowered.contains(spelling))
            })
            .ok_or_else(|| Error::InvalidScholarLevel(text.to_string()))
    }
}

impl std::fmt::Display for ScholarLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
