//! Fixed behavioral categories scored for every student.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, EnumString, IntoEnumIterator};

use crate::error::Error;

/// Behavioral category, in the order used for prompts, snapshots and exports.
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
    EnumCount,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum Category {
    #[strum(serialize = "attendance", serialize = "出勤")]
    Attendance,
    #[strum(serialize = "grooming", serialize = "仪容")]
    Grooming,
    #[strum(serialize = "morning_reading", serialize = "晨读")]
    MorningReading,
    #[strum(serialize = "classroom", serialize = "课堂")]
    Classroom,
    #[strum(serialize = "homework", serialize = "作业")]
    Homework,
    #[strum(serialize = "exercises", serialize = "两操")]
    Exercises,
    #[strum(serialize = "midday_rest", serialize = "午休")]
    MiddayRest,
    #[strum(serialize = "self_study", serialize = "自习")]
    SelfStudy,
    #[strum(serialize = "hygiene", serialize = "卫生")]
    Hygiene,
}

impl Category {
    /// All categories in display order.
    pub fn all() -> impl Iterator<Item = Category> {
        Self::iter()
    }

    /// Position of the category in [`Category::all`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Machine key used in snapshots and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Self::Attendance => "attendance",
            Self::Grooming => "grooming",
            Self::MorningReading => "morning_reading",
            Self::Classroom => "classroom",
            Self::Homework => "homework",
            Self::Exercises => "exercises",
            Self::MiddayRest => "midday_rest",
            Self::SelfStudy => "self_study",
            Self::Hygiene => "hygiene",
        }
    }

    /// Column header used in spreadsheets and prompts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Attendance => "Attendance",
            Self::Grooming => "Grooming",
            Self::MorningReading => "Morning Reading",
            Self::Classroom => "Classroom",
            Self::Homework => "Homework",
            Self::Exercises => "Exercises",
            Self::MiddayRest => "Midday Rest",
            Self::SelfStudy => "Self-Study",
            Self::Hygiene => "Hygiene",
        }
    }

    /// Parse a category name, accepting keys and legacy labels.
    pub fn parse(name: &str) -> crate::Result<Self> {
        Self::from_str(name.trim()).map_err(|_| Error::UnknownCategory(name.trim().to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order() {
        let keys: Vec<&str> = Category::all().map(Category::key).collect();
        assert_eq!(
            keys,
            [
                "attendance",
                "grooming",
                "morning_reading",
                "classroom",
                "homework",
                "exercises",
                "midday_rest",
                "self_study",
                "hygiene",
            ]
        );
        assert_eq!(Category::COUNT, 9);
    }

    #[test]
    fn test_index_matches_position() {
        for (position, category) in Category::all().enumerate() {
            assert_eq!(category.index(), position);
        }
    }

    #[test]
    fn test_parse_key_and_legacy_label() {
        assert_eq!(Category::parse("hygiene").unwrap(), Category::Hygiene);
        assert_eq!(Category::parse(" Self_Study ").unwrap(), Category::SelfStudy);
        assert_eq!(Category::parse("晨读").unwrap(), Category::MorningReading);
    }

    #[test]
    fn test_parse_unknown() {
        let err = Category::parse("recess").unwrap_err();
        assert!(matches!(err, Error::UnknownCategory(name) if name == "recess"));
    }
}
