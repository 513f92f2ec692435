//! Static knowledge about gene symbols that spreadsheets turn into dates.
//!
//! Labels are reduced to a `(month, day)` pair before lookup, so `Sep-03`,
//! `SEPT_3` and `03-Sep` all land on the same entry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SymbolError, SymbolResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    Mar,
    Apr,
    Sep,
    Oct,
    Dec,
}

impl Month {
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_uppercase().as_str() {
            "MAR" => Some(Self::Mar),
            "APR" => Some(Self::Apr),
            "SEP" | "SEPT" => Some(Self::Sep),
            "OCT" => Some(Self::Oct),
            "DEC" => Some(Self::Dec),
            _ => None,
        }
    }
}

/// A date-like label split into its month token (as written) and day number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLabel {
    pub month: Month,
    pub written_month: String,
    pub day: u32,
}

impl DateLabel {
    /// Takes the first alphabetic run as the month and the first digit run as the day.
    pub fn parse(label: &str) -> SymbolResult<Self> {
        let malformed = |reason: &str| SymbolError::MalformedDateLabel {
            label: label.to_string(),
            reason: reason.to_string(),
        };

        let alpha: String = label
            .chars()
            .skip_while(|c| !c.is_ascii_alphabetic())
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        if alpha.is_empty() {
            return Err(malformed("no month token"));
        }
        let month = Month::parse(&alpha).ok_or_else(|| malformed("unrecognised month token"))?;

        let digits: String = label
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            return Err(malformed("no day digits"));
        }
        let day = digits
            .parse::<u32>()
            .map_err(|_| malformed("day number out of range"))?;

        Ok(Self {
            month,
            written_month: alpha,
            day,
        })
    }

    /// `Mon-DD` with the month as written and the day zero-padded to two digits.
    pub fn formatted(&self) -> String {
        format!("{}-{:02}", self.written_month, self.day)
    }

    pub fn family(&self) -> Option<AmbiguousFamily> {
        match (self.month, self.day) {
            (Month::Mar, 1) => Some(AmbiguousFamily::Mar01),
            (Month::Mar, 2) => Some(AmbiguousFamily::Mar02),
            _ => None,
        }
    }
}

/// Unambiguous corrections, valid for the first occurrence of a label.
const UNAMBIGUOUS: &[(Month, u32, &str)] = &[
    (Month::Dec, 1, "DELEC1"),
    (Month::Mar, 3, "MARCHF3"),
    (Month::Mar, 4, "MARCHF4"),
    (Month::Mar, 5, "MARCHF5"),
    (Month::Mar, 6, "MARCHF6"),
    (Month::Mar, 7, "MARCHF7"),
    (Month::Mar, 8, "MARCHF8"),
    (Month::Mar, 9, "MARCHF9"),
    (Month::Mar, 10, "MARCHF10"),
    (Month::Mar, 11, "MARCHF11"),
    (Month::Sep, 1, "SEPTIN1"),
    (Month::Sep, 2, "SEPTIN2"),
    (Month::Sep, 3, "SEPTIN3"),
    (Month::Sep, 4, "SEPTIN4"),
    (Month::Sep, 5, "SEPTIN5"),
    (Month::Sep, 6, "SEPTIN6"),
    (Month::Sep, 7, "SEPTIN7"),
    (Month::Sep, 8, "SEPTIN8"),
    (Month::Sep, 9, "SEPTIN9"),
    (Month::Sep, 10, "SEPTIN10"),
    (Month::Sep, 11, "SEPTIN11"),
    (Month::Sep, 12, "SEPTIN12"),
    (Month::Sep, 13, "SEPTIN7P2"),
    (Month::Sep, 14, "SEPTIN14"),
    (Month::Sep, 15, "SELENOF"),
];

pub fn unambiguous_symbol(month: Month, day: u32) -> Option<&'static str> {
    UNAMBIGUOUS
        .iter()
        .find(|(m, d, _)| *m == month && *d == day)
        .map(|(_, _, s)| *s)
}

/// Symbol pairs that a spreadsheet collapses onto one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguousFamily {
    Mar01,
    Mar02,
}

impl AmbiguousFamily {
    pub fn options(self) -> [FamilyChoice; 2] {
        match self {
            Self::Mar01 => [FamilyChoice::Mtarc1, FamilyChoice::Marchf1],
            Self::Mar02 => [FamilyChoice::Mtarc2, FamilyChoice::Marchf2],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mar01 => "MAR-01",
            Self::Mar02 => "MAR-02",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FamilyChoice {
    Mtarc1,
    Marchf1,
    Mtarc2,
    Marchf2,
}

impl FamilyChoice {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Mtarc1 => "MTARC1",
            Self::Marchf1 => "MARCHF1",
            Self::Mtarc2 => "MTARC2",
            Self::Marchf2 => "MARCHF2",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Mtarc1 => "mitochondrial amidoxime reducing component 1",
            Self::Marchf1 => "membrane associated ring-CH-type finger 1",
            Self::Mtarc2 => "mitochondrial amidoxime reducing component 2",
            Self::Marchf2 => "membrane associated ring-CH-type finger 2",
        }
    }

    pub fn family(self) -> AmbiguousFamily {
        match self {
            Self::Mtarc1 | Self::Marchf1 => AmbiguousFamily::Mar01,
            Self::Mtarc2 | Self::Marchf2 => AmbiguousFamily::Mar02,
        }
    }

    /// The symbol assigned to the second occurrence once this one is taken.
    pub fn other(self) -> Self {
        match self {
            Self::Mtarc1 => Self::Marchf1,
            Self::Marchf1 => Self::Mtarc1,
            Self::Mtarc2 => Self::Marchf2,
            Self::Marchf2 => Self::Mtarc2,
        }
    }
}

impl fmt::Display for FamilyChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for FamilyChoice {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the "SYMBOL: description" form shown to users as well.
        let symbol = s.split(':').next().unwrap_or_default().trim();
        match symbol.to_ascii_uppercase().as_str() {
            "MTARC1" => Ok(Self::Mtarc1),
            "MARCHF1" => Ok(Self::Marchf1),
            "MTARC2" => Ok(Self::Mtarc2),
            "MARCHF2" => Ok(Self::Marchf2),
            _ => Err(SymbolError::InvalidChoice {
                key: "family choice".to_string(),
                value: s.to_string(),
                expected: "MTARC1, MARCHF1, MTARC2, MARCHF2".to_string(),
            }),
        }
    }
}

/// English ordinal for `n`: 1st, 2nd, 3rd, 4th, 11th, 21st, ...
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Looks up an occurrence-suffixed key such as `Sep-03_1st` or `03-SEP_1st`.
///
/// Only first occurrences have a static answer; ambiguous families need a
/// user choice and return `None` here.
pub fn corrected_symbol(key: &str) -> Option<&'static str> {
    let (label, suffix) = key.rsplit_once('_')?;
    if !suffix.eq_ignore_ascii_case("1st") {
        return None;
    }
    let parsed = DateLabel::parse(label).ok()?;
    if parsed.family().is_some() {
        return None;
    }
    unambiguous_symbol(parsed.month, parsed.day)
}
