use serde::{Deserialize, Serialize};

/// Calendar month, independent of any year.
///
/// Planting and harvest windows recur every season, so they are expressed in
/// months and only become concrete dates once a year is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub fn all() -> &'static [Month] {
        &[
            Month::January,
            Month::February,
            Month::March,
            Month::April,
            Month::May,
            Month::June,
            Month::July,
            Month::August,
            Month::September,
            Month::October,
            Month::November,
            Month::December,
        ]
    }

    /// Canonical name as it appears in the plant dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            Month::January => "januar",
            Month::February => "februar",
            Month::March => "mars",
            Month::April => "april",
            Month::May => "mai",
            Month::June => "juni",
            Month::July => "juli",
            Month::August => "august",
            Month::September => "september",
            Month::October => "oktober",
            Month::November => "november",
            Month::December => "desember",
        }
    }

    /// 1-based position in the calendar year.
    pub fn order(&self) -> u32 {
        *self as u32 + 1
    }

    /// Days in the month on a fixed non-leap calendar. February is always 28.
    pub fn days(&self) -> u32 {
        match self {
            Month::February => 28,
            Month::April | Month::June | Month::September | Month::November => 30,
            _ => 31,
        }
    }

    pub fn from_order(order: u32) -> Option<Self> {
        Self::all().get(order.checked_sub(1)? as usize).copied()
    }

    /// Case-insensitive parse. Accepts the canonical names, English names,
    /// three-letter abbreviations and "sept" as a second abbreviation for
    /// September.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "januar" | "january" | "jan" => Some(Month::January),
            "februar" | "february" | "feb" => Some(Month::February),
            "mars" | "march" | "mar" => Some(Month::March),
            "april" | "apr" => Some(Month::April),
            "mai" | "may" => Some(Month::May),
            "juni" | "june" | "jun" => Some(Month::June),
            "juli" | "july" | "jul" => Some(Month::July),
            "august" | "aug" => Some(Month::August),
            "september" | "sept" | "sep" => Some(Month::September),
            "oktober" | "october" | "okt" | "oct" => Some(Month::October),
            "november" | "nov" => Some(Month::November),
            "desember" | "december" | "des" | "dec" => Some(Month::December),
            _ => None,
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
