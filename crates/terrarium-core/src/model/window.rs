// ── Release time windows ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How far back the releases view reaches. Sent to the backend as the
/// `age` query parameter, so the token format is the backend's duration
/// syntax (whole hours).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum TimeWindow {
    #[strum(to_string = "1h", serialize = "hour")]
    #[serde(rename = "1h", alias = "hour")]
    Hour,
    #[default]
    #[strum(to_string = "24h", serialize = "1d", serialize = "day")]
    #[serde(rename = "24h", alias = "1d", alias = "day")]
    Day,
    #[strum(to_string = "168h", serialize = "7d", serialize = "week")]
    #[serde(rename = "168h", alias = "7d", alias = "week")]
    Week,
    #[strum(to_string = "730h", serialize = "month")]
    #[serde(rename = "730h", alias = "month")]
    Month,
    #[strum(to_string = "2190h", serialize = "quarter")]
    #[serde(rename = "2190h", alias = "quarter")]
    Quarter,
    #[strum(to_string = "4380h", serialize = "half-year")]
    #[serde(rename = "4380h", alias = "half-year")]
    HalfYear,
    #[strum(to_string = "8760h", serialize = "year")]
    #[serde(rename = "8760h", alias = "year")]
    Year,
}

impl TimeWindow {
    /// The `age` token sent to the backend.
    pub fn token(self) -> &'static str {
        match self {
            Self::Hour => "1h",
            Self::Day => "24h",
            Self::Week => "168h",
            Self::Month => "730h",
            Self::Quarter => "2190h",
            Self::HalfYear => "4380h",
            Self::Year => "8760h",
        }
    }

    pub fn hours(self) -> u64 {
        match self {
            Self::Hour => 1,
            Self::Day => 24,
            Self::Week => 168,
            Self::Month => 730,
            Self::Quarter => 2_190,
            Self::HalfYear => 4_380,
            Self::Year => 8_760,
        }
    }

    /// Human label for pickers and headings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hour => "Last hour",
            Self::Day => "Last 24 hours",
            Self::Week => "Last 7 days",
            Self::Month => "Last month",
            Self::Quarter => "Last 3 months",
            Self::HalfYear => "Last 6 months",
            Self::Year => "Last year",
        }
    }
}
