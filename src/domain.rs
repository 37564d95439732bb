//! Reporting dimensions: band enums derived from continuous/temporal values,
//! calendar labels, and the ordered label lists ([`CategoryDomain`]) that fix
//! the display and reindex order of every report axis.
//!
//! Each band keeps the "first match wins" semantics of an ordered rule list,
//! written out as an explicit `match` so the rules are testable. Inputs that
//! match no rule classify to an `Unmapped` sentinel instead of failing; the
//! sentinel is excluded from the display domains, so reshaping simply drops
//! such records.

use serde::{Deserialize, Serialize};

/// Time-of-day band derived from the trip's start hour (0-23).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeBand {
    /// 1am-5am
    EarlyMorning,
    /// 5am-9am
    Morning,
    /// 9am-1pm
    Midday,
    /// 1pm-5pm
    Afternoon,
    /// 5pm-9pm
    Evening,
    /// 9pm-1am
    Night,
    /// Hour outside 0-23; indicates a rule gap, never displayed.
    Unmapped,
}

impl TimeBand {
    /// Classify an hour of day. Rules are evaluated in band order; midnight
    /// belongs to the 9pm-1am band.
    pub fn classify(hour: u32) -> Self {
        match hour {
            1..=4 => TimeBand::EarlyMorning,
            5..=8 => TimeBand::Morning,
            9..=12 => TimeBand::Midday,
            13..=16 => TimeBand::Afternoon,
            17..=20 => TimeBand::Evening,
            0 | 21..=23 => TimeBand::Night,
            _ => TimeBand::Unmapped,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeBand::EarlyMorning => "1am-5am",
            TimeBand::Morning => "5am-9am",
            TimeBand::Midday => "9am-1pm",
            TimeBand::Afternoon => "1pm-5pm",
            TimeBand::Evening => "5pm-9pm",
            TimeBand::Night => "9pm-1am",
            TimeBand::Unmapped => "unmapped",
        }
    }

    pub const LABELS: [&'static str; 6] =
        ["1am-5am", "5am-9am", "9am-1pm", "1pm-5pm", "5pm-9pm", "9pm-1am"];
}

/// Trip-length band derived from the declared trip duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationBand {
    Min5,
    Min10,
    Min15,
    Min20,
    Hr1,
    Hr3,
    Hr6,
    Over6Hr,
}

impl DurationBand {
    /// Band boundaries are inclusive on the lower band: 300 seconds is
    /// "5 min", 301 is "10 min".
    pub fn classify(secs: i64) -> Self {
        if secs <= 300 {
            DurationBand::Min5
        } else if secs <= 600 {
            DurationBand::Min10
        } else if secs <= 900 {
            DurationBand::Min15
        } else if secs <= 1200 {
            DurationBand::Min20
        } else if secs <= 3600 {
            DurationBand::Hr1
        } else if secs <= 10800 {
            DurationBand::Hr3
        } else if secs <= 21600 {
            DurationBand::Hr6
        } else {
            DurationBand::Over6Hr
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DurationBand::Min5 => "5 min",
            DurationBand::Min10 => "10 min",
            DurationBand::Min15 => "15 min",
            DurationBand::Min20 => "20 min",
            DurationBand::Hr1 => "1 hr",
            DurationBand::Hr3 => "3 hr",
            DurationBand::Hr6 => "6 hr",
            DurationBand::Over6Hr => ">6 hr",
        }
    }

    pub const LABELS: [&'static str; 8] =
        ["5 min", "10 min", "15 min", "20 min", "1 hr", "3 hr", "6 hr", ">6 hr"];
}

/// Band for the absolute difference between the declared trip duration and
/// the elapsed time between the recorded start and end timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VarianceBand {
    Sec1,
    Sec5,
    Min1,
    Min10,
    Hr1,
    Hr6,
    Hr24,
    Over24Hr,
}

impl VarianceBand {
    pub fn classify(abs_secs: i64) -> Self {
        if abs_secs <= 1 {
            VarianceBand::Sec1
        } else if abs_secs <= 5 {
            VarianceBand::Sec5
        } else if abs_secs <= 60 {
            VarianceBand::Min1
        } else if abs_secs <= 600 {
            VarianceBand::Min10
        } else if abs_secs <= 3600 {
            VarianceBand::Hr1
        } else if abs_secs <= 21600 {
            VarianceBand::Hr6
        } else if abs_secs <= 86400 {
            VarianceBand::Hr24
        } else {
            VarianceBand::Over24Hr
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VarianceBand::Sec1 => "1 sec",
            VarianceBand::Sec5 => "5 sec",
            VarianceBand::Min1 => "1 min",
            VarianceBand::Min10 => "10 min",
            VarianceBand::Hr1 => "1 hr",
            VarianceBand::Hr6 => "6 hr",
            VarianceBand::Hr24 => "24 hr",
            VarianceBand::Over24Hr => ">24 hr",
        }
    }

    pub const LABELS: [&'static str; 8] =
        ["1 sec", "5 sec", "1 min", "10 min", "1 hr", "6 hr", "24 hr", ">24 hr"];
}

/// Rider age group. Age 0 means the birth year is unknown and maps to the
/// "N/A" group rather than a garbage age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    Unknown,
    Under18,
    From18To29,
    Thirties,
    Forties,
    Fifties,
    Sixties,
    SeventyPlus,
    /// Negative derived age (birth year after the trip year); rule gap.
    Unmapped,
}

impl AgeGroup {
    pub fn classify(age: i32) -> Self {
        match age {
            0 => AgeGroup::Unknown,
            1..=17 => AgeGroup::Under18,
            18..=29 => AgeGroup::From18To29,
            30..=39 => AgeGroup::Thirties,
            40..=49 => AgeGroup::Forties,
            50..=59 => AgeGroup::Fifties,
            60..=69 => AgeGroup::Sixties,
            70.. => AgeGroup::SeventyPlus,
            _ => AgeGroup::Unmapped,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Unknown => "N/A",
            AgeGroup::Under18 => "<18",
            AgeGroup::From18To29 => "18-29",
            AgeGroup::Thirties => "30's",
            AgeGroup::Forties => "40's",
            AgeGroup::Fifties => "50's",
            AgeGroup::Sixties => "60's",
            AgeGroup::SeventyPlus => "70+",
            AgeGroup::Unmapped => "unmapped",
        }
    }

    pub const LABELS: [&'static str; 8] =
        ["N/A", "<18", "18-29", "30's", "40's", "50's", "60's", "70+"];
}

/// Calendar month of the trip start. The reporting window of the source data
/// covers January through June; see [`CategoryDomain::months`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// From a chrono month number (1-12).
    pub fn from_number(n: u32) -> Option<Self> {
        use Month::*;
        Some(match n {
            1 => Jan,
            2 => Feb,
            3 => Mar,
            4 => Apr,
            5 => May,
            6 => Jun,
            7 => Jul,
            8 => Aug,
            9 => Sep,
            10 => Oct,
            11 => Nov,
            12 => Dec,
            _ => return None,
        })
    }

    /// Case-insensitive three-letter abbreviation ("jan", "Feb", ...).
    pub fn from_abbrev(s: &str) -> Option<Self> {
        use Month::*;
        let all = [Jan, Feb, Mar, Apr, May, Jun, Jul, Aug, Sep, Oct, Nov, Dec];
        all.into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(s.trim()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    pub const REPORTED: [&'static str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
}

/// Weekday labels in Mon-Sun report order.
pub fn weekday_label(day: chrono::Weekday) -> &'static str {
    use chrono::Weekday::*;
    match day {
        Mon => "Mon",
        Tue => "Tue",
        Wed => "Wed",
        Thu => "Thu",
        Fri => "Fri",
        Sat => "Sat",
        Sun => "Sun",
    }
}

pub const WEEKDAY_LABELS: [&'static str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Rider gender. Missing values normalize to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    Unknown,
}

impl Gender {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("Female") => Gender::Female,
            Some("Male") => Gender::Male,
            _ => Gender::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Unknown => "Unknown",
        }
    }

    pub const LABELS: [&'static str; 3] = ["Female", "Male", "Unknown"];
}

/// Subscription type of the rider. The set of values actually present varies
/// by city; the per-city display domain lives on `CitySchema`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserType {
    Customer,
    Subscriber,
    Dependent,
    Unknown,
}

impl UserType {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("Customer") => UserType::Customer,
            Some("Subscriber") => UserType::Subscriber,
            Some("Dependent") => UserType::Dependent,
            _ => UserType::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserType::Customer => "Customer",
            UserType::Subscriber => "Subscriber",
            UserType::Dependent => "Dependent",
            UserType::Unknown => "Unknown",
        }
    }
}

/// A named, immutable, ordered list of labels for one reporting dimension.
///
/// The label order is fixed at construction and is the canonical display and
/// reindex order for every pivot built over the dimension; it is independent
/// of what is actually observed in the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDomain {
    name: String,
    labels: Vec<String>,
}

impl CategoryDomain {
    pub fn new(name: impl Into<String>, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        CategoryDomain {
            name: name.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Months covered by the source data, Jan-Jun.
    pub fn months() -> Self {
        CategoryDomain::new("Month", Month::REPORTED)
    }

    pub fn weekdays() -> Self {
        CategoryDomain::new("Day", WEEKDAY_LABELS)
    }

    /// Hours of day 0-23 as labels, for the hour-level detail reports.
    pub fn hours() -> Self {
        CategoryDomain::new("Hour", (0..24).map(|h| h.to_string()))
    }

    pub fn time_bands() -> Self {
        CategoryDomain::new("Hr Group", TimeBand::LABELS)
    }

    pub fn duration_bands() -> Self {
        CategoryDomain::new("Trip Times", DurationBand::LABELS)
    }

    pub fn variance_bands() -> Self {
        CategoryDomain::new("Var Cat", VarianceBand::LABELS)
    }

    pub fn age_groups() -> Self {
        CategoryDomain::new("Age Group", AgeGroup::LABELS)
    }

    pub fn genders() -> Self {
        CategoryDomain::new("Gender", Gender::LABELS)
    }
}
