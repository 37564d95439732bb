use crate::domain::{
    AgeGroup, CategoryDomain, DurationBand, Gender, Month, TimeBand, UserType, VarianceBand,
};
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three cities covered by the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// The capability descriptor for this city's record schema.
    pub fn schema(self) -> CitySchema {
        match self {
            City::Chicago => CitySchema {
                city: self,
                has_gender: true,
                has_birth_year: true,
                user_types: &["Customer", "Dependent", "Subscriber"],
            },
            City::NewYorkCity => CitySchema {
                city: self,
                has_gender: true,
                has_birth_year: true,
                user_types: &["Customer", "Subscriber", "Unknown"],
            },
            City::Washington => CitySchema {
                city: self,
                has_gender: false,
                has_birth_year: false,
                user_types: &["Customer", "Subscriber"],
            },
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        };
        f.write_str(name)
    }
}

/// Which optional fields a city's records carry, and the ordered user-type
/// domain that applies. Passed alongside the record set so the engine never
/// branches on a city name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitySchema {
    pub city: City,
    pub has_gender: bool,
    pub has_birth_year: bool,
    user_types: &'static [&'static str],
}

impl CitySchema {
    /// True when the demographic report variants (gender, age group) apply.
    pub fn has_demographics(&self) -> bool {
        self.has_gender && self.has_birth_year
    }

    pub fn user_type_domain(&self) -> CategoryDomain {
        CategoryDomain::new("User Type", self.user_types.iter().copied())
    }
}

/// One trip as recorded in the source data. Read-only input; `start_time <=
/// end_time` is not guaranteed and inconsistencies flow into the exception
/// reports rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    /// Declared trip duration in seconds.
    pub duration_secs: i64,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
}

/// A trip with its derived categorical fields attached. The source record is
/// kept as-is; everything else is computed once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub record: TripRecord,
    pub month: Month,
    pub day: Weekday,
    pub hour: u32,
    /// "<start station> to <end station>"
    pub trip_label: String,
    pub time_band: TimeBand,
    pub duration_band: DurationBand,
    /// Absolute difference between the declared duration and the elapsed
    /// seconds between start and end.
    pub variance_secs: i64,
    pub variance_band: VarianceBand,
    /// Start-time year minus birth year; 0 when the birth year is unknown.
    pub age: i32,
    pub age_group: AgeGroup,
    pub user_type: UserType,
    pub gender: Gender,
}

impl From<TripRecord> for Trip {
    fn from(record: TripRecord) -> Self {
        let month = Month::from_number(record.start_time.month()).unwrap_or(Month::Jan);
        let day = record.start_time.weekday();
        let hour = record.start_time.hour();
        let trip_label = format!("{} to {}", record.start_station, record.end_station);
        let elapsed = (record.end_time - record.start_time).num_seconds();
        let variance_secs = (record.duration_secs - elapsed).abs();
        let age = match record.birth_year {
            Some(y) if y != 0 => record.start_time.year() - y,
            _ => 0,
        };
        Trip {
            month,
            day,
            hour,
            time_band: TimeBand::classify(hour),
            duration_band: DurationBand::classify(record.duration_secs),
            variance_secs,
            variance_band: VarianceBand::classify(variance_secs),
            age,
            age_group: AgeGroup::classify(age),
            user_type: UserType::from_raw(record.user_type.as_deref()),
            gender: Gender::from_raw(record.gender.as_deref()),
            trip_label,
            record,
        }
    }
}

/// Derive categorical fields for a whole record set.
pub fn annotate(records: Vec<TripRecord>) -> Vec<Trip> {
    records.into_iter().map(Trip::from).collect()
}

/// Keep only trips matching the selected month and/or weekday. `None` means
/// no filter on that dimension.
pub fn apply_filters(trips: Vec<Trip>, month: Option<Month>, day: Option<Weekday>) -> Vec<Trip> {
    trips
        .into_iter()
        .filter(|t| month.is_none_or(|m| t.month == m))
        .filter(|t| day.is_none_or(|d| t.day == d))
        .collect()
}
