//! Report assembly: composes the categorizer, group counter, pivot builder
//! and summary statistics into the report families offered by the package
//! (usage times, trip durations, stations, users). Each function recomputes
//! everything from the record set it is given; nothing is cached between
//! calls or cities.

use crate::domain::CategoryDomain;
use crate::group::{count_by, value_counts};
use crate::models::{City, CitySchema, Trip};
use crate::pivot::PivotTable;
use crate::station::{
    self, StationSummary, high_asymmetry, least_utilized, most_utilized, station_summaries,
    top_variance, zero_activity,
};
use crate::stats::{Highlight, least_n, max_by_first, mean, median, mode, top_n};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{city} does not record the demographic fields required by this report")]
    MissingDemographics { city: City },
}

/// Trip volumes by weekday and month for the whole (unfiltered) city data
/// set; shown before filters are chosen.
pub fn city_summary(trips: &[Trip]) -> PivotTable {
    let counts = count_by(trips, |t| {
        vec![
            crate::domain::weekday_label(t.day).to_string(),
            t.month.label().to_string(),
        ]
    });
    PivotTable::reshape(&counts, &CategoryDomain::weekdays(), &CategoryDomain::months())
}

/// Travel-time report family: most frequent times of travel plus pivots of
/// trip volumes over the time-of-day bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageReport {
    pub top_month: Option<Highlight>,
    pub top_day: Option<Highlight>,
    /// Label is the bare start hour ("17"); render as "17:00".
    pub top_hour: Option<Highlight>,
    /// Month x time band.
    pub by_month: PivotTable,
    /// Day x time band.
    pub by_day: PivotTable,
    /// Single-row summary over the time bands.
    pub by_band: PivotTable,
    /// Hour-level detail, hour x month.
    pub hour_by_month: PivotTable,
    /// Hour-level detail, hour x day.
    pub hour_by_day: PivotTable,
    /// Two-level (month, day) x time band.
    pub by_month_day: PivotTable,
}

pub fn usage_report(trips: &[Trip]) -> UsageReport {
    let months = CategoryDomain::months();
    let days = CategoryDomain::weekdays();
    let hours = CategoryDomain::hours();
    let bands = CategoryDomain::time_bands();

    let month_of = |t: &Trip| t.month.label().to_string();
    let day_of = |t: &Trip| crate::domain::weekday_label(t.day).to_string();
    let band_of = |t: &Trip| t.time_band.label().to_string();

    UsageReport {
        top_month: mode(&value_counts(trips, month_of)),
        top_day: mode(&value_counts(trips, day_of)),
        top_hour: mode(&value_counts(trips, |t| t.hour.to_string())),
        by_month: PivotTable::reshape(
            &count_by(trips, |t| vec![month_of(t), band_of(t)]),
            &months,
            &bands,
        ),
        by_day: PivotTable::reshape(
            &count_by(trips, |t| vec![day_of(t), band_of(t)]),
            &days,
            &bands,
        ),
        by_band: PivotTable::reshape_flat(&count_by(trips, |t| vec![band_of(t)]), &bands),
        hour_by_month: PivotTable::reshape(
            &count_by(trips, |t| vec![t.hour.to_string(), month_of(t)]),
            &hours,
            &months,
        ),
        hour_by_day: PivotTable::reshape(
            &count_by(trips, |t| vec![t.hour.to_string(), day_of(t)]),
            &hours,
            &days,
        ),
        by_month_day: PivotTable::reshape2(
            &count_by(trips, |t| vec![month_of(t), day_of(t), band_of(t)]),
            &months,
            &days,
            &bands,
        ),
    }
}

/// Scalar duration statistics, in whole seconds where rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationStats {
    pub total_secs: i64,
    pub mean_secs: Option<f64>,
    pub median_secs: Option<f64>,
    pub longest_secs: Option<i64>,
    pub shortest_secs: Option<i64>,
}

/// Trip-duration report family, including the exception table for trips
/// whose declared duration disagrees with the recorded start/end times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationReport {
    pub stats: DurationStats,
    /// Single-row summary over the duration bands.
    pub by_band: PivotTable,
    /// Month x duration band.
    pub by_month: PivotTable,
    /// Day x duration band.
    pub by_day: PivotTable,
    /// Two-level (month, day) x duration band.
    pub by_month_day: PivotTable,
    /// Month x variance band, restricted to trips with non-zero variance.
    pub exceptions: PivotTable,
    pub exception_count: u64,
}

pub fn duration_report(trips: &[Trip]) -> DurationReport {
    let months = CategoryDomain::months();
    let days = CategoryDomain::weekdays();
    let bands = CategoryDomain::duration_bands();

    let month_of = |t: &Trip| t.month.label().to_string();
    let day_of = |t: &Trip| crate::domain::weekday_label(t.day).to_string();
    let band_of = |t: &Trip| t.duration_band.label().to_string();

    let durations: Vec<i64> = trips.iter().map(|t| t.record.duration_secs).collect();
    let stats = DurationStats {
        total_secs: durations.iter().sum(),
        mean_secs: mean(&durations),
        median_secs: median(&durations),
        longest_secs: durations.iter().max().copied(),
        shortest_secs: durations.iter().min().copied(),
    };

    let exceptional: Vec<Trip> = trips
        .iter()
        .filter(|t| t.variance_secs != 0)
        .cloned()
        .collect();
    let exceptions = PivotTable::reshape(
        &count_by(&exceptional, |t| {
            vec![month_of(t), t.variance_band.label().to_string()]
        }),
        &months,
        &CategoryDomain::variance_bands(),
    );

    DurationReport {
        stats,
        by_band: PivotTable::reshape_flat(&count_by(trips, |t| vec![band_of(t)]), &bands),
        by_month: PivotTable::reshape(
            &count_by(trips, |t| vec![month_of(t), band_of(t)]),
            &months,
            &bands,
        ),
        by_day: PivotTable::reshape(
            &count_by(trips, |t| vec![day_of(t), band_of(t)]),
            &days,
            &bands,
        ),
        by_month_day: PivotTable::reshape2(
            &count_by(trips, |t| vec![month_of(t), day_of(t), band_of(t)]),
            &months,
            &days,
            &bands,
        ),
        exceptions,
        exception_count: exceptional.len() as u64,
    }
}

/// Scalar call-outs for the station report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationHighlights {
    /// Total trips = sum of starts over all stations.
    pub total_trips: u64,
    pub station_count: usize,
    pub busiest_start: Option<Highlight>,
    pub busiest_end: Option<Highlight>,
    pub top_trip: Option<Highlight>,
    pub mean_starts: Option<f64>,
    pub median_starts: Option<f64>,
    pub median_ends: Option<f64>,
    /// Station with the largest signed variance, and that variance.
    pub largest_variance: Option<(String, i64)>,
}

/// Station and trip activity report family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationReport {
    /// All stations, alphabetical.
    pub stations: Vec<StationSummary>,
    pub highlights: StationHighlights,
    pub zero_activity: Vec<StationSummary>,
    pub high_asymmetry: Vec<StationSummary>,
    pub most_utilized: Vec<StationSummary>,
    /// Legacy tail slice of the descending utilization ranking.
    pub least_utilized: Vec<StationSummary>,
    pub top_variance: Vec<StationSummary>,
    pub top_trips: Vec<(String, u64)>,
    /// Legacy tail slice of the descending trip ranking.
    pub least_trips: Vec<(String, u64)>,
}

pub fn station_report(trips: &[Trip]) -> StationReport {
    let stations = station_summaries(trips);

    let starts: Vec<i64> = stations.iter().map(|s| s.starts as i64).collect();
    let ends: Vec<i64> = stations.iter().map(|s| s.ends as i64).collect();
    let trip_ranking = station::trip_ranking(trips);

    let highlights = StationHighlights {
        total_trips: stations.iter().map(|s| s.starts).sum(),
        station_count: stations.len(),
        busiest_start: max_by_first(&stations, |s| s.starts).map(|s| Highlight {
            label: s.station.clone(),
            count: s.starts,
        }),
        busiest_end: max_by_first(&stations, |s| s.ends).map(|s| Highlight {
            label: s.station.clone(),
            count: s.ends,
        }),
        top_trip: mode(&value_counts(trips, |t| t.trip_label.clone())),
        mean_starts: mean(&starts),
        median_starts: median(&starts),
        median_ends: median(&ends),
        largest_variance: max_by_first(&stations, |s| s.variance)
            .map(|s| (s.station.clone(), s.variance)),
    };

    StationReport {
        highlights,
        zero_activity: zero_activity(&stations),
        high_asymmetry: high_asymmetry(&stations),
        most_utilized: most_utilized(&stations, 20),
        least_utilized: least_utilized(&stations, 20),
        top_variance: top_variance(&stations, 20),
        top_trips: top_n(&trip_ranking, 20),
        least_trips: least_n(&trip_ranking, 20),
        stations,
    }
}

/// One rider cohort in the over-90 breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OlderRider {
    pub birth_year: i32,
    pub age: i32,
    pub trips: u64,
}

/// User/demographic summary. Cities without gender/birth-year data get the
/// user-type summary only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserReport {
    /// Single-row summary over the city's user-type domain.
    pub by_user_type: PivotTable,
    /// User type x gender, for cities that record gender.
    pub by_type_gender: Option<PivotTable>,
    pub gender_counts: Option<Vec<Highlight>>,
    /// Earliest birth year among known values.
    pub earliest_birth_year: Option<i32>,
    pub latest_birth_year: Option<i32>,
    /// Trips by riders older than 90, grouped by birth year.
    pub over_90: Vec<OlderRider>,
}

pub fn user_report(trips: &[Trip], schema: &CitySchema) -> UserReport {
    let ut_domain = schema.user_type_domain();
    let by_user_type = PivotTable::reshape_flat(
        &count_by(trips, |t| vec![t.user_type.label().to_string()]),
        &ut_domain,
    );

    if !schema.has_demographics() {
        return UserReport {
            by_user_type,
            by_type_gender: None,
            gender_counts: None,
            earliest_birth_year: None,
            latest_birth_year: None,
            over_90: Vec::new(),
        };
    }

    let by_type_gender = PivotTable::reshape(
        &count_by(trips, |t| {
            vec![
                t.user_type.label().to_string(),
                t.gender.label().to_string(),
            ]
        }),
        &ut_domain,
        &CategoryDomain::genders(),
    );

    let gender_counts = crate::domain::Gender::LABELS
        .iter()
        .map(|label| Highlight {
            label: label.to_string(),
            count: trips.iter().filter(|t| t.gender.label() == *label).count() as u64,
        })
        .collect();

    let known_years: Vec<i32> = trips
        .iter()
        .filter_map(|t| t.record.birth_year.filter(|&y| y != 0))
        .collect();

    let mut over_90_counts = count_by(
        &trips
            .iter()
            .filter(|t| t.age > 90)
            .cloned()
            .collect::<Vec<_>>(),
        |t| vec![t.record.birth_year.unwrap_or(0).to_string(), t.age.to_string()],
    )
    .into_iter()
    .filter_map(|(key, count)| {
        let birth_year = key[0].parse().ok()?;
        let age = key[1].parse().ok()?;
        Some(OlderRider {
            birth_year,
            age,
            trips: count,
        })
    })
    .collect::<Vec<_>>();
    over_90_counts.sort_by_key(|r| r.birth_year);

    UserReport {
        by_user_type,
        by_type_gender: Some(by_type_gender),
        gender_counts: Some(gender_counts),
        earliest_birth_year: known_years.iter().min().copied(),
        latest_birth_year: known_years.iter().max().copied(),
        over_90: over_90_counts,
    }
}

/// The parameterized user-activity pivots offered by the user report menu.
/// Variants past the first three require demographic fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserReportKind {
    TypeByMonth,
    TypeByDay,
    TypeMonthByDay,
    TypeByAge,
    TypeGenderByAge,
    TypeMonthByAge,
    TypeDayByAge,
    GenderByAge,
    GenderTypeByAge,
    GenderMonthByAge,
    GenderDayByAge,
}

impl UserReportKind {
    pub fn requires_demographics(&self) -> bool {
        !matches!(
            self,
            UserReportKind::TypeByMonth | UserReportKind::TypeByDay | UserReportKind::TypeMonthByDay
        )
    }
}

/// Build one user-activity pivot. Demographic variants are rejected when the
/// city's schema lacks the needed fields.
pub fn user_activity(
    trips: &[Trip],
    schema: &CitySchema,
    kind: UserReportKind,
) -> Result<PivotTable, ReportError> {
    if kind.requires_demographics() && !schema.has_demographics() {
        return Err(ReportError::MissingDemographics { city: schema.city });
    }

    let ut = schema.user_type_domain();
    let months = CategoryDomain::months();
    let days = CategoryDomain::weekdays();
    let genders = CategoryDomain::genders();
    let ages = CategoryDomain::age_groups();

    let ut_of = |t: &Trip| t.user_type.label().to_string();
    let month_of = |t: &Trip| t.month.label().to_string();
    let day_of = |t: &Trip| crate::domain::weekday_label(t.day).to_string();
    let gender_of = |t: &Trip| t.gender.label().to_string();
    let age_of = |t: &Trip| t.age_group.label().to_string();

    use UserReportKind::*;
    let table = match kind {
        TypeByMonth => PivotTable::reshape(
            &count_by(trips, |t| vec![ut_of(t), month_of(t)]),
            &ut,
            &months,
        ),
        TypeByDay => PivotTable::reshape(
            &count_by(trips, |t| vec![ut_of(t), day_of(t)]),
            &ut,
            &days,
        ),
        TypeMonthByDay => PivotTable::reshape2(
            &count_by(trips, |t| vec![ut_of(t), month_of(t), day_of(t)]),
            &ut,
            &months,
            &days,
        ),
        TypeByAge => PivotTable::reshape(
            &count_by(trips, |t| vec![ut_of(t), age_of(t)]),
            &ut,
            &ages,
        ),
        TypeGenderByAge => PivotTable::reshape2(
            &count_by(trips, |t| vec![ut_of(t), gender_of(t), age_of(t)]),
            &ut,
            &genders,
            &ages,
        ),
        TypeMonthByAge => PivotTable::reshape2(
            &count_by(trips, |t| vec![ut_of(t), month_of(t), age_of(t)]),
            &ut,
            &months,
            &ages,
        ),
        TypeDayByAge => PivotTable::reshape2(
            &count_by(trips, |t| vec![ut_of(t), day_of(t), age_of(t)]),
            &ut,
            &days,
            &ages,
        ),
        GenderByAge => PivotTable::reshape(
            &count_by(trips, |t| vec![gender_of(t), age_of(t)]),
            &genders,
            &ages,
        ),
        GenderTypeByAge => PivotTable::reshape2(
            &count_by(trips, |t| vec![gender_of(t), ut_of(t), age_of(t)]),
            &genders,
            &ut,
            &ages,
        ),
        GenderMonthByAge => PivotTable::reshape2(
            &count_by(trips, |t| vec![gender_of(t), month_of(t), age_of(t)]),
            &genders,
            &months,
            &ages,
        ),
        GenderDayByAge => PivotTable::reshape2(
            &count_by(trips, |t| vec![gender_of(t), day_of(t), age_of(t)]),
            &genders,
            &days,
            &ages,
        ),
    };
    Ok(table)
}
