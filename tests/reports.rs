use bikeshare_reports::City;
use bikeshare_reports::models::{Trip, TripRecord, apply_filters};
use bikeshare_reports::report::{
    ReportError, UserReportKind, city_summary, duration_report, station_report, usage_report,
    user_activity, user_report,
};
use chrono::NaiveDateTime;

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

struct TripSpec {
    start: &'static str,
    end: &'static str,
    duration: i64,
    user_type: &'static str,
    gender: Option<&'static str>,
    birth_year: Option<i32>,
}

fn trip(spec: TripSpec) -> Trip {
    Trip::from(TripRecord {
        start_time: ts(spec.start),
        end_time: ts(spec.end),
        start_station: "A".into(),
        end_station: "B".into(),
        duration_secs: spec.duration,
        user_type: Some(spec.user_type.into()),
        gender: spec.gender.map(Into::into),
        birth_year: spec.birth_year,
    })
}

fn exact(start: &str, duration: i64) -> Trip {
    // End time consistent with the declared duration: no variance.
    let start_time = ts(start);
    Trip::from(TripRecord {
        start_time,
        end_time: start_time + chrono::Duration::seconds(duration),
        start_station: "A".into(),
        end_station: "B".into(),
        duration_secs: duration,
        user_type: Some("Subscriber".into()),
        gender: Some("Male".into()),
        birth_year: Some(1987),
    })
}

#[test]
fn city_summary_is_day_by_month() {
    let trips = vec![exact("2017-01-02 08:00:00", 300)];
    let table = city_summary(&trips);
    assert_eq!(table.row_count(), 7);
    assert_eq!(table.col_count(), 6);
    assert_eq!(table.get_by_label(&["Mon"], "Jan"), Some(1));
    assert_eq!(table.total(), 1);
}

#[test]
fn usage_report_pivots_preserve_the_record_count() {
    let trips = vec![
        exact("2017-01-02 08:00:00", 300),
        exact("2017-01-03 17:30:00", 300),
        exact("2017-02-06 08:15:00", 300),
    ];
    let usage = usage_report(&trips);

    assert_eq!(usage.by_month.total(), 3);
    assert_eq!(usage.by_day.total(), 3);
    assert_eq!(usage.by_band.total(), 3);
    assert_eq!(usage.by_month_day.total(), 3);
    assert_eq!(usage.hour_by_month.total(), 3);

    assert_eq!(usage.by_month.get_by_label(&["Jan"], "5am-9am"), Some(1));
    assert_eq!(usage.by_month.get_by_label(&["Jan"], "5pm-9pm"), Some(1));
    assert_eq!(usage.by_month.get_by_label(&["Feb"], "5am-9am"), Some(1));

    let top_month = usage.top_month.unwrap();
    assert_eq!(top_month.label, "Jan");
    assert_eq!(top_month.count, 2);
    let top_hour = usage.top_hour.unwrap();
    assert_eq!(top_hour.label, "8");
}

#[test]
fn duration_report_stats_and_bands() {
    let trips = vec![
        exact("2017-01-02 08:00:00", 300),
        exact("2017-01-03 09:00:00", 301),
        exact("2017-01-04 10:00:00", 4000),
    ];
    let report = duration_report(&trips);

    assert_eq!(report.stats.total_secs, 4601);
    assert_eq!(report.stats.longest_secs, Some(4000));
    assert_eq!(report.stats.shortest_secs, Some(300));
    assert_eq!(report.stats.median_secs, Some(301.0));

    assert_eq!(report.by_band.get_by_label(&["Trips"], "5 min"), Some(1));
    assert_eq!(report.by_band.get_by_label(&["Trips"], "10 min"), Some(1));
    assert_eq!(report.by_band.get_by_label(&["Trips"], "3 hr"), Some(1));
    assert_eq!(report.by_month_day.row_count(), 42);
}

#[test]
fn exception_pivot_only_counts_nonzero_variance() {
    let mut trips = vec![
        exact("2017-01-02 08:00:00", 300),
        exact("2017-01-03 09:00:00", 300),
    ];
    // One trip whose end time disagrees with the declared duration by 90s.
    trips.push(trip(TripSpec {
        start: "2017-02-06 10:00:00",
        end: "2017-02-06 10:06:30",
        duration: 300,
        user_type: "Customer",
        gender: None,
        birth_year: None,
    }));
    // And one whose end time precedes its start; tolerated, reported.
    trips.push(trip(TripSpec {
        start: "2017-02-07 10:00:00",
        end: "2017-02-07 09:00:00",
        duration: 60,
        user_type: "Customer",
        gender: None,
        birth_year: None,
    }));

    let report = duration_report(&trips);
    assert_eq!(report.exception_count, 2);
    assert_eq!(report.exceptions.total(), 2);
    assert_eq!(report.exceptions.get_by_label(&["Feb"], "5 min"), None); // duration bands don't apply
    assert_eq!(report.exceptions.get_by_label(&["Feb"], "10 min"), Some(1)); // 90s variance
    assert_eq!(report.exceptions.get_by_label(&["Feb"], "6 hr"), Some(1)); // 3660s variance
}

#[test]
fn station_report_highlights() {
    let trips = vec![
        exact("2017-01-02 08:00:00", 300),
        exact("2017-01-03 09:00:00", 300),
    ];
    let report = station_report(&trips);
    assert_eq!(report.highlights.total_trips, 2);
    assert_eq!(report.highlights.station_count, 2);
    let busiest = report.highlights.busiest_start.unwrap();
    assert_eq!(busiest.label, "A");
    assert_eq!(busiest.count, 2);
    let top_trip = report.highlights.top_trip.unwrap();
    assert_eq!(top_trip.label, "A to B");
}

#[test]
fn unknown_birth_year_lands_in_na_age_group() {
    let trips = vec![trip(TripSpec {
        start: "2020-01-06 08:00:00",
        end: "2020-01-06 08:05:00",
        duration: 300,
        user_type: "Subscriber",
        gender: Some("Female"),
        birth_year: None,
    })];
    let schema = City::Chicago.schema();
    let table = user_activity(&trips, &schema, UserReportKind::TypeByAge).unwrap();
    assert_eq!(table.get_by_label(&["Subscriber"], "N/A"), Some(1));
    assert_eq!(table.total(), 1);
}

#[test]
fn demographic_reports_are_rejected_without_the_fields() {
    let schema = City::Washington.schema();
    let err = user_activity(&[], &schema, UserReportKind::GenderByAge).unwrap_err();
    assert!(matches!(
        err,
        ReportError::MissingDemographics {
            city: City::Washington
        }
    ));

    // The non-demographic variants still work.
    assert!(user_activity(&[], &schema, UserReportKind::TypeByMonth).is_ok());
}

#[test]
fn user_report_respects_the_city_schema() {
    let trips = vec![
        exact("2017-01-02 08:00:00", 300),
        trip(TripSpec {
            start: "2017-01-03 09:00:00",
            end: "2017-01-03 09:05:00",
            duration: 300,
            user_type: "Customer",
            gender: Some("Female"),
            birth_year: Some(1950),
        }),
    ];

    let washington = user_report(&trips, &City::Washington.schema());
    assert!(washington.by_type_gender.is_none());
    assert!(washington.gender_counts.is_none());
    assert_eq!(
        washington.by_user_type.get_by_label(&["Trips"], "Subscriber"),
        Some(1)
    );

    let chicago = user_report(&trips, &City::Chicago.schema());
    let by_type_gender = chicago.by_type_gender.unwrap();
    assert_eq!(by_type_gender.get_by_label(&["Customer"], "Female"), Some(1));
    assert_eq!(by_type_gender.get_by_label(&["Subscriber"], "Male"), Some(1));
    assert_eq!(chicago.earliest_birth_year, Some(1950));
    assert_eq!(chicago.latest_birth_year, Some(1987));
    assert!(chicago.over_90.is_empty());
}

#[test]
fn user_report_breaks_down_riders_over_90() {
    let trips = vec![trip(TripSpec {
        start: "2017-06-05 08:00:00",
        end: "2017-06-05 08:05:00",
        duration: 300,
        user_type: "Subscriber",
        gender: Some("Male"),
        birth_year: Some(1920),
    })];
    let report = user_report(&trips, &City::NewYorkCity.schema());
    assert_eq!(report.over_90.len(), 1);
    assert_eq!(report.over_90[0].birth_year, 1920);
    assert_eq!(report.over_90[0].age, 97);
    assert_eq!(report.over_90[0].trips, 1);
}

#[test]
fn filters_restrict_by_month_and_day() {
    use bikeshare_reports::domain::Month;
    use chrono::Weekday;

    let trips = vec![
        exact("2017-01-02 08:00:00", 300), // Jan, Monday
        exact("2017-01-03 08:00:00", 300), // Jan, Tuesday
        exact("2017-02-06 08:00:00", 300), // Feb, Monday
    ];
    let jan = apply_filters(trips.clone(), Some(Month::Jan), None);
    assert_eq!(jan.len(), 2);
    let jan_mon = apply_filters(trips.clone(), Some(Month::Jan), Some(Weekday::Mon));
    assert_eq!(jan_mon.len(), 1);
    let all = apply_filters(trips, None, None);
    assert_eq!(all.len(), 3);
}
