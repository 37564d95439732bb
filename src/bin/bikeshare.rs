use anyhow::Result;
use bikeshare_reports::City;
use bikeshare_reports::domain::Month;
use bikeshare_reports::load;
use bikeshare_reports::models::apply_filters;
use bikeshare_reports::report::{self, StationReport, UserReportKind};
use bikeshare_reports::station::StationSummary;
use bikeshare_reports::stats::format_seconds;
use chrono::Weekday;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bikeshare",
    version,
    about = "Summarize US bike share trip data with pivot-style reports"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a city file, apply filters, and print one report section.
    Report(ReportArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CityArg {
    Chicago,
    NewYorkCity,
    Washington,
}

impl From<CityArg> for City {
    fn from(c: CityArg) -> Self {
        match c {
            CityArg::Chicago => City::Chicago,
            CityArg::NewYorkCity => City::NewYorkCity,
            CityArg::Washington => City::Washington,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Section {
    /// Trip volumes by month and day for the whole file.
    Summary,
    /// Usage times: popular months/days/hours and time-band pivots.
    Usage,
    /// Station and trip activity.
    Stations,
    /// Trip durations and duration exceptions.
    Durations,
    /// User types and demographics.
    Users,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum UserKindArg {
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

impl From<UserKindArg> for UserReportKind {
    fn from(k: UserKindArg) -> Self {
        use UserReportKind as K;
        match k {
            UserKindArg::TypeByMonth => K::TypeByMonth,
            UserKindArg::TypeByDay => K::TypeByDay,
            UserKindArg::TypeMonthByDay => K::TypeMonthByDay,
            UserKindArg::TypeByAge => K::TypeByAge,
            UserKindArg::TypeGenderByAge => K::TypeGenderByAge,
            UserKindArg::TypeMonthByAge => K::TypeMonthByAge,
            UserKindArg::TypeDayByAge => K::TypeDayByAge,
            UserKindArg::GenderByAge => K::GenderByAge,
            UserKindArg::GenderTypeByAge => K::GenderTypeByAge,
            UserKindArg::GenderMonthByAge => K::GenderMonthByAge,
            UserKindArg::GenderDayByAge => K::GenderDayByAge,
        }
    }
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Path to the city CSV file.
    #[arg(short, long)]
    data: PathBuf,
    /// City whose schema the file follows.
    #[arg(short, long, value_enum)]
    city: CityArg,
    /// Month filter, Jan..Jun (omit to include all months).
    #[arg(short, long)]
    month: Option<String>,
    /// Day-of-week filter, e.g. Mon or Monday (omit to include all days).
    #[arg(long)]
    day: Option<String>,
    /// Report section to print.
    #[arg(short, long, value_enum)]
    section: Section,
    /// Specific user-activity pivot (with --section users).
    #[arg(long, value_enum)]
    user_report: Option<UserKindArg>,
    /// Also write the report as pretty JSON.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Report(args) => cmd_report(args),
    }
}

fn save_json<T: Serialize>(value: &T, path: &PathBuf) -> Result<()> {
    let mut f = std::fs::File::create(path)?;
    let s = serde_json::to_string_pretty(value)?;
    f.write_all(s.as_bytes())?;
    eprintln!("Saved report to {}", path.display());
    Ok(())
}

fn fmt_opt_secs(v: Option<i64>) -> String {
    v.map(format_seconds).unwrap_or_else(|| "NA".to_string())
}

fn cmd_report(args: ReportArgs) -> Result<()> {
    let city: City = args.city.into();
    let schema = city.schema();
    let trips = load::load_trips(&args.data, &schema)?;

    // The summary covers the whole file; the month/day filters apply to the
    // other sections only.
    if let Section::Summary = args.section {
        let table = report::city_summary(&trips);
        println!("Trip volumes by day and month for {city}\n");
        println!("{table}");
        if let Some(path) = args.out.as_ref() {
            save_json(&table, path)?;
        }
        return Ok(());
    }

    let month = match &args.month {
        Some(s) => Some(
            Month::from_abbrev(s)
                .ok_or_else(|| anyhow::anyhow!("invalid --month, expected Jan..Dec"))?,
        ),
        None => None,
    };
    let day = match &args.day {
        Some(s) => Some(
            s.parse::<Weekday>()
                .map_err(|_| anyhow::anyhow!("invalid --day, expected e.g. Mon or Monday"))?,
        ),
        None => None,
    };
    let filtered = apply_filters(trips, month, day);
    eprintln!("{} trips selected for {}", filtered.len(), city);

    match args.section {
        // Printed above, before the filters are applied.
        Section::Summary => {}
        Section::Usage => {
            let usage = report::usage_report(&filtered);
            println!("BIKE SHARE USAGE TIMES\n");
            if let Some(h) = &usage.top_month {
                println!("Most popular month was {} with {} trips", h.label, h.count);
            }
            if let Some(h) = &usage.top_day {
                println!("Most popular day was {} with {} trips", h.label, h.count);
            }
            if let Some(h) = &usage.top_hour {
                println!("Most popular hour was {}:00 with {} trips", h.label, h.count);
            }
            println!("\nTrip volumes by hour band\n{}", usage.by_band);
            println!("Trip volumes by hour band by month\n{}", usage.by_month);
            println!("Trip volumes by hour band by day\n{}", usage.by_day);
            println!("Trip volumes by hour by month\n{}", usage.hour_by_month);
            println!("Trip volumes by hour by day\n{}", usage.hour_by_day);
            println!(
                "Trip volumes by hour band by month and day\n{}",
                usage.by_month_day
            );
            if let Some(path) = args.out.as_ref() {
                save_json(&usage, path)?;
            }
        }
        Section::Durations => {
            let dur = report::duration_report(&filtered);
            println!("TRIP DURATION SUMMARY\n");
            println!(
                "Total combined time of all trips: {}",
                format_seconds(dur.stats.total_secs)
            );
            println!("The longest trip was: {}", fmt_opt_secs(dur.stats.longest_secs));
            println!("The shortest trip was: {}", fmt_opt_secs(dur.stats.shortest_secs));
            println!(
                "Average trip duration: {}",
                fmt_opt_secs(dur.stats.mean_secs.map(|m| m as i64))
            );
            println!(
                "Median trip duration: {}",
                fmt_opt_secs(dur.stats.median_secs.map(|m| m as i64))
            );
            println!("\nTrips by duration category\n{}", dur.by_band);
            println!("Trips by month by duration category\n{}", dur.by_month);
            println!("Trips by day by duration category\n{}", dur.by_day);
            if dur.exception_count > 0 {
                println!(
                    "Found {} trips whose recorded times disagree with the declared duration.",
                    dur.exception_count
                );
                println!("\nTrip duration exceptions\n{}", dur.exceptions);
            } else {
                println!("There are no trip duration exceptions to report");
            }
            if let Some(path) = args.out.as_ref() {
                save_json(&dur, path)?;
            }
        }
        Section::Stations => {
            let stations = report::station_report(&filtered);
            print_station_report(&stations);
            if let Some(path) = args.out.as_ref() {
                save_json(&stations, path)?;
            }
        }
        Section::Users => {
            if let Some(kind) = args.user_report {
                let table = report::user_activity(&filtered, &schema, kind.into())?;
                println!("User activity report\n{table}");
                if let Some(path) = args.out.as_ref() {
                    save_json(&table, path)?;
                }
            } else {
                let users = report::user_report(&filtered, &schema);
                println!("BIKE SHARE USER SUMMARY\n");
                println!("Trips by user type\n{}", users.by_user_type);
                if let Some(table) = &users.by_type_gender {
                    println!("Trips by user type and gender\n{table}");
                }
                if let Some(counts) = &users.gender_counts {
                    for c in counts {
                        println!("The number of {} users was {}", c.label, c.count);
                    }
                }
                if let Some(y) = users.earliest_birth_year {
                    println!("The earliest birth year was {y}.");
                }
                if let Some(y) = users.latest_birth_year {
                    println!("The latest birth year was {y}.");
                }
                if !users.over_90.is_empty() {
                    println!("\nTrips by riders older than 90:");
                    for r in &users.over_90 {
                        println!("  born {} (age {}): {} trips", r.birth_year, r.age, r.trips);
                    }
                }
                if let Some(path) = args.out.as_ref() {
                    save_json(&users, path)?;
                }
            }
        }
    }
    Ok(())
}

fn print_stations(title: &str, stations: &[StationSummary]) {
    println!("{title}");
    let width = stations
        .iter()
        .map(|s| s.station.len())
        .chain(["Station".len()])
        .max()
        .unwrap_or(7);
    println!(
        "{:<width$}  {:>8}  {:>8}  {:>8}  {:>8}",
        "Station", "Starts", "Ends", "Var", "%"
    );
    for s in stations {
        println!(
            "{:<width$}  {:>8}  {:>8}  {:>8}  {:>8.1}",
            s.station, s.starts, s.ends, s.variance, s.percent
        );
    }
    println!();
}

fn print_station_report(rep: &StationReport) {
    let h = &rep.highlights;
    println!("SUMMARY STATION STATISTICS\n");
    println!(
        "There was a total of {} trips across {} stations.",
        h.total_trips, h.station_count
    );
    if let Some(b) = &h.busiest_start {
        println!(
            "The most popular station for trip starts was {} with {} trips.",
            b.label, b.count
        );
    }
    if let Some(b) = &h.busiest_end {
        println!(
            "The most popular station for trip ends was {} with {} trips.",
            b.label, b.count
        );
    }
    if let Some(t) = &h.top_trip {
        println!("The most popular trip was {} with {} trips.", t.label, t.count);
    }
    if let Some(m) = h.mean_starts {
        println!("The average trip starts per station was {}.", m.round());
    }
    if let Some(m) = h.median_starts {
        println!("The median trip starts per station was {m}.");
    }
    if let Some(m) = h.median_ends {
        println!("The median trip ends per station was {m}.");
    }
    if let Some((station, var)) = &h.largest_variance {
        println!(
            "The largest difference between trip starts and ends was {var} at {station} station."
        );
    }
    println!();
    print_stations(
        "Stations with trip starts but no ends (and vice versa)",
        &rep.zero_activity,
    );
    print_stations("The 20 most utilised stations", &rep.most_utilized);
    print_stations("The 20 least utilised stations", &rep.least_utilized);
    print_stations(
        "The 20 stations with the largest variation between starts and ends",
        &rep.top_variance,
    );
    print_stations(
        "Stations where the difference between starts and ends exceeds 50%",
        &rep.high_asymmetry,
    );
    println!("The 20 most common trips");
    for (trip, count) in &rep.top_trips {
        println!("  {trip}: {count}");
    }
    println!("\nThe 20 least common trips");
    for (trip, count) in &rep.least_trips {
        println!("  {trip}: {count}");
    }
}
