//! bikeshare-reports
//!
//! A lightweight Rust library for summarizing US bike share trip data.
//! Pairs with the `bikeshare` CLI.
//!
//! ### Features
//! - Derive stable categorical bins from continuous/temporal trip fields
//!   (time-of-day, duration, duration-variance, age group)
//! - Group trips by one to three categorical keys with exact counts
//! - Reshape grouped counts into dense pivot tables with a declared,
//!   gap-filled row/column order
//! - Summary statistics (mode, mean, median, extremes) and station-level
//!   variance reporting with defined zero-denominator behavior
//!
//! ### Example
//! ```no_run
//! use bikeshare_reports::{City, load, report};
//!
//! let schema = City::Chicago.schema();
//! let trips = load::load_trips("chicago.csv", &schema)?;
//! let usage = report::usage_report(&trips);
//! println!("{}", usage.by_month);
//! # Ok::<(), bikeshare_reports::load::LoadError>(())
//! ```

pub mod domain;
pub mod group;
pub mod load;
pub mod models;
pub mod pivot;
pub mod report;
pub mod station;
pub mod stats;

pub use domain::{AgeGroup, CategoryDomain, DurationBand, Month, TimeBand, VarianceBand};
pub use models::{City, CitySchema, Trip, TripRecord};
pub use pivot::PivotTable;
pub use stats::Highlight;
