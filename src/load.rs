//! CSV loading for the city trip files.
//!
//! The files share a core schema (an unnamed row-index column, `Start Time`,
//! `End Time`, `Trip Duration`, `Start Station`, `End Station`, `User Type`)
//! while `Gender` and `Birth Year` exist only for cities whose schema says
//! so. Missing optional values become `None`; a missing required column or a
//! malformed required cell is the one class of failure and aborts the load.

use crate::models::{CitySchema, Trip, TripRecord, annotate};
use chrono::NaiveDateTime;
use csv::StringRecord;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to read a row from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("row {row}: invalid {column} value `{value}`")]
    BadValue {
        row: usize,
        column: &'static str,
        value: String,
    },
}

struct Columns {
    start_time: usize,
    end_time: usize,
    duration: usize,
    start_station: usize,
    end_station: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord, schema: &CitySchema) -> Result<Self, LoadError> {
        let find = |name: &'static str| -> Result<usize, LoadError> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(LoadError::MissingColumn(name))
        };
        // Optional columns are required exactly when the schema declares them.
        let find_optional = |name: &'static str, present: bool| -> Result<Option<usize>, LoadError> {
            if present { find(name).map(Some) } else { Ok(None) }
        };
        Ok(Columns {
            start_time: find("Start Time")?,
            end_time: find("End Time")?,
            duration: find("Trip Duration")?,
            start_station: find("Start Station")?,
            end_station: find("End Station")?,
            user_type: find("User Type")?,
            gender: find_optional("Gender", schema.has_gender)?,
            birth_year: find_optional("Birth Year", schema.has_birth_year)?,
        })
    }
}

fn parse_timestamp(raw: &str, row: usize, column: &'static str) -> Result<NaiveDateTime, LoadError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M"))
        .map_err(|_| LoadError::BadValue {
            row,
            column,
            value: raw.to_string(),
        })
}

fn field<'a>(record: &'a StringRecord, idx: usize) -> &'a str {
    record.get(idx).unwrap_or("").trim()
}

/// Load one city file into raw records.
pub fn load_city<P: AsRef<Path>>(path: P, schema: &CitySchema) -> Result<Vec<TripRecord>, LoadError> {
    let path = path.as_ref();
    let started = Instant::now();
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let headers = reader
        .headers()
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let cols = Columns::locate(&headers, schema)?;

    let mut out = Vec::new();
    for (i, row) in reader.records().enumerate() {
        // Row numbers in errors are 1-based data rows, matching the file
        // after its header.
        let row = row.map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let row_no = i + 1;

        let raw_duration = field(&row, cols.duration);
        // Durations are stored as floats in the source files ("1939.0").
        let duration_secs = raw_duration
            .parse::<f64>()
            .map_err(|_| LoadError::BadValue {
                row: row_no,
                column: "Trip Duration",
                value: raw_duration.to_string(),
            })? as i64;

        let user_type = match field(&row, cols.user_type) {
            "" => None,
            s => Some(s.to_string()),
        };
        let gender = cols.gender.and_then(|c| match field(&row, c) {
            "" => None,
            s => Some(s.to_string()),
        });
        let birth_year = match cols.birth_year {
            Some(c) => {
                let raw = field(&row, c);
                if raw.is_empty() {
                    None
                } else {
                    let year = raw.parse::<f64>().map_err(|_| LoadError::BadValue {
                        row: row_no,
                        column: "Birth Year",
                        value: raw.to_string(),
                    })? as i32;
                    Some(year)
                }
            }
            None => None,
        };

        out.push(TripRecord {
            start_time: parse_timestamp(field(&row, cols.start_time), row_no, "Start Time")?,
            end_time: parse_timestamp(field(&row, cols.end_time), row_no, "End Time")?,
            start_station: field(&row, cols.start_station).to_string(),
            end_station: field(&row, cols.end_station).to_string(),
            duration_secs,
            user_type,
            gender,
            birth_year,
        });
    }

    info!(
        "loaded {} trips for {} from {}",
        out.len(),
        schema.city,
        path.display()
    );
    debug!("load took {:.2?}", started.elapsed());
    Ok(out)
}

/// Load one city file and derive the categorical fields in one go.
pub fn load_trips<P: AsRef<Path>>(path: P, schema: &CitySchema) -> Result<Vec<Trip>, LoadError> {
    Ok(annotate(load_city(path, schema)?))
}
