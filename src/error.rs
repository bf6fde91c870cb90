//! Error types for input validation and configuration loading.
//!
//! The ephemeris and panel functions are total and never produce these.

use std::io;
use thiserror::Error;

pub type TrackerResult<T> = Result<T, TrackerError>;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Invalid date '{input}' (expected YYYY-MM-DD): {source}")]
    InvalidDate {
        input: String,
        source: chrono::ParseError,
    },

    #[error("Invalid time '{input}' (expected HH:MM or HH:MM:SS): {source}")]
    InvalidTime {
        input: String,
        source: chrono::ParseError,
    },

    #[error("Latitude {0} outside -90..=90")]
    LatitudeOutOfRange(f64),

    #[error("Longitude {0} outside -180..=180")]
    LongitudeOutOfRange(f64),

    #[error("UTC offset {0}h outside -14..=14")]
    UtcOffsetOutOfRange(f64),

    #[error("Field '{field}' is not a finite number")]
    NonFinite { field: &'static str },

    #[error("Sun path interval must be 1..=1440 minutes, got {0}")]
    InvalidInterval(i32),

    #[error("Invalid panel geometry: {field} = {value}")]
    InvalidGeometry { field: &'static str, value: f64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}
