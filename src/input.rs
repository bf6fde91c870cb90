//! Validation at the boundary between user-entered text and the ephemeris.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{TrackerError, TrackerResult};
use crate::types::ObservationInput;

pub const MAX_UTC_OFFSET_HOURS: f64 = 14.0;

pub fn parse_date(s: &str) -> TrackerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|source| TrackerError::InvalidDate {
        input: s.to_string(),
        source,
    })
}

/// Accepts `HH:MM` or `HH:MM:SS`.
pub fn parse_time(s: &str) -> TrackerResult<NaiveTime> {
    let trimmed = s.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|source| TrackerError::InvalidTime {
            input: s.to_string(),
            source,
        })
}

fn finite(field: &'static str, value: f64) -> TrackerResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TrackerError::NonFinite { field })
    }
}

pub fn validate_latitude(latitude: f64) -> TrackerResult<f64> {
    let lat = finite("latitude", latitude)?;
    if (-90.0..=90.0).contains(&lat) {
        Ok(lat)
    } else {
        Err(TrackerError::LatitudeOutOfRange(lat))
    }
}

pub fn validate_longitude(longitude: f64) -> TrackerResult<f64> {
    let lon = finite("longitude", longitude)?;
    if (-180.0..=180.0).contains(&lon) {
        Ok(lon)
    } else {
        Err(TrackerError::LongitudeOutOfRange(lon))
    }
}

pub fn validate_utc_offset(hours: f64) -> TrackerResult<f64> {
    let h = finite("utc_offset_hours", hours)?;
    if h.abs() <= MAX_UTC_OFFSET_HOURS {
        Ok(h)
    } else {
        Err(TrackerError::UtcOffsetOutOfRange(h))
    }
}

impl ObservationInput {
    pub fn new(
        latitude: f64,
        longitude: f64,
        utc_offset_hours: f64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> TrackerResult<Self> {
        Ok(Self {
            latitude: validate_latitude(latitude)?,
            longitude: validate_longitude(longitude)?,
            utc_offset_hours: validate_utc_offset(utc_offset_hours)?,
            date,
            time,
        })
    }

    pub fn from_strings(
        latitude: f64,
        longitude: f64,
        utc_offset_hours: f64,
        date: &str,
        time: &str,
    ) -> TrackerResult<Self> {
        Self::new(
            latitude,
            longitude,
            utc_offset_hours,
            parse_date(date)?,
            parse_time(time)?,
        )
    }

    pub fn with_time(self, time: NaiveTime) -> Self {
        Self { time, ..self }
    }
}
