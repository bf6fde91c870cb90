//! Solar ephemeris, NOAA geometric-mean formulation.
//!
//! Every public angle is in degrees; trigonometry runs in radians.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Offset, TimeZone, Timelike};
use tracing::{debug, trace};

use crate::types::{ObservationInput, SunPosition, Vec3};

pub const J2000: f64 = 2451545.0;
pub const DAYS_PER_CENTURY: f64 = 36525.0;
pub const MINUTES_PER_DAY: f64 = 1440.0;
pub const ELEVATION_FLOOR: f64 = -5.0;
/// Below this `cos(lat) * sin(zenith)` the azimuth is undefined and reported as 0.
pub const AZIMUTH_DEGENERATE_EPS: f64 = 0.001;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Gregorian calendar date to integer Julian Day Number (the day starting at noon).
pub fn julian_day_number(year: i32, month: u32, day: u32) -> i64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    ((365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b - 1524.0)
        as i64
}

pub fn local_hours(time: &NaiveTime) -> f64 {
    time.hour() as f64 + time.minute() as f64 / 60.0 + time.second() as f64 / 3600.0
}

pub fn julian_day(date: &NaiveDate, time: &NaiveTime, utc_offset_hours: f64) -> f64 {
    let jdn = julian_day_number(date.year(), date.month(), date.day());
    jdn as f64 + (local_hours(time) - utc_offset_hours) / 24.0 - 0.5
}

pub fn julian_century(jd: f64) -> f64 {
    (jd - J2000) / DAYS_PER_CENTURY
}

pub fn geom_mean_longitude(t: f64) -> f64 {
    normalize_angle(280.46646 + t * (36000.76983 + t * 0.0003032))
}

pub fn geom_mean_anomaly(t: f64) -> f64 {
    357.52911 + t * (35999.05029 - 0.0001537 * t)
}

pub fn orbit_eccentricity(t: f64) -> f64 {
    0.016708634 - t * (0.000042037 + 0.0000001267 * t)
}

pub fn equation_of_center(t: f64) -> f64 {
    let m = deg_to_rad(geom_mean_anomaly(t));
    m.sin() * (1.914602 - t * (0.004817 + 0.000014 * t))
        + (2.0 * m).sin() * (0.019993 - 0.000101 * t)
        + (3.0 * m).sin() * 0.000289
}

pub fn true_longitude(t: f64) -> f64 {
    geom_mean_longitude(t) + equation_of_center(t)
}

fn omega(t: f64) -> f64 {
    deg_to_rad(125.04 - 1934.136 * t)
}

pub fn apparent_longitude(t: f64) -> f64 {
    true_longitude(t) - 0.00569 - 0.00478 * omega(t).sin()
}

pub fn mean_obliquity(t: f64) -> f64 {
    let seconds = 21.448 - t * (46.815 + t * (0.00059 - t * 0.001813));
    23.0 + (26.0 + seconds / 60.0) / 60.0
}

pub fn corrected_obliquity(t: f64) -> f64 {
    mean_obliquity(t) + 0.00256 * omega(t).cos()
}

pub fn solar_declination(t: f64) -> f64 {
    let eps = deg_to_rad(corrected_obliquity(t));
    let lambda = deg_to_rad(apparent_longitude(t));
    rad_to_deg((eps.sin() * lambda.sin()).clamp(-1.0, 1.0).asin())
}

/// Minutes between apparent and mean solar time.
pub fn equation_of_time(t: f64) -> f64 {
    let y = (deg_to_rad(corrected_obliquity(t)) / 2.0).tan().powi(2);
    let l0 = deg_to_rad(geom_mean_longitude(t));
    let m = deg_to_rad(geom_mean_anomaly(t));
    let e = orbit_eccentricity(t);
    4.0 * rad_to_deg(
        y * (2.0 * l0).sin() - 2.0 * e * m.sin() + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
            - 0.5 * y * y * (4.0 * l0).sin()
            - 1.25 * e * e * (2.0 * m).sin(),
    )
}

pub fn true_solar_time(
    local_minutes: f64,
    eot_minutes: f64,
    longitude: f64,
    utc_offset_hours: f64,
) -> f64 {
    (local_minutes + eot_minutes + 4.0 * longitude - 60.0 * utc_offset_hours)
        .rem_euclid(MINUTES_PER_DAY)
}

pub fn hour_angle(true_solar_time_min: f64) -> f64 {
    let ha = true_solar_time_min / 4.0 - 180.0;
    if ha < -180.0 {
        ha + 360.0
    } else {
        ha
    }
}

pub fn solar_zenith_angle(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    let cos_zenith =
        lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos() * ha_rad.cos();
    rad_to_deg(cos_zenith.clamp(-1.0, 1.0).acos())
}

pub fn solar_elevation(zenith_angle: f64) -> f64 {
    90.0 - zenith_angle
}

/// Compass bearing of the sun, clockwise from north. Returns 0 when the sun
/// sits at the zenith or nadir, or the observer at a pole.
pub fn solar_azimuth(latitude: f64, declination: f64, hour_angle: f64, zenith: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let zen_rad = deg_to_rad(zenith);
    let denom = lat_rad.cos() * zen_rad.sin();
    if denom.abs() <= AZIMUTH_DEGENERATE_EPS {
        debug!(latitude, zenith, "degenerate azimuth geometry, reporting 0");
        return 0.0;
    }
    let ratio = (dec_rad.sin() - lat_rad.sin() * zen_rad.cos()) / denom;
    let az = rad_to_deg(ratio.clamp(-1.0, 1.0).acos());
    if deg_to_rad(hour_angle).sin() > 0.0 {
        normalize_angle(360.0 - az)
    } else {
        normalize_angle(az)
    }
}

/// Spherical to Cartesian in the Y-up frame, normalised.
pub fn direction_vector(azimuth: f64, elevation: f64) -> Vec3 {
    let az = deg_to_rad(azimuth);
    let el = deg_to_rad(elevation);
    Vec3::new(az.sin() * el.cos(), el.sin(), az.cos() * el.cos()).normalized()
}

pub fn compute_sun_position(input: &ObservationInput) -> SunPosition {
    let jd = julian_day(&input.date, &input.time, input.utc_offset_hours);
    let t = julian_century(jd);
    let decl = solar_declination(t);
    let eot = equation_of_time(t);
    let tst = true_solar_time(
        local_hours(&input.time) * 60.0,
        eot,
        input.longitude,
        input.utc_offset_hours,
    );
    let ha = hour_angle(tst);
    let zenith = solar_zenith_angle(input.latitude, decl, ha);
    let azimuth = solar_azimuth(input.latitude, decl, ha, zenith);
    let elevation = solar_elevation(zenith).max(ELEVATION_FLOOR);
    trace!(jd, decl, eot, tst, ha, zenith, azimuth, elevation, "sun position");

    SunPosition {
        julian_day: jd,
        declination_deg: decl,
        equation_of_time_min: eot,
        true_solar_time_min: tst,
        hour_angle_deg: ha,
        zenith_deg: zenith,
        azimuth_deg: azimuth,
        elevation_deg: elevation,
        direction: direction_vector(azimuth, elevation),
    }
}

/// Observation for a zoned instant, using the zone's offset at that instant.
pub fn observation_at<Tz: TimeZone>(
    latitude: f64,
    longitude: f64,
    dt: &DateTime<Tz>,
) -> ObservationInput {
    let offset_secs = dt.offset().fix().local_minus_utc();
    let local = dt.naive_local();
    ObservationInput {
        latitude,
        longitude,
        utc_offset_hours: offset_secs as f64 / 3600.0,
        date: local.date(),
        time: local.time(),
    }
}

pub fn solar_position<Tz: TimeZone>(latitude: f64, longitude: f64, dt: &DateTime<Tz>) -> SunPosition {
    compute_sun_position(&observation_at(latitude, longitude, dt))
}
