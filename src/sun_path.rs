use chrono::NaiveTime;

use crate::angles::{compute_sun_position, solar_elevation};
use crate::error::{TrackerError, TrackerResult};
use crate::panel::{compute_incidence_metrics, compute_panel_pose};
use crate::types::{DaySummary, ObservationInput, SunPath, SunPathConfig, SunPathEntry, SunPathSample};

pub fn minutes_to_time(total_minutes: i32) -> (i32, i32) {
    (total_minutes / 60, total_minutes % 60)
}

pub fn time_to_minutes(time: (i32, i32)) -> i32 {
    time.0 * 60 + time.1
}

pub fn intervals_per_day(interval_minutes: i32) -> i32 {
    1440 / interval_minutes
}

pub fn interpolate_angle(a1: f64, a2: f64, fraction: f64) -> f64 {
    let diff = a2 - a1;
    let adjusted_diff = if diff > 180.0 {
        diff - 360.0
    } else if diff < -180.0 {
        diff + 360.0
    } else {
        diff
    };
    (a1 + adjusted_diff * fraction).rem_euclid(360.0)
}

fn interpolate_linear(a: f64, b: f64, fraction: f64) -> f64 {
    a + fraction * (b - a)
}

fn validate_interval(interval_minutes: i32) -> TrackerResult<i32> {
    if (1..=1440).contains(&interval_minutes) {
        Ok(interval_minutes)
    } else {
        Err(TrackerError::InvalidInterval(interval_minutes))
    }
}

/// Samples the observation's local date from midnight in fixed steps. The
/// observation's own time of day is ignored.
pub fn generate_sun_path(
    observation: &ObservationInput,
    config: &SunPathConfig,
) -> TrackerResult<SunPath> {
    let interval = validate_interval(config.interval_minutes)?;
    let n_intervals = intervals_per_day(interval);
    let mut entries = Vec::with_capacity(n_intervals as usize);

    for i in 0..n_intervals {
        let minutes = i * interval;
        let time = NaiveTime::from_num_seconds_from_midnight_opt(minutes as u32 * 60, 0)
            .ok_or(TrackerError::InvalidInterval(interval))?;
        let sun = compute_sun_position(&observation.with_time(time));
        let pose = compute_panel_pose(config.mode, &sun, config.manual_pitch_deg, config.manual_yaw_deg);
        let metrics = compute_incidence_metrics(&sun.direction, &pose.normal);
        entries.push(SunPathEntry {
            minutes,
            sun,
            pose,
            metrics,
        });
    }

    Ok(SunPath {
        observation: *observation,
        config: *config,
        entries,
    })
}

fn find_bracketing_entries(
    entries: &[SunPathEntry],
    interval_minutes: i32,
    minutes: i32,
) -> Option<(&SunPathEntry, Option<&SunPathEntry>, f64)> {
    let first_minutes = entries.first()?.minutes;
    let last_minutes = entries.last()?.minutes;
    if minutes < first_minutes || minutes > last_minutes {
        return None;
    }

    let idx_before =
        ((minutes - first_minutes) / interval_minutes).min(entries.len() as i32 - 1) as usize;
    let entry_before = &entries[idx_before];
    let t0 = entry_before.minutes;

    match entries.get(idx_before + 1) {
        Some(entry_after) if minutes != t0 => {
            let fraction = (minutes - t0) as f64 / (entry_after.minutes - t0) as f64;
            Some((entry_before, Some(entry_after), fraction))
        }
        _ => Some((entry_before, None, 0.0)),
    }
}

pub fn lookup_sun_path(path: &SunPath, minutes: i32) -> Option<SunPathSample> {
    let (before, after, fraction) =
        find_bracketing_entries(&path.entries, path.config.interval_minutes, minutes)?;
    match after {
        None => Some(SunPathSample {
            minutes,
            azimuth_deg: before.sun.azimuth_deg,
            elevation_deg: before.sun.elevation_deg,
            efficiency_fraction: before.metrics.efficiency_fraction,
        }),
        Some(after) => Some(SunPathSample {
            minutes,
            azimuth_deg: interpolate_angle(before.sun.azimuth_deg, after.sun.azimuth_deg, fraction),
            elevation_deg: interpolate_linear(
                before.sun.elevation_deg,
                after.sun.elevation_deg,
                fraction,
            ),
            efficiency_fraction: interpolate_linear(
                before.metrics.efficiency_fraction,
                after.metrics.efficiency_fraction,
                fraction,
            ),
        }),
    }
}

pub fn summarize(path: &SunPath) -> DaySummary {
    let daylight: Vec<&SunPathEntry> =
        path.entries.iter().filter(|e| e.sun.elevation_deg > 0.0).collect();

    // Unfloored elevation: noon and peak exist even when the sun never clears -5°
    let (solar_noon_minutes, peak_elevation_deg) = path
        .entries
        .iter()
        .fold((0, f64::NEG_INFINITY), |(noon, peak), e| {
            let elevation = solar_elevation(e.sun.zenith_deg);
            if elevation > peak {
                (e.minutes, elevation)
            } else {
                (noon, peak)
            }
        });

    let mean_daylight_efficiency = if daylight.is_empty() {
        0.0
    } else {
        daylight.iter().map(|e| e.metrics.efficiency_fraction).sum::<f64>() / daylight.len() as f64
    };

    DaySummary {
        sunrise_minutes: daylight.first().map(|e| e.minutes),
        sunset_minutes: daylight.last().map(|e| e.minutes),
        solar_noon_minutes,
        peak_elevation_deg,
        daylight_minutes: daylight.len() as i32 * path.config.interval_minutes,
        mean_daylight_efficiency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_angle_wraps_short_way() {
        assert!((interpolate_angle(350.0, 10.0, 0.5) - 0.0).abs() < 1e-9);
        assert!((interpolate_angle(10.0, 350.0, 0.25) - 5.0).abs() < 1e-9);
        assert!((interpolate_angle(90.0, 180.0, 0.5) - 135.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_interval() {
        assert!(validate_interval(0).is_err());
        assert!(validate_interval(-5).is_err());
        assert!(validate_interval(1441).is_err());
        assert_eq!(validate_interval(15).unwrap(), 15);
    }
}
