//! Command-Line Interface Module
//!
//! Every field of the tracker config can come from a JSON file, an
//! environment variable, or a flag (flag wins).

use std::path::PathBuf;

use chrono::{Duration, Utc};
use clap::{Parser, ValueEnum};

use solar_tracker_view::input::{validate_latitude, validate_longitude, validate_utc_offset};
use solar_tracker_view::{TrackerConfig, TrackingMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Auto,
    Manual,
}

impl From<ModeArg> for TrackingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => TrackingMode::Auto,
            ModeArg::Manual => TrackingMode::Manual,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// JSON file with a base tracker configuration
    #[arg(long, env = "SOLAR_TRACKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Observer latitude in decimal degrees (-90 to 90)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_latitude, env = "SOLAR_TRACKER_LATITUDE")]
    pub latitude: Option<f64>,
    /// Observer longitude in decimal degrees (-180 to 180, east positive)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_longitude, env = "SOLAR_TRACKER_LONGITUDE")]
    pub longitude: Option<f64>,
    /// Offset of the local civil time from UTC, in hours (e.g. 1, -5, 5.5)
    #[arg(long, allow_hyphen_values = true, value_parser = parse_utc_offset, env = "SOLAR_TRACKER_UTC_OFFSET")]
    pub utc_offset: Option<f64>,

    /// Local date, YYYY-MM-DD
    #[arg(long, env = "SOLAR_TRACKER_DATE")]
    pub date: Option<String>,
    /// Local time, HH:MM or HH:MM:SS
    #[arg(long, env = "SOLAR_TRACKER_TIME")]
    pub time: Option<String>,
    /// Use the current instant, shifted to the configured UTC offset
    #[arg(long, conflicts_with_all = ["date", "time"])]
    pub now: bool,

    /// Panel tracking mode
    #[arg(long, value_enum, env = "SOLAR_TRACKER_MODE")]
    pub mode: Option<ModeArg>,
    /// Manual panel pitch: elevation of the panel normal, clamped to 0-90 degrees
    #[arg(long, allow_hyphen_values = true, value_parser = parse_finite_f64, env = "SOLAR_TRACKER_PITCH")]
    pub pitch: Option<f64>,
    /// Manual panel yaw: compass bearing of the panel normal, degrees
    #[arg(long, allow_hyphen_values = true, value_parser = parse_finite_f64, env = "SOLAR_TRACKER_YAW")]
    pub yaw: Option<f64>,

    /// Panel width in meters
    #[arg(long, value_parser = parse_positive_f64, env = "SOLAR_TRACKER_PANEL_WIDTH")]
    pub panel_width: Option<f64>,
    /// Panel height in meters
    #[arg(long, value_parser = parse_positive_f64, env = "SOLAR_TRACKER_PANEL_HEIGHT")]
    pub panel_height: Option<f64>,
    /// Height of the panel pivot above ground in meters
    #[arg(long, value_parser = parse_non_negative_f64, env = "SOLAR_TRACKER_MOUNT_HEIGHT")]
    pub mount_height: Option<f64>,
    /// Ground albedo (0.0-1.0, 0.2 = grass, 0.8 = snow)
    #[arg(long, value_parser = parse_albedo, env = "SOLAR_TRACKER_ALBEDO")]
    pub albedo: Option<f64>,

    /// Also sample the whole day and print a sun path summary
    #[arg(long)]
    pub path: bool,
    /// Sun path sampling interval in minutes (1-1440)
    #[arg(long, value_parser = parse_interval, env = "SOLAR_TRACKER_INTERVAL")]
    pub interval: Option<i32>,

    /// Print JSON instead of the text report
    #[arg(long)]
    pub json: bool,
}

fn parse_latitude(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    validate_latitude(v).map_err(|e| e.to_string())
}

fn parse_longitude(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    validate_longitude(v).map_err(|e| e.to_string())
}

fn parse_utc_offset(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    validate_utc_offset(v).map_err(|e| e.to_string())
}

fn parse_finite_f64(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if !v.is_finite() {
        return Err(format!("value must be finite, got {}", v));
    }
    Ok(v)
}

fn parse_positive_f64(s: &str) -> Result<f64, String> {
    let v = parse_finite_f64(s)?;
    if v <= 0.0 {
        return Err(format!("value must be positive, got {}", v));
    }
    Ok(v)
}

fn parse_non_negative_f64(s: &str) -> Result<f64, String> {
    let v = parse_finite_f64(s)?;
    if v < 0.0 {
        return Err(format!("value must not be negative, got {}", v));
    }
    Ok(v)
}

fn parse_albedo(s: &str) -> Result<f64, String> {
    let v = parse_finite_f64(s)?;
    if !(0.0..=1.0).contains(&v) {
        return Err(format!("albedo must be between 0.0 and 1.0, got {}", v));
    }
    Ok(v)
}

fn parse_interval(s: &str) -> Result<i32, String> {
    let v: i32 = s.parse().map_err(|_| format!("'{}' is not a whole number of minutes", s))?;
    if !(1..=1440).contains(&v) {
        return Err(format!("interval must be between 1 and 1440 minutes, got {}", v));
    }
    Ok(v)
}

impl Args {
    /// Layers the flags over `base`.
    pub fn apply(&self, base: TrackerConfig) -> TrackerConfig {
        let mut cfg = base;
        if let Some(lat) = self.latitude {
            cfg.latitude = lat;
        }
        if let Some(lon) = self.longitude {
            cfg.longitude = lon;
        }
        if let Some(offset) = self.utc_offset {
            cfg.utc_offset_hours = offset;
        }
        if let Some(date) = &self.date {
            cfg.date = date.clone();
        }
        if let Some(time) = &self.time {
            cfg.time = time.clone();
        }
        if self.now {
            let shift = Duration::seconds((cfg.utc_offset_hours * 3600.0).round() as i64);
            let local = Utc::now().naive_utc() + shift;
            cfg.date = local.format("%Y-%m-%d").to_string();
            cfg.time = local.format("%H:%M:%S").to_string();
        }
        if let Some(mode) = self.mode {
            cfg.mode = mode.into();
        }
        if let Some(pitch) = self.pitch {
            cfg.manual_pitch_deg = pitch;
        }
        if let Some(yaw) = self.yaw {
            cfg.manual_yaw_deg = yaw;
        }
        if let Some(w) = self.panel_width {
            cfg.panel.width_m = w;
        }
        if let Some(h) = self.panel_height {
            cfg.panel.height_m = h;
        }
        if let Some(m) = self.mount_height {
            cfg.panel.mount_height_m = m;
        }
        if let Some(albedo) = self.albedo {
            cfg.albedo = albedo;
        }
        if let Some(interval) = self.interval {
            cfg.path_interval_minutes = interval;
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_base() {
        let args = Args::parse_from([
            "solar-tracker",
            "--latitude",
            "-33.9",
            "--longitude",
            "151.2",
            "--utc-offset",
            "10",
            "--mode",
            "manual",
            "--pitch",
            "45",
            "--yaw",
            "0",
        ]);
        let cfg = args.apply(TrackerConfig::default());
        assert_eq!(cfg.latitude, -33.9);
        assert_eq!(cfg.utc_offset_hours, 10.0);
        assert_eq!(cfg.mode, TrackingMode::Manual);
        assert_eq!(cfg.manual_pitch_deg, 45.0);
        assert_eq!(cfg.date, TrackerConfig::default().date);
    }

    #[test]
    fn test_latitude_rejected_by_parser() {
        assert!(Args::try_parse_from(["solar-tracker", "--latitude", "91"]).is_err());
        assert!(Args::try_parse_from(["solar-tracker", "--utc-offset", "x"]).is_err());
    }

    #[test]
    fn test_panel_values_rejected_by_parser() {
        for bad in [
            ["--pitch", "nan"],
            ["--yaw", "inf"],
            ["--panel-width", "0"],
            ["--panel-height", "-1"],
            ["--mount-height", "-0.5"],
            ["--albedo", "1.5"],
            ["--interval", "0"],
            ["--interval", "2000"],
            ["--interval", "7.5"],
        ] {
            let argv = ["solar-tracker", bad[0], bad[1]];
            assert!(Args::try_parse_from(argv).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_parsers_accept_boundaries() {
        assert_eq!(parse_finite_f64("-10"), Ok(-10.0));
        assert_eq!(parse_non_negative_f64("0"), Ok(0.0));
        assert_eq!(parse_albedo("1"), Ok(1.0));
        assert_eq!(parse_interval("1440"), Ok(1440));
        assert!(parse_positive_f64("0").is_err());
        assert!(parse_non_negative_f64("-0.5").is_err());
    }

    #[test]
    fn test_mount_height_from_env() {
        // Must stay a valid value, other tests parse concurrently
        std::env::set_var("SOLAR_TRACKER_MOUNT_HEIGHT", "0.75");
        let from_env = Args::try_parse_from(["solar-tracker"]).map(|a| a.mount_height);
        let from_flag = Args::try_parse_from(["solar-tracker", "--mount-height", "2"]).map(|a| a.mount_height);
        std::env::remove_var("SOLAR_TRACKER_MOUNT_HEIGHT");
        assert_eq!(from_env.unwrap(), Some(0.75));
        assert_eq!(from_flag.unwrap(), Some(2.0));
    }

    #[test]
    fn test_now_conflicts_with_date() {
        assert!(Args::try_parse_from(["solar-tracker", "--now", "--date", "2024-01-01"]).is_err());
    }
}
