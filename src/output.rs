//! Text and JSON rendering of a tracker frame.

use std::fmt::{self, Write};

use serde::Serialize;

use solar_tracker_view::{minutes_to_time, DaySummary, TrackerFrame, TrackingMode};

#[derive(Serialize)]
pub struct Report<'a> {
    pub frame: &'a TrackerFrame,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<&'a DaySummary>,
}

pub fn format_hm(minutes: i32) -> String {
    let (h, m) = minutes_to_time(minutes);
    format!("{:02}:{:02}", h, m)
}

fn format_opt_hm(minutes: Option<i32>) -> String {
    minutes.map(format_hm).unwrap_or_else(|| "--:--".to_string())
}

pub fn format_offset(hours: f64) -> String {
    let sign = if hours < 0.0 { '-' } else { '+' };
    let total = (hours.abs() * 60.0).round() as i32;
    format!("UTC{}{:02}:{:02}", sign, total / 60, total % 60)
}

pub fn render_text(frame: &TrackerFrame, day: Option<&DaySummary>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_frame(&mut out, frame)?;
    if let Some(day) = day {
        write_day(&mut out, day)?;
    }
    Ok(out)
}

fn write_frame(out: &mut impl Write, frame: &TrackerFrame) -> fmt::Result {
    let obs = &frame.inputs.observation;
    let sun = &frame.sun;
    let pose = &frame.pose;
    let geom = frame.geometry();

    writeln!(out, "=== Solar Tracker ===")?;
    writeln!(
        out,
        "Location: {:.4}°, {:.4}°  {} {} {}",
        obs.latitude,
        obs.longitude,
        obs.date,
        obs.time,
        format_offset(obs.utc_offset_hours)
    )?;
    writeln!(out)?;
    writeln!(out, "--- Sun ---")?;
    writeln!(out, "Azimuth:          {:.2}° (0°=N, 90°=E, 180°=S)", sun.azimuth_deg)?;
    writeln!(out, "Elevation:        {:.2}°", sun.elevation_deg)?;
    writeln!(out, "Declination:      {:.2}°", sun.declination_deg)?;
    writeln!(out, "Equation of time: {:.2} min", sun.equation_of_time_min)?;
    writeln!(out, "Hour angle:       {:.2}°", sun.hour_angle_deg)?;
    writeln!(
        out,
        "Direction:        ({:.4}, {:.4}, {:.4})",
        sun.direction.x, sun.direction.y, sun.direction.z
    )?;
    writeln!(out)?;
    let mode = match frame.inputs.mode {
        TrackingMode::Auto => "auto",
        TrackingMode::Manual => "manual",
    };
    writeln!(out, "--- Panel ({}) ---", mode)?;
    writeln!(out, "Pitch:            {:.2}° (tilt {:.2}°)", pose.pitch_deg, pose.tilt_from_horizontal_deg())?;
    writeln!(out, "Yaw:              {:.2}°", pose.yaw_deg)?;
    writeln!(
        out,
        "Size:             {:.2} x {:.2} m at {:.2} m, albedo {:.2}",
        geom.width_m,
        geom.height_m,
        geom.mount_height_m,
        frame.albedo()
    )?;
    writeln!(out, "Incidence angle:  {:.2}°", frame.metrics.incidence_angle_deg)?;
    writeln!(
        out,
        "Efficiency:       {:.1}% (cosine proxy)",
        frame.metrics.efficiency_fraction * 100.0
    )
}

fn write_day(out: &mut impl Write, day: &DaySummary) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "--- Day ---")?;
    writeln!(out, "Sunrise (sampled): {}", format_opt_hm(day.sunrise_minutes))?;
    writeln!(out, "Sunset (sampled):  {}", format_opt_hm(day.sunset_minutes))?;
    writeln!(out, "Solar noon:        {}", format_hm(day.solar_noon_minutes))?;
    writeln!(out, "Peak elevation:    {:.2}°", day.peak_elevation_deg)?;
    writeln!(out, "Daylight:          {} min", day.daylight_minutes)?;
    writeln!(out, "Mean efficiency:   {:.1}%", day.mean_daylight_efficiency * 100.0)
}

pub fn render_json(frame: &TrackerFrame, day: Option<&DaySummary>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Report { frame, day })
}
