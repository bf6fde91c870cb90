use chrono::TimeZone;
use chrono_tz::Europe::Paris;

use solar_tracker_view::angles::observation_at;
use solar_tracker_view::{
    compute_incidence_metrics, compute_panel_pose, compute_sun_position, optimal_fixed_tilt,
    suggested_manual_pose, TrackingMode,
};

fn main() {
    let latitude = 48.8566;
    let longitude = 2.3522;

    // Summer time: Paris is at UTC+2 on this date
    let dt = Paris.with_ymd_and_hms(2024, 6, 21, 14, 0, 0).unwrap();
    let obs = observation_at(latitude, longitude, &dt);

    let sun = compute_sun_position(&obs);
    let tracked = compute_panel_pose(TrackingMode::Auto, &sun, 0.0, 0.0);
    let (pitch, yaw) = suggested_manual_pose(latitude);
    let fixed = compute_panel_pose(TrackingMode::Manual, &sun, pitch, yaw);

    println!("=== Solar Position Calculation Example ===");
    println!("Location: Paris ({:.4}°N, {:.4}°E)", latitude, longitude);
    println!("Date/Time: {} (UTC{:+})", dt, obs.utc_offset_hours);
    println!();
    println!("--- Solar Position ---");
    println!("Julian day: {:.4}", sun.julian_day);
    println!("Declination: {:.2}°", sun.declination_deg);
    println!("Equation of Time: {:.2} minutes", sun.equation_of_time_min);
    println!("Hour Angle: {:.2}°", sun.hour_angle_deg);
    println!("Elevation: {:.2}°", sun.elevation_deg);
    println!("Azimuth: {:.2}° (0°=N, 90°=E, 180°=S)", sun.azimuth_deg);
    println!();
    println!("--- Panel ---");
    let m = compute_incidence_metrics(&sun.direction, &tracked.normal);
    println!(
        "Dual-axis tracked: pitch {:.2}°, yaw {:.2}°, efficiency {:.1}%",
        tracked.pitch_deg,
        tracked.yaw_deg,
        m.efficiency_fraction * 100.0
    );
    let m = compute_incidence_metrics(&sun.direction, &fixed.normal);
    println!(
        "Fixed at optimal tilt {:.1}°: incidence {:.2}°, efficiency {:.1}%",
        optimal_fixed_tilt(latitude),
        m.incidence_angle_deg,
        m.efficiency_fraction * 100.0
    );
}
