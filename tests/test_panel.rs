use chrono::{NaiveDate, NaiveTime};

use solar_tracker_view::panel::*;
use solar_tracker_view::types::{ObservationInput, Season, SunPosition, TrackingMode, Vec3};
use solar_tracker_view::{compute_sun_position, direction_vector};

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn sun_at(azimuth: f64, elevation: f64) -> SunPosition {
    SunPosition {
        julian_day: 2460483.0,
        declination_deg: 0.0,
        equation_of_time_min: 0.0,
        true_solar_time_min: 720.0,
        hour_angle_deg: 0.0,
        zenith_deg: 90.0 - elevation,
        azimuth_deg: azimuth,
        elevation_deg: elevation,
        direction: direction_vector(azimuth, elevation),
    }
}

fn paris_solstice() -> SunPosition {
    compute_sun_position(&ObservationInput {
        latitude: 48.8566,
        longitude: 2.3522,
        utc_offset_hours: 1.0,
        date: NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
        time: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
    })
}

// ── Incidence metrics ──

#[test]
fn test_normal_facing_sun() {
    let sun = paris_solstice();
    let m = compute_incidence_metrics(&sun.direction, &sun.direction);
    assert_approx!(m.incidence_angle_deg, 0.0, 1e-4);
    assert_approx!(m.efficiency_fraction, 1.0, 1e-9);
}

#[test]
fn test_normal_facing_away() {
    let sun = paris_solstice();
    let m = compute_incidence_metrics(&sun.direction, &-sun.direction);
    assert_approx!(m.incidence_angle_deg, 180.0, 1e-4);
    assert_eq!(m.efficiency_fraction, 0.0);
}

#[test]
fn test_perpendicular_gives_zero() {
    let m = compute_incidence_metrics(&Vec3::new(0.0, 1.0, 0.0), &Vec3::new(1.0, 0.0, 0.0));
    assert_approx!(m.incidence_angle_deg, 90.0, 1e-9);
    assert_approx!(m.efficiency_fraction, 0.0, 1e-12);
}

#[test]
fn test_sixty_degrees_is_half() {
    let m = compute_incidence_metrics(&direction_vector(180.0, 30.0), &direction_vector(180.0, 90.0));
    assert_approx!(m.incidence_angle_deg, 60.0, 1e-9);
    assert_approx!(m.efficiency_fraction, 0.5, 1e-9);
}

#[test]
fn test_overshooting_dot_is_clamped() {
    let v = Vec3::new(1.0 + 1e-12, 0.0, 0.0);
    let m = compute_incidence_metrics(&v, &v);
    assert!(!m.incidence_angle_deg.is_nan());
    assert_eq!(m.efficiency_fraction, 1.0);
}

#[test]
fn test_efficiency_in_unit_range() {
    for az in (0..360).step_by(30) {
        for el in (-5..=90).step_by(5) {
            let sun = sun_at(az as f64, el as f64);
            let pose = compute_panel_pose(TrackingMode::Manual, &sun, 35.0, 180.0);
            let m = compute_incidence_metrics(&sun.direction, &pose.normal);
            assert!((0.0..=1.0).contains(&m.efficiency_fraction));
            assert!((0.0..=180.0).contains(&m.incidence_angle_deg));
        }
    }
}

// ── Panel pose ──

#[test]
fn test_auto_copies_sun_angles() {
    let sun = paris_solstice();
    let pose = compute_panel_pose(TrackingMode::Auto, &sun, 10.0, 10.0);
    assert_eq!(pose.pitch_deg, sun.elevation_deg);
    assert_eq!(pose.yaw_deg, sun.azimuth_deg);
    let m = compute_incidence_metrics(&sun.direction, &pose.normal);
    assert_approx!(m.efficiency_fraction, 1.0, 1e-9);
}

#[test]
fn test_auto_below_horizon_holds_pitch_at_zero() {
    let sun = sun_at(300.0, -4.0);
    let pose = compute_panel_pose(TrackingMode::Auto, &sun, 45.0, 180.0);
    assert_eq!(pose.pitch_deg, 0.0);
    assert_eq!(pose.yaw_deg, 300.0);
    assert_approx!(pose.normal.y, 0.0, 1e-12);
    let m = compute_incidence_metrics(&sun.direction, &pose.normal);
    assert_approx!(m.incidence_angle_deg, 4.0, 1e-6);
    assert_approx!(m.efficiency_fraction, 4.0_f64.to_radians().cos(), 1e-9);
}

#[test]
fn test_manual_pass_through_ignores_sun() {
    for sun in [sun_at(90.0, 10.0), sun_at(250.0, 70.0), paris_solstice()] {
        let pose = compute_panel_pose(TrackingMode::Manual, &sun, 35.0, 200.0);
        assert_eq!(pose.pitch_deg, 35.0);
        assert_eq!(pose.yaw_deg, 200.0);
    }
}

#[test]
fn test_manual_pitch_clamped_and_yaw_normalized() {
    let sun = sun_at(180.0, 45.0);
    let pose = compute_panel_pose(TrackingMode::Manual, &sun, 120.0, -90.0);
    assert_eq!(pose.pitch_deg, 90.0);
    assert_approx!(pose.yaw_deg, 270.0, 1e-12);
    let pose = compute_panel_pose(TrackingMode::Manual, &sun, -10.0, 725.0);
    assert_eq!(pose.pitch_deg, 0.0);
    assert_approx!(pose.yaw_deg, 5.0, 1e-9);
}

#[test]
fn test_pose_normal_is_unit() {
    for pitch in (0..=90).step_by(15) {
        for yaw in (0..360).step_by(45) {
            let pose = pose_from_angles(pitch as f64, yaw as f64);
            assert_approx!(pose.normal.length(), 1.0, 1e-9);
        }
    }
}

#[test]
fn test_flat_panel_points_up() {
    let pose = pose_from_angles(90.0, 180.0);
    assert_approx!(pose.normal.y, 1.0, 1e-12);
    assert_approx!(pose.tilt_from_horizontal_deg(), 0.0, 1e-12);
}

// ── Fixed tilt heuristics ──

#[test]
fn test_optimal_fixed_tilt_formula_values() {
    assert_approx!(optimal_fixed_tilt(40.0), 33.5, 0.1);
    assert_approx!(optimal_fixed_tilt(0.0), 3.1, 0.1);
    assert_approx!(optimal_fixed_tilt(-40.0), 33.5, 0.1);
}

#[test]
fn test_seasonal_tilt_ordering() {
    let lat = 40.0;
    assert_approx!(seasonal_tilt_adjustment(lat, Season::Summer), 25.0, 1e-9);
    assert_approx!(seasonal_tilt_adjustment(lat, Season::Winter), 55.0, 1e-9);
    assert_approx!(seasonal_tilt_adjustment(lat, Season::Spring), 40.0, 1e-9);
    assert_approx!(seasonal_tilt_adjustment(lat, Season::Fall), 40.0, 1e-9);
}

#[test]
fn test_suggested_pose_faces_equator() {
    let (pitch, yaw) = suggested_manual_pose(48.8566);
    assert_eq!(yaw, 180.0);
    assert_approx!(pitch, 90.0 - optimal_fixed_tilt(48.8566), 1e-12);
    let (_, yaw) = suggested_manual_pose(-33.9);
    assert_eq!(yaw, 0.0);
}

#[test]
fn test_suggested_pose_beats_flat_at_winter_noon() {
    let sun = compute_sun_position(&ObservationInput {
        latitude: 48.8566,
        longitude: 2.3522,
        utc_offset_hours: 1.0,
        date: NaiveDate::from_ymd_opt(2024, 12, 21).unwrap(),
        time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
    });
    let (pitch, yaw) = suggested_manual_pose(48.8566);
    let tilted = compute_panel_pose(TrackingMode::Manual, &sun, pitch, yaw);
    let flat = compute_panel_pose(TrackingMode::Manual, &sun, 90.0, 0.0);
    let e_tilted = compute_incidence_metrics(&sun.direction, &tilted.normal).efficiency_fraction;
    let e_flat = compute_incidence_metrics(&sun.direction, &flat.normal).efficiency_fraction;
    assert!(e_tilted > e_flat, "tilted={} flat={}", e_tilted, e_flat);
}
