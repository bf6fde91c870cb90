use tracing::debug;

use crate::angles::{direction_vector, normalize_angle, rad_to_deg};
use crate::types::{IncidenceMetrics, PanelPose, Season, SunPosition, TrackingMode, Vec3};

pub const MIN_PITCH: f64 = 0.0;
pub const MAX_PITCH: f64 = 90.0;

pub fn clamp_pitch(pitch: f64) -> f64 {
    let clamped = pitch.clamp(MIN_PITCH, MAX_PITCH);
    if clamped != pitch {
        debug!(requested = pitch, used = clamped, "pitch clamped");
    }
    clamped
}

pub fn pose_from_angles(pitch: f64, yaw: f64) -> PanelPose {
    PanelPose {
        pitch_deg: pitch,
        yaw_deg: yaw,
        normal: direction_vector(yaw, pitch),
    }
}

/// Auto mode points the panel normal at the sun. Elevations below the
/// horizon (down to the -5° floor) are held at pitch 0 in both modes.
pub fn compute_panel_pose(
    mode: TrackingMode,
    sun: &SunPosition,
    manual_pitch: f64,
    manual_yaw: f64,
) -> PanelPose {
    let (pitch, yaw) = match mode {
        TrackingMode::Auto => (clamp_pitch(sun.elevation_deg), normalize_angle(sun.azimuth_deg)),
        TrackingMode::Manual => (clamp_pitch(manual_pitch), normalize_angle(manual_yaw)),
    };
    pose_from_angles(pitch, yaw)
}

/// Cosine-law efficiency proxy. Not an irradiance model.
pub fn compute_incidence_metrics(sun_direction: &Vec3, panel_normal: &Vec3) -> IncidenceMetrics {
    let cos_angle = sun_direction.dot(panel_normal).clamp(-1.0, 1.0);
    let incidence = rad_to_deg(cos_angle.acos());
    IncidenceMetrics {
        incidence_angle_deg: incidence,
        efficiency_fraction: cos_angle.max(0.0),
    }
}

/// Tilt from horizontal for a year-round fixed panel.
pub fn optimal_fixed_tilt(latitude: f64) -> f64 {
    0.76 * latitude.abs() + 3.1
}

pub fn seasonal_tilt_adjustment(latitude: f64, season: Season) -> f64 {
    match season {
        Season::Summer => latitude.abs() - 15.0,
        Season::Winter => latitude.abs() + 15.0,
        Season::Spring | Season::Fall => latitude.abs(),
    }
}

/// Equator-facing (pitch, yaw) for seeding manual mode.
pub fn suggested_manual_pose(latitude: f64) -> (f64, f64) {
    let yaw = if latitude >= 0.0 { 180.0 } else { 0.0 };
    (clamp_pitch(90.0 - optimal_fixed_tilt(latitude)), yaw)
}
