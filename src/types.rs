use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Summer,
    Winter,
    Spring,
    Fall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingMode {
    /// Panel follows the sun exactly.
    #[default]
    Auto,
    /// Panel holds the user-chosen pitch and yaw.
    Manual,
}

/// Right-handed, Y-up direction. +Z points north, +X east.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Zero-length vectors come back unchanged.
    pub fn normalized(&self) -> Vec3 {
        let len = self.length();
        if len > 0.0 {
            Vec3::new(self.x / len, self.y / len, self.z / len)
        } else {
            *self
        }
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// One observation: where, and when in local civil time at `utc_offset_hours`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationInput {
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset_hours: f64,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunPosition {
    pub julian_day: f64,
    pub declination_deg: f64,
    pub equation_of_time_min: f64,
    pub true_solar_time_min: f64,
    pub hour_angle_deg: f64,
    pub zenith_deg: f64,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub direction: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelPose {
    pub pitch_deg: f64,
    pub yaw_deg: f64,
    pub normal: Vec3,
}

impl PanelPose {
    /// Tilt of the panel surface itself, 0 = lying flat.
    pub fn tilt_from_horizontal_deg(&self) -> f64 {
        90.0 - self.pitch_deg
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncidenceMetrics {
    pub incidence_angle_deg: f64,
    pub efficiency_fraction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelGeometry {
    pub width_m: f64,
    pub height_m: f64,
    pub mount_height_m: f64,
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self {
            width_m: 2.0,
            height_m: 1.0,
            mount_height_m: 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackerInputs {
    pub observation: ObservationInput,
    pub mode: TrackingMode,
    pub manual_pitch_deg: f64,
    pub manual_yaw_deg: f64,
    pub geometry: PanelGeometry,
    pub albedo: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackerFrame {
    pub inputs: TrackerInputs,
    pub sun: SunPosition,
    pub pose: PanelPose,
    pub metrics: IncidenceMetrics,
}

impl TrackerFrame {
    pub fn geometry(&self) -> PanelGeometry {
        self.inputs.geometry
    }

    pub fn albedo(&self) -> f64 {
        self.inputs.albedo
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunPathConfig {
    pub interval_minutes: i32,
    pub mode: TrackingMode,
    pub manual_pitch_deg: f64,
    pub manual_yaw_deg: f64,
}

impl Default for SunPathConfig {
    fn default() -> Self {
        Self {
            interval_minutes: 15,
            mode: TrackingMode::Auto,
            manual_pitch_deg: 30.0,
            manual_yaw_deg: 180.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunPathEntry {
    pub minutes: i32,
    pub sun: SunPosition,
    pub pose: PanelPose,
    pub metrics: IncidenceMetrics,
}

/// Interpolated point between two sun path entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunPathSample {
    pub minutes: i32,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub efficiency_fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunPath {
    pub observation: ObservationInput,
    pub config: SunPathConfig,
    pub entries: Vec<SunPathEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub sunrise_minutes: Option<i32>,
    pub sunset_minutes: Option<i32>,
    pub solar_noon_minutes: i32,
    pub peak_elevation_deg: f64,
    pub daylight_minutes: i32,
    pub mean_daylight_efficiency: f64,
}
