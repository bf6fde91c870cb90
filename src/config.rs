//! Tracker configuration: defaults, JSON loading and validation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{TrackerError, TrackerResult};
use crate::types::{
    ObservationInput, PanelGeometry, SunPathConfig, TrackerInputs, TrackingMode,
};

/// Default ground albedo (grass/soil)
pub const DEFAULT_ALBEDO: f64 = 0.2;

/// Everything the view needs to produce one frame. Date and time are kept
/// as text and only parsed by [`TrackerConfig::to_inputs`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset_hours: f64,
    /// Local civil date, YYYY-MM-DD
    pub date: String,
    /// Local civil time, HH:MM[:SS]
    pub time: String,
    pub mode: TrackingMode,
    pub manual_pitch_deg: f64,
    pub manual_yaw_deg: f64,
    pub panel: PanelGeometry,
    pub albedo: f64,
    pub path_interval_minutes: i32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            latitude: 48.8566,
            longitude: 2.3522,
            utc_offset_hours: 1.0,
            date: "2024-06-21".to_string(),
            time: "13:00".to_string(),
            mode: TrackingMode::Auto,
            manual_pitch_deg: 30.0,
            manual_yaw_deg: 180.0,
            panel: PanelGeometry::default(),
            albedo: DEFAULT_ALBEDO,
            path_interval_minutes: 15,
        }
    }
}

impl TrackerConfig {
    pub fn from_json_str(json: &str) -> TrackerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> TrackerResult<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading tracker config");
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    pub fn with_local_time(
        mut self,
        utc_offset_hours: f64,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        self.utc_offset_hours = utc_offset_hours;
        self.date = date.into();
        self.time = time.into();
        self
    }

    pub fn with_mode(mut self, mode: TrackingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_manual_pose(mut self, pitch_deg: f64, yaw_deg: f64) -> Self {
        self.manual_pitch_deg = pitch_deg;
        self.manual_yaw_deg = yaw_deg;
        self
    }

    pub fn with_panel(mut self, panel: PanelGeometry) -> Self {
        self.panel = panel;
        self
    }

    pub fn with_albedo(mut self, albedo: f64) -> Self {
        self.albedo = albedo;
        self
    }

    pub fn validate(&self) -> TrackerResult<()> {
        let geometry_checks = [
            ("panel.width_m", self.panel.width_m, self.panel.width_m > 0.0),
            ("panel.height_m", self.panel.height_m, self.panel.height_m > 0.0),
            (
                "panel.mount_height_m",
                self.panel.mount_height_m,
                self.panel.mount_height_m >= 0.0,
            ),
            ("albedo", self.albedo, (0.0..=1.0).contains(&self.albedo)),
        ];
        for (field, value, ok) in geometry_checks {
            if !value.is_finite() || !ok {
                return Err(TrackerError::InvalidGeometry { field, value });
            }
        }
        for (field, value) in [
            ("manual_pitch_deg", self.manual_pitch_deg),
            ("manual_yaw_deg", self.manual_yaw_deg),
        ] {
            if !value.is_finite() {
                return Err(TrackerError::NonFinite { field });
            }
        }
        if !(1..=1440).contains(&self.path_interval_minutes) {
            return Err(TrackerError::InvalidInterval(self.path_interval_minutes));
        }
        Ok(())
    }

    pub fn observation(&self) -> TrackerResult<ObservationInput> {
        ObservationInput::from_strings(
            self.latitude,
            self.longitude,
            self.utc_offset_hours,
            &self.date,
            &self.time,
        )
    }

    pub fn to_inputs(&self) -> TrackerResult<TrackerInputs> {
        self.validate()?;
        Ok(TrackerInputs {
            observation: self.observation()?,
            mode: self.mode,
            manual_pitch_deg: self.manual_pitch_deg,
            manual_yaw_deg: self.manual_yaw_deg,
            geometry: self.panel,
            albedo: self.albedo,
        })
    }

    pub fn sun_path_config(&self) -> SunPathConfig {
        SunPathConfig {
            interval_minutes: self.path_interval_minutes,
            mode: self.mode,
            manual_pitch_deg: self.manual_pitch_deg,
            manual_yaw_deg: self.manual_yaw_deg,
        }
    }
}
