pub mod angles;
pub mod config;
pub mod error;
pub mod input;
pub mod panel;
pub mod sun_path;
pub mod tracker;
pub mod types;

pub use angles::{
    apparent_longitude, compute_sun_position, corrected_obliquity, deg_to_rad, direction_vector,
    equation_of_center, equation_of_time, geom_mean_anomaly, geom_mean_longitude, hour_angle,
    julian_century, julian_day, julian_day_number, local_hours, mean_obliquity, normalize_angle,
    observation_at, orbit_eccentricity, rad_to_deg, solar_azimuth, solar_declination,
    solar_elevation, solar_position, solar_zenith_angle, true_longitude, true_solar_time,
    ELEVATION_FLOOR, J2000,
};

pub use config::TrackerConfig;

pub use error::{TrackerError, TrackerResult};

pub use input::{parse_date, parse_time};

pub use panel::{
    compute_incidence_metrics, compute_panel_pose, optimal_fixed_tilt, pose_from_angles,
    seasonal_tilt_adjustment, suggested_manual_pose,
};

pub use sun_path::{
    generate_sun_path, interpolate_angle, intervals_per_day, lookup_sun_path, minutes_to_time,
    summarize, time_to_minutes,
};

pub use tracker::{evaluate, Tracker};

pub use types::{
    DaySummary, IncidenceMetrics, ObservationInput, PanelGeometry, PanelPose, Season, SunPath,
    SunPathConfig, SunPathEntry, SunPathSample, SunPosition, TrackerFrame, TrackerInputs,
    TrackingMode, Vec3,
};
