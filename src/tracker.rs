//! Input snapshot and the full Input → Sun → Pose → Metrics derivation.

use tracing::debug;

use crate::angles::compute_sun_position;
use crate::panel::{compute_incidence_metrics, compute_panel_pose};
use crate::types::{ObservationInput, TrackerFrame, TrackerInputs, TrackingMode};

pub fn evaluate(inputs: &TrackerInputs) -> TrackerFrame {
    let sun = compute_sun_position(&inputs.observation);
    let pose = compute_panel_pose(
        inputs.mode,
        &sun,
        inputs.manual_pitch_deg,
        inputs.manual_yaw_deg,
    );
    let metrics = compute_incidence_metrics(&sun.direction, &pose.normal);
    TrackerFrame {
        inputs: *inputs,
        sun,
        pose,
        metrics,
    }
}

/// Holds the current inputs and the frame derived from them. A frame is
/// only recomputed when the inputs actually change.
#[derive(Debug, Clone)]
pub struct Tracker {
    frame: TrackerFrame,
    recomputations: u64,
}

impl Tracker {
    pub fn new(inputs: TrackerInputs) -> Self {
        Self {
            frame: evaluate(&inputs),
            recomputations: 1,
        }
    }

    pub fn inputs(&self) -> &TrackerInputs {
        &self.frame.inputs
    }

    pub fn frame(&self) -> &TrackerFrame {
        &self.frame
    }

    /// Number of times the derivation chain has actually run.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn update(&mut self, inputs: TrackerInputs) -> &TrackerFrame {
        if inputs == self.frame.inputs {
            debug!("inputs unchanged, reusing frame");
        } else {
            self.frame = evaluate(&inputs);
            self.recomputations += 1;
            debug!(count = self.recomputations, "frame recomputed");
        }
        &self.frame
    }

    pub fn set_mode(&mut self, mode: TrackingMode) -> &TrackerFrame {
        self.update(TrackerInputs {
            mode,
            ..self.frame.inputs
        })
    }

    pub fn set_manual_pose(&mut self, pitch_deg: f64, yaw_deg: f64) -> &TrackerFrame {
        self.update(TrackerInputs {
            manual_pitch_deg: pitch_deg,
            manual_yaw_deg: yaw_deg,
            ..self.frame.inputs
        })
    }

    pub fn set_observation(&mut self, observation: ObservationInput) -> &TrackerFrame {
        self.update(TrackerInputs {
            observation,
            ..self.frame.inputs
        })
    }
}
