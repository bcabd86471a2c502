// Viewer tuning, overridable from the guide document's `viewer` object.
use serde::{Deserialize, Serialize};

pub const MIN_SCALE: f64 = 1.0;
pub const MAX_SCALE: f64 = 5.0;
pub const WHEEL_STEP: f64 = 0.2;
pub const FOCUS_SCALE: f64 = 2.5;
pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;
pub const DOUBLE_TAP_SLOP_PX: f64 = 30.0;
pub const TRANSFORM_TRANSITION: &str = "transform 0.2s ease-out";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Scale change per wheel notch.
    pub wheel_step: f64,
    /// Scale a double-click/double-tap jumps to from rest.
    pub focus_scale: f64,
    pub double_tap_window_ms: f64,
    pub double_tap_slop_px: f64,
    /// CSS transition applied to the image transform when not dragging.
    pub transition: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            wheel_step: WHEEL_STEP,
            focus_scale: FOCUS_SCALE,
            double_tap_window_ms: DOUBLE_TAP_WINDOW_MS,
            double_tap_slop_px: DOUBLE_TAP_SLOP_PX,
            transition: TRANSFORM_TRANSITION.to_string(),
        }
    }
}

impl ViewerConfig {
    /// Repairs values that would break the scale invariants (hand-edited content).
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.min_scale.is_finite() || self.min_scale < 0.1 {
            self.min_scale = defaults.min_scale;
        }
        if !self.max_scale.is_finite() || self.max_scale < self.min_scale {
            self.max_scale = self.min_scale.max(defaults.max_scale);
        }
        if !self.wheel_step.is_finite() || self.wheel_step <= 0.0 {
            self.wheel_step = defaults.wheel_step;
        }
        if !self.focus_scale.is_finite() {
            self.focus_scale = defaults.focus_scale;
        }
        self.focus_scale = self.focus_scale.clamp(self.min_scale, self.max_scale);
        if !self.double_tap_window_ms.is_finite() || self.double_tap_window_ms < 0.0 {
            self.double_tap_window_ms = defaults.double_tap_window_ms;
        }
        if !self.double_tap_slop_px.is_finite() || self.double_tap_slop_px < 0.0 {
            self.double_tap_slop_px = defaults.double_tap_slop_px;
        }
        self
    }

    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}
