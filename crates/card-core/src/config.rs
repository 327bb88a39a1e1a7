//! Runtime tuning for the card animation.
//!
//! Defaults come from `constants.rs`. A JSON document may override any
//! subset of fields; missing fields keep their defaults.

use crate::constants::*;
use crate::error::ConfigError;
use crate::smoothing::SmoothingMode;
use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub hover_smoothing: f32,
    pub tilt_smoothing: f32,
    pub scale_smoothing: f32,
    pub smoothing_mode: SmoothingMode,
    pub tilt_amplitude: f32,
    pub float_frequency: f32,
    pub float_amplitude: f32,
    pub collapsed_scale: f32,
    pub expanded_scale: f32,
    pub parallax_range_px: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            hover_smoothing: SMOOTHING_FACTOR,
            tilt_smoothing: SMOOTHING_FACTOR,
            scale_smoothing: SMOOTHING_FACTOR,
            smoothing_mode: SmoothingMode::PerFrame,
            tilt_amplitude: TILT_AMPLITUDE,
            float_frequency: FLOAT_FREQUENCY,
            float_amplitude: FLOAT_AMPLITUDE,
            collapsed_scale: COLLAPSED_SCALE,
            expanded_scale: EXPANDED_SCALE,
            parallax_range_px: PARALLAX_RANGE_PX,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Smoothing factors must lie in (0, 1]; scales must be positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let factors = [
            ("hover_smoothing", self.hover_smoothing),
            ("tilt_smoothing", self.tilt_smoothing),
            ("scale_smoothing", self.scale_smoothing),
        ];
        for (field, value) in factors {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        if let SmoothingMode::PerSecond { rate } = self.smoothing_mode {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(ConfigError::Invalid {
                    field: "smoothing_mode.rate",
                    value: rate,
                });
            }
        }
        let positive = [
            ("collapsed_scale", self.collapsed_scale),
            ("expanded_scale", self.expanded_scale),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        let finite = [
            ("tilt_amplitude", self.tilt_amplitude),
            ("float_frequency", self.float_frequency),
            ("float_amplitude", self.float_amplitude),
            ("parallax_range_px", self.parallax_range_px),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        Ok(())
    }
}
