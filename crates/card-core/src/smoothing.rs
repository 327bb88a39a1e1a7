//! Exponential smoothing toward a target.
//!
//! Every continuous quantity of the card (hover intensity, tilt, scale) is
//! driven by the same damped interpolation law so they share a settle time
//! and never jump when their target changes.

use glam::{Vec2, Vec3};
use serde::Deserialize;

/// Linear interpolation, applied componentwise for vectors.
pub trait Lerp: Copy {
    fn lerp_to(self, target: Self, factor: f32) -> Self;
    fn distance_to(self, target: Self) -> f32;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_to(self, target: Self, factor: f32) -> Self {
        self + (target - self) * factor
    }

    #[inline]
    fn distance_to(self, target: Self) -> f32 {
        (target - self).abs()
    }
}

impl Lerp for Vec2 {
    #[inline]
    fn lerp_to(self, target: Self, factor: f32) -> Self {
        self + (target - self) * factor
    }

    #[inline]
    fn distance_to(self, target: Self) -> f32 {
        (target - self).abs().max_element()
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp_to(self, target: Self, factor: f32) -> Self {
        self + (target - self) * factor
    }

    #[inline]
    fn distance_to(self, target: Self) -> f32 {
        (target - self).abs().max_element()
    }
}

/// `current + (target - current) * factor`.
///
/// With `factor` in (0, 1] the result never overshoots `target`.
#[inline]
pub fn smooth<T: Lerp>(current: T, target: T, factor: f32) -> T {
    current.lerp_to(target, factor)
}

/// How the configured smoothing factor is turned into a per-frame weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SmoothingMode {
    /// The factor is applied once per rendered frame, so settle time depends
    /// on the display refresh rate.
    #[default]
    PerFrame,
    /// The factor is derived from elapsed time: `1 - exp(-rate * dt)`.
    PerSecond { rate: f32 },
}

/// Effective interpolation weight for a frame lasting `dt_sec`.
#[inline]
pub fn frame_factor(mode: SmoothingMode, base_factor: f32, dt_sec: f32) -> f32 {
    match mode {
        SmoothingMode::PerFrame => base_factor,
        SmoothingMode::PerSecond { rate } => {
            let dt = dt_sec.max(0.0);
            (1.0 - (-rate * dt).exp()).clamp(0.0, 1.0)
        }
    }
}

/// Rate (per second) that matches a per-frame factor at a reference frame rate.
pub fn rate_for_factor(factor: f32, reference_fps: f32) -> f32 {
    -(1.0 - factor.clamp(0.0, 0.999_999)).ln() * reference_fps
}

/// A value with a current state chasing a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoothed<T: Lerp> {
    current: T,
    target: T,
}

impl<T: Lerp> Smoothed<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: value,
            target: value,
        }
    }

    #[inline]
    pub fn current(&self) -> T {
        self.current
    }

    #[inline]
    pub fn target(&self) -> T {
        self.target
    }

    pub fn set_target(&mut self, target: T) {
        self.target = target;
    }

    /// Advance one step toward the target and return the new current value.
    pub fn step(&mut self, factor: f32) -> T {
        self.current = smooth(self.current, self.target, factor);
        self.current
    }

    pub fn is_settled(&self, eps: f32) -> bool {
        self.current.distance_to(self.target) <= eps
    }

    /// Jump straight to the target.
    pub fn snap(&mut self) {
        self.current = self.target;
    }
}

impl<T: Lerp + Default> Default for Smoothed<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_second_factor_matches_reference_rate() {
        let rate = rate_for_factor(0.1, 60.0);
        let f = frame_factor(SmoothingMode::PerSecond { rate }, 0.1, 1.0 / 60.0);
        assert!((f - 0.1).abs() < 1e-4, "got {f}");
    }

    #[test]
    fn per_second_factor_grows_with_longer_frames() {
        let mode = SmoothingMode::PerSecond { rate: 6.0 };
        let at_120 = frame_factor(mode, 0.1, 1.0 / 120.0);
        let at_30 = frame_factor(mode, 0.1, 1.0 / 30.0);
        assert!(at_30 > at_120);
        assert!(frame_factor(mode, 0.1, -1.0) == 0.0);
    }

    #[test]
    fn vector_smoothing_is_componentwise() {
        let next = smooth(Vec2::new(0.0, 10.0), Vec2::new(1.0, 0.0), 0.5);
        assert_eq!(next, Vec2::new(0.5, 5.0));
    }
}
