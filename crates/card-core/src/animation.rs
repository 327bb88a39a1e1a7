//! Per-frame visual update.
//!
//! The smoothing state is an explicit value: each frame takes the previous
//! [`AnimationState`] plus the current inputs and returns the next state
//! together with the [`CardFrame`] handed to the renderer. Feeding the same
//! sequence of inputs always yields the same outputs.

use crate::catalog::ContentId;
use crate::config::Tuning;
use crate::interaction::InteractionState;
use crate::pointer::PointerSample;
use crate::smoothing::{frame_factor, Smoothed};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

/// Inputs sampled at the start of a frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    pub pointer: PointerSample,
    pub interaction: InteractionState,
    /// Seconds since the scene started; monotonic.
    pub elapsed: f32,
    /// Seconds since the previous frame. Only used by time-based smoothing.
    pub delta: f32,
    pub texture: TextureRef,
}

/// Which image the card samples, and the selection revision it came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextureRef {
    pub content: Option<ContentId>,
    pub revision: u64,
}

/// Shader uniforms of the card material.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CardUniforms {
    pub time: f32,
    pub hover: f32,
    pub texture: TextureRef,
}

/// Everything the renderer needs to draw one frame of the card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardFrame {
    /// Euler angles around X and Y, radians.
    pub rotation: Vec2,
    pub vertical_offset: f32,
    pub scale: f32,
    pub uniforms: CardUniforms,
}

impl Default for CardFrame {
    fn default() -> Self {
        Self {
            rotation: Vec2::ZERO,
            vertical_offset: 0.0,
            scale: 1.0,
            uniforms: CardUniforms::default(),
        }
    }
}

impl CardFrame {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0),
            Vec3::new(0.0, self.vertical_offset, 0.0),
        )
    }
}

/// Smoothed quantities carried from one frame to the next.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    pub hover: Smoothed<f32>,
    pub rotation: Smoothed<Vec2>,
    pub scale: Smoothed<f32>,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}

/// Idle float height at `elapsed` seconds. Depends on time only.
#[inline]
pub fn vertical_offset(elapsed: f32, tuning: &Tuning) -> f32 {
    (elapsed * tuning.float_frequency).sin() * tuning.float_amplitude
}

impl AnimationState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            hover: Smoothed::new(0.0),
            rotation: Smoothed::new(Vec2::ZERO),
            scale: Smoothed::new(tuning.collapsed_scale),
        }
    }

    pub fn advance(&self, input: &FrameInput, tuning: &Tuning) -> (AnimationState, CardFrame) {
        let mut next = *self;
        let mode = tuning.smoothing_mode;

        let hover_target = if input.interaction.hovering { 1.0 } else { 0.0 };
        next.hover.set_target(hover_target);
        let hover = next
            .hover
            .step(frame_factor(mode, tuning.hover_smoothing, input.delta));

        // Vertical axis inverted so the card turns toward the pointer.
        let tilt = Vec2::new(
            -input.pointer.normalized.y * tuning.tilt_amplitude,
            input.pointer.normalized.x * tuning.tilt_amplitude,
        );
        next.rotation.set_target(tilt);
        let rotation = next
            .rotation
            .step(frame_factor(mode, tuning.tilt_smoothing, input.delta));

        let scale_target = if input.interaction.expanded {
            tuning.expanded_scale
        } else {
            tuning.collapsed_scale
        };
        next.scale.set_target(scale_target);
        let scale = next
            .scale
            .step(frame_factor(mode, tuning.scale_smoothing, input.delta));

        let frame = CardFrame {
            rotation,
            vertical_offset: vertical_offset(input.elapsed, tuning),
            scale,
            uniforms: CardUniforms {
                time: input.elapsed,
                hover,
                texture: input.texture,
            },
        };
        (next, frame)
    }

    pub fn is_settled(&self, eps: f32) -> bool {
        self.hover.is_settled(eps) && self.rotation.is_settled(eps) && self.scale.is_settled(eps)
    }
}
