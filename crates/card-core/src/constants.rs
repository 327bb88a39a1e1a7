// Default tuning for the card animation. `Tuning::default()` is built from
// these; the web front-end may override them at startup.

// Per-frame interpolation weight shared by hover, tilt and scale
pub const SMOOTHING_FACTOR: f32 = 0.1;

// Tilt follows the pointer up to this many radians per axis
pub const TILT_AMPLITUDE: f32 = 0.3;

// Idle float: offset = sin(t * FLOAT_FREQUENCY) * FLOAT_AMPLITUDE
pub const FLOAT_FREQUENCY: f32 = 0.5;
pub const FLOAT_AMPLITUDE: f32 = 0.1;

// Uniform card scale when collapsed / expanded
pub const COLLAPSED_SCALE: f32 = 1.0;
pub const EXPANDED_SCALE: f32 = 2.2;

// Title parallax span in CSS pixels across the full viewport
pub const PARALLAX_RANGE_PX: f32 = 50.0;

// Pointer indicator presets (CSS pixels)
pub const CURSOR_SIZE_PX: f32 = 40.0;
pub const CURSOR_OFFSET_PX: f32 = 20.0;
pub const CURSOR_HIGHLIGHT_SIZE_PX: f32 = 100.0;
pub const CURSOR_HIGHLIGHT_OFFSET_PX: f32 = 50.0;

// Card geometry (world units)
pub const CARD_WIDTH: f32 = 3.0;
pub const CARD_HEIGHT: f32 = 4.0;

// Camera
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Authored sequence: project/sheet names and the looped range (seconds)
pub const TIMELINE_PROJECT: &str = "ActiveClone";
pub const TIMELINE_SHEET: &str = "MainScene";
pub const TIMELINE_LOOP_FROM: f64 = 0.0;
pub const TIMELINE_LOOP_TO: f64 = 2.0;
