// Host-side tests for smoothing and the per-frame card update.

use card_core::*;
use glam::Vec2;

fn input(pointer: PointerSample, interaction: InteractionState, elapsed: f32) -> FrameInput {
    FrameInput {
        pointer,
        interaction,
        elapsed,
        delta: 1.0 / 60.0,
        texture: TextureRef::default(),
    }
}

#[test]
fn smoothing_converges_monotonically() {
    let mut v = 0.0_f32;
    let mut prev_err = 1.0_f32;
    for _ in 0..20 {
        v = smooth(v, 1.0, 0.1);
        let err = 1.0 - v;
        assert!(err < prev_err, "error must shrink every step");
        assert!(v <= 1.0, "no overshoot");
        prev_err = err;
    }
    // 1 - 0.9^20 ~= 0.878
    assert!((v - (1.0 - 0.9_f32.powi(20))).abs() < 1e-5);
    for _ in 0..20 {
        v = smooth(v, 1.0, 0.1);
    }
    assert!(v > 0.98);
}

#[test]
fn settled_frames_are_idempotent() {
    let tuning = Tuning::default();
    let mut state = AnimationState::new(&tuning);
    let still = input(PointerSample::default(), InteractionState::default(), 0.0);
    let (next, first) = state.advance(&still, &tuning);
    assert_eq!(next, state, "rest state with no input must not move");
    state = next;
    let (_, second) = state.advance(&still, &tuning);
    assert_eq!(first, second);
    assert_eq!(first.rotation, Vec2::ZERO);
    assert_eq!(first.uniforms.hover, 0.0);
    assert_eq!(first.scale, tuning.collapsed_scale);
}

#[test]
fn converged_frames_stay_put_under_constant_input() {
    let tuning = Tuning::default();
    let src = LocalInputSource::new();
    let tracker = PointerTracker::attach(&src);
    // Bottom-left corner: normalized (-1, -1)
    src.emit(PointerMove::new(0.0, 600.0, 800.0, 600.0));
    let busy = InteractionState {
        hovering: true,
        expanded: true,
        menu_open: false,
    };

    let mut state = AnimationState::new(&tuning);
    let mut t = 0.0_f32;
    let mut frames = 0;
    // The first frame sets the new targets, so settling is checked after it.
    loop {
        let (next, _) = state.advance(&input(tracker.latest(), busy, t), &tuning);
        state = next;
        t += 1.0 / 60.0;
        frames += 1;
        assert!(frames < 1000, "animation never settled");
        if state.is_settled(1e-4) {
            break;
        }
    }
    assert!(frames > 1);

    let (mut state, mut prev) = state.advance(&input(tracker.latest(), busy, t), &tuning);
    for _ in 0..10 {
        let (next, frame) = state.advance(&input(tracker.latest(), busy, t), &tuning);
        assert!((frame.rotation - prev.rotation).abs().max_element() < 1e-4);
        assert!((frame.scale - prev.scale).abs() < 1e-4);
        assert!((frame.uniforms.hover - prev.uniforms.hover).abs() < 1e-4);
        assert!((frame.scale - EXPANDED_SCALE).abs() < 1e-3);
        assert!((frame.uniforms.hover - 1.0).abs() < 1e-3);
        state = next;
        prev = frame;
    }
    assert!(state.is_settled(1e-4));
}

#[test]
fn snapping_settles_immediately() {
    let mut v = Smoothed::new(Vec2::ZERO);
    v.set_target(Vec2::new(0.3, -0.3));
    assert!(!v.is_settled(1e-6));
    v.snap();
    assert!(v.is_settled(0.0));
    assert_eq!(v.step(0.1), Vec2::new(0.3, -0.3));
}

#[test]
fn scene_carries_animation_state_between_frames() {
    let mut scene = CardScene::new(Catalog::projects(), Tuning::default());
    scene.dispatch(InteractionEvent::CardClicked).unwrap();
    let before = scene.animation().scale.current();
    scene.frame(PointerSample::default(), 0.0, 1.0 / 60.0);
    let after = scene.animation().scale.current();
    assert!(after > before);
    assert_eq!(scene.animation().scale.target(), EXPANDED_SCALE);
    assert_eq!(scene.last_frame().scale, after);
}

#[test]
fn vertical_float_depends_on_time_only() {
    let tuning = Tuning::default();
    let t = 1.7;
    let expected = (t * FLOAT_FREQUENCY).sin() * FLOAT_AMPLITUDE;

    let calm = AnimationState::new(&tuning);
    let (_, a) = calm.advance(
        &input(PointerSample::default(), InteractionState::default(), t),
        &tuning,
    );

    let src = LocalInputSource::new();
    let tracker = PointerTracker::attach(&src);
    src.emit(PointerMove::new(10.0, 700.0, 800.0, 800.0));
    let busy = InteractionState {
        hovering: true,
        expanded: true,
        menu_open: true,
    };
    let (_, b) = calm.advance(&input(tracker.latest(), busy, t), &tuning);

    assert!((a.vertical_offset - expected).abs() < 1e-6);
    assert_eq!(a.vertical_offset, b.vertical_offset);
    assert_eq!(vertical_offset(t, &tuning), a.vertical_offset);
}

#[test]
fn expanded_scale_approaches_target_without_overshoot() {
    let tuning = Tuning::default();
    let mut state = AnimationState::new(&tuning);
    let expanded = InteractionState {
        expanded: true,
        ..InteractionState::default()
    };
    let mut prev = tuning.collapsed_scale;
    for i in 0..200 {
        let (next, frame) = state.advance(
            &input(PointerSample::default(), expanded, i as f32 / 60.0),
            &tuning,
        );
        assert!(frame.scale >= prev, "scale must grow monotonically");
        assert!(frame.scale <= EXPANDED_SCALE);
        prev = frame.scale;
        state = next;
    }
    assert!((prev - EXPANDED_SCALE).abs() < 1e-3);
}

#[test]
fn tilt_follows_pointer_with_inverted_vertical_axis() {
    let tuning = Tuning::default();
    let mut state = AnimationState::new(&tuning);
    // Top-right corner: normalized (1, 1)
    let src = LocalInputSource::new();
    let tracker = PointerTracker::attach(&src);
    src.emit(PointerMove::new(800.0, 0.0, 800.0, 800.0));
    assert_eq!(tracker.latest().normalized, Vec2::new(1.0, 1.0));

    let mut frame = CardFrame::default();
    for i in 0..300 {
        let (next, f) = state.advance(
            &input(tracker.latest(), InteractionState::default(), i as f32 / 60.0),
            &tuning,
        );
        state = next;
        frame = f;
    }
    assert!((frame.rotation.x + TILT_AMPLITUDE).abs() < 1e-3);
    assert!((frame.rotation.y - TILT_AMPLITUDE).abs() < 1e-3);
    assert!(state.rotation.is_settled(1e-3));
}

#[test]
fn hover_intensity_rises_and_falls() {
    let tuning = Tuning::default();
    let mut state = AnimationState::new(&tuning);
    let hovering = InteractionState {
        hovering: true,
        ..InteractionState::default()
    };
    let (next, f) = state.advance(&input(PointerSample::default(), hovering, 0.0), &tuning);
    assert!((f.uniforms.hover - 0.1).abs() < 1e-6);
    state = next;
    let (_, f2) = state.advance(
        &input(PointerSample::default(), InteractionState::default(), 0.016),
        &tuning,
    );
    assert!(f2.uniforms.hover < f.uniforms.hover);
}

#[test]
fn per_second_smoothing_is_frame_rate_independent() {
    let rate = rate_for_factor(0.1, 60.0);
    let mode = SmoothingMode::PerSecond { rate };

    // One second at 60 fps versus one second at 120 fps
    let mut a = Smoothed::new(0.0_f32);
    a.set_target(1.0);
    for _ in 0..60 {
        a.step(frame_factor(mode, 0.1, 1.0 / 60.0));
    }
    let mut b = Smoothed::new(0.0_f32);
    b.set_target(1.0);
    for _ in 0..120 {
        b.step(frame_factor(mode, 0.1, 1.0 / 120.0));
    }
    assert!((a.current() - b.current()).abs() < 1e-4);

    // At the reference rate it matches the per-frame law
    let mut c = Smoothed::new(0.0_f32);
    c.set_target(1.0);
    for _ in 0..60 {
        c.step(frame_factor(SmoothingMode::PerFrame, 0.1, 1.0 / 60.0));
    }
    assert!((a.current() - c.current()).abs() < 1e-4);
}

#[test]
fn model_matrix_reflects_frame_transform() {
    let frame = CardFrame {
        rotation: Vec2::ZERO,
        vertical_offset: 0.25,
        scale: 2.0,
        uniforms: CardUniforms::default(),
    };
    let p = frame.model_matrix().transform_point3(glam::Vec3::new(1.0, 1.0, 0.0));
    assert!((p - glam::Vec3::new(2.0, 2.25, 0.0)).length() < 1e-6);
}
