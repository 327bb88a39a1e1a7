// Host-side tests for pointer tracking, cursor presets and card picking.

use card_core::*;
use glam::{Vec2, Vec3};

#[test]
fn tracker_keeps_latest_normalized_sample() {
    let src = LocalInputSource::new();
    let tracker = PointerTracker::attach(&src);
    assert_eq!(tracker.latest().normalized, Vec2::ZERO);

    src.emit(PointerMove::new(0.0, 0.0, 400.0, 200.0));
    assert_eq!(tracker.latest().normalized, Vec2::new(-1.0, 1.0));

    src.emit(PointerMove::new(200.0, 100.0, 400.0, 200.0));
    assert_eq!(tracker.latest().normalized, Vec2::ZERO);
    assert_eq!(tracker.latest().screen, Vec2::new(200.0, 100.0));
}

#[test]
fn dropping_tracker_unsubscribes() {
    let src = LocalInputSource::new();
    let a = PointerTracker::attach(&src);
    let b = PointerTracker::attach(&src);
    assert_eq!(src.subscriber_count(), 2);
    drop(a);
    assert_eq!(src.subscriber_count(), 1);
    src.emit(PointerMove::new(10.0, 10.0, 20.0, 20.0));
    assert_eq!(b.latest().screen, Vec2::new(10.0, 10.0));
    drop(b);
    assert_eq!(src.subscriber_count(), 0);
}

#[test]
fn degenerate_viewport_maps_to_center() {
    let s = PointerSample::from_move(&PointerMove::new(30.0, 40.0, 0.0, 0.0));
    assert_eq!(s.normalized, Vec2::ZERO);
    assert_eq!(s.parallax(PARALLAX_RANGE_PX), Vec2::ZERO);
}

#[test]
fn parallax_spans_the_configured_range() {
    let corner = PointerSample::from_move(&PointerMove::new(1000.0, 500.0, 1000.0, 500.0));
    assert_eq!(corner.parallax(50.0), Vec2::new(25.0, 25.0));
    let center = PointerSample::from_move(&PointerMove::new(500.0, 250.0, 1000.0, 500.0));
    assert_eq!(center.parallax(50.0), Vec2::ZERO);
}

#[test]
fn cursor_presets_center_on_pointer() {
    let p = Vec2::new(300.0, 120.0);
    assert_eq!(CursorPreset::NORMAL.position(p), Vec2::new(280.0, 100.0));
    assert_eq!(CursorPreset::HIGHLIGHT.position(p), Vec2::new(250.0, 70.0));
    assert_eq!(CursorPreset::for_highlight(true).size_px, 100.0);
    assert_eq!(CursorPreset::for_highlight(false).size_px, 40.0);
}

#[test]
fn center_ray_hits_card_at_camera_distance() {
    let cam = Camera::default();
    let ray = cam.screen_ray(Vec2::splat(0.5));
    assert!((ray.dir - Vec3::NEG_Z).length() < 1e-4);
    let t = card_hit(ray, CardFrame::default().model_matrix()).expect("center hits");
    assert!((t - CAMERA_Z).abs() < 1e-3);
}

#[test]
fn corner_ray_misses_card() {
    let cam = Camera::default();
    let ray = cam.screen_ray(Vec2::new(0.02, 0.02));
    assert!(card_hit(ray, CardFrame::default().model_matrix()).is_none());
}

#[test]
fn expanded_card_is_easier_to_hit() {
    let mut cam = Camera::default();
    cam.set_viewport(1000.0, 1000.0);
    // Just outside the resting card's right edge
    let uv = Vec2::new(0.78, 0.5);
    let resting = CardFrame::default();
    let expanded = CardFrame {
        scale: EXPANDED_SCALE,
        ..CardFrame::default()
    };
    assert!(card_hit(cam.screen_ray(uv), resting.model_matrix()).is_none());
    assert!(card_hit(cam.screen_ray(uv), expanded.model_matrix()).is_some());
}

#[test]
fn scene_hit_test_uses_viewport_fraction() {
    let s = CardScene::new(Catalog::projects(), Tuning::default());
    assert!(s.hit_test(&PointerMove::new(400.0, 400.0, 800.0, 800.0)));
    assert!(!s.hit_test(&PointerMove::new(5.0, 5.0, 800.0, 800.0)));
}
