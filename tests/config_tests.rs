// Host-side tests for runtime tuning.

use card_core::*;

#[test]
fn empty_document_keeps_defaults() {
    let t = Tuning::from_json("{}").unwrap();
    assert_eq!(t, Tuning::default());
    assert_eq!(t.expanded_scale, EXPANDED_SCALE);
    assert_eq!(t.smoothing_mode, SmoothingMode::PerFrame);
}

#[test]
fn partial_override_is_merged() {
    let t = Tuning::from_json(
        r#"{ "expanded_scale": 1.8, "smoothing_mode": { "mode": "per_second", "rate": 6.0 } }"#,
    )
    .unwrap();
    assert_eq!(t.expanded_scale, 1.8);
    assert_eq!(t.smoothing_mode, SmoothingMode::PerSecond { rate: 6.0 });
    assert_eq!(t.tilt_amplitude, TILT_AMPLITUDE);
}

#[test]
fn out_of_range_factor_is_rejected() {
    let err = Tuning::from_json(r#"{ "hover_smoothing": 1.5 }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "hover_smoothing",
            ..
        }
    ));
    assert!(Tuning::from_json(r#"{ "tilt_smoothing": 0.0 }"#).is_err());
    assert!(Tuning::from_json(r#"{ "collapsed_scale": -1.0 }"#).is_err());
    assert!(Tuning::from_json(r#"{ "smoothing_mode": { "mode": "per_second", "rate": 0.0 } }"#).is_err());
}

#[test]
fn garbage_is_a_parse_error() {
    assert!(matches!(
        Tuning::from_json("tuning please"),
        Err(ConfigError::Parse(_))
    ));
}
