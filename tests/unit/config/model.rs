use super::*;

#[test]
fn empty_object_yields_reference_defaults() {
    let config = RevealConfig::from_json_str("{}").unwrap();
    assert_eq!(config, RevealConfig::default());
    assert_eq!(config.loading.duration_ms, 4000);
    assert_eq!(config.loading.tick_ms, 50);
    assert_eq!(config.dismiss.grace_ms, 8000);
    assert_eq!(config.expansion.policy, ProgressPolicy::Accumulate);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = RevealConfig::from_json_str(
        r#"{ "expansion": { "policy": "bidirectional", "budget_fraction": 0.5 } }"#,
    )
    .unwrap();
    assert_eq!(config.expansion.policy, ProgressPolicy::Bidirectional);
    assert_eq!(config.expansion.budget_fraction, 0.5);
    assert_eq!(config.expansion.reveal_fade_ms, 600);
    assert_eq!(config.transition, TransitionConfig::default());
}

#[test]
fn zero_tick_is_rejected() {
    let err = RevealConfig::from_json_str(r#"{ "loading": { "tick_ms": 0 } }"#).unwrap_err();
    assert!(err.to_string().contains("tick_ms"));
}

#[test]
fn non_positive_budget_fraction_is_rejected() {
    let mut config = RevealConfig::default();
    config.expansion.budget_fraction = 0.0;
    assert!(config.validate().is_err());
}

#[test]
fn inverted_frame_bounds_are_rejected() {
    let mut config = RevealConfig::default();
    config.expansion.frame.min_width_vw = 80.0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("minimum"));
}

#[test]
fn malformed_json_maps_to_serde_error() {
    let err = RevealConfig::from_json_str("{ nope").unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}
