use gpui_hist::data_types::{ErrorMode, HistConfig, OptimizeLevel, ZoomConfig, LARGE_BIN_COUNT};
use std::time::Duration;

#[test]
fn test_empty_json_is_default() {
    let config = HistConfig::from_json("{}").expect("empty object parses");
    assert_eq!(config, HistConfig::default());
    assert_eq!(config.draw.contour_levels, 20);
    assert_eq!(config.zoom.min_drag_px, 10.0);
}

#[test]
fn test_partial_json_keeps_other_defaults() {
    let config = HistConfig::from_json(
        r#"{
            "draw": { "contour_levels": 30, "optimize": "Always", "error_mode": "Spread" },
            "zoom": { "min_drag_px": 4.0 }
        }"#,
    )
    .expect("partial config parses");
    assert_eq!(config.draw.contour_levels, 30);
    assert_eq!(config.draw.optimize, OptimizeLevel::Always);
    assert_eq!(config.draw.error_mode, ErrorMode::Spread);
    assert_eq!(config.draw.tooltip_format, "6.4g");
    assert_eq!(config.zoom.min_drag_px, 4.0);
    assert_eq!(config.zoom.double_click_ms, 300);
}

#[test]
fn test_invalid_json_is_reported() {
    let err = HistConfig::from_json("{ draw: ").expect_err("malformed json");
    assert!(err.to_string().contains("failed to parse"), "{err}");
}

#[test]
fn test_validation_errors() {
    let err = HistConfig::from_json(r#"{ "draw": { "contour_levels": 0 } }"#).expect_err("zero levels");
    assert!(err.to_string().contains("contour_levels"));

    let err = HistConfig::from_json(r#"{ "zoom": { "min_drag_px": -1.0 } }"#).expect_err("negative drag");
    assert!(err.to_string().contains("min_drag_px"));

    let mut config = HistConfig::default();
    config.zoom.touch_cancel_px = f32::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn test_json_round_trip_of_modified_config() {
    let mut config = HistConfig::default();
    config.draw.log_z = true;
    config.zoom.menu_delay_ms = 800;
    let text = config.to_json().expect("serializes");
    assert_eq!(HistConfig::from_json(&text).expect("parses back"), config);
}

#[test]
fn test_should_reduce() {
    assert!(!OptimizeLevel::Off.should_reduce(1_000_000, 100.0));
    assert!(!OptimizeLevel::Large.should_reduce(LARGE_BIN_COUNT, 100.0));
    assert!(OptimizeLevel::Large.should_reduce(LARGE_BIN_COUNT + 1, 10_000.0));
    assert!(OptimizeLevel::Always.should_reduce(201, 100.0));
    assert!(!OptimizeLevel::Always.should_reduce(200, 100.0));
}

#[test]
fn test_durations() {
    let zoom = ZoomConfig::default();
    assert_eq!(zoom.double_click_window(), Duration::from_millis(300));
    assert_eq!(zoom.menu_delay(), Duration::from_millis(500));
}
