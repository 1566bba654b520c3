use gpui::{point, px, size, Bounds};
use gpui_hist::data_types::{AxisId, AxisKind, AxisMeta, Drawable, Hist1D, ViewState};
use gpui_hist::scales::{AxisScale, LOG_UNDERFLOW_PX};
use gpui_hist::transform::PlotTransform;

fn frame(w: f32, h: f32) -> Bounds<gpui::Pixels> {
    Bounds::new(point(px(0.0), px(0.0)), size(px(w), px(h)))
}

#[test]
fn test_linear_round_trip() {
    let scale = AxisScale::new_linear((0.0, 10.0), (0.0, 500.0));
    assert!((scale.to_pixel(5.0) - 250.0).abs() < 1e-4);
    for v in [0.0, 1.3, 4.75, 9.99, 10.0] {
        let back = scale.to_value(scale.to_pixel(v));
        assert!((back - v).abs() < 1e-4, "{v} came back as {back}");
    }
    for p in [0.0_f32, 17.0, 250.0, 499.5] {
        let back = scale.to_pixel(scale.to_value(p));
        assert!((back - p).abs() < 1e-3);
    }
}

#[test]
fn test_linear_degenerate_domain_is_widened() {
    let zero = AxisScale::new_linear((0.0, 0.0), (0.0, 100.0));
    assert_eq!(zero.domain().min, -1.0);
    assert_eq!(zero.domain().max, 1.0);

    let five = AxisScale::new_linear((5.0, 5.0), (0.0, 100.0));
    let d = five.domain();
    assert!(d.min < 5.0 && d.max > 5.0);
    assert!((five.to_pixel(5.0) - 50.0).abs() < 1e-3);
}

#[test]
fn test_log_minimum_from_first_positive_edge() {
    let meta = AxisMeta::new(10, 0.0, 10.0);
    let scale = AxisScale::new_log((0.0, 10.0), (0.0, 500.0), Some(&meta));
    assert_eq!(scale.kind(), AxisKind::Log);
    assert_eq!(scale.domain().min, 1.0);
    assert!(scale.to_pixel(1.0).abs() < 1e-4);
    assert!((scale.to_pixel(10.0) - 500.0).abs() < 1e-3);
}

#[test]
fn test_log_minimum_without_bins() {
    let scale = AxisScale::new_log((0.0, 100.0), (0.0, 500.0), None);
    assert!((scale.domain().min - 0.01).abs() < 1e-12);
}

#[test]
fn test_log_round_trip() {
    let scale = AxisScale::new_log((1.0, 1000.0), (0.0, 300.0), None);
    assert!((scale.to_pixel(10.0) - 100.0).abs() < 1e-3);
    for v in [1.0, 3.0, 42.0, 999.0] {
        let back = scale.to_value(scale.to_pixel(v));
        assert!((back - v).abs() / v < 1e-5);
    }
}

#[test]
fn test_log_underflow_is_parked_before_axis_start() {
    let x = AxisScale::new_log((1.0, 100.0), (0.0, 500.0), None);
    assert_eq!(x.to_pixel(0.0), -LOG_UNDERFLOW_PX);
    assert_eq!(x.to_pixel(-3.0), -LOG_UNDERFLOW_PX);
    assert_eq!(x.to_pixel(0.5), -LOG_UNDERFLOW_PX);

    // y axes run from the bottom of the frame upwards
    let y = AxisScale::new_log((1.0, 100.0), (300.0, 0.0), None);
    assert_eq!(y.to_pixel(0.0), 300.0 + LOG_UNDERFLOW_PX);
}

#[test]
fn test_categorical_is_safe_near_edges() {
    let scale = AxisScale::new_categorical((0.0, 5.0), (0.0, 500.0));
    assert_eq!(scale.to_pixel(-3.0), 0.0);
    assert_eq!(scale.to_pixel(9.0), 500.0);
    assert_eq!(scale.to_value(-50.0), 0.0);
    assert_eq!(scale.to_value(800.0), 5.0);
    let back = scale.to_value(scale.to_pixel(2.5));
    assert!((back - 2.5).abs() < 1e-5);
}

#[test]
fn test_categorical_text() {
    let meta = AxisMeta::new(3, 0.0, 3.0).with_labels(["a", "b", "c"]);
    let scale = AxisScale::new_categorical((0.0, 3.0), (0.0, 300.0));
    assert_eq!(scale.value_text(Some(&meta), 1.3, "6.4g").as_deref(), Some("b"));
    assert_eq!(scale.value_text(Some(&meta), 3.0, "6.4g"), None);
    assert_eq!(scale.value_text(Some(&meta), -0.5, "6.4g"), None);
}

#[test]
fn test_time_axis() {
    let epoch = 1_700_000_000.0;
    let scale = AxisScale::new_time((0.0, 3600.0), (0.0, 600.0), epoch);
    assert!((scale.to_pixel(1800.0) - 300.0).abs() < 1e-2);
    let back = scale.to_value(scale.to_pixel(1800.0));
    assert!((back - 1800.0).abs() < 1.0);
    assert_eq!(scale.value_text(None, 0.0, "6.4g").as_deref(), Some("14 Nov 22:13"));
}

#[test]
fn test_log_ticks_are_decades() {
    let scale = AxisScale::new_log((0.5, 2000.0), (0.0, 300.0), None);
    assert_eq!(scale.ticks(5), vec![1.0, 10.0, 100.0, 1000.0]);
}

#[test]
fn test_zoom_maps_window_onto_frame() {
    let hist = Hist1D::from_bins(AxisMeta::new(10, 0.0, 10.0), &[1.0; 10]);
    let drawable = Drawable::from(hist);

    let view = ViewState::default();
    let t = PlotTransform::for_drawable(&drawable, &view, frame(500.0, 300.0));
    assert!(t.x_scale.to_pixel(0.0).abs() < 1e-4);
    assert!((t.x_scale.to_pixel(10.0) - 500.0).abs() < 1e-3);

    let mut view = ViewState::default();
    view.x.set_zoom(2.0, 6.0);
    let t = PlotTransform::for_drawable(&drawable, &view, frame(500.0, 300.0));
    assert!(t.x_scale.to_pixel(2.0).abs() < 1e-4);
    assert!((t.x_scale.to_pixel(6.0) - 500.0).abs() < 1e-3);
    assert!((t.local_to_value(AxisId::X, 250.0) - 4.0).abs() < 1e-4);
}

#[test]
fn test_axis_meta_bins() {
    let meta = AxisMeta::with_edges(vec![0.0, 1.0, 3.0, 7.0]);
    assert_eq!(meta.nbins, 3);
    assert_eq!(meta.find_bin(-1.0), 0);
    assert_eq!(meta.find_bin(0.0), 1);
    assert_eq!(meta.find_bin(2.0), 2);
    assert_eq!(meta.find_bin(6.9), 3);
    assert_eq!(meta.find_bin(7.0), 4);
    assert_eq!(meta.bin_center(3), 5.0);
    assert_eq!(meta.bin_width(2), 2.0);
}

#[test]
fn test_select_range_keeps_one_extra_bin() {
    let meta = AxisMeta::new(10, 0.0, 10.0);
    assert_eq!(meta.select_range(None), 0..10);
    assert_eq!(meta.select_range(Some((2.0, 6.0))), 1..8);
    assert_eq!(meta.select_range(Some((0.0, 10.0))), 0..10);
}
