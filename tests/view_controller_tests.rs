use gpui::{point, px, size, Bounds, Pixels};
use gpui_hist::data_types::{AxisId, AxisMeta, DrawOptions, Hist1D, Hist2D};
use gpui_hist::view_controller::{AxisZoom, ViewController};
use gpui_hist::{HistPainter, OverlayPainter};

fn frame() -> Bounds<Pixels> {
    Bounds::new(point(px(0.0), px(0.0)), size(px(400.0), px(300.0)))
}

fn flat_1d() -> Hist1D {
    Hist1D::from_bins(AxisMeta::new(10, 0.0, 10.0), &[1.0; 10])
}

fn ramp_2d() -> Hist2D {
    let mut h = Hist2D::new(AxisMeta::new(10, 0.0, 10.0), AxisMeta::new(10, 0.0, 10.0));
    for i in 1..=10 {
        for j in 1..=10 {
            h.set_bin_content(i, j, (i + j) as f64);
        }
    }
    h
}

#[test]
fn test_clamp_zoom() {
    let full = (0.0, 10.0);
    assert_eq!(ViewController::clamp_zoom(5.0, 5.0, full), AxisZoom::Unchanged);
    assert_eq!(ViewController::clamp_zoom(f64::NAN, 5.0, full), AxisZoom::Unchanged);
    assert_eq!(ViewController::clamp_zoom(6.0, 2.0, full), AxisZoom::Set(2.0, 6.0));
    assert_eq!(ViewController::clamp_zoom(-5.0, 4.0, full), AxisZoom::Set(0.0, 4.0));
    assert_eq!(ViewController::clamp_zoom(-1.0, 11.0, full), AxisZoom::Reset);
    assert_eq!(ViewController::clamp_zoom(11.0, 12.0, full), AxisZoom::Unchanged);
}

#[test]
fn test_zoom_and_partial_unzoom_2d() {
    let mut painter = HistPainter::new(ramp_2d(), DrawOptions::default(), frame());
    assert!(painter.zoom(2.0, 6.0, 3.0, 7.0, Some((2.0, 8.0))));

    let view = painter.view();
    assert_eq!(view.x.zoom(), Some((2.0, 6.0)));
    assert_eq!(view.y.zoom(), Some((3.0, 7.0)));
    assert_eq!(view.z.zoom(), Some((2.0, 8.0)));

    assert!(painter.unzoom(true, false, false));
    let view = painter.view();
    assert_eq!(view.x.zoom(), None);
    assert_eq!(view.y.zoom(), Some((3.0, 7.0)));
    assert_eq!(view.z.zoom(), Some((2.0, 8.0)));

    assert!(painter.unzoom(true, true, true));
    assert!(!painter.view().any_zoomed());
    assert!(!painter.unzoom(true, true, true));
}

#[test]
fn test_zoom_too_narrow_is_rejected() {
    let mut painter = HistPainter::new(flat_1d(), DrawOptions::default(), frame());
    assert!(!painter.can_zoom_in(AxisId::X, 2.2, 2.8));
    assert!(painter.can_zoom_in(AxisId::X, 2.2, 3.8));
    assert!(!painter.zoom(2.2, 2.8, 0.0, 0.0, None));
    assert_eq!(painter.view().x.zoom(), None);
}

#[test]
fn test_equal_bounds_leave_axis_untouched() {
    let mut painter = HistPainter::new(flat_1d(), DrawOptions::default(), frame());
    assert!(painter.zoom(2.0, 6.0, 0.0, 0.0, None));
    assert!(!painter.zoom(3.0, 3.0, 0.0, 0.0, None));
    assert_eq!(painter.view().x.zoom(), Some((2.0, 6.0)));
    assert_eq!(painter.view().y.zoom(), None);
}

#[test]
fn test_full_domain_zoom_is_stored_as_unzoomed() {
    let mut painter = HistPainter::new(flat_1d(), DrawOptions::default(), frame());
    assert!(painter.zoom(2.0, 6.0, 0.0, 0.0, None));
    assert!(painter.zoom(-1.0, 20.0, 0.0, 0.0, None));
    assert!(!painter.view().x.is_zoomed());
}

#[test]
fn test_z_zoom_ignored_for_1d() {
    let mut painter = HistPainter::new(flat_1d(), DrawOptions::default(), frame());
    assert!(!painter.zoom(0.0, 0.0, 0.0, 0.0, Some((0.5, 0.7))));
    assert!(!painter.view().z.is_zoomed());
}

#[test]
fn test_toggle_log() {
    let mut painter = HistPainter::new(ramp_2d(), DrawOptions::default(), frame());
    assert!(painter.toggle_log(AxisId::X));
    assert!(painter.view().x.log);
    assert!(painter.toggle_log(AxisId::Z));
    assert!(painter.view().z.log);
    assert!(painter.contour().is_some());
    assert!(!painter.toggle_log(AxisId::X));
    assert!(!painter.view().x.log);
}

#[test]
fn test_axis_as_text() {
    let labelled = Hist1D::from_bins(
        AxisMeta::new(3, 0.0, 3.0).with_labels(["a", "b", "c"]),
        &[1.0, 2.0, 3.0],
    );
    let painter = HistPainter::new(labelled, DrawOptions::default(), frame());
    assert_eq!(painter.axis_as_text(AxisId::X, 1.3).as_deref(), Some("b"));
    assert_eq!(painter.axis_as_text(AxisId::X, 5.0), None);

    let numeric = HistPainter::new(flat_1d(), DrawOptions::default(), frame());
    assert_eq!(numeric.axis_as_text(AxisId::X, 2.5).as_deref(), Some("2.500"));
}

#[test]
fn test_overlays_share_the_view() {
    let mut painter = HistPainter::new(flat_1d(), DrawOptions::default(), frame());
    let index = painter.add_overlay(flat_1d());
    assert_eq!(index, 0);
    painter.zoom(2.0, 6.0, 0.0, 0.0, None);

    let overlay_view = painter.overlays()[0].view().expect("main painter alive");
    assert_eq!(overlay_view.x.zoom(), Some((2.0, 6.0)));
    let frame = painter.frame().expect("frame");
    assert_eq!(frame.overlays.len(), 1);
    assert_eq!(frame.overlays[0].bins.len(), frame.bins.len());
}

#[test]
fn test_overlay_outliving_main_painter() {
    let weak = {
        let painter = HistPainter::new(flat_1d(), DrawOptions::default(), frame());
        painter.view_ref()
    };
    let overlay = OverlayPainter::new(flat_1d(), weak);
    assert!(overlay.view().is_none());
}

#[test]
fn test_back_to_back_redraws_rebuild_the_group() {
    let mut painter = HistPainter::new(flat_1d(), DrawOptions::default(), frame());
    painter.add_overlay(flat_1d());
    painter.redraw();
    painter.redraw();
    assert_eq!(painter.frame().expect("frame").overlays.len(), 1);

    let wide = Bounds::new(point(px(0.0), px(0.0)), size(px(800.0), px(300.0)));
    painter.set_bounds(wide);
    painter.redraw();
    let f = painter.frame().expect("frame");
    assert_eq!(f.overlays.len(), 1);
    assert_eq!(f.overlays[0].bins.len(), f.bins.len());
    let right = f.bins.iter().map(|b| b.x1).fold(0.0_f32, f32::max);
    assert!(right > 400.0, "right edge {right}");
}
