use gpui::{point, px, size, Bounds, Pixels, Point};
use gpui_hist::data_types::{AxisId, AxisMeta, DrawOptions, Hist1D, Hist2D, Profile};
use gpui_hist::theme::DEFAULT_PALETTE_SIZE;
use gpui_hist::zoom::{GestureEvent, PointerButton, ZoomController};
use gpui_hist::{HistPainter, ZoomConfig};
use std::time::{Duration, Instant};

fn frame(w: f32, h: f32) -> Bounds<Pixels> {
    Bounds::new(point(px(0.0), px(0.0)), size(px(w), px(h)))
}

fn at(x: f32, y: f32) -> Point<Pixels> {
    point(px(x), px(y))
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
fn test_linear_projection() {
    let painter = HistPainter::new(flat_1d(), DrawOptions::default(), frame(500.0, 300.0));
    let t = &painter.frame().expect("frame").transform;
    assert!((t.x_scale.to_pixel(5.0) - 250.0).abs() < 1e-3);
}

#[test]
fn test_toggle_log_starts_at_first_positive_edge() {
    let mut painter = HistPainter::new(flat_1d(), DrawOptions::default(), frame(500.0, 300.0));
    painter.toggle_log(AxisId::X);
    let t = &painter.frame().expect("frame").transform;
    assert_eq!(t.x_scale.domain().min, 1.0);
    // bin [0, 1) has no log representation
    assert_eq!(painter.frame().expect("frame").bins.len(), 9);
}

#[test]
fn test_zoom_selects_bins_with_margin() {
    let mut painter = HistPainter::new(flat_1d(), DrawOptions::default(), frame(500.0, 300.0));
    assert_eq!(painter.frame().expect("frame").bins.len(), 10);
    assert!(painter.zoom(2.0, 6.0, 0.0, 0.0, None));
    let bins = &painter.frame().expect("frame").bins;
    assert_eq!(bins.len(), 7);
    assert_eq!(bins.first().map(|b| b.bin), Some(1));
    assert_eq!(bins.last().map(|b| b.bin), Some(7));
}

#[test]
fn test_two_dimensional_frame() {
    let painter = HistPainter::new(ramp_2d(), DrawOptions::default(), frame(400.0, 300.0));
    let frame = painter.frame().expect("frame");
    assert!(frame.bins.is_empty());
    assert_eq!(frame.cells.len(), 100);
    assert!(frame.cells.iter().all(|c| c.palette_index < DEFAULT_PALETTE_SIZE));
    assert_eq!(frame.contour.as_ref().map(Vec::len), Some(21));

    // the lowest cell sits in the bottom-left corner
    let low = frame
        .cells
        .iter()
        .find(|c| c.ix == 0 && c.iy == 0)
        .expect("corner cell");
    assert_eq!(low.color_index, 0);
    assert_eq!(low.value, 2.0);
}

#[test]
fn test_user_contour_is_used() {
    let hist = ramp_2d().with_contour(vec![5.0, 10.0, 15.0]);
    let painter = HistPainter::new(hist, DrawOptions::default(), frame(400.0, 300.0));
    let frame = painter.frame().expect("frame");
    assert_eq!(frame.contour.as_deref(), Some(&[5.0, 10.0, 15.0][..]));
    // cells below the first level stay blank
    assert!(frame.cells.iter().all(|c| c.value >= 5.0));
    assert!(frame.cells.len() < 100);
}

#[test]
fn test_tooltips() {
    let painter = HistPainter::new(flat_1d(), DrawOptions::default(), frame(500.0, 300.0));
    let tip = painter.tooltip_at(at(25.0, 150.0)).expect("bin under cursor");
    assert!(tip.starts_with("bin = 1\n"), "{tip}");
    assert!(tip.ends_with("entries = 1.000"), "{tip}");

    let painter = HistPainter::new(ramp_2d(), DrawOptions::default(), frame(400.0, 300.0));
    let tip = painter.tooltip_at(at(20.0, 280.0)).expect("cell under cursor");
    assert!(tip.starts_with("bin = 1, 1\n"), "{tip}");
    assert!(tip.ends_with("entries = 2.000"), "{tip}");
}

#[test]
fn test_profile_tooltip_shows_mean_and_error() {
    let mut profile = Profile::new(AxisMeta::new(2, 0.0, 2.0));
    profile.fill(0.5, 10.0, 1.0);
    profile.fill(0.5, 20.0, 1.0);
    let painter = HistPainter::new(profile, DrawOptions::default(), frame(400.0, 300.0));
    let tip = painter.tooltip_at(at(50.0, 150.0)).expect("bin under cursor");
    assert!(tip.contains("value = 15.00"), "{tip}");
    assert!(tip.contains("error = "), "{tip}");
}

#[test]
fn test_drag_zoom_through_controller() {
    let t0 = Instant::now();
    let ms = |n: u64| t0 + Duration::from_millis(n);
    let mut painter = HistPainter::new(ramp_2d(), DrawOptions::default(), frame(400.0, 300.0));
    let mut ctl = ZoomController::new(ZoomConfig::default());

    ctl.handle(
        GestureEvent::PointerDown {
            position: at(50.0, 250.0),
            button: PointerButton::Primary,
            click_count: 1,
            time: ms(0),
        },
        &mut painter,
    );
    assert!(!painter.tooltips_enabled());
    assert_eq!(painter.tooltip_at(at(100.0, 100.0)), None);

    ctl.handle(
        GestureEvent::PointerMove {
            position: at(300.0, 60.0),
            time: ms(50),
        },
        &mut painter,
    );
    assert!(painter.selection().is_some());

    ctl.handle(
        GestureEvent::PointerUp {
            position: at(300.0, 60.0),
            button: PointerButton::Primary,
            time: ms(100),
        },
        &mut painter,
    );
    let view = painter.view();
    let (x0, x1) = view.x.zoom().expect("x zoomed");
    let (y0, y1) = view.y.zoom().expect("y zoomed");
    assert!((x0 - 1.25).abs() < 1e-4 && (x1 - 7.5).abs() < 1e-4);
    assert!((y0 - 5.0 / 3.0).abs() < 1e-4 && (y1 - 8.0).abs() < 1e-4);
    assert!(painter.tooltips_enabled());
    assert_eq!(painter.selection(), None);

    ctl.handle(
        GestureEvent::PointerDown {
            position: at(200.0, 150.0),
            button: PointerButton::Primary,
            click_count: 2,
            time: ms(1000),
        },
        &mut painter,
    );
    assert!(!painter.view().any_zoomed());
}

#[test]
fn test_context_menu_request() {
    let mut painter = HistPainter::new(flat_1d(), DrawOptions::default(), frame(400.0, 300.0));
    let mut ctl = ZoomController::default();
    ctl.handle(
        GestureEvent::PointerDown {
            position: at(30.0, 40.0),
            button: PointerButton::Secondary,
            click_count: 1,
            time: Instant::now(),
        },
        &mut painter,
    );
    assert_eq!(painter.take_context_menu(), Some(at(30.0, 40.0)));
    assert_eq!(painter.take_context_menu(), None);
}

#[test]
fn test_stats_follow_zoom() {
    let mut painter = HistPainter::new(flat_1d(), DrawOptions::default(), frame(400.0, 300.0));
    assert!((painter.stats().mean_x - 5.0).abs() < 1e-9);
    painter.zoom(0.0, 4.0, 0.0, 0.0, None);
    assert!((painter.stats().mean_x - 2.0).abs() < 1e-9);
    let lines = painter.stats_lines("flat");
    assert_eq!(lines[0], "flat");
    assert_eq!(lines[1], "Entries = 4");
}
