use gpui_hist::contour::{ContourMode, ContourTable, DEFAULT_CONTOUR_LEVELS};
use gpui_hist::theme::rainbow_palette;

#[test]
fn test_auto_linear_levels() {
    let table = ContourTable::auto(0.0, 100.0, DEFAULT_CONTOUR_LEVELS, false);
    let c = table.levels();
    assert_eq!(c.len(), 21);
    assert_eq!(c[0], 0.0);
    assert_eq!(c[20], 100.0);
    assert!(c.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(table.n_colors(), 20);
    assert_eq!(table.mode(), ContourMode::AutoLinear);
}

#[test]
fn test_degenerate_range_is_widened() {
    let table = ContourTable::auto(5.0, 5.0, 20, false);
    let c = table.levels();
    assert!(c[0] < 5.0 && 5.0 < c[20]);
    assert!(c.windows(2).all(|w| w[0] < w[1]));

    let zero = ContourTable::auto(0.0, 0.0, 20, false);
    assert_eq!(zero.zrange(), (-1.0, 1.0));
}

#[test]
fn test_linear_classification() {
    let table = ContourTable::auto(0.0, 100.0, 20, false);
    assert_eq!(table.classify(0.0), Some(0));
    assert_eq!(table.classify(50.0), Some(9));
    assert_eq!(table.classify(100.0), Some(19));
    assert_eq!(table.classify(1e6), Some(19));
    assert_eq!(table.classify(-1.0), None);
    assert_eq!(table.classify_with(-1.0, true), Some(0));
    assert_eq!(table.classify(f64::NAN), None);
}

#[test]
fn test_log_levels_and_classification() {
    let table = ContourTable::auto(1.0, 1000.0, 3, true);
    assert_eq!(table.mode(), ContourMode::AutoLog);
    let c = table.levels();
    assert_eq!(c.len(), 4);
    assert_eq!(c[0], 1.0);
    assert_eq!(c[3], 1000.0);
    assert!((c[1] - 10.0).abs() < 1e-9);
    assert!((c[2] - 100.0).abs() < 1e-9);

    assert_eq!(table.classify(5.0), Some(0));
    assert_eq!(table.classify(50.0), Some(1));
    assert_eq!(table.classify(1000.0), Some(2));
}

#[test]
fn test_log_guards_non_positive_range() {
    let table = ContourTable::auto(0.0, 100.0, 4, true);
    assert!((table.levels()[0] - 0.1).abs() < 1e-12);

    let negative = ContourTable::auto(-10.0, -1.0, 4, true);
    let c = negative.levels();
    assert_eq!(c[4], 1.0);
    assert!(c[0] > 0.0);
}

#[test]
fn test_user_contour_uses_boundary_scan() {
    let table = ContourTable::user(&[0.0, 1.0, 5.0, 10.0]);
    assert_eq!(table.mode(), ContourMode::User);
    assert_eq!(table.n_colors(), 3);
    assert_eq!(table.classify(0.5), Some(0));
    assert_eq!(table.classify(5.0), Some(2));
    assert_eq!(table.classify(7.0), Some(2));
    assert_eq!(table.classify(-0.1), None);
    assert!(!table.built_for(0.0, 10.0, 3, false));
}

#[test]
fn test_cache_key() {
    let table = ContourTable::auto(0.0, 100.0, 20, false);
    assert!(table.built_for(0.0, 100.0, 20, false));
    assert!(!table.built_for(0.0, 100.0, 20, true));
    assert!(!table.built_for(0.0, 90.0, 20, false));
    assert!(!table.built_for(0.0, 100.0, 10, false));
}

#[test]
fn test_palette_mapping() {
    let table = ContourTable::auto(0.0, 100.0, 20, false);
    assert_eq!(table.palette_index(0, 50), 2);
    assert_eq!(table.palette_index(19, 50), 49);
    assert_eq!(table.palette_index(19, 10), 9);
    assert_eq!(table.palette_index(3, 0), 0);

    let palette = rainbow_palette(50);
    assert_eq!(table.color(100.0, &palette, false), Some(palette[49]));
    assert_eq!(table.color(-5.0, &palette, false), None);
    assert_eq!(table.color(-5.0, &palette, true), Some(palette[2]));
}
