//! Display statistics over the currently selected range of a drawable.

use crate::data_types::{AxisId, AxisMeta, BinAccess, Drawable, GlobalSums, ViewState};
use crate::utils::ffmt;
use std::ops::Range;

/// Filter applied to every bin (by its center) or point before it is summed.
pub type StatsPredicate<'a> = &'a dyn Fn(f64, f64) -> bool;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatsResult {
    pub entries: f64,
    pub integral: f64,
    pub mean_x: f64,
    pub rms_x: f64,
    /// Present for 2D histograms, profiles and graphs.
    pub mean_y: Option<f64>,
    pub rms_y: Option<f64>,
    pub underflow: f64,
    pub overflow: f64,
    /// Center of the largest bin (or x of the highest point) in range.
    pub max_pos: f64,
    pub max_content: f64,
    /// 2D content by (y: under, in, over) x (x: under, in, over).
    pub matrix: Option<[[f64; 3]; 3]>,
}

#[derive(Default)]
struct Sums {
    w: f64,
    wx: f64,
    wx2: f64,
    wy: f64,
    wy2: f64,
}

impl Sums {
    fn from_global(g: &GlobalSums) -> Self {
        Self {
            w: g.sumw,
            wx: g.sumwx,
            wx2: g.sumwx2,
            wy: g.sumwy,
            wy2: g.sumwy2,
        }
    }
}

fn mean_rms(sumw: f64, sum1: f64, sum2: f64) -> (f64, f64) {
    if sumw <= 0.0 {
        return (0.0, 0.0);
    }
    let mean = sum1 / sumw;
    (mean, (sum2 / sumw - mean * mean).abs().sqrt())
}

fn entries_of(stored: f64, sumw: f64) -> f64 {
    if stored > 1.0 {
        stored
    } else {
        sumw
    }
}

/// Zero-based bins whose centers lie inside the zoom window.
pub fn stat_range(meta: &AxisMeta, zoom: Option<(f64, f64)>) -> Range<usize> {
    let Some((lo, hi)) = zoom else {
        return 0..meta.nbins;
    };
    let first = (0..meta.nbins).find(|&i| center(meta, i) >= lo);
    let last = (0..meta.nbins).rev().find(|&i| center(meta, i) <= hi);
    match (first, last) {
        (Some(f), Some(l)) if f <= l => f..l + 1,
        _ => 0..0,
    }
}

fn center(meta: &AxisMeta, i: usize) -> f64 {
    if meta.is_categorical() {
        i as f64 + 0.5
    } else {
        meta.bin_center(i + 1)
    }
}

/// Computes statistics of `drawable` over the range selected by `view`.
///
/// Unzoomed data carrying global sums reuses those sums verbatim, so the
/// numbers describe everything that was filled whatever the predicate; a
/// zoomed range is scanned bin by bin and filtered by the predicate. A stored
/// entry count above one overrides the summed weight either way.
pub fn count_stats(
    drawable: &Drawable,
    view: &ViewState,
    predicate: Option<StatsPredicate<'_>>,
) -> StatsResult {
    match drawable {
        Drawable::Hist1D(_) | Drawable::Profile(_) => count_1d(drawable, view, predicate),
        Drawable::Hist2D(_) => count_2d(drawable, view, predicate),
        Drawable::Graph(g) => {
            let xz = view.x.zoom();
            let yz = view.y.zoom();
            let inside = |v: f64, z: Option<(f64, f64)>| z.is_none_or(|(lo, hi)| v >= lo && v <= hi);
            let mut s = Sums::default();
            let mut res = StatsResult {
                max_content: f64::NEG_INFINITY,
                ..Default::default()
            };
            for (&x, &y) in g.x.iter().zip(&g.y) {
                if !x.is_finite() || !y.is_finite() || !inside(x, xz) || !inside(y, yz) {
                    continue;
                }
                if predicate.is_some_and(|p| !p(x, y)) {
                    continue;
                }
                s.w += 1.0;
                s.wx += x;
                s.wx2 += x * x;
                s.wy += y;
                s.wy2 += y * y;
                if y > res.max_content {
                    res.max_content = y;
                    res.max_pos = x;
                }
            }
            if s.w == 0.0 {
                res.max_content = 0.0;
            }
            let (mx, rx) = mean_rms(s.w, s.wx, s.wx2);
            let (my, ry) = mean_rms(s.w, s.wy, s.wy2);
            res.entries = s.w;
            res.integral = s.w;
            res.mean_x = mx;
            res.rms_x = rx;
            res.mean_y = Some(my);
            res.rms_y = Some(ry);
            res
        }
    }
}

fn count_1d(drawable: &Drawable, view: &ViewState, predicate: Option<StatsPredicate<'_>>) -> StatsResult {
    let (Some(meta), Some(bins)) = (drawable.axis_meta(AxisId::X), drawable.bins()) else {
        return StatsResult::default();
    };
    let profile = match drawable {
        Drawable::Profile(p) => Some(p),
        _ => None,
    };
    let range = stat_range(meta, view.x.zoom());

    let mut res = StatsResult {
        underflow: bins.bin_content(0, 0),
        overflow: bins.bin_content(meta.nbins + 1, 0),
        ..Default::default()
    };
    let mut scanned = Sums::default();
    let mut best: Option<(f64, f64)> = None;
    for i in range {
        let x = center(meta, i);
        let v = bins.bin_content(i + 1, 0);
        if best.is_none_or(|(b, _)| v > b) {
            best = Some((v, x));
        }
        if predicate.is_some_and(|p| !p(x, v)) {
            continue;
        }
        match profile {
            Some(p) => {
                let w = p.bin_entries.get(i + 1).copied().unwrap_or(0.0);
                scanned.w += w;
                scanned.wx += w * x;
                scanned.wx2 += w * x * x;
                scanned.wy += p.contents.get(i + 1).copied().unwrap_or(0.0);
                scanned.wy2 += p.sumw2.get(i + 1).copied().unwrap_or(0.0);
            }
            None => {
                scanned.w += v;
                scanned.wx += v * x;
                scanned.wx2 += v * x * x;
            }
        }
    }
    if let Some((v, x)) = best {
        res.max_content = v;
        res.max_pos = x;
    }

    // cached sums describe all filled data, so they ignore the predicate
    let s = match (view.x.is_zoomed(), drawable.global_sums()) {
        (false, Some(g)) => Sums::from_global(g),
        _ => scanned,
    };

    let (mx, rx) = mean_rms(s.w, s.wx, s.wx2);
    res.mean_x = mx;
    res.rms_x = rx;
    res.integral = s.w;
    res.entries = entries_of(drawable.stored_entries(), s.w);
    if profile.is_some() {
        let (my, ry) = mean_rms(s.w, s.wy, s.wy2);
        res.mean_y = Some(my);
        res.rms_y = Some(ry);
    }
    res
}

fn count_2d(drawable: &Drawable, view: &ViewState, predicate: Option<StatsPredicate<'_>>) -> StatsResult {
    let (Some(xm), Some(ym), Some(bins)) = (
        drawable.axis_meta(AxisId::X),
        drawable.axis_meta(AxisId::Y),
        drawable.bins(),
    ) else {
        return StatsResult::default();
    };
    let xr = stat_range(xm, view.x.zoom());
    let yr = stat_range(ym, view.y.zoom());

    // cell classes relative to the selection: 0 below, 1 inside, 2 above
    let side = |bin: usize, r: &Range<usize>| {
        if bin < r.start + 1 {
            0
        } else if bin > r.end {
            2
        } else {
            1
        }
    };

    let mut matrix = [[0.0; 3]; 3];
    let mut scanned = Sums::default();
    let mut best: Option<(f64, f64)> = None;
    for iy in 0..ym.nbins + 2 {
        let ys = side(iy, &yr);
        for ix in 0..xm.nbins + 2 {
            let xs = side(ix, &xr);
            let v = bins.bin_content(ix, iy);
            matrix[ys][xs] += v;
            if xs != 1 || ys != 1 {
                continue;
            }
            let (x, y) = (center(xm, ix - 1), center(ym, iy - 1));
            if best.is_none_or(|(b, _)| v > b) {
                best = Some((v, x));
            }
            if predicate.is_some_and(|p| !p(x, y)) {
                continue;
            }
            scanned.w += v;
            scanned.wx += v * x;
            scanned.wx2 += v * x * x;
            scanned.wy += v * y;
            scanned.wy2 += v * y * y;
        }
    }

    let unzoomed = !view.x.is_zoomed() && !view.y.is_zoomed();
    let s = match (unzoomed, drawable.global_sums()) {
        (true, Some(g)) => Sums::from_global(g),
        _ => scanned,
    };

    let (mx, rx) = mean_rms(s.w, s.wx, s.wx2);
    let (my, ry) = mean_rms(s.w, s.wy, s.wy2);
    let (max_content, max_pos) = best.unwrap_or((0.0, 0.0));
    StatsResult {
        entries: entries_of(drawable.stored_entries(), s.w),
        integral: s.w,
        mean_x: mx,
        rms_x: rx,
        mean_y: Some(my),
        rms_y: Some(ry),
        underflow: matrix[1][0],
        overflow: matrix[1][2],
        max_pos,
        max_content,
        matrix: Some(matrix),
    }
}

fn entries_text(entries: f64, fmt: &str) -> String {
    if entries.fract() == 0.0 && entries.abs() < 1e15 {
        format!("{}", entries as i64)
    } else {
        ffmt(entries, fmt)
    }
}

impl StatsResult {
    /// Text lines of a statistics box: name, entries, means and RMS values.
    pub fn format_lines(&self, name: &str, fmt: &str) -> Vec<String> {
        let mut lines = vec![
            name.to_string(),
            format!("Entries = {}", entries_text(self.entries, fmt)),
        ];
        match (self.mean_y, self.rms_y) {
            (Some(my), Some(ry)) => {
                lines.push(format!("Mean x = {}", ffmt(self.mean_x, fmt)));
                lines.push(format!("Mean y = {}", ffmt(my, fmt)));
                lines.push(format!("RMS x = {}", ffmt(self.rms_x, fmt)));
                lines.push(format!("RMS y = {}", ffmt(ry, fmt)));
            }
            _ => {
                lines.push(format!("Mean = {}", ffmt(self.mean_x, fmt)));
                lines.push(format!("RMS = {}", ffmt(self.rms_x, fmt)));
            }
        }
        lines
    }
}
