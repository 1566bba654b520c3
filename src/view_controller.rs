use crate::data_types::{AxisId, ViewState};

/// Outcome of validating a zoom window against an axis domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisZoom {
    /// Degenerate request, the axis is left as it is.
    Unchanged,
    /// The window covers the whole domain, stored as "not zoomed".
    Reset,
    Set(f64, f64),
}

/// Zoom arithmetic of a drawing group, kept free of GPUI types so it can be
/// driven from plain tests.
pub struct ViewController;

impl ViewController {
    pub fn order(min: f64, max: f64) -> (f64, f64) {
        if min <= max {
            (min, max)
        } else {
            (max, min)
        }
    }

    /// Orders `min`/`max` and clamps them into the `full` domain.
    pub fn clamp_zoom(min: f64, max: f64, full: (f64, f64)) -> AxisZoom {
        if min == max || min.is_nan() || max.is_nan() {
            return AxisZoom::Unchanged;
        }
        let (lo, hi) = Self::order(min, max);
        let (fmin, fmax) = Self::order(full.0, full.1);
        let lo = lo.max(fmin);
        let hi = hi.min(fmax);
        if lo >= hi {
            return AxisZoom::Unchanged;
        }
        if lo <= fmin && hi >= fmax {
            return AxisZoom::Reset;
        }
        AxisZoom::Set(lo, hi)
    }

    /// Writes one axis update; returns whether the stored window changed.
    pub fn apply(view: &mut ViewState, axis: AxisId, zoom: AxisZoom) -> bool {
        let before = *view.axis(axis);
        let state = view.axis_mut(axis);
        match zoom {
            AxisZoom::Unchanged => return false,
            AxisZoom::Reset => state.clear_zoom(),
            AxisZoom::Set(lo, hi) => state.set_zoom(lo, hi),
        }
        *state != before
    }

    /// Clears the zoom of the selected axes; returns whether any was zoomed.
    pub fn unzoom(view: &mut ViewState, x: bool, y: bool, z: bool) -> bool {
        let mut changed = false;
        for (axis, selected) in [(AxisId::X, x), (AxisId::Y, y), (AxisId::Z, z)] {
            if selected && view.is_zoomed(axis) {
                view.axis_mut(axis).clear_zoom();
                changed = true;
            }
        }
        changed
    }
}
