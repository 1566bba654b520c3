//! Transform helper for coordinate projection

use crate::data_types::{AxisId, AxisKind, Drawable, ViewState};
use crate::scales::AxisScale;
use crate::utils::PixelsExt;
use gpui::*;

/// Resolves the scale kind of an axis of `drawable` under the current log flags.
pub fn axis_kind(drawable: &Drawable, view: &ViewState, axis: AxisId) -> AxisKind {
    let log = view.is_log(axis);
    match drawable.axis_meta(axis) {
        Some(meta) => meta.kind(log),
        None if log => AxisKind::Log,
        None => AxisKind::Linear,
    }
}

/// Effective displayed range of an axis: the zoom window when set, otherwise
/// the full range (for 1D value axes, the content range of the visible bins).
pub fn effective_range(drawable: &Drawable, view: &ViewState, axis: AxisId) -> (f64, f64) {
    if let Some(zoom) = view.axis(axis).zoom() {
        return zoom;
    }
    if axis == AxisId::Y && drawable.dimension() == 1 && drawable.is_binned() {
        if let (Some(meta), Some(zoom)) = (drawable.axis_meta(AxisId::X), view.x.zoom()) {
            return drawable.value_range(Some(meta.select_range(Some(zoom))));
        }
    }
    drawable.full_range(axis)
}

/// Builds the scale of one axis; `range` is the pixel interval it maps onto.
pub fn axis_scale(drawable: &Drawable, view: &ViewState, axis: AxisId, range: (f32, f32)) -> AxisScale {
    AxisScale::build(
        axis_kind(drawable, view, axis),
        effective_range(drawable, view, axis),
        range,
        drawable.axis_meta(axis),
    )
}

#[derive(Clone)]
pub struct PlotTransform {
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
    pub bounds: Bounds<Pixels>,
}

impl PlotTransform {
    pub fn new(x_scale: AxisScale, y_scale: AxisScale, bounds: Bounds<Pixels>) -> Self {
        Self {
            x_scale,
            y_scale,
            bounds,
        }
    }

    /// Frame mapping of a drawable: x grows to the right, y grows upwards.
    pub fn for_drawable(drawable: &Drawable, view: &ViewState, bounds: Bounds<Pixels>) -> Self {
        let w = bounds.size.width.as_f32();
        let h = bounds.size.height.as_f32();
        Self::new(
            axis_scale(drawable, view, AxisId::X, (0.0, w)),
            axis_scale(drawable, view, AxisId::Y, (h, 0.0)),
            bounds,
        )
    }

    pub fn width(&self) -> f32 {
        self.bounds.size.width.as_f32()
    }

    pub fn height(&self) -> f32 {
        self.bounds.size.height.as_f32()
    }

    pub fn scale(&self, axis: AxisId) -> Option<&AxisScale> {
        match axis {
            AxisId::X => Some(&self.x_scale),
            AxisId::Y => Some(&self.y_scale),
            AxisId::Z => None,
        }
    }

    /// Frame-local pixel to data value on one axis.
    pub fn local_to_value(&self, axis: AxisId, pixel: f32) -> f64 {
        match self.scale(axis) {
            Some(scale) => scale.to_value(pixel),
            None => 0.0,
        }
    }
}
