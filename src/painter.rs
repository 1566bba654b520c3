//! Drawing group: the main painter owning the view state, and its overlays.

use crate::contour::ContourTable;
use crate::data_types::{
    shared_view_state, AxisId, Drawable, DrawOptions, SharedViewState, ViewState, ViewStateRef,
};
use crate::decimation::{
    cell_tooltip, reduce_bins_1d, reduce_bins_2d, reduce_points, BinContentKind, DrawBin, DrawCell,
};
use crate::stats::{count_stats, StatsResult};
use crate::theme::HistTheme;
use crate::transform::{axis_scale, effective_range, PlotTransform};
use crate::utils::PixelsExt;
use crate::view_controller::{AxisZoom, ViewController};
use crate::zoom::{ZoomRequest, ZoomTarget};
use gpui::*;
use std::rc::Rc;
use tracing::debug;

/// Everything one drawable contributes to a frame, in frame-local pixels.
#[derive(Clone)]
pub struct FramePrimitives {
    pub transform: PlotTransform,
    pub bins: Vec<DrawBin>,
    pub cells: Vec<DrawCell>,
    /// Contour levels the cells were colored with.
    pub contour: Option<Vec<f64>>,
    pub overlays: Vec<FramePrimitives>,
}

/// Builds the contour table for the visible cells of a 2D drawable, reusing
/// `cache` while the value range and log flag stay the same.
fn contour_for(
    drawable: &Drawable,
    view: &ViewState,
    options: &DrawOptions,
    cache: &mut Option<ContourTable>,
) -> Option<ContourTable> {
    if let Some(levels) = drawable.user_contour() {
        if !cache.as_ref().is_some_and(|c| c.levels() == levels) {
            *cache = Some(ContourTable::user(levels));
        }
        return cache.clone();
    }
    let (xm, ym) = (drawable.axis_meta(AxisId::X)?, drawable.axis_meta(AxisId::Y)?);
    let (zmin, zmax) = match view.z.zoom() {
        Some(z) => z,
        None => drawable.content_range(
            Some(xm.select_range(view.x.zoom())),
            Some(ym.select_range(view.y.zoom())),
        )?,
    };
    let log = view.is_log(AxisId::Z);
    let levels = options.contour_levels;
    if !cache.as_ref().is_some_and(|c| c.built_for(zmin, zmax, levels, log)) {
        *cache = Some(ContourTable::auto(zmin, zmax, levels, log));
    }
    cache.clone()
}

fn render(
    drawable: &Drawable,
    view: &ViewState,
    bounds: Bounds<Pixels>,
    options: &DrawOptions,
    palette_len: usize,
    cache: &mut Option<ContourTable>,
) -> FramePrimitives {
    let transform = PlotTransform::for_drawable(drawable, view, bounds);
    let mut frame = FramePrimitives {
        bins: Vec::new(),
        cells: Vec::new(),
        contour: None,
        overlays: Vec::new(),
        transform,
    };
    let t = &frame.transform;
    match drawable {
        Drawable::Hist1D(h) => {
            frame.bins = reduce_bins_1d(
                h,
                &h.x,
                view.x.zoom(),
                &t.x_scale,
                &t.y_scale,
                t.width(),
                options,
                BinContentKind::Counts,
            );
        }
        Drawable::Profile(p) => {
            frame.bins = reduce_bins_1d(
                p,
                &p.x,
                view.x.zoom(),
                &t.x_scale,
                &t.y_scale,
                t.width(),
                options,
                BinContentKind::ProfileMean,
            );
        }
        Drawable::Graph(g) => {
            let window = effective_range(drawable, view, AxisId::X);
            frame.bins = reduce_points(g, window, &t.x_scale, &t.y_scale, t.width(), options);
        }
        Drawable::Hist2D(h) => {
            if let Some(contour) = contour_for(drawable, view, options, cache) {
                frame.cells = reduce_bins_2d(
                    h,
                    &h.x,
                    &h.y,
                    (view.x.zoom(), view.y.zoom()),
                    &t.x_scale,
                    &t.y_scale,
                    t.bounds.size,
                    &contour,
                    palette_len,
                    options,
                );
                frame.contour = Some(contour.levels().to_vec());
            }
        }
    }
    frame
}

/// Painter of a drawable overlaid on a main painter; reads the group's view
/// state through a weak reference and never owns it.
pub struct OverlayPainter {
    drawable: Drawable,
    view: ViewStateRef,
    contour: Option<ContourTable>,
}

impl OverlayPainter {
    pub fn new(drawable: impl Into<Drawable>, view: ViewStateRef) -> Self {
        Self {
            drawable: drawable.into(),
            view,
            contour: None,
        }
    }

    pub fn drawable(&self) -> &Drawable {
        &self.drawable
    }

    /// Current view of the group, `None` once the main painter is gone.
    pub fn view(&self) -> Option<ViewState> {
        self.view.upgrade().map(|v| *v.borrow())
    }

    fn render(
        &mut self,
        view: &ViewState,
        bounds: Bounds<Pixels>,
        options: &DrawOptions,
        palette_len: usize,
    ) -> FramePrimitives {
        render(&self.drawable, view, bounds, options, palette_len, &mut self.contour)
    }
}

/// Main painter of a drawing group.
///
/// Owns the [`ViewState`] shared with its overlays, applies zoom, unzoom and
/// log toggles to it, and rebuilds the frame primitives of the whole group
/// after every change.
pub struct HistPainter {
    drawable: Drawable,
    view: SharedViewState,
    options: DrawOptions,
    theme: HistTheme,
    bounds: Bounds<Pixels>,
    contour: Option<ContourTable>,
    overlays: Vec<OverlayPainter>,
    tooltips_enabled: bool,
    selection: Option<Bounds<Pixels>>,
    context_menu: Option<Point<Pixels>>,
    frame: Option<FramePrimitives>,
}

impl HistPainter {
    pub fn new(drawable: impl Into<Drawable>, options: DrawOptions, bounds: Bounds<Pixels>) -> Self {
        let mut drawable = drawable.into();
        if let Drawable::Profile(p) = &mut drawable {
            p.error_mode = options.error_mode;
        }
        let mut view = ViewState::default();
        view.x.log = options.log_x;
        view.y.log = options.log_y;
        view.z.log = options.log_z;
        let mut painter = Self {
            drawable,
            view: shared_view_state(view),
            options,
            theme: HistTheme::default(),
            bounds,
            contour: None,
            overlays: Vec::new(),
            tooltips_enabled: true,
            selection: None,
            context_menu: None,
            frame: None,
        };
        painter.redraw();
        painter
    }

    pub fn with_theme(mut self, theme: HistTheme) -> Self {
        self.theme = theme;
        self.redraw();
        self
    }

    pub fn drawable(&self) -> &Drawable {
        &self.drawable
    }

    pub fn options(&self) -> &DrawOptions {
        &self.options
    }

    pub fn theme(&self) -> &HistTheme {
        &self.theme
    }

    /// Snapshot of the group's view state.
    pub fn view(&self) -> ViewState {
        *self.view.borrow()
    }

    /// Non-owning handle for painters drawn on top of this one.
    pub fn view_ref(&self) -> ViewStateRef {
        Rc::downgrade(&self.view)
    }

    pub fn bounds(&self) -> Bounds<Pixels> {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Bounds<Pixels>) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.redraw();
        }
    }

    pub fn add_overlay(&mut self, drawable: impl Into<Drawable>) -> usize {
        let overlay = OverlayPainter::new(drawable, self.view_ref());
        self.overlays.push(overlay);
        self.redraw();
        self.overlays.len() - 1
    }

    pub fn overlays(&self) -> &[OverlayPainter] {
        &self.overlays
    }

    /// Last frame produced by [`redraw`](Self::redraw).
    pub fn frame(&self) -> Option<&FramePrimitives> {
        self.frame.as_ref()
    }

    pub fn contour(&self) -> Option<&ContourTable> {
        self.contour.as_ref()
    }

    pub fn selection(&self) -> Option<Bounds<Pixels>> {
        self.selection
    }

    /// Position of the last context menu request, cleared when read.
    pub fn take_context_menu(&mut self) -> Option<Point<Pixels>> {
        self.context_menu.take()
    }

    pub fn tooltips_enabled(&self) -> bool {
        self.tooltips_enabled
    }

    fn transform(&self) -> PlotTransform {
        PlotTransform::for_drawable(&self.drawable, &self.view.borrow(), self.bounds)
    }

    /// Rebuilds the primitives of the main drawable and every overlay from one
    /// view snapshot. The `&mut` receiver rules out a nested redraw.
    pub fn redraw(&mut self) {
        let view = *self.view.borrow();
        let palette_len = self.theme.palette.len();
        let mut frame = render(
            &self.drawable,
            &view,
            self.bounds,
            &self.options,
            palette_len,
            &mut self.contour,
        );
        for overlay in &mut self.overlays {
            frame
                .overlays
                .push(overlay.render(&view, self.bounds, &self.options, palette_len));
        }
        self.frame = Some(frame);
    }

    /// Applies a new zoom window on each axis; an axis whose bounds are equal
    /// is left untouched. Windows are clamped to the axis domain, and a
    /// window the drawable cannot be zoomed into is dropped.
    pub fn zoom(
        &mut self,
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
        z: Option<(f64, f64)>,
    ) -> bool {
        self.apply_zoom(ZoomRequest {
            x: (xmin != xmax).then_some((xmin, xmax)),
            y: (ymin != ymax).then_some((ymin, ymax)),
            z: z.filter(|(a, b)| a != b),
        })
    }

    fn apply_zoom(&mut self, request: ZoomRequest) -> bool {
        let mut updates = Vec::new();
        for axis in [AxisId::X, AxisId::Y, AxisId::Z] {
            let Some((min, max)) = request.axis(axis) else {
                continue;
            };
            if axis == AxisId::Z && self.drawable.dimension() < 2 {
                continue;
            }
            let update = ViewController::clamp_zoom(min, max, self.drawable.full_range(axis));
            if let AxisZoom::Set(lo, hi) = update {
                if !self.can_zoom_in(axis, lo, hi) {
                    debug!(axis = axis.name(), min = lo, max = hi, "zoom rejected");
                    continue;
                }
            }
            updates.push((axis, update));
        }

        let changed = {
            let mut view = self.view.borrow_mut();
            let mut changed = false;
            for (axis, update) in updates {
                changed |= ViewController::apply(&mut view, axis, update);
            }
            changed
        };
        if changed {
            let view = self.view();
            debug!(x = ?view.x.zoom(), y = ?view.y.zoom(), z = ?view.z.zoom(), "zoom applied");
            self.redraw();
        }
        changed
    }

    /// Clears the zoom of the chosen axes.
    pub fn unzoom(&mut self, x: bool, y: bool, z: bool) -> bool {
        let changed = ViewController::unzoom(&mut self.view.borrow_mut(), x, y, z);
        if changed {
            debug!(x, y, z, "unzoom applied");
            self.redraw();
        }
        changed
    }

    /// Flips the log flag of an axis and redraws; toggling z rebuilds the contour.
    pub fn toggle_log(&mut self, axis: AxisId) -> bool {
        let log = {
            let mut view = self.view.borrow_mut();
            let state = view.axis_mut(axis);
            state.log = !state.log;
            state.log
        };
        if axis == AxisId::Z {
            self.contour = None;
        }
        debug!(axis = axis.name(), log, "log scale toggled");
        self.redraw();
        log
    }

    /// Formats a value of an axis the way the axis displays it; `None` for a
    /// categorical index outside the bins.
    pub fn axis_as_text(&self, axis: AxisId, value: f64) -> Option<String> {
        let scale = match self.transform().scale(axis) {
            Some(scale) => scale.clone(),
            None => axis_scale(&self.drawable, &self.view(), axis, (0.0, 1.0)),
        };
        scale.value_text(self.drawable.axis_meta(axis), value, &self.options.tooltip_format)
    }

    /// Whether `[min, max]` on `axis` still holds more than one data point.
    pub fn can_zoom_in(&self, axis: AxisId, min: f64, max: f64) -> bool {
        min < max && self.drawable.points_in_range(axis, min, max) > 1
    }

    pub fn stats(&self) -> StatsResult {
        count_stats(&self.drawable, &self.view.borrow(), None)
    }

    /// Statistics box text of the main drawable.
    pub fn stats_lines(&self, name: &str) -> Vec<String> {
        self.stats().format_lines(name, &self.options.stat_format)
    }

    /// Tooltip of the primitive under a frame-local position, when enabled.
    pub fn tooltip_at(&self, position: Point<Pixels>) -> Option<String> {
        if !self.tooltips_enabled {
            return None;
        }
        let frame = self.frame.as_ref()?;
        let x = position.x.as_f32();
        if let Some(bin) = frame
            .bins
            .iter()
            .find(|b| x >= b.x0.min(b.x1) - 0.5 && x <= b.x0.max(b.x1) + 0.5)
        {
            return Some(bin.tooltip.clone());
        }
        let (Drawable::Hist2D(h), t) = (&self.drawable, &frame.transform) else {
            return None;
        };
        let cell = frame.cells.iter().find(|c| c.rect.contains(&position))?;
        Some(cell_tooltip(
            &h.x,
            &h.y,
            &t.x_scale,
            &t.y_scale,
            cell.ix,
            cell.iy,
            cell.value,
            &self.options.tooltip_format,
        ))
    }
}

impl ZoomTarget for HistPainter {
    fn frame_size(&self) -> Size<Pixels> {
        self.bounds.size
    }

    fn axis_to_value(&self, axis: AxisId, pixel: f32) -> f64 {
        self.transform().local_to_value(axis, pixel)
    }

    fn can_zoom_in(&self, axis: AxisId, min: f64, max: f64) -> bool {
        HistPainter::can_zoom_in(self, axis, min, max)
    }

    fn zoom(&mut self, request: ZoomRequest) -> bool {
        self.apply_zoom(request)
    }

    fn unzoom(&mut self, x: bool, y: bool, z: bool) -> bool {
        HistPainter::unzoom(self, x, y, z)
    }

    fn show_context_menu(&mut self, position: Point<Pixels>) {
        debug!(x = position.x.as_f32(), y = position.y.as_f32(), "context menu requested");
        self.context_menu = Some(position);
    }

    fn set_tooltips_enabled(&mut self, enabled: bool) {
        self.tooltips_enabled = enabled;
    }

    fn draw_selection(&mut self, selection: Option<Bounds<Pixels>>) {
        self.selection = selection;
    }
}
