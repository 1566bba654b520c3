use super::common::{group_by_pixel, PixelGroup};
use crate::contour::ContourTable;
use crate::data_types::{AxisMeta, BinAccess, DrawOptions};
use crate::scales::AxisScale;
use crate::utils::{ffmt, PixelsExt};
use gpui::*;
use tracing::debug;

/// One colored block of a 2D histogram in frame-local pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCell {
    pub rect: Bounds<Pixels>,
    /// Contour color index of `value`.
    pub color_index: usize,
    /// Entry of the theme palette the color index maps onto.
    pub palette_index: usize,
    pub value: f64,
    /// Zero-based x index of the cell the value was taken from.
    pub ix: usize,
    /// Zero-based y index of the cell the value was taken from.
    pub iy: usize,
}

fn axis_groups(
    meta: &AxisMeta,
    zoom: Option<(f64, f64)>,
    scale: &AxisScale,
    pixels: f32,
    options: &DrawOptions,
    name: &str,
) -> Vec<PixelGroup> {
    let range = meta.select_range(zoom);
    let reduce = options.optimize.should_reduce(range.len(), pixels);
    if reduce {
        debug!(axis = name, bins = range.len(), pixels, "merging 2D bins per pixel");
    }
    group_by_pixel(
        range,
        |i| Some((scale.map_edge(meta, i)?, scale.map_edge(meta, i + 1)?)),
        reduce,
    )
}

/// Reduces the selected cells of a 2D histogram into colored blocks.
///
/// Bins are merged independently along columns and rows; a merged block shows
/// the largest value of the cells it covers. Cells the contour table does not
/// color (below the first level, NaN) produce no block.
#[allow(clippy::too_many_arguments)]
pub fn reduce_bins_2d(
    data: &dyn BinAccess,
    xm: &AxisMeta,
    ym: &AxisMeta,
    zoom: (Option<(f64, f64)>, Option<(f64, f64)>),
    x: &AxisScale,
    y: &AxisScale,
    frame: Size<Pixels>,
    contour: &ContourTable,
    palette_len: usize,
    options: &DrawOptions,
) -> Vec<DrawCell> {
    let columns = axis_groups(xm, zoom.0, x, frame.width.as_f32(), options, "x");
    let rows = axis_groups(ym, zoom.1, y, frame.height.as_f32(), options, "y");

    let mut out = Vec::new();
    for row in &rows {
        for col in &columns {
            let mut best: Option<(f64, usize, usize)> = None;
            for j in row.bins.clone() {
                for i in col.bins.clone() {
                    let v = data.bin_content(i + 1, j + 1);
                    if v.is_nan() {
                        continue;
                    }
                    if best.is_none_or(|(b, _, _)| v > b) {
                        best = Some((v, i, j));
                    }
                }
            }
            let Some((value, ix, iy)) = best else {
                continue;
            };
            let Some(color_index) = contour.classify_with(value, options.clamp_below_contour) else {
                continue;
            };
            let x0 = col.start_px.min(col.end_px);
            let y0 = row.start_px.min(row.end_px);
            let w = (col.end_px - col.start_px).abs();
            let h = (row.end_px - row.start_px).abs();
            out.push(DrawCell {
                rect: Bounds::new(point(px(x0), px(y0)), size(px(w), px(h))),
                color_index,
                palette_index: contour.palette_index(color_index, palette_len),
                value,
                ix,
                iy,
            });
        }
    }
    out
}

/// Tooltip of the cell `(ix, iy)` (zero-based).
#[allow(clippy::too_many_arguments)]
pub fn cell_tooltip(
    xm: &AxisMeta,
    ym: &AxisMeta,
    x: &AxisScale,
    y: &AxisScale,
    ix: usize,
    iy: usize,
    value: f64,
    fmt: &str,
) -> String {
    let position = |meta: &AxisMeta, scale: &AxisScale, i: usize| {
        if meta.is_categorical() {
            return scale
                .value_text(Some(meta), i as f64, fmt)
                .unwrap_or_else(|| (i + 1).to_string());
        }
        let low = scale.value_text(Some(meta), meta.edge(i), fmt).unwrap_or_default();
        let up = scale.value_text(Some(meta), meta.edge(i + 1), fmt).unwrap_or_default();
        format!("[{low}, {up})")
    };
    format!(
        "bin = {}, {}\nx = {}\ny = {}\nentries = {}",
        ix + 1,
        iy + 1,
        position(xm, x, ix),
        position(ym, y, iy),
        ffmt(value, fmt)
    )
}
