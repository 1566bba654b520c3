use super::common::{group_by_pixel, EnvelopePicker};
use crate::data_types::{AxisMeta, BinAccess, DrawOptions};
use crate::scales::AxisScale;
use crate::utils::ffmt;
use tracing::debug;

/// One drawable primitive of a 1D histogram, in frame-local pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawBin {
    pub x0: f32,
    pub x1: f32,
    /// Pixel of `value` on the value axis.
    pub y: f32,
    pub value: f64,
    pub error: f64,
    /// Zero-based index of the bin the value was taken from.
    pub bin: usize,
    pub tooltip: String,
}

/// What the value of a 1D bin means, which changes the tooltip wording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinContentKind {
    Counts,
    ProfileMean,
}

/// Reduces the bins of a 1D histogram selected by `zoom` into drawable primitives.
///
/// The selection always carries one extra bin on each side of the zoom window.
/// When the selection is large enough for `options.optimize`, bins whose right
/// edges land within half a pixel of each other are merged and represented by
/// their extremal value, alternating max and min between merged groups.
#[allow(clippy::too_many_arguments)]
pub fn reduce_bins_1d(
    data: &dyn BinAccess,
    meta: &AxisMeta,
    zoom: Option<(f64, f64)>,
    x: &AxisScale,
    y: &AxisScale,
    pixel_width: f32,
    options: &DrawOptions,
    kind: BinContentKind,
) -> Vec<DrawBin> {
    let range = meta.select_range(zoom);
    let reduce = options.optimize.should_reduce(range.len(), pixel_width);
    if reduce {
        debug!(bins = range.len(), pixel_width, "merging 1D bins per pixel");
    }

    let groups = group_by_pixel(
        range,
        |i| Some((x.map_edge(meta, i)?, x.map_edge(meta, i + 1)?)),
        reduce,
    );

    let mut picker = EnvelopePicker::default();
    let mut out = Vec::with_capacity(groups.len());
    for group in &groups {
        let i = picker.pick(group, |i| data.bin_content(i + 1, 0));
        let value = data.bin_content(i + 1, 0);
        let error = data.bin_error(i + 1, 0);
        out.push(DrawBin {
            x0: group.start_px,
            x1: group.end_px,
            y: y.to_pixel(value),
            value,
            error,
            bin: i,
            tooltip: bin_tooltip(meta, x, i, value, error, &options.tooltip_format, kind),
        });
    }
    out
}

pub fn bin_tooltip(
    meta: &AxisMeta,
    x: &AxisScale,
    index: usize,
    value: f64,
    error: f64,
    fmt: &str,
    kind: BinContentKind,
) -> String {
    let position = if meta.is_categorical() {
        x.value_text(Some(meta), index as f64, fmt)
            .unwrap_or_else(|| (index + 1).to_string())
    } else {
        let low = x.value_text(Some(meta), meta.edge(index), fmt).unwrap_or_default();
        let up = x.value_text(Some(meta), meta.edge(index + 1), fmt).unwrap_or_default();
        format!("[{low}, {up})")
    };
    match kind {
        BinContentKind::Counts => format!(
            "bin = {}\nx = {}\nentries = {}",
            index + 1,
            position,
            ffmt(value, fmt)
        ),
        BinContentKind::ProfileMean => format!(
            "bin = {}\nx = {}\nvalue = {}\nerror = {}",
            index + 1,
            position,
            ffmt(value, fmt),
            ffmt(error, fmt)
        ),
    }
}
