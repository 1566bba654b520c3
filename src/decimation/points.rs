use super::bins1d::DrawBin;
use super::common::{group_by_pixel, EnvelopePicker};
use crate::data_types::{DrawOptions, Graph};
use crate::scales::AxisScale;
use crate::utils::ffmt;
use tracing::debug;

/// Indices of the points inside `[xmin, xmax]`, each run widened by its
/// neighbours so connecting lines reach the frame edge.
fn visible_indices(graph: &Graph, xmin: f64, xmax: f64) -> Vec<usize> {
    let n = graph.len();
    let inside = |i: usize| graph.x[i] >= xmin && graph.x[i] <= xmax;
    (0..n)
        .filter(|&i| {
            inside(i) || (i > 0 && inside(i - 1)) || (i + 1 < n && inside(i + 1))
        })
        .filter(|&i| graph.x[i].is_finite() && graph.y[i].is_finite())
        .collect()
}

/// Reduces the points of a graph visible in the `x` window into markers
/// (`x0 == x1`); consecutive points sharing a pixel column are merged the
/// same way histogram bins are.
pub fn reduce_points(
    graph: &Graph,
    window: (f64, f64),
    x: &AxisScale,
    y: &AxisScale,
    pixel_width: f32,
    options: &DrawOptions,
) -> Vec<DrawBin> {
    let (xmin, xmax) = if window.0 <= window.1 { window } else { (window.1, window.0) };
    let selected = visible_indices(graph, xmin, xmax);
    let reduce = options.optimize.should_reduce(selected.len(), pixel_width);
    if reduce {
        debug!(points = selected.len(), pixel_width, "merging graph points per pixel");
    }

    let groups = group_by_pixel(
        0..selected.len(),
        |k| {
            let p = x.to_pixel(graph.x[selected[k]]);
            Some((p, p))
        },
        reduce,
    );

    let fmt = options.tooltip_format.as_str();
    let mut picker = EnvelopePicker::default();
    groups
        .iter()
        .map(|group| {
            let k = picker.pick(group, |k| graph.y[selected[k]]);
            let i = selected[k];
            let px = x.to_pixel(graph.x[i]);
            DrawBin {
                x0: px,
                x1: px,
                y: y.to_pixel(graph.y[i]),
                value: graph.y[i],
                error: 0.0,
                bin: i,
                tooltip: format!(
                    "point = {}\nx = {}\ny = {}",
                    i,
                    x.value_text(None, graph.x[i], fmt).unwrap_or_else(|| ffmt(graph.x[i], fmt)),
                    ffmt(graph.y[i], fmt)
                ),
            }
        })
        .collect()
}
