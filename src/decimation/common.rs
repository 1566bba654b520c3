use std::ops::Range;

/// Half-pixel window inside which consecutive bins are drawn as one.
pub const MERGE_DISTANCE_PX: f32 = 0.5;

/// Consecutive bins drawn as one primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelGroup {
    /// Zero-based bin indices covered by the group.
    pub bins: Range<usize>,
    /// Pixel of the left edge of the first bin.
    pub start_px: f32,
    /// Pixel of the right edge of the last bin.
    pub end_px: f32,
    // right edge of the first bin, the reference for merging
    anchor_px: f32,
}

impl PixelGroup {
    fn single(index: usize, start_px: f32, end_px: f32) -> Self {
        Self {
            bins: index..index + 1,
            start_px,
            end_px,
            anchor_px: end_px,
        }
    }

    pub fn is_merged(&self) -> bool {
        self.bins.len() > 1
    }
}

/// Splits `range` into pixel groups.
///
/// `edges(i)` returns the (left, right) pixel of bin `i`, or `None` for a bin
/// that cannot be drawn; such a bin closes the current group. With `merge`
/// set, a bin joins the current group while its right edge stays within half a
/// pixel of the right edge of the group's first bin.
pub fn group_by_pixel<F>(range: Range<usize>, edges: F, merge: bool) -> Vec<PixelGroup>
where
    F: Fn(usize) -> Option<(f32, f32)>,
{
    let mut out = Vec::new();
    let mut current: Option<PixelGroup> = None;
    for i in range {
        let Some((left, right)) = edges(i) else {
            out.extend(current.take());
            continue;
        };
        match current.as_mut() {
            Some(g) if merge && (right - g.anchor_px).abs() < MERGE_DISTANCE_PX => {
                g.bins.end = i + 1;
                g.end_px = right;
            }
            _ => {
                out.extend(current.take());
                current = Some(PixelGroup::single(i, left, right));
            }
        }
    }
    out.extend(current);
    out
}

/// Index of the largest (`use_max`) or smallest value in `range`; ties keep
/// the earliest index and NaN values are skipped.
pub fn pick_extremum<F>(range: Range<usize>, value: F, use_max: bool) -> usize
where
    F: Fn(usize) -> f64,
{
    let start = range.start;
    let mut best: Option<(usize, f64)> = None;
    for i in range {
        let v = value(i);
        if v.is_nan() {
            continue;
        }
        best = match best {
            Some((_, b)) if (use_max && v > b) || (!use_max && v < b) => Some((i, v)),
            None => Some((i, v)),
            keep => keep,
        };
    }
    best.map_or(start, |(i, _)| i)
}

/// Alternates between maximum and minimum on successive merged groups so
/// both the peak and the valley envelope of oscillating data stay visible.
#[derive(Clone, Copy, Debug)]
pub struct EnvelopePicker {
    use_max: bool,
}

impl Default for EnvelopePicker {
    fn default() -> Self {
        Self { use_max: true }
    }
}

impl EnvelopePicker {
    /// Representative index of a group; single-bin groups do not advance the alternation.
    pub fn pick<F>(&mut self, group: &PixelGroup, value: F) -> usize
    where
        F: Fn(usize) -> f64,
    {
        if !group.is_merged() {
            return group.bins.start;
        }
        let i = pick_extremum(group.bins.clone(), value, self.use_max);
        self.use_max = !self.use_max;
        i
    }
}
