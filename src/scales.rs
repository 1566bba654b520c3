use crate::data_types::{AxisDomain, AxisKind, AxisMeta};
use crate::utils::date_formatter::format_axis_time;
use crate::utils::ffmt;
use d3rs::scale::{LinearScale, Scale as D3Scale};

/// Pixels before the axis start where unmappable log values are parked.
pub const LOG_UNDERFLOW_PX: f32 = 5.0;

/// Replacement for a non-positive log minimum when no positive bin edge exists.
pub const LOG_MIN_FRACTION: f64 = 1e-4;

/// Coordinate mapping of one axis between data space and frame pixels.
///
/// The affine part is always a d3 linear scale; log, time and categorical
/// axes transform values before and after it.
#[derive(Clone)]
pub struct AxisScale {
    kind: AxisKind,
    min: f64,
    max: f64,
    range: (f32, f32),
    inner: LinearScale,
    time_offset: f64,
}

fn ordered(domain: (f64, f64)) -> (f64, f64) {
    if domain.0 <= domain.1 {
        domain
    } else {
        (domain.1, domain.0)
    }
}

/// Widens a zero-width linear domain so the pixel range never collapses.
fn widen_linear(min: f64, max: f64) -> (f64, f64) {
    if min != max {
        return (min, max);
    }
    if min == 0.0 {
        (-1.0, 1.0)
    } else {
        let d = 0.01 * min.abs();
        (min - d, max + d)
    }
}

/// First strictly positive left bin edge below `max`, scanning bins in axis order.
fn first_positive_edge(meta: &AxisMeta, max: f64) -> Option<f64> {
    (0..meta.nbins)
        .map(|k| meta.edge(k))
        .find(|e| *e > 0.0 && *e < max)
}

impl AxisScale {
    fn with_inner(kind: AxisKind, min: f64, max: f64, range: (f32, f32), time_offset: f64) -> Self {
        let (t0, t1) = match kind {
            AxisKind::Log => (min.log10(), max.log10()),
            AxisKind::Time => ((min + time_offset) * 1000.0, (max + time_offset) * 1000.0),
            AxisKind::Linear | AxisKind::Categorical => (min, max),
        };
        let inner = LinearScale::new()
            .domain(t0, t1)
            .range(range.0 as f64, range.1 as f64);
        Self {
            kind,
            min,
            max,
            range,
            inner,
            time_offset,
        }
    }

    pub fn new_linear(domain: (f64, f64), range: (f32, f32)) -> Self {
        let (min, max) = ordered(domain);
        let (min, max) = widen_linear(min, max);
        Self::with_inner(AxisKind::Linear, min, max, range, 0.0)
    }

    /// Log scale; a non-positive minimum is replaced by the first positive bin
    /// edge of `bins`, or by `1e-4 * max` when there is none.
    pub fn new_log(domain: (f64, f64), range: (f32, f32), bins: Option<&AxisMeta>) -> Self {
        let (mut min, mut max) = ordered(domain);
        if max <= 0.0 {
            max = 1.0;
        }
        if min <= 0.0 {
            min = bins
                .and_then(|m| first_positive_edge(m, max))
                .unwrap_or(LOG_MIN_FRACTION * max);
        }
        if min >= max {
            min = LOG_MIN_FRACTION * max;
        }
        Self::with_inner(AxisKind::Log, min, max, range, 0.0)
    }

    /// Time scale over seconds counted from `epoch` (seconds since 1970).
    pub fn new_time(domain: (f64, f64), range: (f32, f32), epoch: f64) -> Self {
        let (min, max) = ordered(domain);
        let (min, max) = widen_linear(min, max);
        Self::with_inner(AxisKind::Time, min, max, range, epoch)
    }

    /// Categorical scale over bin-edge indices.
    pub fn new_categorical(domain: (f64, f64), range: (f32, f32)) -> Self {
        let (min, max) = ordered(domain);
        let max = if max <= min { min + 1.0 } else { max };
        Self::with_inner(AxisKind::Categorical, min, max, range, 0.0)
    }

    /// Builds the scale of a resolved axis kind over its effective range.
    pub fn build(
        kind: AxisKind,
        effective: (f64, f64),
        range: (f32, f32),
        meta: Option<&AxisMeta>,
    ) -> Self {
        match kind {
            AxisKind::Linear => Self::new_linear(effective, range),
            AxisKind::Log => Self::new_log(effective, range, meta),
            AxisKind::Time => Self::new_time(
                effective,
                range,
                meta.and_then(|m| m.time_offset).unwrap_or(0.0),
            ),
            AxisKind::Categorical => Self::new_categorical(effective, range),
        }
    }

    pub fn kind(&self) -> AxisKind {
        self.kind
    }

    /// Effective domain after degenerate-range fallbacks.
    pub fn domain(&self) -> AxisDomain {
        AxisDomain::new(self.min, self.max, self.kind)
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    pub fn time_offset(&self) -> f64 {
        self.time_offset
    }

    fn underflow_px(&self) -> f32 {
        let dir = if self.range.1 >= self.range.0 { 1.0 } else { -1.0 };
        self.range.0 - dir * LOG_UNDERFLOW_PX
    }

    pub fn to_pixel(&self, value: f64) -> f32 {
        let t = match self.kind {
            AxisKind::Linear => value,
            AxisKind::Log => {
                if !(value > 0.0) || value < self.min {
                    return self.underflow_px();
                }
                value.log10()
            }
            AxisKind::Time => (value + self.time_offset) * 1000.0,
            AxisKind::Categorical => value.clamp(self.min, self.max),
        };
        let res = self.inner.scale(t) as f32;
        if res.is_finite() {
            res
        } else {
            self.range.0
        }
    }

    pub fn to_value(&self, pixel: f32) -> f64 {
        let Some(t) = self.inner.invert(pixel as f64).filter(|t| t.is_finite()) else {
            return self.min;
        };
        match self.kind {
            AxisKind::Linear => t,
            AxisKind::Log => 10f64.powf(t),
            AxisKind::Time => t / 1000.0 - self.time_offset,
            AxisKind::Categorical => t.clamp(self.min, self.max),
        }
    }

    /// Pixel of bin edge `k` (the left edge of bin `k + 1`), `None` when the edge
    /// cannot be shown on a log axis.
    pub fn map_edge(&self, meta: &AxisMeta, k: usize) -> Option<f32> {
        if self.kind == AxisKind::Categorical {
            return Some(self.to_pixel(k as f64));
        }
        let edge = meta.edge(k);
        if self.kind == AxisKind::Log && edge <= 0.0 {
            return None;
        }
        Some(self.to_pixel(edge))
    }

    /// Tick positions inside the effective range, in axis units.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self.kind {
            AxisKind::Linear => self.inner.ticks(count),
            AxisKind::Time => self
                .inner
                .ticks(count)
                .into_iter()
                .map(|t| t / 1000.0 - self.time_offset)
                .collect(),
            AxisKind::Log => {
                let (lo, hi) = (self.min.log10(), self.max.log10());
                let decades: Vec<f64> = (lo.ceil() as i32..=hi.floor() as i32)
                    .map(|k| 10f64.powi(k))
                    .collect();
                if decades.len() >= 2 {
                    decades
                } else {
                    self.inner.ticks(count).into_iter().map(|t| 10f64.powf(t)).collect()
                }
            }
            AxisKind::Categorical => {
                let first = self.min.floor() as i64;
                let last = self.max.ceil() as i64;
                let n = (last - first).max(0) as usize;
                let step = n.div_ceil(count.max(1)).max(1);
                (first..last)
                    .step_by(step)
                    .map(|i| i as f64 + 0.5)
                    .collect()
            }
        }
    }

    /// Text of an axis value: the bin label on categorical axes (`None` outside
    /// the bins), a calendar string on time axes, `fmt` formatting otherwise.
    pub fn value_text(&self, meta: Option<&AxisMeta>, value: f64, fmt: &str) -> Option<String> {
        match self.kind {
            AxisKind::Categorical => {
                let meta = meta?;
                let index = value.floor();
                if !(index >= 0.0) || index >= meta.nbins as f64 {
                    return None;
                }
                let index = index as usize;
                Some(
                    meta.label(index)
                        .map(str::to_owned)
                        .unwrap_or_else(|| (index + 1).to_string()),
                )
            }
            AxisKind::Time => Some(format_axis_time(value, self.time_offset, self.max - self.min)),
            AxisKind::Linear | AxisKind::Log => Some(ffmt(value, fmt)),
        }
    }
}
