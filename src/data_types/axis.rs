use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Identifies one of the three axes of a drawing group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisId {
    X,
    Y,
    Z,
}

impl AxisId {
    pub fn name(&self) -> &'static str {
        match self {
            AxisId::X => "x",
            AxisId::Y => "y",
            AxisId::Z => "z",
        }
    }
}

/// How values on an axis are interpreted before being mapped to pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisKind {
    #[default]
    Linear,
    Log,
    Time,
    Categorical,
}

/// Data-space interval an axis represents, already resolved to a kind.
///
/// For categorical axes `min`/`max` are bin-edge indices, not coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
    pub kind: AxisKind,
}

impl AxisDomain {
    pub fn new(min: f64, max: f64, kind: AxisKind) -> Self {
        Self { min, max, kind }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Binning description of one histogram axis.
///
/// Bins are numbered 1..=nbins, bin 0 is the underflow and nbins+1 the overflow.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisMeta {
    pub nbins: usize,
    pub min: f64,
    pub max: f64,
    /// Non-uniform bin edges, `nbins + 1` entries when present.
    #[serde(default)]
    pub edges: Option<Vec<f64>>,
    /// Epoch (seconds since 1970) of a time axis.
    #[serde(default)]
    pub time_offset: Option<f64>,
    /// Bin labels of a categorical axis, one per bin.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

impl AxisMeta {
    pub fn new(nbins: usize, min: f64, max: f64) -> Self {
        Self {
            nbins,
            min,
            max,
            ..Default::default()
        }
    }

    pub fn with_edges(edges: Vec<f64>) -> Self {
        let nbins = edges.len().saturating_sub(1);
        let min = edges.first().copied().unwrap_or(0.0);
        let max = edges.last().copied().unwrap_or(1.0);
        Self {
            nbins,
            min,
            max,
            edges: (nbins > 0).then_some(edges),
            ..Default::default()
        }
    }

    pub fn with_time_offset(mut self, epoch_sec: f64) -> Self {
        self.time_offset = Some(epoch_sec);
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_time(&self) -> bool {
        self.time_offset.is_some()
    }

    pub fn is_categorical(&self) -> bool {
        self.labels.as_ref().is_some_and(|l| !l.is_empty())
    }

    /// Resolves the axis kind, a log flag only applies to continuous axes.
    pub fn kind(&self, log: bool) -> AxisKind {
        if self.is_categorical() {
            AxisKind::Categorical
        } else if self.is_time() {
            AxisKind::Time
        } else if log {
            AxisKind::Log
        } else {
            AxisKind::Linear
        }
    }

    fn uniform_width(&self) -> f64 {
        if self.nbins == 0 {
            return 0.0;
        }
        (self.max - self.min) / self.nbins as f64
    }

    /// Position of edge `k` (0..=nbins), the left edge of bin `k + 1`.
    pub fn edge(&self, k: usize) -> f64 {
        if let Some(edges) = &self.edges {
            if k < edges.len() {
                return edges[k];
            }
        }
        self.min + k as f64 * self.uniform_width()
    }

    pub fn bin_low_edge(&self, bin: usize) -> f64 {
        if bin == 0 {
            // underflow extends one bin width below the axis
            return self.min - self.uniform_width();
        }
        self.edge(bin - 1)
    }

    pub fn bin_up_edge(&self, bin: usize) -> f64 {
        if bin > self.nbins {
            return self.max + self.uniform_width();
        }
        self.edge(bin)
    }

    pub fn bin_center(&self, bin: usize) -> f64 {
        0.5 * (self.bin_low_edge(bin) + self.bin_up_edge(bin))
    }

    pub fn bin_width(&self, bin: usize) -> f64 {
        if self.nbins == 0 {
            return 0.0;
        }
        let b = bin.clamp(1, self.nbins);
        self.bin_up_edge(b) - self.bin_low_edge(b)
    }

    /// Bin number containing `value`, 0 for underflow and nbins+1 for overflow.
    pub fn find_bin(&self, value: f64) -> usize {
        if self.nbins == 0 || value.is_nan() || value < self.min {
            return 0;
        }
        if value >= self.max {
            return self.nbins + 1;
        }
        match &self.edges {
            Some(edges) => {
                // first edge strictly greater than value
                let upper = edges.partition_point(|e| *e <= value);
                upper.clamp(1, self.nbins)
            }
            None => {
                let b = ((value - self.min) / self.uniform_width()).floor() as usize + 1;
                b.clamp(1, self.nbins)
            }
        }
    }

    /// Zero-based indices of the in-range bins selected by a zoom window, widened
    /// by one bin on each side so drawn lines do not stop short of the frame.
    pub fn select_range(&self, zoom: Option<(f64, f64)>) -> Range<usize> {
        let n = self.nbins;
        let Some((zmin, zmax)) = zoom else {
            return 0..n;
        };
        let (first, last) = if self.is_categorical() {
            (zmin.floor().max(0.0) as usize, zmax.ceil().max(0.0) as usize)
        } else {
            let first = self.find_bin(zmin).max(1) - 1;
            let last = self.find_bin(zmax).clamp(1, n.max(1));
            (first, last)
        };
        let left = first.saturating_sub(1).min(n);
        let right = (last + 1).min(n);
        left..right.max(left)
    }

    /// Label of the zero-based bin `index`, if this axis is categorical.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.as_ref()?.get(index).map(String::as_str)
    }
}
