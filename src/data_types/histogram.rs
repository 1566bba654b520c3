use super::axis::AxisMeta;
use serde::{Deserialize, Serialize};

/// Global sums accumulated while filling, used for unzoomed statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalSums {
    pub sumw: f64,
    pub sumw2: f64,
    pub sumwx: f64,
    pub sumwx2: f64,
    #[serde(default)]
    pub sumwy: f64,
    #[serde(default)]
    pub sumwy2: f64,
    #[serde(default)]
    pub sumwxy: f64,
}

/// Error computation of profile bins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorMode {
    /// Standard error on the mean of y.
    #[default]
    Mean,
    /// Standard deviation of y.
    Spread,
    /// Like `Mean`, with a `1/sqrt(12 neff)` floor for integer-valued y.
    SpreadI,
    /// `1/sqrt(sumw)`, for gaussian y weighted by `1/sigma^2`.
    SpreadG,
}

/// Read access to bin values, the narrow interface the drawing core consumes.
///
/// Indices are bin numbers including underflow (0) and overflow (nbins + 1);
/// `iy` is ignored by one-dimensional data.
pub trait BinAccess {
    fn bin_content(&self, ix: usize, iy: usize) -> f64;
    fn bin_error(&self, ix: usize, iy: usize) -> f64;
}

fn cell_error(contents: &[f64], sumw2: &[f64], cell: usize) -> f64 {
    if contents.is_empty() {
        return 0.0;
    }
    let cell = cell.min(contents.len() - 1);
    if sumw2.len() == contents.len() {
        return sumw2[cell].abs().sqrt();
    }
    contents[cell].abs().sqrt()
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Hist1D {
    pub x: AxisMeta,
    /// `nbins + 2` cells, underflow first.
    pub contents: Vec<f64>,
    #[serde(default)]
    pub sumw2: Vec<f64>,
    #[serde(default)]
    pub entries: f64,
    #[serde(default)]
    pub sums: Option<GlobalSums>,
}

impl Hist1D {
    pub fn new(x: AxisMeta) -> Self {
        let contents = vec![0.0; x.nbins + 2];
        Self {
            x,
            contents,
            ..Default::default()
        }
    }

    /// Builds a histogram from in-range bin contents, under/overflow left empty.
    pub fn from_bins(x: AxisMeta, bins: &[f64]) -> Self {
        let mut h = Self::new(x);
        for (i, v) in bins.iter().enumerate().take(h.x.nbins) {
            h.contents[i + 1] = *v;
        }
        h
    }

    pub fn with_sums(mut self, sums: GlobalSums) -> Self {
        self.sums = Some(sums);
        self
    }

    pub fn with_entries(mut self, entries: f64) -> Self {
        self.entries = entries;
        self
    }

    /// Adds `weight` to the bin containing `x`, keeping the global sums up to date.
    pub fn fill(&mut self, x: f64, weight: f64) {
        let bin = self.x.find_bin(x);
        self.contents[bin] += weight;
        if self.sumw2.len() == self.contents.len() {
            self.sumw2[bin] += weight * weight;
        }
        self.entries += 1.0;
        if bin >= 1 && bin <= self.x.nbins {
            let sums = self.sums.get_or_insert_with(GlobalSums::default);
            sums.sumw += weight;
            sums.sumw2 += weight * weight;
            sums.sumwx += weight * x;
            sums.sumwx2 += weight * x * x;
        }
    }
}

impl BinAccess for Hist1D {
    fn bin_content(&self, ix: usize, _iy: usize) -> f64 {
        self.contents.get(ix).copied().unwrap_or(0.0)
    }

    fn bin_error(&self, ix: usize, _iy: usize) -> f64 {
        cell_error(&self.contents, &self.sumw2, ix)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Hist2D {
    pub x: AxisMeta,
    pub y: AxisMeta,
    /// `(nx + 2) * (ny + 2)` cells, x varies fastest.
    pub contents: Vec<f64>,
    #[serde(default)]
    pub sumw2: Vec<f64>,
    #[serde(default)]
    pub entries: f64,
    #[serde(default)]
    pub sums: Option<GlobalSums>,
    /// User supplied contour levels.
    #[serde(default)]
    pub contour: Option<Vec<f64>>,
}

impl Hist2D {
    pub fn new(x: AxisMeta, y: AxisMeta) -> Self {
        let contents = vec![0.0; (x.nbins + 2) * (y.nbins + 2)];
        Self {
            x,
            y,
            contents,
            ..Default::default()
        }
    }

    pub fn cell(&self, ix: usize, iy: usize) -> usize {
        let nx = self.x.nbins + 2;
        ix.min(nx - 1) + nx * iy.min(self.y.nbins + 1)
    }

    pub fn set_bin_content(&mut self, ix: usize, iy: usize, value: f64) {
        let c = self.cell(ix, iy);
        self.contents[c] = value;
    }

    pub fn fill(&mut self, x: f64, y: f64, weight: f64) {
        let (ix, iy) = (self.x.find_bin(x), self.y.find_bin(y));
        let c = self.cell(ix, iy);
        self.contents[c] += weight;
        if self.sumw2.len() == self.contents.len() {
            self.sumw2[c] += weight * weight;
        }
        self.entries += 1.0;
        let inside = (1..=self.x.nbins).contains(&ix) && (1..=self.y.nbins).contains(&iy);
        if inside {
            let s = self.sums.get_or_insert_with(GlobalSums::default);
            s.sumw += weight;
            s.sumw2 += weight * weight;
            s.sumwx += weight * x;
            s.sumwx2 += weight * x * x;
            s.sumwy += weight * y;
            s.sumwy2 += weight * y * y;
            s.sumwxy += weight * x * y;
        }
    }

    pub fn with_contour(mut self, levels: Vec<f64>) -> Self {
        self.contour = Some(levels);
        self
    }

    pub fn with_sums(mut self, sums: GlobalSums) -> Self {
        self.sums = Some(sums);
        self
    }
}

impl BinAccess for Hist2D {
    fn bin_content(&self, ix: usize, iy: usize) -> f64 {
        self.contents.get(self.cell(ix, iy)).copied().unwrap_or(0.0)
    }

    fn bin_error(&self, ix: usize, iy: usize) -> f64 {
        cell_error(&self.contents, &self.sumw2, self.cell(ix, iy))
    }
}

/// Profile histogram: each bin holds the weighted mean of y values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub x: AxisMeta,
    /// Sum of `w * y` per cell.
    pub contents: Vec<f64>,
    /// Sum of `w` per cell.
    pub bin_entries: Vec<f64>,
    /// Sum of `w * y^2` per cell.
    pub sumw2: Vec<f64>,
    /// Sum of `w^2` per cell, absent for unweighted fills.
    #[serde(default)]
    pub bin_sumw2: Option<Vec<f64>>,
    #[serde(default)]
    pub entries: f64,
    #[serde(default)]
    pub sums: Option<GlobalSums>,
    #[serde(default)]
    pub error_mode: ErrorMode,
}

impl Profile {
    pub fn new(x: AxisMeta) -> Self {
        let n = x.nbins + 2;
        Self {
            x,
            contents: vec![0.0; n],
            bin_entries: vec![0.0; n],
            sumw2: vec![0.0; n],
            ..Default::default()
        }
    }

    pub fn fill(&mut self, x: f64, y: f64, weight: f64) {
        let bin = self.x.find_bin(x);
        self.contents[bin] += weight * y;
        self.bin_entries[bin] += weight;
        self.sumw2[bin] += weight * y * y;
        if let Some(bw2) = self.bin_sumw2.as_mut() {
            bw2[bin] += weight * weight;
        }
        self.entries += 1.0;
        if bin >= 1 && bin <= self.x.nbins {
            let s = self.sums.get_or_insert_with(GlobalSums::default);
            s.sumw += weight;
            s.sumw2 += weight * weight;
            s.sumwx += weight * x;
            s.sumwx2 += weight * x * x;
            s.sumwy += weight * y;
            s.sumwy2 += weight * y * y;
        }
    }

    pub fn effective_entries(&self, bin: usize) -> f64 {
        let Some(&sumw) = self.bin_entries.get(bin) else {
            return 0.0;
        };
        match &self.bin_sumw2 {
            Some(bw2) if bw2.len() == self.bin_entries.len() => {
                let s2 = bw2[bin];
                if s2 > 0.0 {
                    sumw * sumw / s2
                } else {
                    0.0
                }
            }
            _ => sumw,
        }
    }
}

impl BinAccess for Profile {
    fn bin_content(&self, ix: usize, _iy: usize) -> f64 {
        match (self.contents.get(ix), self.bin_entries.get(ix)) {
            (Some(c), Some(&w)) if w >= 1e-300 => c / w,
            _ => 0.0,
        }
    }

    fn bin_error(&self, ix: usize, _iy: usize) -> f64 {
        let (Some(&cont), Some(&sum), Some(&err2)) = (
            self.contents.get(ix),
            self.bin_entries.get(ix),
            self.sumw2.get(ix),
        ) else {
            return 0.0;
        };
        if sum < 1e-300 {
            return 0.0;
        }
        if self.error_mode == ErrorMode::SpreadG {
            return 1.0 / sum.sqrt();
        }
        let neff = self.effective_entries(ix);
        let mean = cont / sum;
        let eprim = (err2 / sum - mean * mean).abs().sqrt();
        match self.error_mode {
            ErrorMode::Spread => eprim,
            ErrorMode::SpreadI if eprim == 0.0 => {
                if neff > 0.0 {
                    1.0 / (12.0 * neff).sqrt()
                } else {
                    0.0
                }
            }
            _ => {
                if neff > 0.0 {
                    eprim / neff.sqrt()
                } else {
                    0.0
                }
            }
        }
    }
}

/// Scatter of points, drawn without binning.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Graph {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        let n = x.len().min(y.len());
        let (mut x, mut y) = (x, y);
        x.truncate(n);
        y.truncate(n);
        Self { x, y }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// (x_min, x_max, y_min, y_max) over finite points.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut b = (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
        let mut any = false;
        for (&x, &y) in self.x.iter().zip(&self.y) {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            b = (b.0.min(x), b.1.max(x), b.2.min(y), b.3.max(y));
            any = true;
        }
        any.then_some(b)
    }
}
