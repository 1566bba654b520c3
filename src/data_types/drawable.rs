use super::axis::{AxisId, AxisMeta};
use super::histogram::{BinAccess, GlobalSums, Graph, Hist1D, Hist2D, Profile};
use std::ops::Range;

/// Every kind of data object the painter can draw, resolved once at construction.
#[derive(Clone, Debug, PartialEq)]
pub enum Drawable {
    Hist1D(Hist1D),
    Hist2D(Hist2D),
    Profile(Profile),
    Graph(Graph),
}

impl Drawable {
    pub fn dimension(&self) -> usize {
        match self {
            Drawable::Hist2D(_) => 2,
            _ => 1,
        }
    }

    pub fn is_binned(&self) -> bool {
        !matches!(self, Drawable::Graph(_))
    }

    /// Binning of an axis, `None` for axes that carry values rather than bins.
    pub fn axis_meta(&self, axis: AxisId) -> Option<&AxisMeta> {
        match (self, axis) {
            (Drawable::Hist1D(h), AxisId::X) => Some(&h.x),
            (Drawable::Profile(p), AxisId::X) => Some(&p.x),
            (Drawable::Hist2D(h), AxisId::X) => Some(&h.x),
            (Drawable::Hist2D(h), AxisId::Y) => Some(&h.y),
            _ => None,
        }
    }

    pub fn bins(&self) -> Option<&dyn BinAccess> {
        match self {
            Drawable::Hist1D(h) => Some(h),
            Drawable::Hist2D(h) => Some(h),
            Drawable::Profile(p) => Some(p),
            Drawable::Graph(_) => None,
        }
    }

    pub fn global_sums(&self) -> Option<&GlobalSums> {
        match self {
            Drawable::Hist1D(h) => h.sums.as_ref(),
            Drawable::Hist2D(h) => h.sums.as_ref(),
            Drawable::Profile(p) => p.sums.as_ref(),
            Drawable::Graph(_) => None,
        }
    }

    pub fn stored_entries(&self) -> f64 {
        match self {
            Drawable::Hist1D(h) => h.entries,
            Drawable::Hist2D(h) => h.entries,
            Drawable::Profile(p) => p.entries,
            Drawable::Graph(g) => g.len() as f64,
        }
    }

    pub fn user_contour(&self) -> Option<&[f64]> {
        match self {
            Drawable::Hist2D(h) => h.contour.as_deref(),
            _ => None,
        }
    }

    /// Full (unzoomed) data range of an axis.
    pub fn full_range(&self, axis: AxisId) -> (f64, f64) {
        if let Some(meta) = self.axis_meta(axis) {
            if meta.is_categorical() {
                return (0.0, meta.nbins as f64);
            }
            return (meta.min, meta.max);
        }
        match (self, axis) {
            (Drawable::Graph(g), AxisId::X) => g.bounds().map(|b| (b.0, b.1)).unwrap_or((0.0, 1.0)),
            (Drawable::Graph(g), AxisId::Y) => g.bounds().map(|b| (b.2, b.3)).unwrap_or((0.0, 1.0)),
            (Drawable::Hist2D(_), _) => self.content_range(None, None).unwrap_or((0.0, 1.0)),
            _ => self.value_range(None),
        }
    }

    /// Displayed value range of 1D data over the selected bins: starts at zero
    /// for non-negative contents and leaves 5% headroom.
    pub fn value_range(&self, xr: Option<Range<usize>>) -> (f64, f64) {
        match self.content_range(xr, None) {
            Some((lo, hi)) => {
                let margin = 0.05 * (hi - lo).max(hi.abs());
                let lo = if lo >= 0.0 { 0.0 } else { lo - margin };
                (lo, hi + margin)
            }
            None => (0.0, 1.0),
        }
    }

    /// Minimum and maximum bin content inside the given zero-based index ranges.
    pub fn content_range(
        &self,
        xr: Option<Range<usize>>,
        yr: Option<Range<usize>>,
    ) -> Option<(f64, f64)> {
        let bins = self.bins()?;
        let xm = self.axis_meta(AxisId::X)?;
        let xr = xr.unwrap_or(0..xm.nbins);
        let yr = match self.axis_meta(AxisId::Y) {
            Some(ym) => yr.unwrap_or(0..ym.nbins),
            None => 0..1,
        };
        let two_d = self.dimension() == 2;
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for j in yr {
            let iy = if two_d { j + 1 } else { 0 };
            for i in xr.clone() {
                let v = bins.bin_content(i + 1, iy);
                if v.is_finite() {
                    lo = lo.min(v);
                    hi = hi.max(v);
                }
            }
        }
        (lo <= hi).then_some((lo, hi))
    }

    /// Number of data points (bins or graph points) falling inside `[min, max]` on an axis.
    pub fn points_in_range(&self, axis: AxisId, min: f64, max: f64) -> usize {
        if let Some(meta) = self.axis_meta(axis) {
            if meta.nbins == 0 {
                return 0;
            }
            if meta.is_categorical() {
                let first = min.floor().max(0.0);
                let last = max.ceil().min(meta.nbins as f64);
                return (last - first).max(0.0) as usize;
            }
            let first = meta.find_bin(min).clamp(1, meta.nbins);
            let last = meta.find_bin(max).clamp(1, meta.nbins);
            return if last < first { 0 } else { last - first + 1 };
        }
        match (self, axis) {
            (Drawable::Graph(g), AxisId::X) => g.x.iter().filter(|x| **x >= min && **x <= max).count(),
            (Drawable::Graph(g), AxisId::Y) => g.y.iter().filter(|y| **y >= min && **y <= max).count(),
            // value axes of binned data can always be zoomed
            _ => usize::MAX,
        }
    }
}

impl From<Hist1D> for Drawable {
    fn from(h: Hist1D) -> Self {
        Drawable::Hist1D(h)
    }
}

impl From<Hist2D> for Drawable {
    fn from(h: Hist2D) -> Self {
        Drawable::Hist2D(h)
    }
}

impl From<Profile> for Drawable {
    fn from(p: Profile) -> Self {
        Drawable::Profile(p)
    }
}

impl From<Graph> for Drawable {
    fn from(g: Graph) -> Self {
        Drawable::Graph(g)
    }
}
