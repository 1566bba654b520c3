//! Contour levels and value-to-color assignment for 2D value fields.

use gpui::Hsla;
use tracing::debug;

pub const DEFAULT_CONTOUR_LEVELS: usize = 20;

/// How a table was built, which also selects the classification rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContourMode {
    AutoLinear,
    AutoLog,
    User,
}

/// Ordered level boundaries `c[0..=N]` bucketing values into `N` colors.
#[derive(Clone, Debug, PartialEq)]
pub struct ContourTable {
    levels: Vec<f64>,
    mode: ContourMode,
    zmin: f64,
    zmax: f64,
    // inputs the table was built from, compared by `built_for`
    source: (f64, f64, usize, bool),
}

fn widen(zmin: f64, zmax: f64) -> (f64, f64) {
    if zmin != zmax {
        return (zmin.min(zmax), zmin.max(zmax));
    }
    if zmin == 0.0 {
        (-1.0, 1.0)
    } else {
        let d = 0.01 * zmin.abs();
        (zmin - d, zmax + d)
    }
}

impl ContourTable {
    /// Auto-spaced levels over `[zmin, zmax]`, geometric when `log` is set.
    pub fn auto(zmin: f64, zmax: f64, nlevels: usize, log: bool) -> Self {
        let n = nlevels.max(1);
        let source = (zmin, zmax, n, log);
        let (mut lo, mut hi) = widen(zmin, zmax);
        let levels: Vec<f64> = if log {
            if hi <= 0.0 {
                hi = 1.0;
            }
            if lo <= 0.0 {
                lo = 0.001 * hi;
            }
            if lo >= hi {
                lo = 0.001 * hi;
            }
            let (l0, l1) = (lo.log10(), hi.log10());
            (0..=n)
                .map(|k| match k {
                    0 => lo,
                    k if k == n => hi,
                    k => 10f64.powf(l0 + k as f64 * (l1 - l0) / n as f64),
                })
                .collect()
        } else {
            (0..=n)
                .map(|k| if k == n { hi } else { lo + k as f64 * (hi - lo) / n as f64 })
                .collect()
        };
        debug!(zmin = lo, zmax = hi, levels = n, log, "contour table built");
        Self {
            levels,
            mode: if log { ContourMode::AutoLog } else { ContourMode::AutoLinear },
            zmin: lo,
            zmax: hi,
            source,
        }
    }

    /// Levels supplied with the data, used verbatim.
    pub fn user(levels: &[f64]) -> Self {
        let mut levels: Vec<f64> = levels.iter().copied().filter(|l| !l.is_nan()).collect();
        if levels.len() < 2 {
            let base = levels.first().copied().unwrap_or(0.0);
            let (lo, hi) = widen(base, base);
            levels = vec![lo, hi];
        }
        let zmin = levels[0];
        let zmax = levels[levels.len() - 1];
        debug!(levels = levels.len(), "user contour table built");
        Self {
            source: (zmin, zmax, levels.len() - 1, false),
            levels,
            mode: ContourMode::User,
            zmin,
            zmax,
        }
    }

    /// Whether this table is still valid for the given inputs.
    pub fn built_for(&self, zmin: f64, zmax: f64, nlevels: usize, log: bool) -> bool {
        self.mode != ContourMode::User && self.source == (zmin, zmax, nlevels.max(1), log)
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    pub fn mode(&self) -> ContourMode {
        self.mode
    }

    /// Number of colors `N`, one less than the number of boundaries.
    pub fn n_colors(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn zrange(&self) -> (f64, f64) {
        (self.zmin, self.zmax)
    }

    /// Color index of a value, `None` below the first level.
    pub fn classify(&self, value: f64) -> Option<usize> {
        self.classify_with(value, false)
    }

    /// Like [`classify`](Self::classify), but values below the first level
    /// take the first color when `clamp_below` is set.
    pub fn classify_with(&self, value: f64, clamp_below: bool) -> Option<usize> {
        if value.is_nan() {
            return None;
        }
        if value < self.levels[0] {
            return clamp_below.then_some(0);
        }
        let n = self.n_colors();
        let index = match self.mode {
            ContourMode::AutoLinear => {
                let span = self.zmax - self.zmin;
                (0.01 + (value - self.zmin) * (n as f64 - 1.0) / span).floor() as usize
            }
            ContourMode::AutoLog | ContourMode::User => {
                self.levels.partition_point(|c| *c <= value).saturating_sub(1)
            }
        };
        Some(index.min(n - 1))
    }

    /// Maps a color index onto a palette of `palette_len` entries.
    pub fn palette_index(&self, color_index: usize, palette_len: usize) -> usize {
        if palette_len == 0 {
            return 0;
        }
        let n = self.n_colors() as f64;
        let i = ((color_index as f64 + 0.99) * palette_len as f64 / n).floor() as usize;
        i.min(palette_len - 1)
    }

    pub fn color(&self, value: f64, palette: &[Hsla], clamp_below: bool) -> Option<Hsla> {
        let index = self.classify_with(value, clamp_below)?;
        palette.get(self.palette_index(index, palette.len())).copied()
    }
}
