use super::histogram::ErrorMode;
use eyre::{bail, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// When the bin reducer merges bins sharing a pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimizeLevel {
    /// Always emit one primitive per bin.
    Off,
    /// Merge once the selected range exceeds [`LARGE_BIN_COUNT`] bins.
    #[default]
    Large,
    /// Also merge whenever bins outnumber twice the pixel width.
    Always,
}

pub const LARGE_BIN_COUNT: usize = 5000;

impl OptimizeLevel {
    pub fn should_reduce(&self, nbins: usize, pixel_width: f32) -> bool {
        match self {
            OptimizeLevel::Off => false,
            OptimizeLevel::Large => nbins > LARGE_BIN_COUNT,
            OptimizeLevel::Always => {
                nbins > LARGE_BIN_COUNT || nbins as f32 > 2.0 * pixel_width.max(0.0)
            }
        }
    }
}

/// Draw flags consumed by the reducer and the contour table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawOptions {
    pub optimize: OptimizeLevel,
    pub contour_levels: usize,
    /// Paint values below the first contour level with the first color.
    pub clamp_below_contour: bool,
    pub tooltip_format: String,
    pub stat_format: String,
    pub log_x: bool,
    pub log_y: bool,
    pub log_z: bool,
    pub error_mode: ErrorMode,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            optimize: OptimizeLevel::Large,
            contour_levels: 20,
            clamp_below_contour: false,
            tooltip_format: "6.4g".into(),
            stat_format: "6.4g".into(),
            log_x: false,
            log_y: false,
            log_z: false,
            error_mode: ErrorMode::Mean,
        }
    }
}

/// Thresholds of the gesture state machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Minimal drag extent on an axis before a zoom is issued.
    pub min_drag_px: f32,
    pub double_click_ms: u64,
    /// Single-touch hold time before the context menu opens.
    pub menu_delay_ms: u64,
    /// Movement of a single touch that cancels the pending menu.
    pub touch_cancel_px: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_drag_px: 10.0,
            double_click_ms: 300,
            menu_delay_ms: 500,
            touch_cancel_px: 10.0,
        }
    }
}

impl ZoomConfig {
    pub fn double_click_window(&self) -> Duration {
        Duration::from_millis(self.double_click_ms)
    }

    pub fn menu_delay(&self) -> Duration {
        Duration::from_millis(self.menu_delay_ms)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistConfig {
    pub draw: DrawOptions,
    pub zoom: ZoomConfig,
}

impl HistConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).wrap_err("failed to parse histogram configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).wrap_err("failed to serialize histogram configuration")
    }

    pub fn validate(&self) -> Result<()> {
        if self.draw.contour_levels == 0 {
            bail!("contour_levels must be at least 1");
        }
        if !(self.zoom.min_drag_px >= 0.0) {
            bail!("min_drag_px must be non-negative, got {}", self.zoom.min_drag_px);
        }
        if !(self.zoom.touch_cancel_px >= 0.0) {
            bail!("touch_cancel_px must be non-negative, got {}", self.zoom.touch_cancel_px);
        }
        Ok(())
    }
}
