//! gpui_hist crate for interactive histogram painting in GPUI

pub mod contour;
pub mod data_types;
pub mod decimation;
pub mod painter;
pub mod scales;
pub mod stats;
pub mod theme;
pub mod transform;
pub mod utils;
pub mod view_controller;
pub mod zoom;

pub use contour::ContourTable;
pub use data_types::{
    AxisDomain, AxisId, AxisKind, AxisMeta, Drawable, DrawOptions, HistConfig, ViewState, ZoomConfig,
};
pub use painter::{FramePrimitives, HistPainter, OverlayPainter};
pub use scales::AxisScale;
pub use stats::{count_stats, StatsResult};
pub use zoom::{GestureEvent, ZoomController, ZoomRequest, ZoomTarget};
