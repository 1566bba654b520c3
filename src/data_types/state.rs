use super::axis::AxisId;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Zoom window of one axis; `min == max` means "not zoomed".
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisView {
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub log: bool,
}

impl AxisView {
    pub fn is_zoomed(&self) -> bool {
        self.zoom_min != self.zoom_max
    }

    pub fn zoom(&self) -> Option<(f64, f64)> {
        self.is_zoomed().then_some((self.zoom_min, self.zoom_max))
    }

    pub fn set_zoom(&mut self, min: f64, max: f64) {
        self.zoom_min = min;
        self.zoom_max = max;
    }

    pub fn clear_zoom(&mut self) {
        self.zoom_min = 0.0;
        self.zoom_max = 0.0;
    }

    /// Effective displayed range: the zoom window when set, otherwise `full`.
    pub fn effective(&self, full: (f64, f64)) -> (f64, f64) {
        self.zoom().unwrap_or(full)
    }
}

/// Zoom and log state shared by every painter of one drawing group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub x: AxisView,
    pub y: AxisView,
    pub z: AxisView,
}

impl ViewState {
    pub fn axis(&self, axis: AxisId) -> &AxisView {
        match axis {
            AxisId::X => &self.x,
            AxisId::Y => &self.y,
            AxisId::Z => &self.z,
        }
    }

    pub fn axis_mut(&mut self, axis: AxisId) -> &mut AxisView {
        match axis {
            AxisId::X => &mut self.x,
            AxisId::Y => &mut self.y,
            AxisId::Z => &mut self.z,
        }
    }

    pub fn is_zoomed(&self, axis: AxisId) -> bool {
        self.axis(axis).is_zoomed()
    }

    pub fn is_log(&self, axis: AxisId) -> bool {
        self.axis(axis).log
    }

    pub fn any_zoomed(&self) -> bool {
        self.x.is_zoomed() || self.y.is_zoomed() || self.z.is_zoomed()
    }
}

/// Owning handle held by the main painter of a group.
pub type SharedViewState = Rc<RefCell<ViewState>>;

/// Non-owning handle held by overlay painters.
pub type ViewStateRef = Weak<RefCell<ViewState>>;

pub fn shared_view_state(state: ViewState) -> SharedViewState {
    Rc::new(RefCell::new(state))
}
