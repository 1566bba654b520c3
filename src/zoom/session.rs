use crate::data_types::AxisId;
use crate::utils::PixelsExt;
use gpui::*;
use std::time::Instant;

/// Observable state of the gesture state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomState {
    Idle,
    DraggingBoth,
    DraggingX,
    DraggingY,
    TouchDraggingBoth,
    TouchDraggingX,
    TouchDraggingY,
    MenuArmed,
}

impl ZoomState {
    pub fn is_dragging(&self) -> bool {
        !matches!(self, ZoomState::Idle | ZoomState::MenuArmed)
    }

    pub fn is_touch(&self) -> bool {
        matches!(
            self,
            ZoomState::TouchDraggingBoth
                | ZoomState::TouchDraggingX
                | ZoomState::TouchDraggingY
                | ZoomState::MenuArmed
        )
    }

    /// Whether a drag in this state may zoom `axis`.
    pub fn drags(&self, axis: AxisId) -> bool {
        match self {
            ZoomState::DraggingBoth | ZoomState::TouchDraggingBoth => axis != AxisId::Z,
            ZoomState::DraggingX | ZoomState::TouchDraggingX => axis == AxisId::X,
            ZoomState::DraggingY | ZoomState::TouchDraggingY => axis == AxisId::Y,
            ZoomState::Idle | ZoomState::MenuArmed => false,
        }
    }
}

/// Which axes a drag selects, from where it started relative to the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragAxes {
    Both,
    X,
    Y,
}

impl DragAxes {
    /// Left of the frame is the y-axis strip, below it the x-axis strip.
    pub fn from_origin(origin: Point<Pixels>, frame: Size<Pixels>) -> Self {
        if origin.x.as_f32() < 0.0 {
            DragAxes::Y
        } else if origin.y.as_f32() > frame.height.as_f32() {
            DragAxes::X
        } else {
            DragAxes::Both
        }
    }

    pub fn mouse_state(self) -> ZoomState {
        match self {
            DragAxes::Both => ZoomState::DraggingBoth,
            DragAxes::X => ZoomState::DraggingX,
            DragAxes::Y => ZoomState::DraggingY,
        }
    }

    pub fn touch_state(self) -> ZoomState {
        match self {
            DragAxes::Both => ZoomState::TouchDraggingBoth,
            DragAxes::X => ZoomState::TouchDraggingX,
            DragAxes::Y => ZoomState::TouchDraggingY,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// What drives a session: one mouse button, or a set of touch identifiers.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionSource {
    Pointer(PointerButton),
    Touches(Vec<(u64, Point<Pixels>)>),
}

/// Live state of one gesture, from its start to its release.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureSession {
    pub kind: ZoomState,
    pub origin: Point<Pixels>,
    pub current: Point<Pixels>,
    pub source: SessionSource,
    pub started: Instant,
    /// When a `MenuArmed` session turns into a context menu request.
    pub menu_deadline: Option<Instant>,
}

impl GestureSession {
    pub fn pointer(kind: ZoomState, origin: Point<Pixels>, button: PointerButton, now: Instant) -> Self {
        Self {
            kind,
            origin,
            current: origin,
            source: SessionSource::Pointer(button),
            started: now,
            menu_deadline: None,
        }
    }

    pub fn menu_armed(id: u64, position: Point<Pixels>, now: Instant, deadline: Instant) -> Self {
        Self {
            kind: ZoomState::MenuArmed,
            origin: position,
            current: position,
            source: SessionSource::Touches(vec![(id, position)]),
            started: now,
            menu_deadline: Some(deadline),
        }
    }

    /// Two-finger drag over the bounding box `origin..current` of `touches`.
    pub fn touch_drag(
        kind: ZoomState,
        origin: Point<Pixels>,
        current: Point<Pixels>,
        touches: Vec<(u64, Point<Pixels>)>,
        now: Instant,
    ) -> Self {
        Self {
            kind,
            origin,
            current,
            source: SessionSource::Touches(touches),
            started: now,
            menu_deadline: None,
        }
    }

    pub fn button(&self) -> Option<PointerButton> {
        match self.source {
            SessionSource::Pointer(b) => Some(b),
            SessionSource::Touches(_) => None,
        }
    }

    pub fn has_touch(&self, id: u64) -> bool {
        matches!(&self.source, SessionSource::Touches(t) if t.iter().any(|(i, _)| *i == id))
    }

    pub fn touches(&self) -> &[(u64, Point<Pixels>)] {
        match &self.source {
            SessionSource::Touches(t) => t,
            SessionSource::Pointer(_) => &[],
        }
    }

    pub fn touches_mut(&mut self) -> Option<&mut Vec<(u64, Point<Pixels>)>> {
        match &mut self.source {
            SessionSource::Touches(t) => Some(t),
            SessionSource::Pointer(_) => None,
        }
    }

    /// Pixel extent of the drag on each axis.
    pub fn extent(&self) -> (f32, f32) {
        (
            (self.current.x - self.origin.x).as_f32().abs(),
            (self.current.y - self.origin.y).as_f32().abs(),
        )
    }

    /// Selection rectangle in frame-local pixels; axis-only drags span the
    /// whole frame on the other axis.
    pub fn selection(&self, frame: Size<Pixels>) -> Bounds<Pixels> {
        let (mut x0, mut x1) = ordered(self.origin.x.as_f32(), self.current.x.as_f32());
        let (mut y0, mut y1) = ordered(self.origin.y.as_f32(), self.current.y.as_f32());
        if !self.kind.drags(AxisId::X) {
            x0 = 0.0;
            x1 = frame.width.as_f32();
        }
        if !self.kind.drags(AxisId::Y) {
            y0 = 0.0;
            y1 = frame.height.as_f32();
        }
        Bounds::new(point(px(x0), px(y0)), size(px(x1 - x0), px(y1 - y0)))
    }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Clamps a frame-local point into the frame rectangle.
pub fn clamp_to_frame(p: Point<Pixels>, frame: Size<Pixels>) -> Point<Pixels> {
    point(
        px(p.x.as_f32().clamp(0.0, frame.width.as_f32().max(0.0))),
        px(p.y.as_f32().clamp(0.0, frame.height.as_f32().max(0.0))),
    )
}

/// Opposite corners of the bounding box of a set of touches.
pub fn touch_box(touches: &[(u64, Point<Pixels>)]) -> Option<(Point<Pixels>, Point<Pixels>)> {
    let first = touches.first()?.1;
    let (mut lo, mut hi) = (first, first);
    for (_, p) in touches.iter().skip(1) {
        lo = point(px(lo.x.as_f32().min(p.x.as_f32())), px(lo.y.as_f32().min(p.y.as_f32())));
        hi = point(px(hi.x.as_f32().max(p.x.as_f32())), px(hi.y.as_f32().max(p.y.as_f32())));
    }
    Some((lo, hi))
}
