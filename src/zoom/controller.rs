use super::session::{
    clamp_to_frame, touch_box, DragAxes, GestureSession, PointerButton, ZoomState,
};
use crate::data_types::{AxisId, ZoomConfig};
use crate::utils::PixelsExt;
use gpui::*;
use std::time::Instant;
use tracing::{debug, trace};

/// Raw input, in frame-local pixels (the plot frame starts at 0,0).
#[derive(Clone, Debug, PartialEq)]
pub enum GestureEvent {
    PointerDown {
        position: Point<Pixels>,
        button: PointerButton,
        click_count: usize,
        time: Instant,
    },
    PointerMove {
        position: Point<Pixels>,
        time: Instant,
    },
    PointerUp {
        position: Point<Pixels>,
        button: PointerButton,
        time: Instant,
    },
    TouchStart {
        id: u64,
        position: Point<Pixels>,
        time: Instant,
    },
    TouchMove {
        id: u64,
        position: Point<Pixels>,
        time: Instant,
    },
    TouchEnd {
        id: u64,
        time: Instant,
    },
    /// Timer heartbeat driving the touch context-menu delay.
    Tick {
        time: Instant,
    },
}

/// Ordered data ranges of one zoom, `None` for axes left untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ZoomRequest {
    pub x: Option<(f64, f64)>,
    pub y: Option<(f64, f64)>,
    pub z: Option<(f64, f64)>,
}

impl ZoomRequest {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none()
    }

    pub fn axis(&self, axis: AxisId) -> Option<(f64, f64)> {
        match axis {
            AxisId::X => self.x,
            AxisId::Y => self.y,
            AxisId::Z => self.z,
        }
    }
}

/// What the gesture state machine drives: normally the main painter of a
/// drawing group.
pub trait ZoomTarget {
    fn frame_size(&self) -> Size<Pixels>;
    /// Data value under a frame-local pixel on `axis`.
    fn axis_to_value(&self, axis: AxisId, pixel: f32) -> f64;
    fn can_zoom_in(&self, axis: AxisId, min: f64, max: f64) -> bool;
    /// Returns whether anything changed.
    fn zoom(&mut self, request: ZoomRequest) -> bool;
    fn unzoom(&mut self, x: bool, y: bool, z: bool) -> bool;
    fn show_context_menu(&mut self, position: Point<Pixels>);
    fn set_tooltips_enabled(&mut self, enabled: bool);
    /// Shows (or with `None` removes) the drag selection rectangle.
    fn draw_selection(&mut self, selection: Option<Bounds<Pixels>>);
}

/// Turns pointer and touch sequences into zoom, unzoom and menu requests.
///
/// At most one [`GestureSession`] is alive; starting a new one terminates the
/// previous one first.
#[derive(Clone, Debug, Default)]
pub struct ZoomController {
    config: ZoomConfig,
    session: Option<GestureSession>,
    tooltips_suppressed: bool,
    // end of the last click or tap that did not drag, for double-click detection
    last_click: Option<Instant>,
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn touch_axes(lo: Point<Pixels>, hi: Point<Pixels>, frame: Size<Pixels>) -> DragAxes {
    if hi.x.as_f32() < 0.0 {
        DragAxes::Y
    } else if lo.y.as_f32() > frame.height.as_f32() {
        DragAxes::X
    } else {
        DragAxes::Both
    }
}

impl ZoomController {
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    pub fn state(&self) -> ZoomState {
        self.session.as_ref().map_or(ZoomState::Idle, |s| s.kind)
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Dispatches one input event; returns whether it was consumed.
    pub fn handle<T: ZoomTarget + ?Sized>(&mut self, event: GestureEvent, target: &mut T) -> bool {
        match event {
            GestureEvent::PointerDown {
                position,
                button,
                click_count,
                time,
            } => self.pointer_down(position, button, click_count, time, target),
            GestureEvent::PointerMove { position, .. } => self.pointer_move(position, target),
            GestureEvent::PointerUp {
                position,
                button,
                time,
            } => self.pointer_up(position, button, time, target),
            GestureEvent::TouchStart { id, position, time } => {
                self.touch_start(id, position, time, target)
            }
            GestureEvent::TouchMove { id, position, time } => {
                self.touch_move(id, position, time, target)
            }
            GestureEvent::TouchEnd { id, time } => self.touch_end(id, time, target),
            GestureEvent::Tick { time } => self.tick(time, target),
        }
    }

    /// Drops the live session, removing its selection and restoring tooltips.
    /// Safe to call at any time, any number of times.
    pub fn clear_interactive<T: ZoomTarget + ?Sized>(&mut self, target: &mut T) {
        if let Some(session) = self.session.take() {
            if session.kind.is_dragging() {
                target.draw_selection(None);
            }
            trace!(from = ?session.kind, "gesture session cleared");
        }
        if self.tooltips_suppressed {
            self.tooltips_suppressed = false;
            target.set_tooltips_enabled(true);
        }
    }

    fn start_session<T: ZoomTarget + ?Sized>(&mut self, session: GestureSession, target: &mut T) {
        self.clear_interactive(target);
        trace!(state = ?session.kind, "gesture session started");
        if session.kind.is_dragging() {
            self.tooltips_suppressed = true;
            target.set_tooltips_enabled(false);
        }
        self.session = Some(session);
    }

    fn is_double_click(&self, click_count: usize, time: Instant) -> bool {
        click_count >= 2
            || self
                .last_click
                .is_some_and(|t| time.saturating_duration_since(t) <= self.config.double_click_window())
    }

    fn unzoom_at<T: ZoomTarget + ?Sized>(&mut self, position: Point<Pixels>, target: &mut T) -> bool {
        self.clear_interactive(target);
        self.last_click = None;
        let (x, y) = match DragAxes::from_origin(position, target.frame_size()) {
            DragAxes::Both => (true, true),
            DragAxes::X => (true, false),
            DragAxes::Y => (false, true),
        };
        let all = x && y;
        debug!(x, y, z = all, "unzoom gesture");
        target.unzoom(x, y, all);
        true
    }

    fn pointer_down<T: ZoomTarget + ?Sized>(
        &mut self,
        position: Point<Pixels>,
        button: PointerButton,
        click_count: usize,
        time: Instant,
        target: &mut T,
    ) -> bool {
        // an expired touch hold still owes its menu
        self.tick(time, target);
        match button {
            PointerButton::Secondary => {
                self.clear_interactive(target);
                target.show_context_menu(position);
                true
            }
            PointerButton::Middle => false,
            PointerButton::Primary => {
                if self.is_double_click(click_count, time) {
                    return self.unzoom_at(position, target);
                }
                let frame = target.frame_size();
                let axes = DragAxes::from_origin(position, frame);
                let origin = clamp_to_frame(position, frame);
                self.start_session(
                    GestureSession::pointer(axes.mouse_state(), origin, button, time),
                    target,
                );
                true
            }
        }
    }

    fn pointer_move<T: ZoomTarget + ?Sized>(&mut self, position: Point<Pixels>, target: &mut T) -> bool {
        let frame = target.frame_size();
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.button().is_none() {
            return false;
        }
        session.current = clamp_to_frame(position, frame);
        target.draw_selection(Some(session.selection(frame)));
        true
    }

    fn pointer_up<T: ZoomTarget + ?Sized>(
        &mut self,
        position: Point<Pixels>,
        button: PointerButton,
        time: Instant,
        target: &mut T,
    ) -> bool {
        let frame = target.frame_size();
        match self.session.as_mut() {
            Some(session) if session.button() == Some(button) => {
                session.current = clamp_to_frame(position, frame);
            }
            _ => return false,
        }
        self.finish_drag(time, target)
    }

    /// Converts the live drag into at most one zoom request.
    fn finish_drag<T: ZoomTarget + ?Sized>(&mut self, time: Instant, target: &mut T) -> bool {
        let Some(session) = self.session.clone() else {
            return false;
        };
        self.clear_interactive(target);

        let (dx, dy) = session.extent();
        let min_px = self.config.min_drag_px;
        let mut request = ZoomRequest::default();
        let mut dragged = false;
        for (axis, extent, from, to) in [
            (AxisId::X, dx, session.origin.x, session.current.x),
            (AxisId::Y, dy, session.origin.y, session.current.y),
        ] {
            if !session.kind.drags(axis) || extent < min_px {
                continue;
            }
            dragged = true;
            let (min, max) = ordered(
                target.axis_to_value(axis, from.as_f32()),
                target.axis_to_value(axis, to.as_f32()),
            );
            if min < max && target.can_zoom_in(axis, min, max) {
                match axis {
                    AxisId::X => request.x = Some((min, max)),
                    _ => request.y = Some((min, max)),
                }
            } else {
                debug!(axis = axis.name(), min, max, "zoom range rejected");
            }
        }

        if !dragged {
            self.last_click = (!session.kind.is_touch()).then_some(time);
            return true;
        }
        self.last_click = None;
        if request.is_empty() {
            return true;
        }
        target.zoom(request);
        true
    }

    fn touch_start<T: ZoomTarget + ?Sized>(
        &mut self,
        id: u64,
        position: Point<Pixels>,
        time: Instant,
        target: &mut T,
    ) -> bool {
        self.tick(time, target);
        let frame = target.frame_size();
        if let Some(session) = self.session.as_ref() {
            if session.has_touch(id) {
                return false;
            }
            if session.kind == ZoomState::MenuArmed
                && session.menu_deadline.is_some_and(|d| time < d)
            {
                let mut touches = session.touches().to_vec();
                touches.push((id, position));
                let Some((lo, hi)) = touch_box(&touches) else {
                    return false;
                };
                let kind = touch_axes(lo, hi, frame).touch_state();
                let promoted = GestureSession::touch_drag(
                    kind,
                    clamp_to_frame(lo, frame),
                    clamp_to_frame(hi, frame),
                    touches,
                    time,
                );
                self.start_session(promoted, target);
                if let Some(s) = self.session.as_ref() {
                    target.draw_selection(Some(s.selection(frame)));
                }
                return true;
            }
            if session.kind.is_dragging() && session.kind.is_touch() {
                // only two fingers take part in a touch drag
                return false;
            }
        }

        if self
            .last_click
            .is_some_and(|t| time.saturating_duration_since(t) <= self.config.double_click_window())
        {
            return self.unzoom_at(position, target);
        }
        let deadline = time + self.config.menu_delay();
        self.start_session(GestureSession::menu_armed(id, position, time, deadline), target);
        true
    }

    fn touch_move<T: ZoomTarget + ?Sized>(
        &mut self,
        id: u64,
        position: Point<Pixels>,
        time: Instant,
        target: &mut T,
    ) -> bool {
        let frame = target.frame_size();
        let cancel_px = self.config.touch_cancel_px;
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(touches) = session.touches_mut() else {
            return false;
        };
        let Some(entry) = touches.iter_mut().find(|(i, _)| *i == id) else {
            return false;
        };
        entry.1 = position;

        if session.kind == ZoomState::MenuArmed {
            let dx = (position.x - session.origin.x).as_f32();
            let dy = (position.y - session.origin.y).as_f32();
            if dx.hypot(dy) > cancel_px {
                trace!("touch moved, context menu cancelled");
                self.clear_interactive(target);
                return true;
            }
            return self.tick(time, target);
        }

        let Some((lo, hi)) = touch_box(session.touches()) else {
            return false;
        };
        session.origin = clamp_to_frame(lo, frame);
        session.current = clamp_to_frame(hi, frame);
        target.draw_selection(Some(session.selection(frame)));
        true
    }

    fn touch_end<T: ZoomTarget + ?Sized>(&mut self, id: u64, time: Instant, target: &mut T) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        if !session.has_touch(id) {
            return false;
        }
        if session.kind == ZoomState::MenuArmed {
            if self.tick(time, target) {
                return true;
            }
            // a tap: released before the menu delay
            self.clear_interactive(target);
            self.last_click = Some(time);
            return true;
        }
        self.finish_drag(time, target)
    }

    /// Fires the pending touch context menu once its delay has elapsed.
    fn tick<T: ZoomTarget + ?Sized>(&mut self, time: Instant, target: &mut T) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        if session.kind != ZoomState::MenuArmed || session.menu_deadline.is_none_or(|d| time < d) {
            return false;
        }
        let position = session.origin;
        self.clear_interactive(target);
        self.last_click = None;
        debug!("touch hold, context menu requested");
        target.show_context_menu(position);
        true
    }
}
