//! Conversion of GPUI mouse events into frame-local gesture events.

use super::controller::GestureEvent;
use super::session::PointerButton;
use gpui::*;
use std::time::Instant;

pub fn pointer_button(button: MouseButton) -> Option<PointerButton> {
    match button {
        MouseButton::Left => Some(PointerButton::Primary),
        MouseButton::Right => Some(PointerButton::Secondary),
        MouseButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

/// Window position to a position relative to the plot frame origin.
pub fn frame_local(position: Point<Pixels>, frame: Bounds<Pixels>) -> Point<Pixels> {
    point(position.x - frame.origin.x, position.y - frame.origin.y)
}

pub fn mouse_down(event: &MouseDownEvent, frame: Bounds<Pixels>, time: Instant) -> Option<GestureEvent> {
    Some(GestureEvent::PointerDown {
        position: frame_local(event.position, frame),
        button: pointer_button(event.button)?,
        click_count: event.click_count,
        time,
    })
}

pub fn mouse_move(event: &MouseMoveEvent, frame: Bounds<Pixels>, time: Instant) -> GestureEvent {
    GestureEvent::PointerMove {
        position: frame_local(event.position, frame),
        time,
    }
}

pub fn mouse_up(event: &MouseUpEvent, frame: Bounds<Pixels>, time: Instant) -> Option<GestureEvent> {
    Some(GestureEvent::PointerUp {
        position: frame_local(event.position, frame),
        button: pointer_button(event.button)?,
        time,
    })
}
