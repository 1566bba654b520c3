pub mod controller;
pub mod input;
pub mod session;

pub use controller::{GestureEvent, ZoomController, ZoomRequest, ZoomTarget};
pub use session::{DragAxes, GestureSession, PointerButton, SessionSource, ZoomState};
