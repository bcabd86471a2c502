pub mod touch;
pub mod viewer;

pub use touch::{ClickGuard, PointerTarget, TapTracker, TouchStartRoute, contacts, route_touch_start};
pub use viewer::{DismissReason, MediaReference, Outcome, Point, ViewerAction, ViewerState};
