// Touch helpers for the image overlay: contact extraction, double-tap detection
// and routing of touch/mouse input that may or may not belong to the viewer.
use web_sys::TouchList;

use super::viewer::{Point, ViewerAction};
use crate::config::ViewerConfig;

/// Contact points of a touch list, in client coordinates.
pub fn contacts(list: &TouchList) -> Vec<Point> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| Point::new(t.client_x() as f64, t.client_y() as f64))
        .collect()
}

#[derive(Default, Debug, Clone)]
pub struct TapTracker {
    last: Option<(Point, f64)>,
}

impl TapTracker {
    /// Records a single-finger tap; true when it completes a double tap.
    pub fn register(&mut self, at: Point, now_ms: f64, cfg: &ViewerConfig) -> bool {
        let is_double = self.last.is_some_and(|(prev, t)| {
            let dt = now_ms - t;
            (0.0..=cfg.double_tap_window_ms).contains(&dt)
                && prev.distance(at) <= cfg.double_tap_slop_px
        });
        // A completed pair is consumed so a third tap starts over.
        self.last = if is_double { None } else { Some((at, now_ms)) };
        is_double
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

/// Where a single-finger touch or a mouse press landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    Image,
    /// Backdrop, close button or anything else on the overlay.
    Elsewhere,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TouchStartRoute {
    /// Second tap of a double tap on the image.
    DoubleTap,
    /// Contacts the viewer should track (pinch anywhere, pan from the image).
    Gesture(Vec<Point>),
    /// Left to the browser so the emulated click reaches its target.
    PassThrough,
}

impl TouchStartRoute {
    pub fn action(self) -> Option<ViewerAction> {
        match self {
            TouchStartRoute::DoubleTap => Some(ViewerAction::DoubleTap),
            TouchStartRoute::Gesture(points) => Some(ViewerAction::TouchStart(points)),
            TouchStartRoute::PassThrough => None,
        }
    }
}

/// Decides what a `touchstart` means for the viewer.
pub fn route_touch_start(
    target: PointerTarget,
    points: Vec<Point>,
    taps: &mut TapTracker,
    now_ms: f64,
    cfg: &ViewerConfig,
) -> TouchStartRoute {
    match (points.as_slice(), target) {
        ([], _) => TouchStartRoute::PassThrough,
        ([only], PointerTarget::Image) => {
            if taps.register(*only, now_ms, cfg) {
                TouchStartRoute::DoubleTap
            } else {
                TouchStartRoute::Gesture(points)
            }
        }
        ([_], PointerTarget::Elsewhere) => {
            taps.clear();
            TouchStartRoute::PassThrough
        }
        _ => {
            taps.clear();
            TouchStartRoute::Gesture(points)
        }
    }
}

/// Tells a real backdrop click apart from the click the browser fires after
/// a mouse drag is released over the backdrop.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickGuard {
    armed: bool,
}

impl ClickGuard {
    /// Mouse button went down anywhere on the overlay.
    pub fn press(&mut self) {
        self.armed = false;
    }

    /// Mouse button came up; `drag_ended` when that release finished a pan.
    pub fn release(&mut self, drag_ended: bool) {
        if drag_ended {
            self.armed = true;
        }
    }

    /// Pointer left the overlay. No click follows, so nothing to swallow.
    pub fn leave(&mut self) {
        self.armed = false;
    }

    pub fn image_clicked(&mut self) {
        self.armed = false;
    }

    /// True when a backdrop click should dismiss. Consumes a pending suppression.
    pub fn backdrop_click(&mut self) -> bool {
        !std::mem::take(&mut self.armed)
    }
}
