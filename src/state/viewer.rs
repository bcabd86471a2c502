//! Zoom/pan/pinch state for the image overlay.
//!
//! All input is funnelled through [`ViewerState::apply`], which mutates the
//! state in place and reports whether anything changed so the component can
//! skip redundant renders. Scale always stays inside the configured range and
//! resting at the minimum scale always means a zero offset.

use std::ops::Sub;

use crate::config::ViewerConfig;

/// Values this close to a scale bound are snapped onto it.
const SNAP_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Image handed over by the host for one open session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaReference {
    pub src: String,
    pub alt: String,
}

impl MediaReference {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

/// Two-finger gesture in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchSession {
    /// Distance between the two contacts at the previous sample.
    pub baseline: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// `anchor` is pointer position minus offset at drag start.
    Dragging { anchor: Point },
    Pinching(PinchSession),
}

/// Coarse state as seen from outside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Idle,
    Dragging,
    Pinching,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissReason {
    Escape,
    Backdrop,
    CloseButton,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewerAction {
    Open(MediaReference),
    /// Host-driven close (the `is_open` prop went false). Never reported back.
    Close,
    /// User-driven close; reported as [`Outcome::Dismissed`] once.
    Dismiss(DismissReason),
    Wheel { delta_y: f64 },
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    /// All contacts currently on the surface.
    TouchStart(Vec<Point>),
    TouchMove(Vec<Point>),
    /// Contacts still on the surface after the lift.
    TouchEnd(Vec<Point>),
    DoubleTap,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Updated,
    Dismissed(DismissReason),
}

impl Outcome {
    pub fn needs_render(self) -> bool {
        !matches!(self, Outcome::Ignored)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerState {
    config: ViewerConfig,
    media: Option<MediaReference>,
    scale: f64,
    offset: Point,
    gesture: Gesture,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl ViewerState {
    pub fn new(config: ViewerConfig) -> Self {
        let config = config.sanitized();
        Self {
            scale: config.min_scale,
            config,
            media: None,
            offset: Point::ORIGIN,
            gesture: Gesture::Idle,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Swaps in new limits without closing; the current scale is pulled
    /// back inside the new range.
    pub fn reconfigure(&mut self, config: ViewerConfig) -> Outcome {
        let config = config.sanitized();
        if config == self.config {
            return Outcome::Ignored;
        }
        self.config = config;
        if self.is_open() {
            self.set_scale(self.scale);
        } else {
            self.reset();
        }
        Outcome::Updated
    }

    pub fn media(&self) -> Option<&MediaReference> {
        self.media.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.media.is_some()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn is_zoomed(&self) -> bool {
        self.scale > self.config.min_scale
    }

    pub fn phase(&self) -> Phase {
        if !self.is_open() {
            return Phase::Closed;
        }
        match self.gesture {
            Gesture::Idle => Phase::Idle,
            Gesture::Dragging { .. } => Phase::Dragging,
            Gesture::Pinching(_) => Phase::Pinching,
        }
    }

    pub fn apply(&mut self, action: ViewerAction) -> Outcome {
        match action {
            ViewerAction::Open(media) => self.open(media),
            ViewerAction::Close => self.close(),
            ViewerAction::Dismiss(reason) => self.dismiss(reason),
            ViewerAction::Wheel { delta_y } => self.wheel(delta_y),
            ViewerAction::PointerDown(p) => self.pointer_down(p),
            ViewerAction::PointerMove(p) => self.pointer_move(p),
            ViewerAction::PointerUp => self.pointer_up(),
            ViewerAction::TouchStart(contacts) => self.touch_start(&contacts),
            ViewerAction::TouchMove(contacts) => self.touch_move(&contacts),
            ViewerAction::TouchEnd(remaining) => self.touch_end(&remaining),
            ViewerAction::DoubleTap => self.double_tap(),
        }
    }

    pub fn open(&mut self, media: MediaReference) -> Outcome {
        self.media = Some(media);
        self.reset();
        Outcome::Updated
    }

    pub fn close(&mut self) -> Outcome {
        if self.media.take().is_none() {
            return Outcome::Ignored;
        }
        self.reset();
        Outcome::Updated
    }

    pub fn dismiss(&mut self, reason: DismissReason) -> Outcome {
        match self.close() {
            Outcome::Ignored => Outcome::Ignored,
            _ => Outcome::Dismissed(reason),
        }
    }

    /// Positive `delta_y` (scrolling away) zooms out.
    pub fn wheel(&mut self, delta_y: f64) -> Outcome {
        if !self.is_open() {
            return Outcome::Ignored;
        }
        let step = if delta_y > 0.0 {
            -self.config.wheel_step
        } else {
            self.config.wheel_step
        };
        self.set_scale(self.scale + step);
        self.gesture = Gesture::Idle;
        Outcome::Updated
    }

    pub fn pointer_down(&mut self, at: Point) -> Outcome {
        if !self.is_open() || !self.is_zoomed() {
            return Outcome::Ignored;
        }
        if let Gesture::Pinching(_) = self.gesture {
            return Outcome::Ignored;
        }
        self.gesture = Gesture::Dragging {
            anchor: at - self.offset,
        };
        Outcome::Updated
    }

    pub fn pointer_move(&mut self, at: Point) -> Outcome {
        match self.gesture {
            Gesture::Dragging { anchor } if self.is_open() => {
                self.offset = at - anchor;
                Outcome::Updated
            }
            _ => Outcome::Ignored,
        }
    }

    pub fn pointer_up(&mut self) -> Outcome {
        match self.gesture {
            Gesture::Dragging { .. } => {
                self.gesture = Gesture::Idle;
                Outcome::Updated
            }
            _ => Outcome::Ignored,
        }
    }

    pub fn touch_start(&mut self, contacts: &[Point]) -> Outcome {
        if !self.is_open() {
            return Outcome::Ignored;
        }
        match contacts {
            [a, b, ..] => {
                self.gesture = Gesture::Pinching(PinchSession {
                    baseline: a.distance(*b),
                });
                Outcome::Updated
            }
            [only] => self.pointer_down(*only),
            [] => Outcome::Ignored,
        }
    }

    pub fn touch_move(&mut self, contacts: &[Point]) -> Outcome {
        if !self.is_open() {
            return Outcome::Ignored;
        }
        match contacts {
            [a, b, ..] => {
                let distance = a.distance(*b);
                match self.gesture {
                    Gesture::Pinching(session) => self.pinch_sample(session, distance),
                    _ => {
                        self.gesture = Gesture::Pinching(PinchSession { baseline: distance });
                    }
                }
                Outcome::Updated
            }
            [only] => self.pointer_move(*only),
            [] => Outcome::Ignored,
        }
    }

    pub fn touch_end(&mut self, remaining: &[Point]) -> Outcome {
        match self.gesture {
            Gesture::Pinching(_) if remaining.len() < 2 => {
                self.gesture = Gesture::Idle;
                Outcome::Updated
            }
            Gesture::Dragging { .. } if remaining.is_empty() => self.pointer_up(),
            _ => Outcome::Ignored,
        }
    }

    /// Toggles between rest and the focus scale.
    pub fn double_tap(&mut self) -> Outcome {
        if !self.is_open() {
            return Outcome::Ignored;
        }
        if self.is_zoomed() {
            self.reset();
        } else {
            self.set_scale(self.config.focus_scale);
            self.gesture = Gesture::Idle;
        }
        Outcome::Updated
    }

    /// Whole-percent zoom for the on-screen indicator.
    pub fn zoom_percent(&self) -> i64 {
        (self.scale * 100.0).round() as i64
    }

    /// CSS transform; the offset is divided by scale because the translate
    /// is applied before the scale.
    pub fn transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.offset.x / self.scale,
            self.offset.y / self.scale,
            self.scale
        )
    }

    /// No easing while dragging so the image tracks the pointer.
    pub fn transition(&self) -> &str {
        if self.is_dragging() {
            "none"
        } else {
            &self.config.transition
        }
    }

    // Degenerate baselines leave scale untouched but still rebase.
    fn pinch_sample(&mut self, session: PinchSession, distance: f64) {
        if session.baseline > 0.0 && session.baseline.is_finite() && distance.is_finite() {
            self.set_scale(self.scale * (distance / session.baseline));
        }
        self.gesture = Gesture::Pinching(PinchSession { baseline: distance });
    }

    fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            return;
        }
        let mut scale = self.config.clamp_scale(scale);
        if scale - self.config.min_scale < SNAP_EPSILON {
            scale = self.config.min_scale;
        } else if self.config.max_scale - scale < SNAP_EPSILON {
            scale = self.config.max_scale;
        }
        self.scale = scale;
        if !self.is_zoomed() {
            self.offset = Point::ORIGIN;
        }
    }

    fn reset(&mut self) {
        self.scale = self.config.min_scale;
        self.offset = Point::ORIGIN;
        self.gesture = Gesture::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn opened() -> ViewerState {
        let mut s = ViewerState::default();
        s.open(MediaReference::new("assets/screenshots/ecr.png", "ECR console"));
        s
    }

    fn zoomed_to(scale: f64) -> ViewerState {
        let mut s = opened();
        s.set_scale(scale);
        s
    }

    #[test]
    fn starts_closed_and_ignores_input() {
        let mut s = ViewerState::default();
        assert_eq!(s.phase(), Phase::Closed);
        assert_eq!(s.wheel(-1.0), Outcome::Ignored);
        assert_eq!(s.double_tap(), Outcome::Ignored);
        assert_eq!(s.touch_start(&[Point::ORIGIN, Point::new(10.0, 0.0)]), Outcome::Ignored);
        assert_eq!(s.scale(), 1.0);
    }

    #[test]
    fn wheel_scenario_zooms_and_clamps() {
        let mut s = opened();
        for _ in 0..3 {
            s.wheel(-100.0);
        }
        assert!(approx(s.scale(), 1.6));
        assert_eq!(s.zoom_percent(), 160);
        for _ in 0..10 {
            s.wheel(100.0);
        }
        assert_eq!(s.scale(), 1.0);
        assert_eq!(s.offset(), Point::ORIGIN);
    }

    #[test]
    fn wheel_with_zero_delta_zooms_in() {
        let mut s = opened();
        s.wheel(0.0);
        assert!(approx(s.scale(), 1.2));
    }

    #[test]
    fn wheel_clamps_at_max() {
        let mut s = opened();
        for _ in 0..50 {
            s.wheel(-1.0);
        }
        assert_eq!(s.scale(), 5.0);
        assert_eq!(s.zoom_percent(), 500);
    }

    #[test]
    fn zooming_back_to_rest_clears_offset() {
        let mut s = zoomed_to(1.2);
        s.pointer_down(Point::new(0.0, 0.0));
        s.pointer_move(Point::new(40.0, -20.0));
        s.pointer_up();
        assert_eq!(s.offset(), Point::new(40.0, -20.0));
        s.wheel(1.0);
        assert_eq!(s.scale(), 1.0);
        assert_eq!(s.offset(), Point::ORIGIN);
    }

    #[test]
    fn drag_scenario_moves_offset() {
        let mut s = zoomed_to(2.5);
        assert_eq!(s.pointer_down(Point::new(100.0, 100.0)), Outcome::Updated);
        assert_eq!(s.phase(), Phase::Dragging);
        s.pointer_move(Point::new(150.0, 130.0));
        assert_eq!(s.offset(), Point::new(50.0, 30.0));
        assert_eq!(s.transition(), "none");
        s.pointer_up();
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.transition(), s.config().transition);
    }

    #[test]
    fn second_drag_continues_from_current_offset() {
        let mut s = zoomed_to(2.0);
        s.pointer_down(Point::new(0.0, 0.0));
        s.pointer_move(Point::new(10.0, 10.0));
        s.pointer_up();
        s.pointer_down(Point::new(200.0, 200.0));
        s.pointer_move(Point::new(205.0, 190.0));
        assert_eq!(s.offset(), Point::new(15.0, 0.0));
    }

    #[test]
    fn drag_start_at_rest_is_refused() {
        let mut s = opened();
        assert_eq!(s.pointer_down(Point::new(5.0, 5.0)), Outcome::Ignored);
        assert!(!s.is_dragging());
        assert_eq!(s.pointer_move(Point::new(50.0, 50.0)), Outcome::Ignored);
        assert_eq!(s.offset(), Point::ORIGIN);
    }

    #[test]
    fn single_touch_pans_only_when_zoomed() {
        let mut s = opened();
        s.touch_start(&[Point::new(10.0, 10.0)]);
        assert!(!s.is_dragging());
        s.touch_move(&[Point::new(30.0, 30.0)]);
        assert_eq!(s.offset(), Point::ORIGIN);

        let mut s = zoomed_to(3.0);
        s.touch_start(&[Point::new(10.0, 10.0)]);
        s.touch_move(&[Point::new(30.0, 25.0)]);
        assert_eq!(s.offset(), Point::new(20.0, 15.0));
        s.touch_end(&[]);
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn pinch_scenario_doubles_scale() {
        let mut s = zoomed_to(1.5);
        s.touch_start(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
        assert_eq!(s.phase(), Phase::Pinching);
        s.touch_move(&[Point::new(0.0, 0.0), Point::new(200.0, 0.0)]);
        assert!(approx(s.scale(), 3.0));
        assert_eq!(s.gesture(), Gesture::Pinching(PinchSession { baseline: 200.0 }));
    }

    #[test]
    fn pinch_clamps_when_starting_high() {
        let mut s = zoomed_to(2.5);
        s.touch_start(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
        s.touch_move(&[Point::new(0.0, 0.0), Point::new(200.0, 0.0)]);
        assert_eq!(s.scale(), 5.0);
    }

    #[test]
    fn pinch_rebases_every_sample() {
        let mut s = opened();
        s.touch_start(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
        s.touch_move(&[Point::new(0.0, 0.0), Point::new(150.0, 0.0)]);
        assert!(approx(s.scale(), 1.5));
        // 150 -> 300 is another doubling relative to the last sample.
        s.touch_move(&[Point::new(0.0, 0.0), Point::new(300.0, 0.0)]);
        assert!(approx(s.scale(), 3.0));
    }

    #[test]
    fn zero_baseline_pinch_keeps_scale() {
        let mut s = zoomed_to(2.0);
        s.touch_start(&[Point::new(50.0, 50.0), Point::new(50.0, 50.0)]);
        assert_eq!(s.touch_move(&[Point::new(0.0, 0.0), Point::new(80.0, 0.0)]), Outcome::Updated);
        assert_eq!(s.scale(), 2.0);
        assert!(s.scale().is_finite());
        assert_eq!(s.gesture(), Gesture::Pinching(PinchSession { baseline: 80.0 }));
        s.touch_move(&[Point::new(0.0, 0.0), Point::new(160.0, 0.0)]);
        assert!(approx(s.scale(), 4.0));
    }

    #[test]
    fn second_finger_turns_drag_into_pinch() {
        let mut s = zoomed_to(2.0);
        s.touch_start(&[Point::new(10.0, 10.0)]);
        assert!(s.is_dragging());
        s.touch_start(&[Point::new(10.0, 10.0), Point::new(10.0, 110.0)]);
        assert_eq!(s.phase(), Phase::Pinching);
        assert_eq!(s.pointer_move(Point::new(500.0, 500.0)), Outcome::Ignored);
    }

    #[test]
    fn lifting_a_finger_ends_pinch() {
        let mut s = opened();
        s.touch_start(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);
        assert_eq!(s.touch_end(&[Point::new(0.0, 0.0)]), Outcome::Updated);
        assert_eq!(s.phase(), Phase::Idle);
        // The remaining finger does not pan on its own.
        s.touch_move(&[Point::new(40.0, 0.0)]);
        assert_eq!(s.offset(), Point::ORIGIN);
    }

    #[test]
    fn double_tap_toggles() {
        let mut s = opened();
        s.double_tap();
        assert_eq!(s.scale(), 2.5);
        s.pointer_down(Point::new(0.0, 0.0));
        s.pointer_move(Point::new(70.0, 70.0));
        s.double_tap();
        assert_eq!(s.scale(), 1.0);
        assert_eq!(s.offset(), Point::ORIGIN);
        assert_eq!(s.phase(), Phase::Idle);

        let mut s = zoomed_to(4.2);
        s.double_tap();
        assert_eq!(s.scale(), 1.0);
    }

    #[test]
    fn each_dismiss_path_reports_once() {
        for reason in [
            DismissReason::Escape,
            DismissReason::Backdrop,
            DismissReason::CloseButton,
        ] {
            let mut s = zoomed_to(3.0);
            assert_eq!(s.dismiss(reason), Outcome::Dismissed(reason));
            assert_eq!(s.phase(), Phase::Closed);
            assert_eq!(s.dismiss(reason), Outcome::Ignored);
        }
    }

    #[test]
    fn host_close_is_not_a_dismissal() {
        let mut s = opened();
        assert_eq!(s.apply(ViewerAction::Close), Outcome::Updated);
        assert_eq!(s.apply(ViewerAction::Close), Outcome::Ignored);
    }

    #[test]
    fn reopen_starts_fresh() {
        let mut s = zoomed_to(4.0);
        s.pointer_down(Point::new(0.0, 0.0));
        s.pointer_move(Point::new(90.0, 10.0));
        s.dismiss(DismissReason::Escape);
        s.open(MediaReference::new("b.png", "b"));
        assert_eq!(s.scale(), 1.0);
        assert_eq!(s.offset(), Point::ORIGIN);
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.media().map(|m| m.src.as_str()), Some("b.png"));
    }

    #[test]
    fn reconfigure_pulls_scale_into_new_range() {
        let mut s = zoomed_to(4.0);
        s.pointer_down(Point::ORIGIN);
        s.pointer_move(Point::new(30.0, 10.0));
        s.pointer_up();
        let tighter = ViewerConfig {
            max_scale: 3.0,
            ..ViewerConfig::default()
        };
        assert_eq!(s.reconfigure(tighter.clone()), Outcome::Updated);
        assert_eq!(s.scale(), 3.0);
        assert_eq!(s.offset(), Point::new(30.0, 10.0));
        assert_eq!(s.reconfigure(tighter), Outcome::Ignored);

        let raised = ViewerConfig {
            min_scale: 3.5,
            max_scale: 6.0,
            ..ViewerConfig::default()
        };
        s.reconfigure(raised);
        assert_eq!(s.scale(), 3.5);
        assert_eq!(s.offset(), Point::ORIGIN);
        assert!(s.is_open());
    }

    #[test]
    fn reconfigure_while_closed_rests_at_new_minimum() {
        let mut s = ViewerState::default();
        s.reconfigure(ViewerConfig {
            min_scale: 2.0,
            ..ViewerConfig::default()
        });
        assert_eq!(s.scale(), 2.0);
        assert_eq!(s.phase(), Phase::Closed);
    }

    #[test]
    fn transform_divides_offset_by_scale() {
        let mut s = zoomed_to(2.0);
        s.pointer_down(Point::new(0.0, 0.0));
        s.pointer_move(Point::new(50.0, -30.0));
        assert_eq!(s.transform(), "translate(25px, -15px) scale(2)");
    }

    fn action() -> impl Strategy<Value = ViewerAction> {
        let point = (-500.0..500.0f64, -500.0..500.0f64).prop_map(|(x, y)| Point::new(x, y));
        let contacts = prop::collection::vec(point.clone(), 0..3);
        prop_oneof![
            (-300.0..300.0f64).prop_map(|delta_y| ViewerAction::Wheel { delta_y }),
            point.clone().prop_map(ViewerAction::PointerDown),
            point.prop_map(ViewerAction::PointerMove),
            Just(ViewerAction::PointerUp),
            contacts.clone().prop_map(ViewerAction::TouchStart),
            contacts.clone().prop_map(ViewerAction::TouchMove),
            contacts.prop_map(ViewerAction::TouchEnd),
            Just(ViewerAction::DoubleTap),
        ]
    }

    proptest! {
        #[test]
        fn wheel_sequences_stay_in_range(deltas in prop::collection::vec(-500.0..500.0f64, 0..200)) {
            let mut s = opened();
            for d in deltas {
                s.wheel(d);
                prop_assert!(s.scale() >= 1.0 && s.scale() <= 5.0);
            }
        }

        #[test]
        fn any_input_keeps_invariants(actions in prop::collection::vec(action(), 0..100)) {
            let mut s = opened();
            for a in actions {
                s.apply(a);
                prop_assert!(s.scale().is_finite());
                prop_assert!(s.scale() >= 1.0 && s.scale() <= 5.0);
                if s.scale() == 1.0 {
                    prop_assert_eq!(s.offset(), Point::ORIGIN);
                    prop_assert!(!s.is_dragging());
                }
            }
        }
    }
}
