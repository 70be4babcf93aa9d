//! Single/double click classification.
//!
//! A press counts as a double click when it follows the previous recorded
//! press of the same button within [`ClickPolicy::window`] and stays strictly
//! inside [`ClickPolicy::tolerance_px`] on both axes.

use std::time::{Duration, Instant};

use super::{MouseButton, Point};

/// Default double-click time window.
pub const DEFAULT_DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

/// Default per-axis position tolerance in pixels.
pub const DEFAULT_DOUBLE_CLICK_TOLERANCE: i32 = 5;

/// Thresholds for double-click detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickPolicy {
    pub window: Duration,
    pub tolerance_px: i32,
}

impl Default for ClickPolicy {
    fn default() -> Self {
        Self {
            window: DEFAULT_DOUBLE_CLICK_WINDOW,
            tolerance_px: DEFAULT_DOUBLE_CLICK_TOLERANCE,
        }
    }
}

/// Classification of a button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Single,
    Double,
}

/// A previously recorded press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickRecord {
    pub button: MouseButton,
    pub pos: Point,
    pub at: Instant,
}

/// Pure double-click test against `previous`.
pub fn is_double_click(
    previous: Option<&ClickRecord>,
    button: MouseButton,
    pos: Point,
    at: Instant,
    policy: &ClickPolicy,
) -> bool {
    let Some(prev) = previous else {
        return false;
    };
    // An earlier timestamp than the previous press never counts.
    let Some(elapsed) = at.checked_duration_since(prev.at) else {
        return false;
    };
    let within = |a: i32, b: i32| (i64::from(a) - i64::from(b)).abs() < i64::from(policy.tolerance_px);
    elapsed < policy.window
        && within(pos.x, prev.pos.x)
        && within(pos.y, prev.pos.y)
        && prev.button == button
}

/// Remembers the last recorded press and classifies new ones against it.
#[derive(Debug, Clone, Default)]
pub struct ClickClassifier {
    policy: ClickPolicy,
    last: Option<ClickRecord>,
}

impl ClickClassifier {
    pub fn new(policy: ClickPolicy) -> Self {
        Self { policy, last: None }
    }

    /// Classifies a press without recording it.
    pub fn classify(&self, button: MouseButton, pos: Point, at: Instant) -> ClickKind {
        if is_double_click(self.last.as_ref(), button, pos, at, &self.policy) {
            ClickKind::Double
        } else {
            ClickKind::Single
        }
    }

    /// Stores a press as the reference for the next classification.
    pub fn record(&mut self, button: MouseButton, pos: Point, at: Instant) {
        self.last = Some(ClickRecord { button, pos, at });
    }

    /// Classifies then records.
    pub fn press(&mut self, button: MouseButton, pos: Point, at: Instant) -> ClickKind {
        let kind = self.classify(button, pos, at);
        self.record(button, pos, at);
        kind
    }
}
