//! Pointer position and delta tracking with throttled label updates.

use super::Point;

/// Default number of moves between pointer label refreshes.
pub const DEFAULT_POINTER_UPDATE_EVERY: u32 = 5;

#[derive(Debug, Clone)]
pub struct PointerTracker {
    update_every: u32,
    last: Point,
    counter: u32,
    label: String,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(DEFAULT_POINTER_UPDATE_EVERY)
    }
}

impl PointerTracker {
    /// `update_every` of zero is treated as one (refresh on every move).
    pub fn new(update_every: u32) -> Self {
        Self {
            update_every: update_every.max(1),
            last: Point::default(),
            counter: 0,
            label: format_pointer_line(Point::default(), 0, 0),
        }
    }

    /// Last known pointer position.
    pub fn position(&self) -> Point {
        self.last
    }

    /// The most recently published pointer line.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Records a move.  Returns `true` when the label was refreshed.
    pub fn moved(&mut self, to: Point) -> bool {
        // Widened so the delta between any two i32 positions fits.
        let dx = i64::from(to.x) - i64::from(self.last.x);
        let dy = i64::from(to.y) - i64::from(self.last.y);
        self.last = to;

        self.counter += 1;
        if self.counter < self.update_every {
            return false;
        }
        self.counter = 0;
        self.label = format_pointer_line(to, dx, dy);
        true
    }
}

fn format_pointer_line(pos: Point, dx: i64, dy: i64) -> String {
    format!("X: {}, Y: {} | ΔX: {dx}, ΔY: {dy}", pos.x, pos.y)
}
