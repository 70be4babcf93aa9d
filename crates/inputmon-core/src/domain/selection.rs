//! Drag-selection tracking (left button held while the pointer moves).

use super::Point;

/// Default size a selection must exceed on either axis to be reported.
pub const DEFAULT_SELECTION_MIN_SIZE: u32 = 5;

/// Width and height of a selection rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionSize {
    pub width: u32,
    pub height: u32,
}

impl SelectionSize {
    fn between(a: Point, b: Point) -> Self {
        Self {
            width: a.x.abs_diff(b.x),
            height: a.y.abs_diff(b.y),
        }
    }
}

impl std::fmt::Display for SelectionSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

#[derive(Debug, Clone)]
pub struct SelectionTracker {
    min_size: u32,
    start: Option<Point>,
    end: Option<Point>,
    selecting: bool,
}

impl Default for SelectionTracker {
    fn default() -> Self {
        Self::new(DEFAULT_SELECTION_MIN_SIZE)
    }
}

impl SelectionTracker {
    pub fn new(min_size: u32) -> Self {
        Self {
            min_size,
            start: None,
            end: None,
            selecting: false,
        }
    }

    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// Anchors a new selection at `at`.
    pub fn begin(&mut self, at: Point) {
        self.start = Some(at);
        self.end = None;
        self.selecting = true;
    }

    /// Moves the free corner.  Returns the live size while selecting.
    pub fn update(&mut self, to: Point) -> Option<SelectionSize> {
        if !self.selecting {
            return None;
        }
        let start = self.start?;
        self.end = Some(to);
        Some(SelectionSize::between(start, to))
    }

    /// Finishes the selection.
    ///
    /// Returns the final size only when the pointer moved and the rectangle
    /// exceeds the minimum on at least one axis.
    pub fn end(&mut self) -> Option<SelectionSize> {
        if !self.selecting {
            return None;
        }
        self.selecting = false;
        let size = SelectionSize::between(self.start?, self.end?);
        (size.width > self.min_size || size.height > self.min_size).then_some(size)
    }
}
