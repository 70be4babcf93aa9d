//! Domain logic for the input overlay.
//!
//! Everything here is pure: no OS hooks, no windowing, no file system.  Time is
//! passed in as [`std::time::Instant`] values so the behaviour can be tested
//! deterministically.
//!
//! - [`combo`] – held keys → `"Ctrl + Shift + T"`.
//! - [`click`] – single vs. double click.
//! - [`selection`] – drag rectangle size.
//! - [`pointer`] – position/delta line, throttled.
//! - [`display`] – current content and its auto-clear deadline.
//! - [`locks`] – Num/Caps/Scroll Lock state decoding.
//! - [`icon`] – whole-factor icon scaling.
//! - [`appearance`] – theme colours.

pub mod appearance;
pub mod click;
pub mod combo;
pub mod display;
pub mod icon;
pub mod locks;
pub mod pointer;
pub mod selection;

/// A position in global screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Any other button, by platform number.
    Other(u8),
}
