//! # inputmon-core
//!
//! Platform-independent logic behind the Input Monitor overlay: turning raw
//! key names into display labels, classifying clicks, tracking drag
//! selections, and deciding what the overlay shows and when it clears.
//!
//! This crate has no dependency on OS input hooks or any UI toolkit.
//!
//! - **`keymap`** – raw key name → canonical label (`"left_ctrl"` → `"Ctrl"`).
//! - **`domain`** – the small state machines fed by input events.

pub mod domain;
pub mod keymap;

pub use domain::appearance::{ColorParseError, Rgb};
pub use domain::click::{ClickClassifier, ClickKind, ClickPolicy};
pub use domain::combo::{ComboView, KeyCombo};
pub use domain::display::{DisplayContent, DisplayState, IconKind, Segment, TextStyle};
pub use domain::locks::LockState;
pub use domain::pointer::PointerTracker;
pub use domain::selection::{SelectionSize, SelectionTracker};
pub use domain::{MouseButton, Point};
pub use keymap::{canonical_key_label, is_modifier, normalize_key_name};
