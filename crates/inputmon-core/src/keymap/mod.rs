//! Key-name translation for display.
//!
//! Raw key identifiers arrive from the input hook in a loose, platform-flavoured
//! vocabulary (`"left ctrl"`, `"page_down"`, `"alt gr"`, `"a"`).  The [`names`]
//! module folds them into the canonical labels shown in the overlay
//! (`"Ctrl"`, `"Page Down"`, `"Alt"`, `"A"`).

pub mod names;

pub use names::{
    canonical_key_label, is_modifier, normalize_key_name, normalize_win_key, MODIFIERS,
    WIN_SCAN_CODES,
};
