//! Tracks the keys currently held down and renders them as a combination.

use std::time::Instant;

use crate::keymap::is_modifier;

/// Rendered form of the current key combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboView {
    /// Text such as `"Ctrl + Shift + T"` or `"Ctrl + ..."`.
    pub text: String,
    /// Whether the Win logo should accompany the text.
    pub show_win_icon: bool,
}

/// Held keys in press order.
///
/// Labels are expected to be canonical (see [`crate::keymap::canonical_key_label`]),
/// so left and right variants of a modifier are one entry.
#[derive(Debug, Default, Clone)]
pub struct KeyCombo {
    held: Vec<(String, Instant)>,
}

impl KeyCombo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `label` as held.  Auto-repeat presses of a held key are ignored.
    ///
    /// Returns `true` if the key was newly added.
    pub fn press(&mut self, label: &str, at: Instant) -> bool {
        if self.is_held(label) {
            return false;
        }
        self.held.push((label.to_string(), at));
        true
    }

    /// Forgets `label`.  Returns `true` if it was held.
    pub fn release(&mut self, label: &str) -> bool {
        let before = self.held.len();
        self.held.retain(|(k, _)| k != label);
        self.held.len() != before
    }

    pub fn is_held(&self, label: &str) -> bool {
        self.held.iter().any(|(k, _)| k == label)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Held labels ordered by press time; ties keep arrival order.
    pub fn ordered(&self) -> Vec<&str> {
        let mut keys: Vec<&(String, Instant)> = self.held.iter().collect();
        keys.sort_by_key(|(_, t)| *t);
        keys.into_iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Renders the combination, modifiers first.
    ///
    /// Returns `None` when nothing is held.
    pub fn render(&self) -> Option<ComboView> {
        let ordered = self.ordered();
        let (modifiers, keys): (Vec<&str>, Vec<&str>) =
            ordered.into_iter().partition(|k| is_modifier(k));
        let has_win = modifiers.contains(&"Win");

        if !keys.is_empty() {
            let mut all = modifiers;
            all.extend(keys);
            return Some(ComboView {
                text: all.join(" + "),
                show_win_icon: has_win,
            });
        }

        if !modifiers.is_empty() {
            return Some(ComboView {
                text: format!("{} + ...", modifiers.join(" + ")),
                show_win_icon: has_win && modifiers.len() == 1,
            });
        }

        None
    }
}
