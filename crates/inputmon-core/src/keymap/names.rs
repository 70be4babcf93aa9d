//! Raw key name → canonical display label.
//!
//! # Normalization steps
//!
//! 1. Lower-case, turn `-` and `_` into spaces, trim.
//! 2. Drop a leading `left`/`right` when it qualifies a modifier
//!    (`"left ctrl"` → `"ctrl"`).  Arrow keys named `"left"`/`"right"` are kept.
//! 3. Look the result up in the special-key table.
//! 4. Upper-case single letters.
//! 5. Title-case anything else.
//!
//! Applying [`normalize_key_name`] to one of its own outputs returns the same
//! label, so already-canonical names pass through unchanged.

/// Linux evdev scan codes for the left and right Meta (Win) keys.
///
/// Some keyboard backends report these keys as `alt`; the scan code is the
/// only reliable way to tell them apart.
pub const WIN_SCAN_CODES: [u32; 2] = [125, 126];

/// Canonical labels that count as modifiers when building a combination.
pub const MODIFIERS: [&str; 4] = ["Ctrl", "Alt", "Shift", "Win"];

/// Words that may follow a `left`/`right` side prefix and still denote a modifier.
const SIDED_MODIFIERS: [&str; 7] = ["ctrl", "control", "shift", "alt", "windows", "super", "cmd"];

/// Returns `true` if `label` is one of the canonical modifier labels.
pub fn is_modifier(label: &str) -> bool {
    MODIFIERS.contains(&label)
}

/// Replaces a misreported `alt` with `windows` when the scan code says Meta.
///
/// Returns `raw` untouched in every other case.
pub fn normalize_win_key(raw: &str, scan_code: Option<u32>) -> &str {
    let Some(code) = scan_code else {
        return raw;
    };
    if !WIN_SCAN_CODES.contains(&code) {
        return raw;
    }
    let squashed: String = raw
        .chars()
        .filter(|c| *c != ' ')
        .flat_map(char::to_lowercase)
        .collect();
    if squashed == "alt" || squashed == "altgr" {
        "windows"
    } else {
        raw
    }
}

/// Formats a raw key name for display.
///
/// # Examples
///
/// ```
/// use inputmon_core::keymap::normalize_key_name;
///
/// assert_eq!(normalize_key_name("left_ctrl"), "Ctrl");
/// assert_eq!(normalize_key_name("page-down"), "Page Down");
/// assert_eq!(normalize_key_name("q"), "Q");
/// assert_eq!(normalize_key_name("scroll lock"), "Scroll Lock");
/// ```
pub fn normalize_key_name(raw: &str) -> String {
    let cleaned = raw.to_lowercase().replace(['-', '_'], " ");
    let mut name = cleaned.trim().to_string();

    let parts: Vec<&str> = name.split_whitespace().collect();
    if parts.len() > 1
        && (parts[0] == "left" || parts[0] == "right")
        && SIDED_MODIFIERS.contains(&parts[1])
    {
        name = parts[1..].join(" ");
    }

    if let Some(label) = special_key_label(&name) {
        return label.to_string();
    }

    let mut chars = name.chars();
    if let (Some(only), None) = (chars.next(), chars.next()) {
        if only.is_alphabetic() {
            return only.to_uppercase().collect();
        }
    }

    title_case(&name)
}

/// Full pipeline used by the capture path: Win-key fix-up then normalization.
///
/// Returns `None` when the raw name normalizes to an empty label.
pub fn canonical_key_label(raw: &str, scan_code: Option<u32>) -> Option<String> {
    let label = normalize_key_name(normalize_win_key(raw, scan_code));
    if label.is_empty() {
        None
    } else {
        Some(label)
    }
}

/// Special-key table.  Keys are already lower-cased and side-stripped.
fn special_key_label(name: &str) -> Option<&'static str> {
    let label = match name {
        "ctrl" | "control" | "lctrl" | "rctrl" => "Ctrl",
        "alt" | "alt gr" | "lalt" | "ralt" => "Alt",
        "shift" | "lshift" | "rshift" => "Shift",
        "windows" | "meta" | "leftmeta" | "rightmeta" | "super" | "lwin" | "rwin" | "cmd" => "Win",

        "space" => "Space",
        "enter" => "Enter",
        "tab" => "Tab",
        "esc" => "Esc",

        "up" => "Up ⬆",
        "down" => "Down ⬇",
        "left" => "Left ⬅",
        "right" => "Right ➡",

        "backspace" => "Backspace ←",
        "delete" => "Delete ⌫",
        "insert" => "Insert",
        "home" => "Home",
        "end" => "End",
        "print screen" => "Print Screen 📸",
        "page up" => "Page Up",
        "page down" => "Page Down",
        "caps lock" => "Caps Lock",
        "num lock" => "Num Lock",

        "f1" => "F1",
        "f2" => "F2",
        "f3" => "F3",
        "f4" => "F4",
        "f5" => "F5",
        "f6" => "F6",
        "f7" => "F7",
        "f8" => "F8",
        "f9" => "F9",
        "f10" => "F10",
        "f11" => "F11",
        "f12" => "F12",
        _ => return None,
    };
    Some(label)
}

/// Upper-cases the first letter of every run of letters and lower-cases the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_aliases_collapse_to_canonical_labels() {
        assert_eq!(normalize_key_name("control"), "Ctrl");
        assert_eq!(normalize_key_name("rctrl"), "Ctrl");
        assert_eq!(normalize_key_name("alt gr"), "Alt");
        assert_eq!(normalize_key_name("lshift"), "Shift");
        assert_eq!(normalize_key_name("super"), "Win");
        assert_eq!(normalize_key_name("cmd"), "Win");
        assert_eq!(normalize_key_name("leftmeta"), "Win");
    }

    #[test]
    fn test_side_prefix_is_stripped_only_for_modifiers() {
        assert_eq!(normalize_key_name("left ctrl"), "Ctrl");
        assert_eq!(normalize_key_name("right shift"), "Shift");
        assert_eq!(normalize_key_name("right alt gr"), "Alt");
        assert_eq!(normalize_key_name("left windows"), "Win");
        // Arrow keys keep their direction.
        assert_eq!(normalize_key_name("left"), "Left ⬅");
        assert_eq!(normalize_key_name("right"), "Right ➡");
    }

    #[test]
    fn test_separators_and_case_are_normalized() {
        assert_eq!(normalize_key_name("  Page_Up "), "Page Up");
        assert_eq!(normalize_key_name("CAPS-LOCK"), "Caps Lock");
        assert_eq!(normalize_key_name("Left_Ctrl"), "Ctrl");
    }

    #[test]
    fn test_single_letters_are_upper_cased() {
        assert_eq!(normalize_key_name("a"), "A");
        assert_eq!(normalize_key_name("Z"), "Z");
    }

    #[test]
    fn test_single_non_letters_pass_through() {
        assert_eq!(normalize_key_name("1"), "1");
        assert_eq!(normalize_key_name(";"), ";");
        assert_eq!(normalize_key_name("/"), "/");
    }

    #[test]
    fn test_unknown_names_are_title_cased() {
        assert_eq!(normalize_key_name("scroll lock"), "Scroll Lock");
        assert_eq!(normalize_key_name("f13"), "F13");
        assert_eq!(normalize_key_name("media play pause"), "Media Play Pause");
        assert_eq!(normalize_key_name("key 240"), "Key 240");
    }

    #[test]
    fn test_empty_name_normalizes_to_empty() {
        assert_eq!(normalize_key_name("   "), "");
        assert_eq!(canonical_key_label(" ", None), None);
    }

    #[test]
    fn test_win_scan_code_turns_alt_into_win() {
        assert_eq!(normalize_win_key("alt", Some(125)), "windows");
        assert_eq!(normalize_win_key("Alt Gr", Some(126)), "windows");
        assert_eq!(canonical_key_label("alt", Some(125)).as_deref(), Some("Win"));
    }

    #[test]
    fn test_win_scan_code_leaves_other_keys_alone() {
        assert_eq!(normalize_win_key("alt", Some(56)), "alt");
        assert_eq!(normalize_win_key("alt", None), "alt");
        assert_eq!(normalize_win_key("ctrl", Some(125)), "ctrl");
    }

    #[test]
    fn test_is_modifier() {
        for m in MODIFIERS {
            assert!(is_modifier(m));
        }
        assert!(!is_modifier("A"));
        assert!(!is_modifier("ctrl"));
    }

    #[test]
    fn test_normalizer_is_idempotent_on_canonical_labels() {
        let raw = [
            "ctrl", "alt", "shift", "windows", "space", "enter", "tab", "esc", "up", "down",
            "left", "right", "backspace", "delete", "insert", "home", "end", "print screen",
            "page up", "page down", "caps lock", "num lock", "f1", "f7", "f12", "a", "q",
            "scroll lock", "f20", "1", ";", "menu",
        ];
        for name in raw {
            let once = normalize_key_name(name);
            let twice = normalize_key_name(&once);
            assert_eq!(once, twice, "normalizing {name:?} twice changed {once:?}");
        }
    }
}
