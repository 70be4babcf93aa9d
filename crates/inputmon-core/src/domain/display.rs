//! Display-state reducer: what the overlay shows and when it clears.
//!
//! Every [`DisplayState::show`] replaces the content and re-arms a single
//! clear deadline `reset_delay` in the future, cancelling any earlier one.
//! [`DisplayState::tick`] performs the clear once the deadline passes, so the
//! display clears exactly once per idle period after the last shown input.

use std::time::{Duration, Instant};

use tracing::trace;

/// Default idle delay before the display clears.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(2000);

/// Icons the overlay knows how to draw next to the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKind {
    Win,
    MouseLeft,
    MouseRight,
    MouseMiddle,
}

/// Font used for the main input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStyle {
    /// Large monospace text for keys and clicks.
    #[default]
    Input,
    /// Smaller text for "Selected Area" reports.
    Selection,
}

/// One thing shown on the input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayContent {
    pub text: String,
    pub icon: Option<IconKind>,
    pub style: TextStyle,
}

impl DisplayContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon: None,
            style: TextStyle::Input,
        }
    }

    pub fn with_icon(mut self, icon: Option<IconKind>) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Lays the content out as a sequence of text runs and icon slots.
    ///
    /// With an icon and a standalone `Win` word the icon is placed right after
    /// that word; otherwise the icon (if any) leads the text.
    pub fn segments(&self) -> Vec<Segment> {
        let Some(icon) = self.icon else {
            return vec![Segment::Text(self.text.clone())];
        };

        match find_word(&self.text, "Win") {
            Some(start) => {
                let end = start + "Win".len();
                let left = self.text[..start].trim_end();
                let right = self.text[end..].trim_start();

                let mut out = Vec::with_capacity(4);
                if !left.is_empty() {
                    out.push(Segment::Text(left.to_string()));
                }
                out.push(Segment::Text("Win".to_string()));
                out.push(Segment::Icon(icon));
                if !right.is_empty() {
                    out.push(Segment::Text(right.to_string()));
                }
                out
            }
            None => vec![Segment::Icon(icon), Segment::Text(self.text.clone())],
        }
    }
}

/// A piece of the laid-out input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Icon(IconKind),
}

/// Byte offset of the first occurrence of `word` bounded by non-word characters.
fn find_word(haystack: &str, word: &str) -> Option<usize> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    haystack.match_indices(word).map(|(i, _)| i).find(|&i| {
        let before = haystack[..i].chars().next_back();
        let after = haystack[i + word.len()..].chars().next();
        !before.is_some_and(is_word) && !after.is_some_and(is_word)
    })
}

#[derive(Debug, Clone)]
pub struct DisplayState {
    reset_delay: Duration,
    content: Option<DisplayContent>,
    deadline: Option<Instant>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new(DEFAULT_RESET_DELAY)
    }
}

impl DisplayState {
    pub fn new(reset_delay: Duration) -> Self {
        Self {
            reset_delay,
            content: None,
            deadline: None,
        }
    }

    pub fn content(&self) -> Option<&DisplayContent> {
        self.content.as_ref()
    }

    /// When the pending clear will fire, if one is armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Replaces the content and re-arms the clear deadline.
    pub fn show(&mut self, content: DisplayContent, now: Instant) {
        trace!(text = %content.text, "display show");
        self.content = Some(content);
        self.deadline = Some(now + self.reset_delay);
    }

    /// Clears the display if the deadline has passed.
    ///
    /// Returns `true` only on the tick that performed the clear.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                trace!("display cleared after idle delay");
                self.content = None;
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_show_sets_content() {
        let mut display = DisplayState::default();
        display.show(DisplayContent::text("Left Click"), Instant::now());
        assert_eq!(display.content().unwrap().text, "Left Click");
    }

    #[test]
    fn test_clears_exactly_once_after_delay() {
        // Arrange
        let base = Instant::now();
        let mut display = DisplayState::default();
        display.show(DisplayContent::text("A"), base);

        // Act / Assert
        assert!(!display.tick(base + ms(1_999)));
        assert!(display.content().is_some());

        assert!(display.tick(base + ms(2_000)));
        assert!(display.content().is_none());

        assert!(!display.tick(base + ms(2_001)));
        assert!(!display.tick(base + ms(10_000)));
    }

    #[test]
    fn test_new_input_postpones_clear() {
        // Arrange
        let base = Instant::now();
        let mut display = DisplayState::default();
        display.show(DisplayContent::text("A"), base);

        // Act – second input halfway through the delay
        display.show(DisplayContent::text("B"), base + ms(1_500));

        // Assert – the first deadline no longer fires
        assert!(!display.tick(base + ms(2_500)));
        assert_eq!(display.content().unwrap().text, "B");
        assert!(display.tick(base + ms(3_500)));
    }

    #[test]
    fn test_tick_without_content_is_noop() {
        let mut display = DisplayState::default();
        assert!(!display.tick(Instant::now()));
        assert_eq!(display.next_deadline(), None);
    }

    #[test]
    fn test_next_deadline_tracks_last_show() {
        let base = Instant::now();
        let mut display = DisplayState::new(ms(750));
        display.show(DisplayContent::text("A"), base);
        assert_eq!(display.next_deadline(), Some(base + ms(750)));
    }

    #[test]
    fn test_segments_without_icon_is_plain_text() {
        let content = DisplayContent::text("Ctrl + C");
        assert_eq!(content.segments(), vec![Segment::Text("Ctrl + C".into())]);
    }

    #[test]
    fn test_segments_with_icon_and_no_win_lead_with_icon() {
        let content = DisplayContent::text("Left Click").with_icon(Some(IconKind::MouseLeft));
        assert_eq!(
            content.segments(),
            vec![
                Segment::Icon(IconKind::MouseLeft),
                Segment::Text("Left Click".into())
            ]
        );
    }

    #[test]
    fn test_segments_place_win_icon_inline() {
        let content = DisplayContent::text("Ctrl + Win + E").with_icon(Some(IconKind::Win));
        assert_eq!(
            content.segments(),
            vec![
                Segment::Text("Ctrl +".into()),
                Segment::Text("Win".into()),
                Segment::Icon(IconKind::Win),
                Segment::Text("+ E".into()),
            ]
        );
    }

    #[test]
    fn test_segments_for_lone_win() {
        let content = DisplayContent::text("Win + ...").with_icon(Some(IconKind::Win));
        assert_eq!(
            content.segments(),
            vec![
                Segment::Text("Win".into()),
                Segment::Icon(IconKind::Win),
                Segment::Text("+ ...".into()),
            ]
        );
    }

    #[test]
    fn test_find_word_respects_boundaries() {
        assert_eq!(find_word("Window", "Win"), None);
        assert_eq!(find_word("Twin", "Win"), None);
        assert_eq!(find_word("Shift + Win", "Win"), Some(8));
    }
}
