//! MonitorInputUseCase: folds captured input events into what the overlay shows.
//!
//! This use case is the single owner of every piece of mutable overlay state.
//! The UI thread feeds it [`RawInputEvent`]s drained from the capture channel,
//! calls [`MonitorInputUseCase::tick`] once per frame, and renders the
//! [`OverlayView`] snapshot it returns.
//!
//! # Architecture
//!
//! Only domain types from `inputmon-core` are used here; there are no OS
//! calls and no UI toolkit types, so every behaviour is unit-testable with
//! synthetic events and hand-picked [`Instant`]s.

use std::time::{Duration, Instant};

use inputmon_core::domain::display::DEFAULT_RESET_DELAY;
use inputmon_core::domain::pointer::DEFAULT_POINTER_UPDATE_EVERY;
use inputmon_core::domain::selection::DEFAULT_SELECTION_MIN_SIZE;
use inputmon_core::{
    canonical_key_label, ClickClassifier, ClickKind, ClickPolicy, DisplayContent, DisplayState,
    IconKind, KeyCombo, MouseButton, Point, PointerTracker, SelectionSize, SelectionTracker,
    TextStyle,
};
use tracing::{debug, trace};

use crate::infrastructure::input_capture::RawInputEvent;
use crate::infrastructure::storage::config::AppConfig;

/// Tunables for the reducer, normally taken from [`AppConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorSettings {
    pub reset_delay: Duration,
    pub click_policy: ClickPolicy,
    pub pointer_update_every: u32,
    pub selection_min_size: u32,
    pub show_scroll: bool,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            reset_delay: DEFAULT_RESET_DELAY,
            click_policy: ClickPolicy::default(),
            pointer_update_every: DEFAULT_POINTER_UPDATE_EVERY,
            selection_min_size: DEFAULT_SELECTION_MIN_SIZE,
            show_scroll: true,
        }
    }
}

impl From<&AppConfig> for MonitorSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            reset_delay: config.timing.reset_delay(),
            click_policy: config.timing.click_policy(),
            pointer_update_every: config.mouse.update_every,
            selection_min_size: config.mouse.selection_min_size,
            show_scroll: config.mouse.show_scroll,
        }
    }
}

/// Immutable snapshot of everything the overlay draws, apart from the LEDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
    /// Main input line; `None` once the idle delay has cleared it.
    pub content: Option<DisplayContent>,
    /// `X: x, Y: y | ΔX: dx, ΔY: dy`.
    pub pointer_line: String,
    /// `Selection: W x H`.
    pub selection_line: String,
}

/// The Monitor Input use case.
pub struct MonitorInputUseCase {
    settings: MonitorSettings,
    combo: KeyCombo,
    clicks: ClickClassifier,
    selection: SelectionTracker,
    pointer: PointerTracker,
    display: DisplayState,
    selection_line: String,
}

impl Default for MonitorInputUseCase {
    fn default() -> Self {
        Self::new(MonitorSettings::default())
    }
}

impl MonitorInputUseCase {
    pub fn new(settings: MonitorSettings) -> Self {
        Self {
            combo: KeyCombo::new(),
            clicks: ClickClassifier::new(settings.click_policy),
            selection: SelectionTracker::new(settings.selection_min_size),
            pointer: PointerTracker::new(settings.pointer_update_every),
            display: DisplayState::new(settings.reset_delay),
            selection_line: format_selection_line(SelectionSize::default()),
            settings,
        }
    }

    /// Applies one captured event.
    pub fn handle_event(&mut self, event: RawInputEvent) {
        match event {
            RawInputEvent::KeyDown {
                name,
                scan_code,
                time,
            } => self.handle_key_down(&name, scan_code, time),
            RawInputEvent::KeyUp {
                name, scan_code, ..
            } => self.handle_key_up(&name, scan_code),
            RawInputEvent::MouseMove { pos, .. } => self.handle_mouse_move(pos),
            RawInputEvent::MouseButtonDown { button, pos, time } => {
                self.handle_button_down(button, pos, time)
            }
            RawInputEvent::MouseButtonUp { button, time, .. } => {
                self.handle_button_up(button, time)
            }
            RawInputEvent::MouseWheel {
                delta_x,
                delta_y,
                time,
            } => self.handle_wheel(delta_x, delta_y, time),
        }
    }

    /// Advances the clear timer.  Returns `true` when the input line was cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.display.tick(now)
    }

    /// When the next clear is due, for repaint scheduling.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.display.next_deadline()
    }

    pub fn view(&self) -> OverlayView {
        OverlayView {
            content: self.display.content().cloned(),
            pointer_line: self.pointer.label().to_string(),
            selection_line: self.selection_line.clone(),
        }
    }

    // ── Private handlers ──────────────────────────────────────────────────────

    fn handle_key_down(&mut self, raw: &str, scan_code: Option<u32>, at: Instant) {
        let Some(label) = canonical_key_label(raw, scan_code) else {
            trace!(raw, "key with empty label ignored");
            return;
        };
        self.combo.press(&label, at);

        // Auto-repeat re-renders too, which keeps the line alive while a key is held.
        if let Some(view) = self.combo.render() {
            let icon = view.show_win_icon.then_some(IconKind::Win);
            self.display
                .show(DisplayContent::text(view.text).with_icon(icon), at);
        }
    }

    fn handle_key_up(&mut self, raw: &str, scan_code: Option<u32>) {
        if let Some(label) = canonical_key_label(raw, scan_code) {
            self.combo.release(&label);
        }
    }

    fn handle_mouse_move(&mut self, pos: Point) {
        self.pointer.moved(pos);
        if let Some(size) = self.selection.update(pos) {
            self.selection_line = format_selection_line(size);
        }
    }

    fn handle_button_down(&mut self, button: MouseButton, pos: Point, at: Instant) {
        let content = match button {
            MouseButton::Left => {
                self.selection.begin(pos);
                self.selection_line = format_selection_line(SelectionSize::default());
                let text = match self.clicks.press(button, pos, at) {
                    ClickKind::Single => "Left Click",
                    ClickKind::Double => "Left Double Click",
                };
                DisplayContent::text(text).with_icon(Some(IconKind::MouseLeft))
            }
            // Right presses never take part in double-click detection.
            MouseButton::Right => {
                DisplayContent::text("Right Click").with_icon(Some(IconKind::MouseRight))
            }
            MouseButton::Middle => {
                let text = match self.clicks.press(button, pos, at) {
                    ClickKind::Single => "Middle Click",
                    ClickKind::Double => "Middle Double Click",
                };
                DisplayContent::text(text).with_icon(Some(IconKind::MouseMiddle))
            }
            MouseButton::Other(n) => DisplayContent::text(format!("Button {n} Click")),
        };
        self.display.show(content, at);
    }

    fn handle_button_up(&mut self, button: MouseButton, at: Instant) {
        if button != MouseButton::Left || !self.selection.is_selecting() {
            return;
        }
        if let Some(size) = self.selection.end() {
            debug!(%size, "selection finished");
            self.display.show(
                DisplayContent::text(format!("Selected Area: {size}"))
                    .with_style(TextStyle::Selection),
                at,
            );
        }
    }

    fn handle_wheel(&mut self, delta_x: i64, delta_y: i64, at: Instant) {
        if !self.settings.show_scroll {
            return;
        }
        let text = if delta_y > 0 {
            "Scroll Up"
        } else if delta_y < 0 {
            "Scroll Down"
        } else if delta_x > 0 {
            "Scroll Right"
        } else if delta_x < 0 {
            "Scroll Left"
        } else {
            return;
        };
        self.display.show(DisplayContent::text(text), at);
    }
}

fn format_selection_line(size: SelectionSize) -> String {
    format!("Selection: {size}")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
