//! Global keyboard and mouse hook backed by `rdev`.
//!
//! `rdev::listen` blocks for the lifetime of the process, so it runs on a
//! dedicated `input-monitor-hook` thread.  The callback translates each
//! `rdev::Event` into a [`RawInputEvent`] and sends it down the channel; it
//! never blocks on the UI.
//!
//! # Key names
//!
//! Keys are reported in the loose lower-case vocabulary the overlay's
//! normalizer understands (`"left ctrl"`, `"page down"`, `"a"`), not as
//! display labels.  Keys `rdev` cannot identify come through as
//! `"key <code>"` with the platform code as scan code.
//!
//! `rdev` already reports the Win/Super key as `MetaLeft`/`MetaRight`, so
//! named keys carry no scan code and the normalizer's Win scan-code fix-up
//! only matters for backends that supply raw scan codes.
//!
//! # Permissions
//!
//! On Linux the hook needs an X11 display; on macOS the process needs the
//! Accessibility permission.  If `listen` fails the thread logs a warning and
//! exits; the overlay keeps running without live input.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use inputmon_core::{MouseButton, Point};
use rdev::{Button, EventType, Key};
use tracing::{debug, warn};

use super::{CaptureError, InputSource, RawInputEvent};

/// Global input capture through `rdev`.
pub struct RdevInputSource {
    started: AtomicBool,
    /// Set once `stop()` has been called; the callback then drops events.
    stopped: Arc<AtomicBool>,
}

impl RdevInputSource {
    pub fn new() -> Self {
        Self {
            started: AtomicBool::new(false),
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Default for RdevInputSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for RdevInputSource {
    fn start(&self) -> Result<mpsc::Receiver<RawInputEvent>, CaptureError> {
        if self.stopped.load(Ordering::SeqCst) {
            return Err(CaptureError::AlreadyStopped);
        }
        // `rdev::listen` cannot be cancelled, so only one listener thread may exist.
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(CaptureError::AlreadyStarted);
        }

        let (tx, rx) = mpsc::channel::<RawInputEvent>();
        let stopped = Arc::clone(&self.stopped);

        thread::Builder::new()
            .name("input-monitor-hook".to_string())
            .spawn(move || run_listener(tx, stopped))
            .map_err(CaptureError::ThreadSpawn)?;

        Ok(rx)
    }

    fn stop(&self) {
        // The hook thread cannot be joined; it goes quiet and dies with the process.
        self.stopped.store(true, Ordering::SeqCst);
    }
}

/// Body of the hook thread.
fn run_listener(tx: Sender<RawInputEvent>, stopped: Arc<AtomicBool>) {
    debug!("global input hook starting");
    let mut last_pos = Point::default();

    let result = rdev::listen(move |event| {
        if stopped.load(Ordering::Relaxed) {
            return;
        }
        if let Some(raw) = translate_event(&event.event_type, &mut last_pos, Instant::now()) {
            // Receiver gone means the UI shut down; nothing left to do.
            let _ = tx.send(raw);
        }
    });

    if let Err(e) = result {
        warn!("global input hook unavailable ({e:?}); live input will not be shown");
    }
}

/// Converts one `rdev` event.  `last_pos` carries the pointer position, which
/// `rdev` only reports on motion, over to button events.
pub(crate) fn translate_event(
    event: &EventType,
    last_pos: &mut Point,
    time: Instant,
) -> Option<RawInputEvent> {
    let raw = match event {
        EventType::KeyPress(key) => {
            let (name, scan_code) = key_raw_name(key);
            RawInputEvent::KeyDown { name, scan_code, time }
        }
        EventType::KeyRelease(key) => {
            let (name, scan_code) = key_raw_name(key);
            RawInputEvent::KeyUp { name, scan_code, time }
        }
        EventType::MouseMove { x, y } => {
            let pos = Point::new(x.round() as i32, y.round() as i32);
            *last_pos = pos;
            RawInputEvent::MouseMove { pos, time }
        }
        EventType::ButtonPress(button) => RawInputEvent::MouseButtonDown {
            button: map_button(*button),
            pos: *last_pos,
            time,
        },
        EventType::ButtonRelease(button) => RawInputEvent::MouseButtonUp {
            button: map_button(*button),
            pos: *last_pos,
            time,
        },
        EventType::Wheel { delta_x, delta_y } => {
            if *delta_x == 0 && *delta_y == 0 {
                return None;
            }
            RawInputEvent::MouseWheel {
                delta_x: *delta_x,
                delta_y: *delta_y,
                time,
            }
        }
    };
    Some(raw)
}

fn map_button(button: Button) -> MouseButton {
    match button {
        Button::Left => MouseButton::Left,
        Button::Right => MouseButton::Right,
        Button::Middle => MouseButton::Middle,
        Button::Unknown(n) => MouseButton::Other(n),
    }
}

/// Raw hook-vocabulary name for an `rdev` key.
fn key_raw_name(key: &Key) -> (String, Option<u32>) {
    let name = match key {
        Key::Alt => "alt",
        Key::AltGr => "alt gr",
        Key::ControlLeft => "left ctrl",
        Key::ControlRight => "right ctrl",
        Key::ShiftLeft => "left shift",
        Key::ShiftRight => "right shift",
        Key::MetaLeft => "left windows",
        Key::MetaRight => "right windows",
        Key::Function => "fn",

        Key::Return | Key::KpReturn => "enter",
        Key::Escape => "esc",
        Key::Backspace => "backspace",
        Key::Tab => "tab",
        Key::Space => "space",
        Key::CapsLock => "caps lock",
        Key::NumLock => "num lock",
        Key::ScrollLock => "scroll lock",
        Key::PrintScreen => "print screen",
        Key::Pause => "pause",
        Key::Insert => "insert",
        Key::Delete | Key::KpDelete => "delete",
        Key::Home => "home",
        Key::End => "end",
        Key::PageUp => "page up",
        Key::PageDown => "page down",
        Key::UpArrow => "up",
        Key::DownArrow => "down",
        Key::LeftArrow => "left",
        Key::RightArrow => "right",

        Key::F1 => "f1",
        Key::F2 => "f2",
        Key::F3 => "f3",
        Key::F4 => "f4",
        Key::F5 => "f5",
        Key::F6 => "f6",
        Key::F7 => "f7",
        Key::F8 => "f8",
        Key::F9 => "f9",
        Key::F10 => "f10",
        Key::F11 => "f11",
        Key::F12 => "f12",

        Key::KeyA => "a",
        Key::KeyB => "b",
        Key::KeyC => "c",
        Key::KeyD => "d",
        Key::KeyE => "e",
        Key::KeyF => "f",
        Key::KeyG => "g",
        Key::KeyH => "h",
        Key::KeyI => "i",
        Key::KeyJ => "j",
        Key::KeyK => "k",
        Key::KeyL => "l",
        Key::KeyM => "m",
        Key::KeyN => "n",
        Key::KeyO => "o",
        Key::KeyP => "p",
        Key::KeyQ => "q",
        Key::KeyR => "r",
        Key::KeyS => "s",
        Key::KeyT => "t",
        Key::KeyU => "u",
        Key::KeyV => "v",
        Key::KeyW => "w",
        Key::KeyX => "x",
        Key::KeyY => "y",
        Key::KeyZ => "z",

        Key::Num0 | Key::Kp0 => "0",
        Key::Num1 | Key::Kp1 => "1",
        Key::Num2 | Key::Kp2 => "2",
        Key::Num3 | Key::Kp3 => "3",
        Key::Num4 | Key::Kp4 => "4",
        Key::Num5 | Key::Kp5 => "5",
        Key::Num6 | Key::Kp6 => "6",
        Key::Num7 | Key::Kp7 => "7",
        Key::Num8 | Key::Kp8 => "8",
        Key::Num9 | Key::Kp9 => "9",

        // `-` would be eaten by the separator normalization, so spell it out.
        Key::Minus | Key::KpMinus => "minus",
        Key::KpPlus => "+",
        Key::KpMultiply => "*",
        Key::KpDivide | Key::Slash => "/",
        Key::Equal => "=",
        Key::BackQuote => "`",
        Key::LeftBracket => "[",
        Key::RightBracket => "]",
        Key::SemiColon => ";",
        Key::Quote => "'",
        Key::BackSlash | Key::IntlBackslash => "\\",
        Key::Comma => ",",
        Key::Dot => ".",

        Key::Unknown(code) => return (format!("key {code}"), Some(*code)),
    };
    (name.to_string(), None)
}
