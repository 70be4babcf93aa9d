//! Integration tests for the capture-to-display pipeline.
//!
//! These tests exercise the overlay end-to-end without a window:
//! `MockInputSource` → event pump → `drain_events` → `MonitorInputUseCase`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use inputmon_core::{IconKind, MouseButton, Point, TextStyle};
use inputmon_overlay::application::monitor_input::{MonitorInputUseCase, MonitorSettings};
use inputmon_overlay::infrastructure::input_capture::mock::MockInputSource;
use inputmon_overlay::infrastructure::input_capture::{CaptureError, InputSource, RawInputEvent};
use inputmon_overlay::infrastructure::storage::config::AppConfig;
use inputmon_overlay::infrastructure::ui_bridge::{
    drain_events, spawn_event_pump, MAX_EVENTS_PER_FRAME,
};

fn key(name: &str, down: bool, time: Instant) -> RawInputEvent {
    if down {
        RawInputEvent::KeyDown {
            name: name.to_string(),
            scan_code: None,
            time,
        }
    } else {
        RawInputEvent::KeyUp {
            name: name.to_string(),
            scan_code: None,
            time,
        }
    }
}

/// Drains until `expected` events have been applied or the timeout expires.
fn drain_n(
    rx: &std::sync::mpsc::Receiver<RawInputEvent>,
    use_case: &mut MonitorInputUseCase,
    expected: usize,
) -> usize {
    let deadline = Instant::now() + Duration::from_secs(2);
    let mut total = 0;
    while total < expected && Instant::now() < deadline {
        let (applied, _) = drain_events(rx, use_case, MAX_EVENTS_PER_FRAME);
        total += applied;
        if applied == 0 {
            std::thread::sleep(Duration::from_millis(1));
        }
    }
    total
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_key_combo_flows_from_source_to_view() {
    // Arrange
    let source = MockInputSource::new();
    let raw = source.start().expect("start");
    let wakes = Arc::new(AtomicUsize::new(0));
    let wakes_clone = Arc::clone(&wakes);
    let events = spawn_event_pump(raw, move || {
        wakes_clone.fetch_add(1, Ordering::SeqCst);
    })
    .expect("pump");
    let mut use_case = MonitorInputUseCase::default();
    let t0 = Instant::now();

    // Act
    source.inject_event(key("right_ctrl", true, t0));
    source.inject_event(key("left shift", true, t0 + Duration::from_millis(5)));
    source.inject_event(key("s", true, t0 + Duration::from_millis(10)));
    let applied = drain_n(&events, &mut use_case, 3);

    // Assert
    assert_eq!(applied, 3);
    assert!(wakes.load(Ordering::SeqCst) >= 1);
    let view = use_case.view();
    assert_eq!(view.content.expect("content").text, "Ctrl + Shift + S");
}

#[test]
fn test_drag_selection_end_to_end() {
    // Arrange
    let source = MockInputSource::new();
    let events = spawn_event_pump(source.start().expect("start"), || {}).expect("pump");
    let mut use_case = MonitorInputUseCase::default();
    let t0 = Instant::now();

    // Act
    source.inject_event(RawInputEvent::MouseButtonDown {
        button: MouseButton::Left,
        pos: Point::new(10, 20),
        time: t0,
    });
    source.inject_event(RawInputEvent::MouseMove {
        pos: Point::new(310, 220),
        time: t0 + Duration::from_millis(100),
    });
    source.inject_event(RawInputEvent::MouseButtonUp {
        button: MouseButton::Left,
        pos: Point::new(310, 220),
        time: t0 + Duration::from_millis(200),
    });
    drain_n(&events, &mut use_case, 3);

    // Assert
    let view = use_case.view();
    let content = view.content.expect("content");
    assert_eq!(content.text, "Selected Area: 300 x 200");
    assert_eq!(content.style, TextStyle::Selection);
    assert_eq!(view.selection_line, "Selection: 300 x 200");
}

#[test]
fn test_stop_closes_the_pipeline() {
    // Arrange
    let source = MockInputSource::new();
    let events = spawn_event_pump(source.start().expect("start"), || {}).expect("pump");
    let mut use_case = MonitorInputUseCase::default();

    // Act
    source.stop();

    // Assert: the pump notices the closed source and hangs up too.
    let deadline = Instant::now() + Duration::from_secs(2);
    let mut disconnected = false;
    while !disconnected && Instant::now() < deadline {
        disconnected = drain_events(&events, &mut use_case, MAX_EVENTS_PER_FRAME).1;
        std::thread::sleep(Duration::from_millis(1));
    }
    assert!(disconnected);
    assert_eq!(source.stop_count(), 1);
}

#[test]
fn test_second_start_is_rejected() {
    let source = MockInputSource::new();
    let _rx = source.start().expect("first start");
    assert!(matches!(source.start(), Err(CaptureError::AlreadyStarted)));
}

#[test]
fn test_configured_timing_drives_clear_and_double_click() {
    // Arrange
    let config: AppConfig = toml::from_str(
        "[timing]\nreset_delay_ms = 500\ndouble_click_ms = 200\n",
    )
    .expect("config");
    let mut use_case = MonitorInputUseCase::new(MonitorSettings::from(&config));
    let t0 = Instant::now();
    let click = |at: Instant| RawInputEvent::MouseButtonDown {
        button: MouseButton::Middle,
        pos: Point::new(0, 0),
        time: at,
    };

    // Act
    use_case.handle_event(click(t0));
    use_case.handle_event(click(t0 + Duration::from_millis(250)));
    let second = use_case.view().content.expect("content");

    // Assert
    assert_eq!(second.text, "Middle Click");
    assert_eq!(second.icon, Some(IconKind::MouseMiddle));
    assert!(!use_case.tick(t0 + Duration::from_millis(700)));
    assert!(use_case.tick(t0 + Duration::from_millis(750)));
    assert_eq!(use_case.view().content, None);
}
