//! UI bridge: connects the capture channel and the LED watch to the egui overlay.
//!
//! The overlay window is an [`eframe::App`] ([`overlay::OverlayApp`]).  egui
//! only repaints when something asks it to, so captured events travel through
//! a small pump thread that forwards each one and wakes the UI:
//!
//! ```text
//! hook thread ──mpsc──► pump thread ──mpsc──► OverlayApp::update
//!                           └─ ctx.request_repaint()
//! ```
//!
//! Everything in this file except [`native_options`] is toolkit-agnostic and
//! unit-tested; the egui drawing code lives in [`overlay`].

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use eframe::egui;
use tracing::debug;

use crate::application::monitor_input::MonitorInputUseCase;
use crate::infrastructure::input_capture::{CaptureError, RawInputEvent};
use crate::infrastructure::storage::config::WindowConfig;

pub mod overlay;

pub use overlay::OverlayApp;

/// Window title, also shown as the overlay's heading.
pub const WINDOW_TITLE: &str = "Input Monitor";

/// Upper bound on events applied per frame so a burst cannot starve drawing.
pub const MAX_EVENTS_PER_FRAME: usize = 512;

/// Starts the `input-monitor-pump` thread.
///
/// Every event received on `events` is forwarded to the returned receiver and
/// followed by a call to `notify`.  The thread ends when either side of the
/// channel hangs up.
///
/// # Errors
///
/// Returns [`CaptureError::ThreadSpawn`] if the OS refuses to create the thread.
pub fn spawn_event_pump<F>(
    events: Receiver<RawInputEvent>,
    notify: F,
) -> Result<Receiver<RawInputEvent>, CaptureError>
where
    F: Fn() + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("input-monitor-pump".to_string())
        .spawn(move || {
            for event in events {
                if tx.send(event).is_err() {
                    break;
                }
                notify();
            }
            debug!("event pump stopped");
        })
        .map_err(CaptureError::ThreadSpawn)?;
    Ok(rx)
}

/// Applies pending events to the use case without blocking.
///
/// Returns the number of events applied and whether the sender is gone.
pub fn drain_events(
    events: &Receiver<RawInputEvent>,
    use_case: &mut MonitorInputUseCase,
    limit: usize,
) -> (usize, bool) {
    let mut applied = 0;
    while applied < limit {
        match events.try_recv() {
            Ok(event) => {
                use_case.handle_event(event);
                applied += 1;
            }
            Err(TryRecvError::Empty) => return (applied, false),
            Err(TryRecvError::Disconnected) => return (applied, true),
        }
    }
    (applied, false)
}

/// How long the UI may sleep before the next clear deadline.
///
/// `None` means no deadline is armed and only new input needs a repaint.
pub fn repaint_delay(deadline: Option<Instant>, now: Instant) -> Option<Duration> {
    deadline.map(|d| d.saturating_duration_since(now))
}

/// Borderless, always-on-top, fixed-size window at the configured position.
pub fn native_options(window: &WindowConfig) -> eframe::NativeOptions {
    let viewport = egui::ViewportBuilder::default()
        .with_title(WINDOW_TITLE)
        .with_inner_size([window.width, window.height])
        .with_position([window.x, window.y])
        .with_decorations(false)
        .with_resizable(false)
        .with_window_level(egui::WindowLevel::AlwaysOnTop);

    eframe::NativeOptions {
        viewport,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inputmon_core::Point;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn move_event(x: i32) -> RawInputEvent {
        RawInputEvent::MouseMove {
            pos: Point::new(x, 0),
            time: Instant::now(),
        }
    }

    #[test]
    fn test_event_pump_forwards_and_notifies() {
        // Arrange
        let (tx, rx) = mpsc::channel();
        let wakes = Arc::new(AtomicUsize::new(0));
        let wakes_clone = Arc::clone(&wakes);
        let forwarded = spawn_event_pump(rx, move || {
            wakes_clone.fetch_add(1, Ordering::SeqCst);
        })
        .expect("spawn pump");

        // Act
        tx.send(move_event(1)).unwrap();
        tx.send(move_event(2)).unwrap();
        drop(tx);
        let received: Vec<RawInputEvent> = forwarded.iter().collect();

        // Assert
        assert_eq!(received.len(), 2);
        assert_eq!(wakes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_drain_events_respects_limit() {
        // Arrange
        let (tx, rx) = mpsc::channel();
        for x in 0..10 {
            tx.send(move_event(x)).unwrap();
        }
        let mut use_case = MonitorInputUseCase::default();

        // Act
        let first = drain_events(&rx, &mut use_case, 4);
        let rest = drain_events(&rx, &mut use_case, MAX_EVENTS_PER_FRAME);

        // Assert
        assert_eq!(first, (4, false));
        assert_eq!(rest, (6, false));
    }

    #[test]
    fn test_drain_events_reports_disconnect() {
        let (tx, rx) = mpsc::channel();
        tx.send(move_event(1)).unwrap();
        drop(tx);

        let mut use_case = MonitorInputUseCase::default();
        assert_eq!(drain_events(&rx, &mut use_case, MAX_EVENTS_PER_FRAME), (1, true));
    }

    #[test]
    fn test_repaint_delay() {
        let now = Instant::now();
        assert_eq!(repaint_delay(None, now), None);
        assert_eq!(
            repaint_delay(Some(now + Duration::from_millis(300)), now),
            Some(Duration::from_millis(300))
        );
        assert_eq!(
            repaint_delay(Some(now), now + Duration::from_millis(5)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_native_options_use_window_config() {
        let options = native_options(&WindowConfig::default());
        assert_eq!(options.viewport.inner_size, Some(egui::vec2(360.0, 200.0)));
        assert_eq!(options.viewport.position, Some(egui::pos2(100.0, 100.0)));
        assert_eq!(options.viewport.decorations, Some(false));
        assert_eq!(options.viewport.window_level, Some(egui::WindowLevel::AlwaysOnTop));
    }
}
