//! Input capture infrastructure for the overlay.
//!
//! A global hook (see [`rdev_hook`]) observes every key and mouse event on the
//! desktop, not just those aimed at the overlay window.  Raw events are sent
//! over an `mpsc` channel and consumed on the UI thread, so the hook callback
//! never touches display state directly.
//!
//! # Testability
//!
//! The `InputSource` trait allows tests to inject synthetic events through
//! [`mock::MockInputSource`] without installing OS hooks.

use std::sync::mpsc;
use std::time::Instant;

use inputmon_core::{MouseButton, Point};

pub mod mock;
pub mod rdev_hook;

/// A raw input event produced by the input capture infrastructure.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    /// A key was pressed down (auto-repeat included).
    KeyDown {
        /// Key name in the hook's vocabulary, e.g. `"left ctrl"` or `"a"`.
        name: String,
        /// Platform scan code when the backend exposes one.
        scan_code: Option<u32>,
        /// When the hook saw the event.
        time: Instant,
    },
    /// A key was released.
    KeyUp {
        name: String,
        scan_code: Option<u32>,
        time: Instant,
    },
    /// The pointer moved to an absolute screen position.
    MouseMove { pos: Point, time: Instant },
    /// A mouse button was pressed at `pos`.
    MouseButtonDown {
        button: MouseButton,
        pos: Point,
        time: Instant,
    },
    /// A mouse button was released at `pos`.
    MouseButtonUp {
        button: MouseButton,
        pos: Point,
        time: Instant,
    },
    /// The wheel was scrolled.  Positive `delta_y` is away from the user,
    /// positive `delta_x` is to the right.
    MouseWheel {
        delta_x: i64,
        delta_y: i64,
        time: Instant,
    },
}

/// Error type for input capture operations.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to spawn hook thread: {0}")]
    ThreadSpawn(#[source] std::io::Error),
    #[error("input source already started")]
    AlreadyStarted,
    #[error("capture service has already been stopped")]
    AlreadyStopped,
}

/// Trait abstracting input event production.
///
/// The production implementation is [`rdev_hook::RdevInputSource`]; tests use
/// [`mock::MockInputSource`].
pub trait InputSource: Send {
    /// Starts the input source and returns a receiver for captured events.
    fn start(&self) -> Result<mpsc::Receiver<RawInputEvent>, CaptureError>;
    /// Stops delivering events.
    fn stop(&self);
}
