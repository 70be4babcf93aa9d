//! Scripted input source for tests.
//!
//! [`MockInputSource`] hands out an ordinary `mpsc` receiver from `start()`
//! and lets the test push [`RawInputEvent`]s into it, so the capture pipeline
//! can be driven without touching the desktop.

use std::sync::mpsc::{self, Sender};
use std::sync::Mutex;

use super::{CaptureError, InputSource, RawInputEvent};

#[derive(Default)]
struct ScriptState {
    sender: Option<Sender<RawInputEvent>>,
    started: bool,
    stops: u32,
}

/// An [`InputSource`] whose events come from the test itself.
#[derive(Default)]
pub struct MockInputSource {
    state: Mutex<ScriptState>,
}

impl MockInputSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `event` to the receiver returned by `start()`.
    ///
    /// # Panics
    ///
    /// Panics when called before `start()` or after `stop()`.
    pub fn inject_event(&self, event: RawInputEvent) {
        let state = self.state.lock().expect("lock poisoned");
        let sender = state
            .sender
            .as_ref()
            .expect("MockInputSource::inject_event needs a started, unstopped source");
        sender
            .send(event)
            .expect("receiver dropped before the event was injected");
    }

    /// Pushes every event in order.
    pub fn inject_all(&self, events: impl IntoIterator<Item = RawInputEvent>) {
        for event in events {
            self.inject_event(event);
        }
    }

    /// How many times [`InputSource::stop`] ran.
    pub fn stop_count(&self) -> u32 {
        self.state.lock().expect("lock poisoned").stops
    }
}

impl InputSource for MockInputSource {
    fn start(&self) -> Result<mpsc::Receiver<RawInputEvent>, CaptureError> {
        let mut state = self.state.lock().expect("lock poisoned");
        if state.started {
            return Err(CaptureError::AlreadyStarted);
        }
        let (tx, rx) = mpsc::channel();
        state.sender = Some(tx);
        state.started = true;
        Ok(rx)
    }

    fn stop(&self) {
        let mut state = self.state.lock().expect("lock poisoned");
        state.sender = None;
        state.stops += 1;
    }
}
