//! X11 lock-key state via the XKB indicator mask.
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Xlib FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments.

use std::os::raw::c_uint;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use inputmon_core::LockState;
use x11::xlib;

use super::{LockStateError, LockStateProbe};

/// `XkbUseCoreKbd` from `XKB.h`: address the core keyboard device.
const XKB_USE_CORE_KBD: c_uint = 0x0100;

static XLIB_THREADS: Once = Once::new();
static XLIB_THREADS_OK: AtomicBool = AtomicBool::new(false);

/// Enables Xlib's thread support.
///
/// The LED poller, the rdev hook and winit each open their own display
/// connection on different threads, so this must run in `main` before any of
/// them start.  Later calls are no-ops.  Returns whether Xlib accepted it.
pub fn init_xlib_threads() -> bool {
    XLIB_THREADS.call_once(|| {
        // SAFETY: Called once, before any other Xlib call in the process.
        let status = unsafe { xlib::XInitThreads() };
        XLIB_THREADS_OK.store(status != 0, Ordering::SeqCst);
    });
    XLIB_THREADS_OK.load(Ordering::SeqCst)
}

/// Holds an open display connection for the lifetime of the poller.
pub struct X11LockStateProbe {
    display: *mut xlib::Display,
}

impl X11LockStateProbe {
    /// Opens the display named by `$DISPLAY`.
    ///
    /// # Errors
    ///
    /// Returns [`LockStateError::NoDisplay`] when no X server is reachable
    /// (e.g. a pure Wayland session without XWayland).
    pub fn open() -> Result<Self, LockStateError> {
        init_xlib_threads();
        // SAFETY: A null name tells Xlib to use $DISPLAY; the result is checked for null.
        let display = unsafe { xlib::XOpenDisplay(ptr::null()) };
        if display.is_null() {
            return Err(LockStateError::NoDisplay);
        }
        Ok(Self { display })
    }
}

impl LockStateProbe for X11LockStateProbe {
    fn probe(&mut self) -> Result<LockState, LockStateError> {
        let mut state: c_uint = 0;
        // SAFETY: `self.display` is a live connection owned by this probe and
        // `state` outlives the call.
        let status = unsafe { xlib::XkbGetIndicatorState(self.display, XKB_USE_CORE_KBD, &mut state) };
        if status != 0 {
            return Err(LockStateError::QueryFailed(status));
        }
        Ok(LockState::from_x11_indicators(state))
    }
}

impl Drop for X11LockStateProbe {
    fn drop(&mut self) {
        // SAFETY: The display was opened in `open()` and is closed exactly once here.
        unsafe {
            xlib::XCloseDisplay(self.display);
        }
    }
}
