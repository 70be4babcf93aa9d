//! Lock-key LED state (Num/Caps/Scroll Lock).
//!
//! A [`LockStateProbe`] asks the OS for the current toggle state.  The
//! poller thread started by [`spawn_lock_poller`] calls it on a fixed interval
//! and publishes changes on a `tokio::sync::watch` channel that the overlay
//! reads every frame.
//!
//! Probing is best effort: errors are logged at debug level and the last
//! known state stays published.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use inputmon_core::LockState;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info};

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "windows")]
pub mod windows;

/// Error type for lock-state probing.
#[derive(Debug, Error)]
pub enum LockStateError {
    #[error("cannot open X display")]
    NoDisplay,
    #[error("indicator query failed with status {0}")]
    QueryFailed(i32),
}

/// Reads the current lock-key state from the OS.
#[cfg_attr(test, mockall::automock)]
pub trait LockStateProbe {
    fn probe(&mut self) -> Result<LockState, LockStateError>;
}

/// Probe for platforms without a lock-state API; everything reads as off.
#[derive(Debug, Default)]
pub struct NullLockStateProbe;

impl LockStateProbe for NullLockStateProbe {
    fn probe(&mut self) -> Result<LockState, LockStateError> {
        Ok(LockState::default())
    }
}

/// Builds the probe for the current platform.
///
/// Must be called on the thread that will use the probe; the X11 probe holds
/// a display connection that cannot cross threads.
pub fn platform_probe() -> Result<Box<dyn LockStateProbe>, LockStateError> {
    #[cfg(target_os = "linux")]
    {
        Ok(Box::new(linux::X11LockStateProbe::open()?))
    }

    #[cfg(target_os = "windows")]
    {
        Ok(Box::new(windows::Win32LockStateProbe))
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        Ok(Box::new(NullLockStateProbe))
    }
}

/// Probes once and publishes the result if it differs from the current value.
///
/// Returns `true` when a new state was published.
pub fn poll_once(probe: &mut dyn LockStateProbe, tx: &watch::Sender<LockState>) -> bool {
    match probe.probe() {
        Ok(state) => tx.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        }),
        Err(e) => {
            debug!("lock state probe failed: {e}");
            false
        }
    }
}

/// Starts the `input-monitor-leds` polling thread.
///
/// The thread exits when `running` is cleared or every receiver is dropped.
/// If the platform probe cannot be created the channel simply keeps its
/// initial all-off value.
pub fn spawn_lock_poller(interval: Duration, running: Arc<AtomicBool>) -> watch::Receiver<LockState> {
    let (tx, rx) = watch::channel(LockState::default());

    let spawned = thread::Builder::new()
        .name("input-monitor-leds".to_string())
        .spawn(move || {
            let mut probe = match platform_probe() {
                Ok(p) => p,
                Err(e) => {
                    info!("lock-key LEDs disabled: {e}");
                    return;
                }
            };
            while running.load(Ordering::Relaxed) && !tx.is_closed() {
                poll_once(probe.as_mut(), &tx);
                thread::sleep(interval);
            }
            debug!("lock state poller stopped");
        });

    if let Err(e) = spawned {
        info!("lock-key LEDs disabled: cannot spawn poller thread: {e}");
    }
    rx
}
