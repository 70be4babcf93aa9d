//! Win32 lock-key state via `GetKeyState`.

use inputmon_core::LockState;
use windows::Win32::UI::Input::KeyboardAndMouse::{GetKeyState, VK_CAPITAL, VK_NUMLOCK, VK_SCROLL};

use super::{LockStateError, LockStateProbe};

/// Stateless probe; `GetKeyState` needs no setup.
#[derive(Debug, Default)]
pub struct Win32LockStateProbe;

impl LockStateProbe for Win32LockStateProbe {
    fn probe(&mut self) -> Result<LockState, LockStateError> {
        // SAFETY: GetKeyState only reads the calling thread's keyboard state.
        let (num, caps, scroll) = unsafe {
            (
                GetKeyState(VK_NUMLOCK.0 as i32),
                GetKeyState(VK_CAPITAL.0 as i32),
                GetKeyState(VK_SCROLL.0 as i32),
            )
        };
        Ok(LockState::from_win32_key_states(num, caps, scroll))
    }
}
