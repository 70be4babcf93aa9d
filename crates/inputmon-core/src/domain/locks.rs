//! Keyboard lock-key (LED) state.

/// Toggle state of the three lock keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockState {
    pub num: bool,
    pub caps: bool,
    pub scroll: bool,
}

impl LockState {
    /// Decodes an X11 XKB indicator mask for the core keyboard.
    ///
    /// Bit 0 is Caps Lock, bit 1 Num Lock, bit 2 Scroll Lock.
    pub fn from_x11_indicators(mask: u32) -> Self {
        Self {
            caps: mask & 0x01 != 0,
            num: mask & 0x02 != 0,
            scroll: mask & 0x04 != 0,
        }
    }

    /// Builds the state from Win32 `GetKeyState` results.
    ///
    /// The low-order bit of each value is the toggle flag.
    pub fn from_win32_key_states(num: i16, caps: i16, scroll: i16) -> Self {
        Self {
            num: num & 0x0001 != 0,
            caps: caps & 0x0001 != 0,
            scroll: scroll & 0x0001 != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x11_mask_bits() {
        assert_eq!(LockState::from_x11_indicators(0), LockState::default());
        assert_eq!(
            LockState::from_x11_indicators(0x01),
            LockState { caps: true, ..Default::default() }
        );
        assert_eq!(
            LockState::from_x11_indicators(0x02),
            LockState { num: true, ..Default::default() }
        );
        assert_eq!(
            LockState::from_x11_indicators(0x07),
            LockState { num: true, caps: true, scroll: true }
        );
    }

    #[test]
    fn test_x11_mask_ignores_higher_indicators() {
        assert_eq!(LockState::from_x11_indicators(0xF8), LockState::default());
    }

    #[test]
    fn test_win32_toggle_bit_only() {
        // High bit set means "currently pressed", not toggled.
        let pressed_not_toggled = i16::MIN;
        let state = LockState::from_win32_key_states(1, pressed_not_toggled, pressed_not_toggled | 1);
        assert_eq!(state, LockState { num: true, caps: false, scroll: true });
    }
}
