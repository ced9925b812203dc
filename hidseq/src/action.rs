//! Primitive actions a macro is made of.

use embassy_time::Duration;
pub use hidseq_types::keycode::{HidKeyCode, KeyCode};

/// A single step the sequencer asks of the keyboard.
///
/// Actions carry no timing of their own. Every pause is an explicit
/// [`Action::Wait`], so a macro replays the same way every time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action<'a> {
    /// Key down. The key stays held until a [`Action::ReleaseAll`].
    PressKey(KeyCode),
    /// Release every held key, does nothing when no key is held.
    ReleaseAll,
    /// Type each character as its own press/release pair, then tap RETURN.
    TypeText(&'a str),
    /// Pause without touching the keyboard.
    Wait(Duration),
}

/// Errors when building actions
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionError {
    /// A wait was given a negative duration
    InvalidDuration,
}

impl<'a> Action<'a> {
    /// Press a printable character, e.g. the `t` of Ctrl+Alt+T
    pub const fn press_char(c: char) -> Self {
        Action::PressKey(KeyCode::Char(c))
    }

    /// Type a line of text followed by RETURN
    pub const fn type_line(text: &'a str) -> Self {
        Action::TypeText(text)
    }

    /// Wait for `ms` milliseconds
    pub const fn wait_ms(ms: u64) -> Self {
        Action::Wait(Duration::from_millis(ms))
    }

    /// Wait for a signed number of milliseconds, rejecting negative values.
    pub const fn try_wait_ms(ms: i64) -> Result<Self, ActionError> {
        if ms < 0 {
            Err(ActionError::InvalidDuration)
        } else {
            Ok(Action::wait_ms(ms as u64))
        }
    }

    /// Returns `true` for actions that never reach the device
    pub const fn is_timing(&self) -> bool {
        matches!(self, Action::Wait(_))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_negative_wait_is_rejected() {
        assert_eq!(Action::try_wait_ms(-1), Err(ActionError::InvalidDuration));
        assert_eq!(Action::try_wait_ms(i64::MIN), Err(ActionError::InvalidDuration));
    }

    #[test]
    fn test_zero_wait_is_legal() {
        assert_eq!(Action::try_wait_ms(0), Ok(Action::Wait(Duration::from_millis(0))));
        assert_eq!(Action::wait_ms(0), Action::Wait(Duration::from_ticks(0)));
    }

    #[test]
    fn test_positive_wait() {
        assert_eq!(Action::try_wait_ms(1000), Ok(Action::wait_ms(1000)));
        assert!(Action::wait_ms(1000).is_timing());
        assert!(!Action::ReleaseAll.is_timing());
    }

    #[test]
    fn test_constructors() {
        assert_eq!(Action::press_char('t'), Action::PressKey(KeyCode::Char('t')));
        assert_eq!(Action::type_line("exit"), Action::TypeText("exit"));
    }
}
