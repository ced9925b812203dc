//! Turns key presses into the content of a keyboard report.

use hidseq_types::keycode::{HidKeyCode, KeyCode};
use hidseq_types::modifier::HidModifiers;

use crate::device::HidError;
use crate::usb::descriptor::KeyboardReport;

/// Keys currently held, as they appear in the next keyboard report.
///
/// Characters that need Shift hold an implicit Left Shift for as long as any
/// of them is down, independently of an explicitly pressed Shift.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ReportState {
    modifiers: HidModifiers,
    keycodes: [u8; 6],
    shifted_keys: u8,
}

impl ReportState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn press(&mut self, key: KeyCode) -> Result<(), HidError> {
        let (code, shifted) = key.resolve().ok_or(HidError::UnsupportedKey(key))?;
        if code.is_modifier() {
            self.modifiers = self.modifiers | code.to_hid_modifiers();
            return Ok(());
        }
        if code.is_reserved() {
            return Err(HidError::UnsupportedKey(key));
        }
        let code = code as u8;
        if !self.keycodes.contains(&code) {
            let slot = self.keycodes.iter_mut().find(|k| **k == 0).ok_or(HidError::Rollover)?;
            *slot = code;
            if shifted {
                self.shifted_keys += 1;
            }
        }
        Ok(())
    }

    pub(crate) fn release(&mut self, key: KeyCode) -> Result<(), HidError> {
        let (code, shifted) = key.resolve().ok_or(HidError::UnsupportedKey(key))?;
        if code.is_modifier() {
            self.modifiers = self.modifiers & !code.to_hid_modifiers();
            return Ok(());
        }
        if let Some(slot) = self.keycodes.iter_mut().find(|k| **k == code as u8) {
            *slot = 0;
            if shifted {
                self.shifted_keys = self.shifted_keys.saturating_sub(1);
            }
        }
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.modifiers.is_empty() && self.keycodes.iter().all(|k| *k == 0)
    }

    pub(crate) fn report(&self) -> KeyboardReport {
        let implicit_shift = if self.shifted_keys > 0 {
            HidKeyCode::LShift.to_hid_modifiers()
        } else {
            HidModifiers::new()
        };
        KeyboardReport {
            modifier: (self.modifiers | implicit_shift).into_bits(),
            reserved: 0,
            leds: 0,
            keycodes: self.keycodes,
        }
    }
}
