//! The keyboard capability the sequencer drives.

use core::future::Future;

use embassy_usb::driver::EndpointError;

use crate::action::KeyCode;

/// Errors reported by a [`KeyboardDevice`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidError {
    /// The HID endpoint rejected the report
    UsbEndpointError(EndpointError),
    /// The host did not configure the device in time
    NotConfigured,
    /// The key cannot be expressed on the current layout
    UnsupportedKey(KeyCode),
    /// All keycode slots of the report are in use
    Rollover,
}

/// A keyboard that can be driven key by key.
///
/// This is the only I/O boundary of the sequencer. On hardware it is
/// [`crate::usb::UsbKeyboard`]; tests use a recording mock.
pub trait KeyboardDevice {
    /// Bring the device up, wait for the host if needed.
    fn init(&mut self) -> impl Future<Output = Result<(), HidError>>;

    /// Stop the device. Called once after the last action.
    fn shutdown(&mut self) -> impl Future<Output = Result<(), HidError>>;

    /// Key down
    fn press(&mut self, key: KeyCode) -> impl Future<Output = Result<(), HidError>>;

    /// Key up
    fn release(&mut self, key: KeyCode) -> impl Future<Output = Result<(), HidError>>;

    /// Release every held key
    fn release_all(&mut self) -> impl Future<Output = Result<(), HidError>>;
}

impl<T: KeyboardDevice> KeyboardDevice for &mut T {
    fn init(&mut self) -> impl Future<Output = Result<(), HidError>> {
        (**self).init()
    }

    fn shutdown(&mut self) -> impl Future<Output = Result<(), HidError>> {
        (**self).shutdown()
    }

    fn press(&mut self, key: KeyCode) -> impl Future<Output = Result<(), HidError>> {
        (**self).press(key)
    }

    fn release(&mut self, key: KeyCode) -> impl Future<Output = Result<(), HidError>> {
        (**self).release(key)
    }

    fn release_all(&mut self) -> impl Future<Output = Result<(), HidError>> {
        (**self).release_all()
    }
}
