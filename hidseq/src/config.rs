//! Compile-time configuration.
//!
//! Nothing here is read at runtime: boards declare `const` values and the
//! macros are built from them.

use embassy_time::Duration;

/// How long each kind of pause in a host macro lasts.
///
/// The device cannot see what the host does, so every value is an estimate of
/// how long the host needs for that step. Tune them per host, or use
/// [`TimingConfig::immediate`] in tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Time for the host to enumerate the keyboard after plug-in
    pub enumeration_settle: Duration,
    /// How long a chord stays held before it is released
    pub chord_hold: Duration,
    /// Time for a new terminal window to open and take focus
    pub terminal_open: Duration,
    /// Time for the desktop to apply an input source switch
    pub layout_switch: Duration,
    /// Pause right after a command line is submitted
    pub command_typed: Duration,
    /// Time for a foreground command to finish
    pub command_complete: Duration,
    /// Time for a backgrounded command to detach from the shell
    pub background_detach: Duration,
    /// Pause after `exit` is typed, before closing the window
    pub exit_typed: Duration,
}

impl TimingConfig {
    pub const fn new() -> Self {
        Self {
            enumeration_settle: Duration::from_millis(3000),
            chord_hold: Duration::from_millis(100),
            terminal_open: Duration::from_millis(1000),
            layout_switch: Duration::from_millis(300),
            command_typed: Duration::from_millis(500),
            command_complete: Duration::from_millis(1000),
            background_detach: Duration::from_millis(200),
            exit_typed: Duration::from_millis(200),
        }
    }

    /// All waits set to zero
    pub const fn immediate() -> Self {
        Self {
            enumeration_settle: Duration::from_ticks(0),
            chord_hold: Duration::from_ticks(0),
            terminal_open: Duration::from_ticks(0),
            layout_switch: Duration::from_ticks(0),
            command_typed: Duration::from_ticks(0),
            command_complete: Duration::from_ticks(0),
            background_detach: Duration::from_ticks(0),
            exit_typed: Duration::from_ticks(0),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// USB identity of the keyboard
#[derive(Clone, Copy, Debug)]
pub struct UsbConfig<'a> {
    /// Vender id
    pub vid: u16,
    /// Product id
    pub pid: u16,
    /// Manufacturer
    pub manufacturer: &'a str,
    /// Product name
    pub product_name: &'a str,
    /// Serial number
    pub serial_number: &'a str,
    /// How long `init` waits for the host to configure the device
    pub enumeration_timeout: Duration,
}

impl UsbConfig<'_> {
    pub const fn new() -> Self {
        Self {
            vid: 0x1209,
            pid: 0x0001,
            manufacturer: "hidseq",
            product_name: "hidseq Keyboard",
            serial_number: "hidseq:000001",
            enumeration_timeout: Duration::from_secs(10),
        }
    }
}

impl Default for UsbConfig<'_> {
    fn default() -> Self {
        Self::new()
    }
}
