//! Building blocks for host automation macros.
//!
//! Each builder returns the actions of one step as a fixed-size array, so
//! steps can be evaluated in `const` context and joined into a [`Macro`] with
//! [`host_macro!`]:
//!
//! ```ignore
//! const TIMING: TimingConfig = TimingConfig::new();
//! const HELLO: Macro<'static> = host_macro!("hello", [
//!     settle(TIMING),
//!     open_terminal(TIMING),
//!     run_command("echo hello", TIMING),
//!     close_terminal(TIMING),
//! ]);
//! ```
//!
//! The shortcuts are the GNOME defaults: Ctrl+Alt+T opens a terminal,
//! Super+Space cycles the input source, Alt+F4 closes the focused window.
//!
//! [`Macro`]: crate::keyboard_macro::Macro

use crate::action::{Action, KeyCode};
use crate::config::TimingConfig;

/// Join steps into a `const` [`Macro`](crate::keyboard_macro::Macro)
#[macro_export]
macro_rules! host_macro {
    ($name:expr, [$($step:expr),* $(,)?]) => {
        $crate::keyboard_macro::Macro::new($name, &[$(&$step),*])
    };
}

/// Give the host time to enumerate the keyboard
pub const fn settle(timing: TimingConfig) -> [Action<'static>; 1] {
    [Action::Wait(timing.enumeration_settle)]
}

/// Ctrl+Alt+T, then wait for the terminal to take focus
pub const fn open_terminal(timing: TimingConfig) -> [Action<'static>; 6] {
    [
        Action::PressKey(KeyCode::LEFT_CTRL),
        Action::PressKey(KeyCode::LEFT_ALT),
        Action::press_char('t'),
        Action::Wait(timing.chord_hold),
        Action::ReleaseAll,
        Action::Wait(timing.terminal_open),
    ]
}

/// Super+Space, switching to the next input source.
///
/// The host must have the en-US layout among its input sources for the
/// following text to come out right.
pub const fn switch_layout(timing: TimingConfig) -> [Action<'static>; 5] {
    [
        Action::PressKey(KeyCode::LEFT_GUI),
        Action::press_char(' '),
        Action::Wait(timing.chord_hold),
        Action::ReleaseAll,
        Action::Wait(timing.layout_switch),
    ]
}

/// Super+Space back to the previous input source, with no wait after the
/// release: the next step types into the shell right away.
pub const fn restore_layout(timing: TimingConfig) -> [Action<'static>; 4] {
    [
        Action::PressKey(KeyCode::LEFT_GUI),
        Action::press_char(' '),
        Action::Wait(timing.chord_hold),
        Action::ReleaseAll,
    ]
}

/// Type a command line and wait for it to finish
pub const fn run_command(command: &str, timing: TimingConfig) -> [Action<'_>; 3] {
    [
        Action::TypeText(command),
        Action::Wait(timing.command_typed),
        Action::Wait(timing.command_complete),
    ]
}

/// Type a command line that puts itself in the background, e.g. ending in `& disown`
pub const fn run_detached(command: &str, timing: TimingConfig) -> [Action<'_>; 2] {
    [Action::TypeText(command), Action::Wait(timing.background_detach)]
}

/// Leave the shell. With a default terminal profile this closes the window too.
pub const fn exit_shell(timing: TimingConfig) -> [Action<'static>; 2] {
    [Action::type_line("exit"), Action::Wait(timing.exit_typed)]
}

/// Alt+F4, closing the window if it is still open
pub const fn close_terminal(timing: TimingConfig) -> [Action<'static>; 4] {
    [
        Action::PressKey(KeyCode::LEFT_ALT),
        Action::PressKey(KeyCode::F4),
        Action::Wait(timing.chord_hold),
        Action::ReleaseAll,
    ]
}
