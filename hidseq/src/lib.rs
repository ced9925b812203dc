//! # hidseq
//!
//! Firmware building blocks for a USB keyboard that types a fixed sequence of
//! keystrokes into the host it is plugged into.
//!
//! A [`Macro`] is an ordered list of [`Action`]s. A [`Sequencer`] plays it
//! against any [`KeyboardDevice`](device::KeyboardDevice): the USB boot
//! keyboard in [`usb`] on hardware, a mock in tests. Every pause is an explicit
//! wait; the device never observes the host.
//!
//! ```ignore
//! const TIMING: TimingConfig = TimingConfig::new();
//! const HELLO: Macro<'static> = host_macro!("hello", [
//!     settle(TIMING),
//!     open_terminal(TIMING),
//!     run_command("echo hello", TIMING),
//!     close_terminal(TIMING),
//! ]);
//!
//! let mut builder = new_usb_builder(driver, UsbConfig::new());
//! let writer = add_keyboard_writer(&mut builder);
//! let mut usb = builder.build();
//! let keyboard = UsbKeyboard::new(writer, &UsbConfig::new());
//! join(usb.run(), run(&HELLO, keyboard, embassy_time::Delay)).await;
//! ```
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

pub mod action;
pub mod config;
pub mod device;
mod hid_state;
pub mod key_state;
pub mod keyboard_macro;
pub mod sequencer;
pub mod steps;
pub mod usb;

pub use action::{Action, HidKeyCode, KeyCode};
pub use config::{TimingConfig, UsbConfig};
pub use device::{HidError, KeyboardDevice};
pub use keyboard_macro::Macro;
pub use sequencer::{Sequencer, SequencerError, SequencerState, run};
pub use usb::{UsbKeyboard, add_keyboard_writer, new_usb_builder};
