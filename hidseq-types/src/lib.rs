//! # hidseq Types
//!
//! This crate provides the fundamental type definitions used by the hidseq
//! keystroke sequencer.
//!
//! ## Modules
//!
//! - [`keycode`] - HID usage codes, the [`keycode::KeyCode`] used by macros and the en-US ASCII mapping
//! - [`modifier`] - The modifier byte of a keyboard report
//!
//! Everything here is `no_std` and allocation free, so the same types are
//! shared by the firmware and by host-side tests.

#![no_std]

pub mod keycode;
pub mod modifier;
