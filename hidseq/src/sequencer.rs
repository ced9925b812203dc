//! Plays a [`Macro`] against a [`KeyboardDevice`].
//!
//! The sequencer owns the device and the set of held keys. Whatever happens
//! while a macro runs, every held key is released before `run` returns: a
//! modifier left down would corrupt everything the host receives afterwards.

use embassy_time::Duration;
use embedded_hal_async::delay::DelayNs;

use crate::action::{Action, KeyCode};
use crate::device::{HidError, KeyboardDevice};
use crate::key_state::KeyState;
use crate::keyboard_macro::Macro;

/// Errors when running a macro
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerError {
    /// The device failed to come up, no action was executed
    DeviceInit(HidError),
    /// The device failed while executing an action
    DeviceIo(HidError),
    /// The macro holds more keys at once than can be tracked
    KeyStateOverflow,
    /// The sequencer has already run a macro
    AlreadyFinished,
}

/// Lifecycle of a [`Sequencer`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerState {
    Idle,
    Running,
    Completed,
    Aborted,
}

/// Executes exactly one macro.
///
/// Actions run strictly in order. There is no retry: the host is not
/// observable, and replaying part of a macro could run a shell command twice.
pub struct Sequencer<K: KeyboardDevice, D: DelayNs> {
    device: K,
    delay: D,
    key_state: KeyState,
    state: SequencerState,
}

impl<K: KeyboardDevice, D: DelayNs> Sequencer<K, D> {
    pub fn new(device: K, delay: D) -> Self {
        Self {
            device,
            delay,
            key_state: KeyState::new(),
            state: SequencerState::Idle,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Keys currently considered held
    pub fn held_keys(&self) -> &[KeyCode] {
        self.key_state.as_slice()
    }

    /// Give back the device and the delay
    pub fn into_inner(self) -> (K, D) {
        (self.device, self.delay)
    }

    /// Run the macro to completion.
    ///
    /// On error the remaining actions are skipped, held keys are released and
    /// the device is shut down before the first error is returned.
    pub async fn run(&mut self, keyboard_macro: &Macro<'_>) -> Result<(), SequencerError> {
        if self.state != SequencerState::Idle {
            error!("Sequencer already ran, state: {:?}", self.state);
            return Err(SequencerError::AlreadyFinished);
        }
        self.state = SequencerState::Running;
        info!(
            "Running macro {:?} with {} actions",
            keyboard_macro.name(),
            keyboard_macro.len()
        );

        if let Err(e) = self.device.init().await {
            error!("Keyboard init failed: {:?}", e);
            self.state = SequencerState::Aborted;
            return Err(SequencerError::DeviceInit(e));
        }

        let result = self.execute(keyboard_macro).await;

        let released = if self.key_state.is_empty() {
            Ok(())
        } else {
            warn!("Keys still held after macro: {:?}, releasing", self.key_state.as_slice());
            self.force_release_all().await
        };
        let shutdown = self.device.shutdown().await.map_err(SequencerError::DeviceIo);

        match result {
            Ok(()) => {
                let finished = released.and(shutdown);
                self.state = match finished {
                    Ok(()) => SequencerState::Completed,
                    Err(_) => SequencerState::Aborted,
                };
                if let Err(e) = finished {
                    error!("Macro {:?} failed while finishing: {:?}", keyboard_macro.name(), e);
                } else {
                    info!("Macro {:?} completed", keyboard_macro.name());
                }
                finished
            }
            Err(e) => {
                if let Err(release_error) = released {
                    error!("Release after abort failed: {:?}", release_error);
                }
                if let Err(shutdown_error) = shutdown {
                    error!("Shutdown after abort failed: {:?}", shutdown_error);
                }
                error!("Macro {:?} aborted: {:?}", keyboard_macro.name(), e);
                self.state = SequencerState::Aborted;
                Err(e)
            }
        }
    }

    async fn execute(&mut self, keyboard_macro: &Macro<'_>) -> Result<(), SequencerError> {
        for (index, action) in keyboard_macro.actions().enumerate() {
            if action.is_timing() {
                trace!("Action #{}: {:?}", index, action);
            } else {
                debug!("Action #{}: {:?}", index, action);
            }
            match *action {
                Action::PressKey(key) => self.press(key).await?,
                Action::ReleaseAll => self.release_all().await?,
                Action::TypeText(text) => self.type_line(text).await?,
                Action::Wait(duration) => self.wait(duration).await,
            }
        }
        Ok(())
    }

    async fn press(&mut self, key: KeyCode) -> Result<(), SequencerError> {
        // The key is recorded before the device call, so that a half-sent press
        // is still covered by the final release. A key already held is pressed
        // again on the device, the key state stays as is.
        match self.key_state.insert(key) {
            Ok(true) => {}
            Ok(false) => trace!("{:?} is already held", key),
            Err(_) => return Err(SequencerError::KeyStateOverflow),
        }
        self.device.press(key).await.map_err(SequencerError::DeviceIo)
    }

    async fn release(&mut self, key: KeyCode) -> Result<(), SequencerError> {
        self.device.release(key).await.map_err(SequencerError::DeviceIo)?;
        self.key_state.remove(key);
        Ok(())
    }

    async fn tap(&mut self, key: KeyCode) -> Result<(), SequencerError> {
        self.press(key).await?;
        self.release(key).await
    }

    async fn release_all(&mut self) -> Result<(), SequencerError> {
        self.device.release_all().await.map_err(SequencerError::DeviceIo)?;
        self.key_state.clear();
        Ok(())
    }

    /// The final release: the key state is cleared even if the device fails,
    /// there is nothing left to try after it.
    async fn force_release_all(&mut self) -> Result<(), SequencerError> {
        let result = self.device.release_all().await.map_err(SequencerError::DeviceIo);
        self.key_state.clear();
        result
    }

    async fn type_line(&mut self, text: &str) -> Result<(), SequencerError> {
        for c in text.chars() {
            self.tap(KeyCode::Char(c)).await?;
        }
        self.tap(KeyCode::RETURN).await
    }

    /// Wait in microseconds, split into several delays when it overflows a `u32`
    async fn wait(&mut self, duration: Duration) {
        let mut remaining = duration.as_micros();
        trace!("Waiting {}us", remaining);
        loop {
            let chunk = u32::try_from(remaining).unwrap_or(u32::MAX);
            self.delay.delay_us(chunk).await;
            remaining -= u64::from(chunk);
            if remaining == 0 {
                break;
            }
        }
    }
}

/// Run one macro on a fresh [`Sequencer`].
///
/// Pass `&mut device` to keep using the device afterwards.
pub async fn run<K: KeyboardDevice, D: DelayNs>(
    keyboard_macro: &Macro<'_>,
    device: K,
    delay: D,
) -> Result<(), SequencerError> {
    Sequencer::new(device, delay).run(keyboard_macro).await
}
