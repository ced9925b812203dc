use heapless::Vec;

use crate::action::KeyCode;

/// Maximum number of keys the sequencer tracks as held at once.
///
/// A boot keyboard report carries six keys and eight modifiers.
pub const MAX_HELD_KEYS: usize = 16;

/// The keys the sequencer believes the device is holding down.
#[derive(Debug, Default)]
pub(crate) struct KeyState {
    held: Vec<KeyCode, MAX_HELD_KEYS>,
}

impl KeyState {
    pub(crate) fn new() -> Self {
        Self { held: Vec::new() }
    }

    /// Mark a key as held.
    ///
    /// Returns `Ok(false)` if it was already held, `Err(key)` when the set is full.
    pub(crate) fn insert(&mut self, key: KeyCode) -> Result<bool, KeyCode> {
        if self.held.contains(&key) {
            return Ok(false);
        }
        self.held.push(key).map(|_| true)
    }

    pub(crate) fn remove(&mut self, key: KeyCode) {
        self.held.retain(|k| *k != key);
    }

    pub(crate) fn clear(&mut self) {
        self.held.clear();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    pub(crate) fn as_slice(&self) -> &[KeyCode] {
        &self.held
    }
}
