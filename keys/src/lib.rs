#![cfg_attr(not(test), no_std)]

mod key_map;
pub mod matrix;

use defmt::{Format, trace};
use embassy_sync::{blocking_mutex::raw::RawMutex, signal::Signal};

pub use key_map::{KEY_LINES, KeyMap, LogicalKey};

/// One bit per physical key line, set while the key is held
pub type KeyMask = u32;

/// Snapshot handed from the key mailbox to the translator once per tick.
#[derive(Format, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyState {
    pub current: KeyMask,
    pub previous: KeyMask,
    pub changed: KeyMask,
    /// A new mask was published since the last poll
    pub updated: bool,
}

impl KeyState {
    pub fn new(current: KeyMask, previous: KeyMask, updated: bool) -> Self {
        Self {
            current,
            previous,
            changed: current ^ previous,
            updated,
        }
    }

    /// Turns the changed lines into at most one press and one release.
    ///
    /// Lines are examined from bit 0 upwards and a later change overwrites an
    /// earlier one in the same direction, so when several keys move within one
    /// scan only the highest line of each direction is reported. A line bound
    /// to [`LogicalKey::NoKey`] still overwrites. Unbound lines are skipped.
    pub fn events(&self, key_map: &KeyMap) -> KeyEvents {
        let mut events = KeyEvents::default();

        for line in 0..KeyMask::BITS {
            let bit = 1 << line;
            if self.changed & bit == 0 {
                continue;
            }

            let Some(key) = key_map.lookup(line) else {
                continue;
            };

            if self.current & bit != 0 {
                events.pressed = key;
            } else {
                events.released = key;
            }
        }

        events
    }
}

#[derive(Format, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvents {
    pub pressed: LogicalKey,
    pub released: LogicalKey,
}

impl KeyEvents {
    pub fn is_empty(&self) -> bool {
        self.pressed == LogicalKey::NoKey && self.released == LogicalKey::NoKey
    }
}

/// Consumer side of the single-slot key mailbox.
///
/// The scan task overwrites the signal whenever it has a fresh mask. Masks
/// published between two polls are lost, only the latest one is seen.
pub struct KeyReader<'ch, M: RawMutex> {
    signal: &'ch Signal<M, KeyMask>,
    key_map: KeyMap,
    current: KeyMask,
}

impl<'ch, M: RawMutex> KeyReader<'ch, M> {
    pub fn new(signal: &'ch Signal<M, KeyMask>, key_map: KeyMap) -> Self {
        Self {
            signal,
            key_map,
            current: 0,
        }
    }

    pub fn poll(&mut self) -> KeyState {
        let previous = self.current;
        let updated = match self.signal.try_take() {
            Some(mask) => {
                self.current = mask;
                true
            }
            None => false,
        };

        KeyState::new(self.current, previous, updated)
    }

    pub fn read_events(&mut self) -> KeyEvents {
        let state = self.poll();
        let events = state.events(&self.key_map);

        if !events.is_empty() {
            trace!("Key events: {} (changed {:#x})", events, state.changed);
        }

        events
    }
}

#[cfg(test)]
mod test;
