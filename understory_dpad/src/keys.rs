// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key-state synchronizer: turn direction states into exactly-once key edges.
//!
//! ## Usage
//!
//! 1) Compute a [`DirectionState`] with the [gate](crate::gate::gate).
//! 2) Call [`KeySync::sync`] with it to get the `Down(..)` / `Up(..)` signals that
//!    move the held set to the new state.
//! 3) Deliver the signals to a [`KeySink`](crate::sink::KeySink).
//!
//! ## Minimal example
//!
//! ```
//! use understory_dpad::keys::KeySync;
//! use understory_dpad::types::{DirectionState, Key, KeyEvent};
//!
//! let mut keys = KeySync::new();
//! let right = DirectionState { right: true, ..DirectionState::NONE };
//! assert_eq!(keys.sync(right), vec![KeyEvent::down(Key::Right)]);
//! assert!(keys.sync(right).is_empty());
//! assert_eq!(keys.sync(DirectionState::NONE), vec![KeyEvent::up(Key::Right)]);
//! ```

use alloc::vec::Vec;

use log::trace;

use crate::types::{DirectionState, Key, KeyEvent, KeySet};

/// Authoritative set of held keys.
///
/// Ordering semantics:
/// - Within one [`sync`](Self::sync), releases are emitted before presses.
/// - Each group follows [`Key::DIRECTIONS`] order.
///
/// So a flick from left to right yields `Up(Left)` then `Down(Right)`, never
/// both keys down at once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct KeySync {
    held: KeySet,
}

impl KeySync {
    /// Create a synchronizer with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently held.
    pub fn held(&self) -> KeySet {
        self.held
    }

    /// Returns true if `key` is held.
    pub fn is_held(&self, key: Key) -> bool {
        self.held.has(key)
    }

    /// Bring the directional keys in line with `state` and return the edges.
    ///
    /// Buttons are left alone. Calling again with the same state returns nothing.
    pub fn sync(&mut self, state: DirectionState) -> Vec<KeyEvent> {
        let want = state.keys();
        let have = self.held & KeySet::DIRECTIONS;
        let mut out = Vec::new();
        if want == have {
            return out;
        }
        for k in Key::DIRECTIONS {
            if have.has(k) && !want.has(k) {
                out.extend(self.release(k));
            }
        }
        for k in Key::DIRECTIONS {
            if want.has(k) && !have.has(k) {
                out.extend(self.press(k));
            }
        }
        out
    }

    /// Mark `key` held; returns the down edge, or `None` if it was already held.
    pub fn press(&mut self, key: Key) -> Option<KeyEvent> {
        if self.held.has(key) {
            return None;
        }
        self.held.insert(key.flag());
        trace!("key down {key:?}");
        Some(KeyEvent::down(key))
    }

    /// Mark `key` released; returns the up edge, or `None` if it was not held.
    pub fn release(&mut self, key: Key) -> Option<KeyEvent> {
        if !self.held.has(key) {
            return None;
        }
        self.held.remove(key.flag());
        trace!("key up {key:?}");
        Some(KeyEvent::up(key))
    }

    /// Release everything that is held, returning one up edge per key.
    pub fn release_all(&mut self) -> Vec<KeyEvent> {
        let out: Vec<KeyEvent> = self.held.keys().map(KeyEvent::up).collect();
        if !out.is_empty() {
            trace!("releasing {:?}", self.held);
        }
        self.held = KeySet::empty();
        out
    }
}
