// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the pad: logical keys, key sets, key events, and direction states.
//!
//! ## Overview
//!
//! These types describe what the engine produces and what it remembers.
//! A [`DirectionState`] is computed by the [gate](crate::gate) every tick, the
//! [`KeySync`](crate::keys::KeySync) diffs it against its held [`KeySet`], and
//! the resulting [`KeyEvent`]s are handed to a [`KeySink`](crate::sink::KeySink).

/// Opaque identifier of a pointer/touch contact, as reported by the host toolkit.
pub type PointerId = u64;

/// A logical key the pad can press on the embedded target.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Action button, delivered as the space bar.
    Action,
    /// Enter/confirm button.
    Enter,
}

impl Key {
    /// The four directional keys, in emission order.
    pub const DIRECTIONS: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];

    /// Every logical key, in emission order.
    pub const ALL: [Self; 6] = [
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Down,
        Self::Action,
        Self::Enter,
    ];

    /// Symbolic key value (what a keyboard event reports as `key`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "ArrowLeft",
            Self::Right => "ArrowRight",
            Self::Up => "ArrowUp",
            Self::Down => "ArrowDown",
            Self::Action => " ",
            Self::Enter => "Enter",
        }
    }

    /// Physical key code (what a keyboard event reports as `code`).
    pub const fn code(self) -> &'static str {
        match self {
            Self::Left => "ArrowLeft",
            Self::Right => "ArrowRight",
            Self::Up => "ArrowUp",
            Self::Down => "ArrowDown",
            Self::Action => "Space",
            Self::Enter => "Enter",
        }
    }

    /// Legacy numeric key code (`keyCode`/`which`), still read by older input handlers.
    pub const fn legacy_code(self) -> u16 {
        match self {
            Self::Left => 37,
            Self::Up => 38,
            Self::Right => 39,
            Self::Down => 40,
            Self::Action => 32,
            Self::Enter => 13,
        }
    }

    /// Returns true for the four arrow keys driven by the gate.
    pub const fn is_direction(self) -> bool {
        matches!(self, Self::Left | Self::Right | Self::Up | Self::Down)
    }

    /// The single-key [`KeySet`] for this key.
    pub const fn flag(self) -> KeySet {
        match self {
            Self::Left => KeySet::LEFT,
            Self::Right => KeySet::RIGHT,
            Self::Up => KeySet::UP,
            Self::Down => KeySet::DOWN,
            Self::Action => KeySet::ACTION,
            Self::Enter => KeySet::ENTER,
        }
    }
}

bitflags::bitflags! {
    /// A set of logical keys, used for the keys currently held down.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeySet: u8 {
        /// [`Key::Left`].
        const LEFT   = 0b0000_0001;
        /// [`Key::Right`].
        const RIGHT  = 0b0000_0010;
        /// [`Key::Up`].
        const UP     = 0b0000_0100;
        /// [`Key::Down`].
        const DOWN   = 0b0000_1000;
        /// [`Key::Action`].
        const ACTION = 0b0001_0000;
        /// [`Key::Enter`].
        const ENTER  = 0b0010_0000;
        /// All four directional keys.
        const DIRECTIONS = Self::LEFT.bits() | Self::RIGHT.bits() | Self::UP.bits() | Self::DOWN.bits();
        /// The non-directional buttons.
        const BUTTONS = Self::ACTION.bits() | Self::ENTER.bits();
    }
}

impl KeySet {
    /// Returns true if `key` is in the set.
    pub fn has(self, key: Key) -> bool {
        self.contains(key.flag())
    }

    /// Iterate the keys in the set in [`Key::ALL`] order.
    pub fn keys(self) -> impl Iterator<Item = Key> {
        Key::ALL.into_iter().filter(move |k| self.has(*k))
    }
}

/// Edge direction of a key signal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum KeyEventKind {
    /// The key went down.
    Down,
    /// The key went up.
    Up,
}

/// A single synthetic key signal for the embedded target.
///
/// Produced by [`KeySync`](crate::keys::KeySync) only on real transitions, so a
/// sink never sees two downs for the same key without an up in between.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct KeyEvent {
    /// Down or up.
    pub kind: KeyEventKind,
    /// Which key.
    pub key: Key,
}

impl KeyEvent {
    /// A key-down signal.
    pub const fn down(key: Key) -> Self {
        Self {
            kind: KeyEventKind::Down,
            key,
        }
    }

    /// A key-up signal.
    pub const fn up(key: Key) -> Self {
        Self {
            kind: KeyEventKind::Up,
            key,
        }
    }
}

/// Four independent directional booleans computed by the [gate](crate::gate::gate).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DirectionState {
    /// Left is active.
    pub left: bool,
    /// Right is active.
    pub right: bool,
    /// Up is active.
    pub up: bool,
    /// Down is active.
    pub down: bool,
}

impl DirectionState {
    /// No direction active.
    pub const NONE: Self = Self {
        left: false,
        right: false,
        up: false,
        down: false,
    };

    /// Returns whether the given key is active; buttons are never part of a direction state.
    pub fn is_pressed(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Action | Key::Enter => false,
        }
    }

    /// The directional keys this state implies.
    pub fn keys(&self) -> KeySet {
        let mut set = KeySet::empty();
        set.set(KeySet::LEFT, self.left);
        set.set(KeySet::RIGHT, self.right);
        set.set(KeySet::UP, self.up);
        set.set(KeySet::DOWN, self.down);
        set
    }

    /// Returns true if no direction is active.
    pub fn is_neutral(&self) -> bool {
        *self == Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn legacy_codes_match_keyboard_layout() {
        assert_eq!(Key::Left.legacy_code(), 37);
        assert_eq!(Key::Up.legacy_code(), 38);
        assert_eq!(Key::Right.legacy_code(), 39);
        assert_eq!(Key::Down.legacy_code(), 40);
        assert_eq!(Key::Action.legacy_code(), 32);
        assert_eq!(Key::Action.code(), "Space");
        assert_eq!(Key::Action.name(), " ");
    }

    #[test]
    fn flags_are_distinct_and_cover_all_keys() {
        let mut all = KeySet::empty();
        for k in Key::ALL {
            assert!(!all.intersects(k.flag()));
            all |= k.flag();
        }
        assert_eq!(all, KeySet::all());
        assert_eq!(KeySet::DIRECTIONS | KeySet::BUTTONS, KeySet::all());
    }

    #[test]
    fn direction_state_maps_to_keys() {
        let s = DirectionState {
            left: true,
            up: true,
            ..DirectionState::NONE
        };
        assert_eq!(s.keys(), KeySet::LEFT | KeySet::UP);
        assert!(s.is_pressed(Key::Up));
        assert!(!s.is_pressed(Key::Action));
        assert!(DirectionState::default().is_neutral());
    }

    #[test]
    fn key_set_iterates_in_emission_order() {
        let set = KeySet::ACTION | KeySet::DOWN | KeySet::LEFT;
        let keys: Vec<Key> = set.keys().collect();
        assert_eq!(keys, [Key::Left, Key::Down, Key::Action]);
        assert!(Key::Down.is_direction());
        assert!(!Key::Enter.is_direction());
    }
}
