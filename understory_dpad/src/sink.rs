// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output boundary: delivering key signals to the embedded target.
//!
//! Implement [`KeySink`] in the host layer. A sink turns each [`KeyEvent`] into
//! a platform-native key event carrying the [symbolic name](crate::types::Key::name),
//! the [physical code](crate::types::Key::code), and the
//! [legacy numeric code](crate::types::Key::legacy_code), so the target cannot tell
//! it from a physical keyboard.
//!
//! `Vec<KeyEvent>` implements [`KeySink`] by recording every signal, which is
//! handy for tests and replay tools.

use alloc::vec::Vec;

use crate::types::KeyEvent;

/// Why a key signal could not be delivered.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DeliveryError {
    /// The target's input surface cannot be reached (for example it is cross-origin).
    #[error("cannot reach the target's input surface; host the target on the same origin as the pad")]
    Unreachable,
    /// The target is not loaded or attached yet.
    #[error("target is not attached yet")]
    Detached,
}

/// Receiver of synthetic key signals.
pub trait KeySink {
    /// Deliver one key signal.
    fn deliver(&mut self, event: KeyEvent) -> Result<(), DeliveryError>;

    /// Fire a short haptic pulse, if the platform has one.
    fn pulse(&mut self, _duration_ms: u32) {}
}

impl KeySink for Vec<KeyEvent> {
    fn deliver(&mut self, event: KeyEvent) -> Result<(), DeliveryError> {
        self.push(event);
        Ok(())
    }
}

impl<S: KeySink + ?Sized> KeySink for &mut S {
    fn deliver(&mut self, event: KeyEvent) -> Result<(), DeliveryError> {
        (**self).deliver(event)
    }

    fn pulse(&mut self, duration_ms: u32) {
        (**self).pulse(duration_ms);
    }
}
