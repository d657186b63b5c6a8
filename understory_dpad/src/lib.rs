// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dpad --heading-base-level=0

//! Understory D-pad: a deterministic, `no_std` virtual directional pad.
//!
//! ## Overview
//!
//! This crate lets a touch-only device drive a keyboard-controlled target.
//! It turns one continuous finger gesture on an on-screen control into discrete arrow key signals.
//! It does not render anything and does not talk to the target directly.
//! Instead, feed it pointer events and a frame tick, and it hands edge-triggered key signals to a [`KeySink`](crate::sink::KeySink) you implement.
//!
//! ## Pipeline
//!
//! Every tick runs the same fixed order:
//!
//! 1) [Vector source](crate::source): the active contact's offset from its origin, normalized into the unit disc.
//! 2) [Motion filter](crate::filter): exponential smoothing into the display vector.
//! 3) [Direction gate](crate::gate): deadzone, hysteresis, and snap policy produce a [`DirectionState`](crate::types::DirectionState).
//! 4) [Key synchronizer](crate::keys): diffs against the held keys and emits each down/up exactly once.
//!
//! The [mode coordinator](crate::mode) gates all of it: entering placement drops the contact and releases every held key.
//! [`PadEngine`](crate::engine::PadEngine) owns one instance of each stage.
//!
//! ## Snap policies
//!
//! - [`Off`](crate::config::SnapPolicy::Off): per-axis hysteresis, diagonals allowed.
//! - [`Eight`](crate::config::SnapPolicy::Eight): per-axis threshold, diagonals allowed.
//! - [`Four`](crate::config::SnapPolicy::Four) and [`Smart`](crate::config::SnapPolicy::Smart): dominant axis only. On an exact tie the vertical axis wins.
//!
//! ## Guarantees
//!
//! - Calling the synchronizer twice with the same state emits nothing the second time.
//! - For every key, downs minus ups is always 0 or 1.
//! - The raw and display vectors never leave the unit disc.
//! - Duplicate contacts, unknown pointer ids, unavailable geometry, and failed deliveries are silent no-ops; nothing panics.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_dpad::config::{PadConfig, SnapPolicy};
//! use understory_dpad::engine::PadEngine;
//! use understory_dpad::types::{Key, KeyEvent};
//!
//! // A 200×200 pad; record key signals in a Vec.
//! let config = PadConfig { snap: SnapPolicy::Smart, ..PadConfig::default() };
//! let bounds = Rect::new(0.0, 0.0, 200.0, 200.0);
//! let mut pad = PadEngine::new(config, bounds, Vec::new());
//!
//! // Touch the centre and drag right.
//! pad.begin_contact(1, Point::new(100.0, 100.0));
//! pad.update_contact(1, Point::new(150.0, 110.0));
//! for _ in 0..30 {
//!     pad.tick();
//! }
//! assert_eq!(pad.drain_events(), [KeyEvent::down(Key::Right)]);
//!
//! // Lift the finger: the knob glides back and the key is released.
//! pad.end_contact(1);
//! for _ in 0..30 {
//!     pad.tick();
//! }
//! assert_eq!(pad.drain_events(), [KeyEvent::up(Key::Right)]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` targets.
//! - `serde`: `Serialize`/`Deserialize` for the [configuration](crate::config) types.
//!
//! Logging goes through the [`log`] facade; the crate never installs a logger.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod engine;
pub mod filter;
pub mod gate;
pub mod input;
pub mod keys;
pub mod mode;
pub mod sink;
pub mod source;
pub mod types;
