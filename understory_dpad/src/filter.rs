// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Motion filter: exponential smoothing of the raw target vector.

use kurbo::Vec2;

/// Exponential moving average from the raw `target` to the `display` vector.
///
/// Stepped once per tick, unconditionally. When the target returns to zero
/// the display decays back to centre over the following ticks instead of
/// snapping.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MotionFilter {
    display: Vec2,
}

impl MotionFilter {
    /// Create a filter resting at the centre.
    pub fn new() -> Self {
        Self::default()
    }

    /// The filtered vector.
    pub fn display(&self) -> Vec2 {
        self.display
    }

    /// Advance one tick: `display += (target − display) × alpha`, then clamp to the unit disc.
    pub fn step(&mut self, target: Vec2, alpha: f64) -> Vec2 {
        self.display = clamp_to_unit_disc(self.display + (target - self.display) * alpha);
        self.display
    }

    /// Jump straight to the centre without smoothing.
    pub fn recenter(&mut self) {
        self.display = Vec2::ZERO;
    }
}

/// Scale `v` down onto the unit circle if it lies outside; leave it alone otherwise.
pub(crate) fn clamp_to_unit_disc(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > 1.0 { v / len } else { v }
}
