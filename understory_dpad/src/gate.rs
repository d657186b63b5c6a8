// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Direction gate: map a filtered vector to four directional booleans.
//!
//! ## Policies
//!
//! - [`Off`](SnapPolicy::Off): each direction has its own hysteresis band. It turns on past
//!   `enter` and stays on until the axis value is back within `exit`. The band is keyed
//!   on the keys currently held, so the gate never keeps a shadow copy of its last output.
//! - [`Eight`](SnapPolicy::Eight): stateless per-axis test at `enter`. Diagonals allowed.
//! - [`Four`](SnapPolicy::Four) / [`Smart`](SnapPolicy::Smart): only the dominant axis is
//!   tested, so horizontal and vertical are mutually exclusive. On an exact tie the
//!   vertical axis wins.
//!
//! Vectors use screen orientation: +x is right, +y is down.

use kurbo::Vec2;

use crate::config::SnapPolicy;
use crate::types::{DirectionState, KeySet};

/// Enter/exit thresholds of the deadzone.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Thresholds {
    /// Axis magnitude a direction must exceed to turn on.
    pub enter: f64,
    /// Axis magnitude a held direction must stay above to remain on.
    pub exit: f64,
}

impl Thresholds {
    /// Thresholds from an explicit enter value and an exit ratio.
    pub fn new(enter: f64, exit_ratio: f64) -> Self {
        Self {
            enter,
            exit: enter * exit_ratio,
        }
    }

    /// Thresholds for a base deadzone at an (already floored) sensitivity.
    ///
    /// `enter = deadzone / sensitivity`, `exit = enter × exit_ratio`.
    pub fn scaled(deadzone: f64, sensitivity: f64, exit_ratio: f64) -> Self {
        Self::new(deadzone / sensitivity, exit_ratio)
    }
}

/// Compute the direction state for `display` under `policy`.
///
/// `held` is consulted only by [`SnapPolicy::Off`], for its hysteresis.
pub fn gate(display: Vec2, policy: SnapPolicy, th: Thresholds, held: KeySet) -> DirectionState {
    match policy {
        SnapPolicy::Off => DirectionState {
            left: banded(-display.x, held.contains(KeySet::LEFT), th),
            right: banded(display.x, held.contains(KeySet::RIGHT), th),
            up: banded(-display.y, held.contains(KeySet::UP), th),
            down: banded(display.y, held.contains(KeySet::DOWN), th),
        },
        SnapPolicy::Eight => DirectionState {
            left: display.x < -th.enter,
            right: display.x > th.enter,
            up: display.y < -th.enter,
            down: display.y > th.enter,
        },
        SnapPolicy::Four | SnapPolicy::Smart => {
            if display.x.abs() > display.y.abs() {
                DirectionState {
                    left: display.x < -th.enter,
                    right: display.x > th.enter,
                    ..DirectionState::NONE
                }
            } else {
                DirectionState {
                    up: display.y < -th.enter,
                    down: display.y > th.enter,
                    ..DirectionState::NONE
                }
            }
        }
    }
}

fn banded(value: f64, was_on: bool, th: Thresholds) -> bool {
    if was_on {
        value > th.exit
    } else {
        value > th.enter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    const TH: Thresholds = Thresholds {
        enter: 0.28,
        exit: 0.20,
    };

    fn right_only() -> DirectionState {
        DirectionState {
            right: true,
            ..DirectionState::NONE
        }
    }

    #[test]
    fn hysteresis_band_under_off() {
        let mut held = KeySet::empty();
        let mut out = Vec::new();
        for x in [0.0, 0.30, 0.22, 0.15] {
            let s = gate(Vec2::new(x, 0.0), SnapPolicy::Off, TH, held);
            held = s.keys();
            out.push(s.right);
        }
        assert_eq!(out, [false, true, true, false]);
    }

    #[test]
    fn off_does_not_enter_inside_band() {
        // 0.22 is above exit but below enter: stays off when not held.
        let s = gate(Vec2::new(0.22, 0.0), SnapPolicy::Off, TH, KeySet::empty());
        assert!(s.is_neutral());
        let s = gate(Vec2::new(-0.22, 0.0), SnapPolicy::Off, TH, KeySet::LEFT);
        assert!(s.left);
    }

    #[test]
    fn off_allows_diagonals() {
        let s = gate(Vec2::new(0.5, -0.5), SnapPolicy::Off, TH, KeySet::empty());
        assert_eq!(
            s,
            DirectionState {
                right: true,
                up: true,
                ..DirectionState::NONE
            }
        );
    }

    #[test]
    fn eight_has_no_hysteresis() {
        let s = gate(Vec2::new(0.22, 0.0), SnapPolicy::Eight, TH, KeySet::RIGHT);
        assert!(s.is_neutral());
        let s = gate(Vec2::new(-0.3, 0.3), SnapPolicy::Eight, TH, KeySet::empty());
        assert_eq!(
            s,
            DirectionState {
                left: true,
                down: true,
                ..DirectionState::NONE
            }
        );
    }

    #[test]
    fn four_and_smart_pick_dominant_axis() {
        for policy in [SnapPolicy::Four, SnapPolicy::Smart] {
            assert_eq!(
                gate(Vec2::new(0.5, 0.1), policy, TH, KeySet::empty()),
                right_only()
            );
            assert_eq!(
                gate(Vec2::new(0.4, -0.6), policy, TH, KeySet::empty()),
                DirectionState {
                    up: true,
                    ..DirectionState::NONE
                }
            );
            // Dominant axis inside the deadzone: nothing, even if the other is large-ish.
            assert!(gate(Vec2::new(0.2, 0.1), policy, TH, KeySet::empty()).is_neutral());
        }
    }

    #[test]
    fn exact_tie_goes_vertical() {
        let s = gate(Vec2::new(0.5, 0.5), SnapPolicy::Smart, TH, KeySet::empty());
        assert_eq!(
            s,
            DirectionState {
                down: true,
                ..DirectionState::NONE
            }
        );
    }

    #[test]
    fn exclusive_policies_never_return_two_directions() {
        let steps = 24;
        for i in 0..=steps {
            for j in 0..=steps {
                let x = -1.0 + 2.0 * f64::from(i) / f64::from(steps);
                let y = -1.0 + 2.0 * f64::from(j) / f64::from(steps);
                for policy in [SnapPolicy::Four, SnapPolicy::Smart] {
                    let s = gate(Vec2::new(x, y), policy, TH, KeySet::all());
                    assert!(s.keys().bits().count_ones() <= 1, "{x} {y} gave {s:?}");
                }
            }
        }
    }

    #[test]
    fn opposite_directions_never_coexist() {
        for x in [-1.0, -0.25, 0.0, 0.25, 1.0] {
            for policy in [SnapPolicy::Off, SnapPolicy::Eight] {
                let s = gate(Vec2::new(x, x), policy, TH, KeySet::all());
                assert!(!(s.left && s.right));
                assert!(!(s.up && s.down));
            }
        }
    }

    #[test]
    fn scaled_thresholds() {
        let th = Thresholds::scaled(0.28, 1.0, 0.72);
        assert!((th.enter - 0.28).abs() < 1e-12);
        assert!((th.exit - 0.2016).abs() < 1e-12);
    }
}
