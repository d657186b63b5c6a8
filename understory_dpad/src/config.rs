// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pad configuration: sensitivity, snap policy, origin behavior, and tuning constants.
//!
//! ## Overview
//!
//! [`PadConfig`] is written by a settings surface outside the engine and read
//! by the [filter](crate::filter) and the [gate](crate::gate). Every field has
//! a default, so a partially specified configuration (for example a TOML file
//! with the `serde` feature enabled) is always complete.
//!
//! Call [`PadConfig::validate_and_clamp`] after loading untrusted values; the
//! [engine](crate::engine::PadEngine) does this on construction and on
//! [`set_config`](crate::engine::PadEngine::set_config).

use log::warn;

use crate::gate::Thresholds;

/// Lowest accepted sensitivity.
pub const MIN_SENSITIVITY: f64 = 0.6;
/// Highest accepted sensitivity.
pub const MAX_SENSITIVITY: f64 = 1.5;

/// Rule mapping a continuous vector to discrete directions.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum SnapPolicy {
    /// Per-axis hysteresis; diagonals allowed.
    Off,
    /// Dominant axis only; no diagonals.
    Four,
    /// Per-axis threshold without hysteresis; diagonals allowed.
    Eight,
    /// Same rule as [`Four`](Self::Four).
    #[default]
    Smart,
}

impl SnapPolicy {
    /// Returns true if the policy never produces diagonals.
    pub const fn is_exclusive(self) -> bool {
        matches!(self, Self::Four | Self::Smart)
    }
}

/// Where a new contact puts the origin of the vector.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum OriginMode {
    /// Joystick: the origin is the centre of the control region.
    #[default]
    Fixed,
    /// Touchpad: the first contact point becomes the origin.
    Dynamic,
}

/// Numeric constants of the filter, gate, and geometry.
///
/// The defaults are the reference tuning; they rarely need to change.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "kebab-case")
)]
pub struct Tuning {
    /// Smoothing factor at sensitivity 1.0.
    pub smoothing_base: f64,
    /// Change of the smoothing factor per unit of sensitivity above 1.0.
    pub smoothing_slope: f64,
    /// Lower bound of the smoothing factor.
    pub smoothing_min: f64,
    /// Upper bound of the smoothing factor.
    pub smoothing_max: f64,
    /// Enter threshold at sensitivity 1.0.
    pub deadzone: f64,
    /// Sensitivity below which the deadzone stops growing.
    pub deadzone_sensitivity_floor: f64,
    /// Exit threshold as a fraction of the enter threshold.
    pub exit_ratio: f64,
    /// Fraction of the half extent of the control that maps to a full deflection.
    pub interactive_radius: f64,
    /// Length of the haptic pulse sent on key-down, in milliseconds.
    pub haptic_pulse_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            smoothing_base: 0.22,
            smoothing_slope: 0.08,
            smoothing_min: 0.14,
            smoothing_max: 0.34,
            deadzone: 0.28,
            deadzone_sensitivity_floor: 0.7,
            exit_ratio: 0.72,
            interactive_radius: 0.92,
            haptic_pulse_ms: 6,
        }
    }
}

/// Configuration of one pad.
///
/// # Example TOML (with the `serde` feature)
/// ```toml
/// sensitivity = 1.2
/// snap = "four"
/// origin = "dynamic"
/// haptics = false
///
/// [tuning]
/// deadzone = 0.3
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "kebab-case")
)]
pub struct PadConfig {
    /// Response sensitivity, [`MIN_SENSITIVITY`]..=[`MAX_SENSITIVITY`].
    pub sensitivity: f64,
    /// Direction snapping rule.
    pub snap: SnapPolicy,
    /// Origin placement for new contacts.
    pub origin: OriginMode,
    /// Send a short haptic pulse on every key-down.
    pub haptics: bool,
    /// Start in placement mode (suspended) instead of running.
    pub start_suspended: bool,
    /// Numeric constants.
    pub tuning: Tuning,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            snap: SnapPolicy::default(),
            origin: OriginMode::default(),
            haptics: true,
            start_suspended: false,
            tuning: Tuning::default(),
        }
    }
}

impl PadConfig {
    /// Validates and clamps all numeric values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (non-finite values
    /// fall back to the default) and a warning is logged for each fix.
    ///
    /// Validated ranges:
    /// - `sensitivity`: 0.6 - 1.5
    /// - smoothing base/min/max: (0, 1], with min ≤ max
    /// - `deadzone`: 0.0 - 0.95
    /// - `exit_ratio`: 0.05 - 1.0 (exclusive)
    /// - `interactive_radius`: 0.1 - 1.0
    pub fn validate_and_clamp(&mut self) {
        let defaults = Tuning::default();

        self.sensitivity = checked(
            "sensitivity",
            self.sensitivity,
            MIN_SENSITIVITY,
            MAX_SENSITIVITY,
            1.0,
        );

        let t = &mut self.tuning;
        t.smoothing_base = checked(
            "smoothing_base",
            t.smoothing_base,
            0.01,
            1.0,
            defaults.smoothing_base,
        );
        t.smoothing_min = checked(
            "smoothing_min",
            t.smoothing_min,
            0.01,
            1.0,
            defaults.smoothing_min,
        );
        t.smoothing_max = checked(
            "smoothing_max",
            t.smoothing_max,
            0.01,
            1.0,
            defaults.smoothing_max,
        );
        if t.smoothing_min > t.smoothing_max {
            warn!(
                "smoothing_min {:.2} exceeds smoothing_max {:.2}, swapping",
                t.smoothing_min, t.smoothing_max
            );
            core::mem::swap(&mut t.smoothing_min, &mut t.smoothing_max);
        }
        if !t.smoothing_slope.is_finite() {
            warn!("Invalid smoothing_slope, using default");
            t.smoothing_slope = defaults.smoothing_slope;
        }

        t.deadzone = checked("deadzone", t.deadzone, 0.0, 0.95, defaults.deadzone);
        t.deadzone_sensitivity_floor = checked(
            "deadzone_sensitivity_floor",
            t.deadzone_sensitivity_floor,
            0.1,
            MAX_SENSITIVITY,
            defaults.deadzone_sensitivity_floor,
        );
        // Exit must stay strictly below enter for the hysteresis band to exist.
        t.exit_ratio = checked("exit_ratio", t.exit_ratio, 0.05, 0.99, defaults.exit_ratio);
        t.interactive_radius = checked(
            "interactive_radius",
            t.interactive_radius,
            0.1,
            1.0,
            defaults.interactive_radius,
        );
    }

    /// Smoothing factor `α` for the [motion filter](crate::filter::MotionFilter).
    ///
    /// `α = clamp(base − (s − 1) × slope, min, max)`.
    pub fn smoothing_factor(&self) -> f64 {
        let t = &self.tuning;
        (t.smoothing_base - (self.sensitivity - 1.0) * t.smoothing_slope)
            .clamp(t.smoothing_min, t.smoothing_max)
    }

    /// Enter/exit thresholds for the [gate](crate::gate::gate) at the configured sensitivity.
    pub fn thresholds(&self) -> Thresholds {
        let t = &self.tuning;
        Thresholds::scaled(
            t.deadzone,
            self.sensitivity.max(t.deadzone_sensitivity_floor),
            t.exit_ratio,
        )
    }
}

fn checked(name: &str, value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        warn!("Invalid {name} {value}, using {fallback:.2}");
        return fallback;
    }
    if !(min..=max).contains(&value) {
        warn!("Invalid {name} {value:.2}, clamping to {min:.2}-{max:.2} range");
        return value.clamp(min, max);
    }
    value
}
