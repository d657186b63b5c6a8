// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input boundary: pointer events as reported by the host toolkit.

use kurbo::Point;

use crate::types::PointerId;

/// Stage of a pointer/touch contact.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PointerPhase {
    /// Contact started on the control.
    Down,
    /// Contact moved.
    Move,
    /// Contact lifted.
    Up,
    /// Contact was cancelled by the platform.
    Cancel,
}

/// A pointer event in host screen coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Host identifier of the contact.
    pub pointer: PointerId,
    /// What happened.
    pub phase: PointerPhase,
    /// Where it happened.
    pub position: Point,
}

impl PointerEvent {
    /// Shorthand constructor.
    pub fn new(pointer: PointerId, phase: PointerPhase, position: Point) -> Self {
        Self {
            pointer,
            phase,
            position,
        }
    }
}
