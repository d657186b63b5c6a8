// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mode coordinator: running versus suspended for placement.

use log::debug;

/// Whether the pad forwards input.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Mode {
    /// Contacts are tracked and key signals are emitted.
    #[default]
    Running,
    /// Placement/configuration is open; the pad is inert.
    Suspended,
}

/// Two-state machine gating the pipeline.
///
/// The coordinator only tracks the mode. The [engine](crate::engine::PadEngine)
/// performs the side effects of each transition (dropping the contact and
/// releasing held keys on suspend).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ModeCoordinator {
    mode: Mode,
}

impl ModeCoordinator {
    /// Create a coordinator in `initial` mode.
    pub fn new(initial: Mode) -> Self {
        Self { mode: initial }
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns true while running.
    pub fn is_running(&self) -> bool {
        self.mode == Mode::Running
    }

    /// Switch to [`Mode::Suspended`]; returns false if already suspended.
    pub fn suspend(&mut self) -> bool {
        self.transition(Mode::Suspended)
    }

    /// Switch to [`Mode::Running`]; returns false if already running.
    pub fn resume(&mut self) -> bool {
        self.transition(Mode::Running)
    }

    fn transition(&mut self, to: Mode) -> bool {
        if self.mode == to {
            return false;
        }
        debug!("pad mode {:?} -> {:?}", self.mode, to);
        self.mode = to;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_report_changes_only() {
        let mut m = ModeCoordinator::default();
        assert!(m.is_running());
        assert!(m.suspend());
        assert!(!m.suspend());
        assert_eq!(m.mode(), Mode::Suspended);
        assert!(m.resume());
        assert!(!m.resume());
    }

    #[test]
    fn can_start_suspended() {
        let m = ModeCoordinator::new(Mode::Suspended);
        assert!(!m.is_running());
    }
}
