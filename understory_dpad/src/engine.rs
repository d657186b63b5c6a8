// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pad engine: one explicit object owning the whole pipeline of a control.
//!
//! ## Overview
//!
//! [`PadEngine`] wires the [source](crate::source), [filter](crate::filter),
//! [gate](crate::gate), and [synchronizer](crate::keys) together behind the
//! [mode coordinator](crate::mode), and forwards key edges to a
//! [`KeySink`]. Construct one engine per on-screen pad; engines share nothing.
//!
//! ## Event model
//!
//! Two kinds of calls interleave on one thread:
//! - Input calls ([`handle_pointer`](PadEngine::handle_pointer) and the contact and
//!   button methods) update the contact and return immediately.
//! - [`tick`](PadEngine::tick), once per display frame, runs filter → gate → sync to
//!   completion on the vector it just filtered.
//!
//! Releasing a contact does not release keys by itself: the display vector
//! decays over the next ticks and the gate lets go once it falls inside the
//! deadzone.
//!
//! ## Placement
//!
//! [`enter_placement`](PadEngine::enter_placement) drops the contact, recentres,
//! and releases every held key before the pad goes inert.
//! [`exit_placement`](PadEngine::exit_placement) re-enables it.
//!
//! ## Delivery failures
//!
//! A failed delivery never stops the pipeline. Held keys still change, so the
//! matching key-up is attempted later. The first failure is logged at `warn` and
//! kept for [`take_delivery_hint`](PadEngine::take_delivery_hint) so the host can
//! show a one-line hint.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};
use log::{debug, warn};

use crate::config::PadConfig;
use crate::filter::MotionFilter;
use crate::gate::gate;
use crate::input::{PointerEvent, PointerPhase};
use crate::keys::KeySync;
use crate::mode::{Mode, ModeCoordinator};
use crate::sink::{DeliveryError, KeySink};
use crate::source::{PointerSession, VectorSource};
use crate::types::{DirectionState, Key, KeyEvent, KeyEventKind, KeySet, PointerId};

/// Virtual directional pad.
///
/// ## Usage
///
/// - Construct with [`PadEngine::new`] from a [`PadConfig`], the control's screen
///   rectangle, and a sink.
/// - Feed host pointer events to [`PadEngine::handle_pointer`].
/// - Call [`PadEngine::tick`] once per frame.
/// - Draw the knob at [`PadEngine::knob_position`].
pub struct PadEngine<S: KeySink> {
    config: PadConfig,
    mode: ModeCoordinator,
    source: VectorSource,
    filter: MotionFilter,
    keys: KeySync,
    sink: S,
    hint: Option<DeliveryError>,
    hint_surfaced: bool,
}

impl<S: KeySink> core::fmt::Debug for PadEngine<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PadEngine")
            .field("config", &self.config)
            .field("mode", &self.mode.mode())
            .field("session", &self.source.session())
            .field("display", &self.filter.display())
            .field("held", &self.keys.held())
            .finish_non_exhaustive()
    }
}

impl<S: KeySink> PadEngine<S> {
    /// Create an engine; `config` is validated first.
    pub fn new(mut config: PadConfig, bounds: Rect, sink: S) -> Self {
        config.validate_and_clamp();
        let initial = if config.start_suspended {
            Mode::Suspended
        } else {
            Mode::Running
        };
        Self {
            mode: ModeCoordinator::new(initial),
            source: VectorSource::new(bounds, config.tuning.interactive_radius),
            filter: MotionFilter::new(),
            keys: KeySync::new(),
            sink,
            hint: None,
            hint_surfaced: false,
            config,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    /// Apply a new configuration (validated first). Held keys are untouched;
    /// the next tick applies the new policy and thresholds.
    pub fn set_config(&mut self, mut config: PadConfig) {
        config.validate_and_clamp();
        self.source.set_radius(config.tuning.interactive_radius);
        self.config = config;
    }

    /// The control region in screen coordinates.
    pub fn bounds(&self) -> Rect {
        self.source.bounds()
    }

    /// Replace the control region after a layout change.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.source.set_bounds(bounds);
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    /// Route a host pointer event. Returns whether it changed the contact.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event.phase {
            PointerPhase::Down => self.begin_contact(event.pointer, event.position),
            PointerPhase::Move => self.update_contact(event.pointer, event.position),
            PointerPhase::Up | PointerPhase::Cancel => self.end_contact(event.pointer),
        }
    }

    /// Start tracking a contact. Rejected while suspended or while another contact is active.
    pub fn begin_contact(&mut self, pointer: PointerId, point: Point) -> bool {
        if !self.mode.is_running() {
            debug!("ignoring contact {pointer} while suspended");
            return false;
        }
        self.source.begin_contact(pointer, point, self.config.origin)
    }

    /// Move the active contact. Ignored for other pointers and while suspended.
    pub fn update_contact(&mut self, pointer: PointerId, point: Point) -> bool {
        self.mode.is_running() && self.source.update_contact(pointer, point)
    }

    /// End or cancel the active contact. Ignored for other pointers.
    pub fn end_contact(&mut self, pointer: PointerId) -> bool {
        self.source.end_contact(pointer)
    }

    /// Press a bound button ([`Key::Action`] or [`Key::Enter`]).
    ///
    /// Returns false for directional keys, while suspended, or if already held.
    pub fn press_button(&mut self, key: Key) -> bool {
        if key.is_direction() || !self.mode.is_running() {
            return false;
        }
        match self.keys.press(key) {
            Some(event) => {
                self.forward(&[event]);
                true
            }
            None => false,
        }
    }

    /// Release a bound button. Returns false for directional keys or if not held.
    pub fn release_button(&mut self, key: Key) -> bool {
        if key.is_direction() {
            return false;
        }
        match self.keys.release(key) {
            Some(event) => {
                self.forward(&[event]);
                true
            }
            None => false,
        }
    }

    /// Run one frame: filter, gate, and (while running) sync.
    ///
    /// Returns the direction state now held, which is always neutral while suspended.
    pub fn tick(&mut self) -> DirectionState {
        let display = self
            .filter
            .step(self.source.target(), self.config.smoothing_factor());
        if !self.mode.is_running() {
            return DirectionState::NONE;
        }
        let state = gate(
            display,
            self.config.snap,
            self.config.thresholds(),
            self.keys.held(),
        );
        let events = self.keys.sync(state);
        self.forward(&events);
        state
    }

    /// Enter placement mode: drop the contact, recentre, release all keys, suspend.
    ///
    /// Returns false if already suspended.
    pub fn enter_placement(&mut self) -> bool {
        if !self.mode.is_running() {
            return false;
        }
        if self.source.abandon() {
            debug!("contact dropped for placement");
        }
        self.filter.recenter();
        self.release_all();
        self.mode.suspend()
    }

    /// Leave placement mode. Returns false if already running.
    pub fn exit_placement(&mut self) -> bool {
        self.mode.resume()
    }

    /// Release every key and recentre the knob, keeping the mode.
    pub fn reset(&mut self) {
        self.release_all();
        self.source.recenter();
        self.filter.recenter();
    }

    /// Emit a key-up for every held key. Idempotent.
    pub fn release_all(&mut self) {
        let events = self.keys.release_all();
        self.forward(&events);
    }

    /// Keys currently held.
    pub fn held(&self) -> KeySet {
        self.keys.held()
    }

    /// The active contact, if any.
    pub fn session(&self) -> Option<&PointerSession> {
        self.source.session()
    }

    /// Origin of the active contact, if any (for drawing the ring).
    pub fn origin(&self) -> Option<Point> {
        self.source.origin()
    }

    /// Raw vector of the active contact.
    pub fn target(&self) -> Vec2 {
        self.source.target()
    }

    /// Filtered vector used for gating and drawing.
    pub fn display(&self) -> Vec2 {
        self.filter.display()
    }

    /// Screen position of the knob for the current display vector.
    pub fn knob_position(&self) -> Point {
        self.source.indicator_position(self.filter.display())
    }

    /// The sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The sink, mutably (for example to reattach a reloaded target).
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the engine and return the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Take the pending delivery hint. Yields at most one hint per engine.
    pub fn take_delivery_hint(&mut self) -> Option<DeliveryError> {
        self.hint.take()
    }

    fn forward(&mut self, events: &[KeyEvent]) {
        for &event in events {
            match self.sink.deliver(event) {
                Ok(()) => {
                    if event.kind == KeyEventKind::Down && self.config.haptics {
                        self.sink.pulse(self.config.tuning.haptic_pulse_ms);
                    }
                }
                Err(err) => self.delivery_failed(event, err),
            }
        }
    }

    fn delivery_failed(&mut self, event: KeyEvent, err: DeliveryError) {
        if self.hint_surfaced {
            debug!("dropped {event:?}: {err}");
            return;
        }
        warn!("dropped {event:?}: {err}");
        self.hint_surfaced = true;
        self.hint = Some(err);
    }
}

impl PadEngine<Vec<KeyEvent>> {
    /// Take every key event recorded so far.
    pub fn drain_events(&mut self) -> Vec<KeyEvent> {
        core::mem::take(&mut self.sink)
    }
}
