// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vector source: single-contact capture and normalization into the unit disc.
//!
//! ## Overview
//!
//! A [`VectorSource`] owns the control region, at most one [`PointerSession`],
//! and the raw `target` vector. Positions are in host screen coordinates.
//!
//! ## Normalization
//!
//! The offset from the origin is divided per axis by the half extent of the
//! control times the interactive radius. Offsets inside the disc are kept as
//! they are. Offsets outside are projected onto the unit circle and then each
//! axis is scaled by its own unprojected magnitude (capped at 1), so a minor
//! axis that never reached the rim stays small. Each axis is finally clamped
//! to `[-1, 1]`.
//!
//! A mostly horizontal drag past the rim therefore keeps a small vertical
//! component instead of drifting towards the diagonal.
//!
//! ## Geometry
//!
//! A control region with zero or non-finite size (not laid out yet) makes the
//! normalization undefined. The source then leaves `target` untouched instead
//! of dividing by zero.
//!
//! With [`OriginMode::Fixed`] the origin follows the centre of the control, so
//! [`VectorSource::set_bounds`] during a contact moves the origin and
//! recomputes `target` from the last contact position.

use kurbo::{Point, Rect, Vec2};
use log::debug;

use crate::config::OriginMode;
use crate::filter::clamp_to_unit_disc;
use crate::types::PointerId;

/// The contact currently driving the pad.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerSession {
    /// Host identifier of the contact.
    pub pointer: PointerId,
    /// Point the vector is measured from.
    pub origin: Point,
    /// How `origin` was chosen.
    pub origin_mode: OriginMode,
    /// Last reported contact position.
    pub position: Point,
}

/// Tracks one contact and turns its position into a normalized vector.
#[derive(Clone, Debug)]
pub struct VectorSource {
    bounds: Rect,
    radius: f64,
    session: Option<PointerSession>,
    target: Vec2,
}

impl VectorSource {
    /// Create a source for a control occupying `bounds`.
    ///
    /// `radius` is the fraction of the half extent that maps to full deflection.
    pub fn new(bounds: Rect, radius: f64) -> Self {
        Self {
            bounds,
            radius,
            session: None,
            target: Vec2::ZERO,
        }
    }

    /// The control region.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Replace the control region (after a layout change).
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        if let Some(s) = self.session.as_mut() {
            if s.origin_mode == OriginMode::Fixed {
                s.origin = bounds.center();
            }
            let (origin, position) = (s.origin, s.position);
            self.retarget(origin, position);
        }
    }

    /// Replace the interactive radius fraction.
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
    }

    /// The active contact, if any.
    pub fn session(&self) -> Option<&PointerSession> {
        self.session.as_ref()
    }

    /// Returns true while a contact is being tracked.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Origin of the active contact, if any.
    pub fn origin(&self) -> Option<Point> {
        self.session.map(|s| s.origin)
    }

    /// The raw (unfiltered) vector.
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Start tracking `pointer` at `point`.
    ///
    /// Returns `false` and changes nothing if a contact is already active.
    pub fn begin_contact(&mut self, pointer: PointerId, point: Point, mode: OriginMode) -> bool {
        if let Some(active) = self.session {
            debug!(
                "ignoring contact {pointer}: contact {} is active",
                active.pointer
            );
            return false;
        }
        let origin = match mode {
            OriginMode::Fixed => self.bounds.center(),
            OriginMode::Dynamic => point,
        };
        self.session = Some(PointerSession {
            pointer,
            origin,
            origin_mode: mode,
            position: point,
        });
        self.retarget(origin, point);
        true
    }

    /// Move the active contact.
    ///
    /// Returns `false` if `pointer` is not the active contact.
    pub fn update_contact(&mut self, pointer: PointerId, point: Point) -> bool {
        match self.session.as_mut() {
            Some(s) if s.pointer == pointer => {
                s.position = point;
                let origin = s.origin;
                self.retarget(origin, point);
                true
            }
            _ => false,
        }
    }

    /// End (or cancel) the active contact and return the target to rest.
    ///
    /// Returns `false` if `pointer` is not the active contact.
    pub fn end_contact(&mut self, pointer: PointerId) -> bool {
        match self.session {
            Some(s) if s.pointer == pointer => {
                self.session = None;
                self.target = Vec2::ZERO;
                true
            }
            _ => false,
        }
    }

    /// Drop the active contact without an end event and return the target to rest.
    ///
    /// Returns whether a contact was dropped.
    pub fn abandon(&mut self) -> bool {
        self.target = Vec2::ZERO;
        self.session.take().is_some()
    }

    /// Return the target to rest, keeping any active contact.
    pub fn recenter(&mut self) {
        self.target = Vec2::ZERO;
    }

    /// Screen position of the indicator (knob) for a normalized vector.
    ///
    /// The inverse of the normalization, measured from the centre of the control.
    pub fn indicator_position(&self, v: Vec2) -> Point {
        let scale = self.scale().unwrap_or(Vec2::ZERO);
        self.bounds.center() + Vec2::new(v.x * scale.x, v.y * scale.y)
    }

    /// Normalize `point` relative to `origin`, or `None` if the geometry is unusable.
    pub fn normalize(&self, origin: Point, point: Point) -> Option<Vec2> {
        let scale = self.scale()?;
        let d = point - origin;
        let d = Vec2::new(d.x / scale.x, d.y / scale.y);
        if !d.is_finite() {
            return None;
        }
        let v = if d.length() > 1.0 {
            let p = clamp_to_unit_disc(d);
            Vec2::new(p.x * d.x.abs().min(1.0), p.y * d.y.abs().min(1.0))
        } else {
            d
        };
        Some(Vec2::new(v.x.clamp(-1.0, 1.0), v.y.clamp(-1.0, 1.0)))
    }

    fn retarget(&mut self, origin: Point, point: Point) {
        match self.normalize(origin, point) {
            Some(v) => self.target = v,
            None => debug!("pad geometry unavailable ({:?}), skipping", self.bounds),
        }
    }

    fn scale(&self) -> Option<Vec2> {
        let sx = self.bounds.width() * 0.5 * self.radius;
        let sy = self.bounds.height() * 0.5 * self.radius;
        (sx.is_finite() && sy.is_finite() && sx > 0.0 && sy > 0.0).then_some(Vec2::new(sx, sy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 200×200 pad at (100, 100); full deflection 92 px from centre (200, 200).
    fn source() -> VectorSource {
        VectorSource::new(Rect::new(100.0, 100.0, 300.0, 300.0), 0.92)
    }

    fn at(nx: f64, ny: f64) -> Point {
        Point::new(200.0 + nx * 92.0, 200.0 + ny * 92.0)
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn fixed_origin_measures_from_centre() {
        let mut s = source();
        assert!(s.begin_contact(1, at(0.5, 0.1), OriginMode::Fixed));
        assert_eq!(s.origin(), Some(Point::new(200.0, 200.0)));
        assert!(close(s.target(), Vec2::new(0.5, 0.1)));
    }

    #[test]
    fn dynamic_origin_starts_at_rest() {
        let mut s = source();
        assert!(s.begin_contact(1, at(0.5, 0.5), OriginMode::Dynamic));
        assert_eq!(s.origin(), Some(at(0.5, 0.5)));
        assert_eq!(s.target(), Vec2::ZERO);
        assert!(s.update_contact(1, at(0.5, 0.2)));
        assert!(close(s.target(), Vec2::new(0.0, -0.3)));
    }

    #[test]
    fn second_contact_is_rejected() {
        let mut s = source();
        assert!(s.begin_contact(1, at(0.2, 0.0), OriginMode::Fixed));
        assert!(!s.begin_contact(2, at(-0.8, 0.0), OriginMode::Fixed));
        assert_eq!(s.session().map(|x| x.pointer), Some(1));
        assert!(close(s.target(), Vec2::new(0.2, 0.0)));
    }

    #[test]
    fn unknown_pointer_is_ignored() {
        let mut s = source();
        s.begin_contact(1, at(0.4, 0.0), OriginMode::Fixed);
        assert!(!s.update_contact(7, at(-0.9, 0.0)));
        assert!(!s.end_contact(7));
        assert!(s.is_active());
        assert!(close(s.target(), Vec2::new(0.4, 0.0)));
    }

    #[test]
    fn end_contact_returns_target_to_rest() {
        let mut s = source();
        s.begin_contact(1, at(0.7, 0.0), OriginMode::Fixed);
        assert!(s.end_contact(1));
        assert!(!s.is_active());
        assert_eq!(s.target(), Vec2::ZERO);
        assert!(!s.end_contact(1));
    }

    #[test]
    fn far_contacts_project_onto_unit_circle() {
        let mut s = source();
        s.begin_contact(1, at(3.0, 4.0), OriginMode::Fixed);
        assert!(close(s.target(), Vec2::new(0.6, 0.8)));
        s.update_contact(1, at(-10.0, 0.0));
        assert!(close(s.target(), Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn minor_axis_past_the_rim_is_attenuated() {
        let mut s = source();
        s.begin_contact(1, at(1.2, 0.5), OriginMode::Fixed);
        // Projected (12/13, 5/13), then the vertical axis scaled by 0.5.
        assert!(close(s.target(), Vec2::new(12.0 / 13.0, 2.5 / 13.0)));

        // Inside the disc nothing is attenuated.
        s.update_contact(1, at(0.9, 0.4));
        assert!(close(s.target(), Vec2::new(0.9, 0.4)));
    }

    #[test]
    fn target_stays_in_unit_disc() {
        let mut s = source();
        s.begin_contact(1, at(0.0, 0.0), OriginMode::Fixed);
        for i in -20..=20 {
            for j in -20..=20 {
                s.update_contact(1, at(f64::from(i) * 0.17, f64::from(j) * 0.13));
                let t = s.target();
                assert!(t.length() <= 1.0 + 1e-9);
                assert!(t.x.abs() <= 1.0 && t.y.abs() <= 1.0);
            }
        }
    }

    #[test]
    fn non_square_pad_scales_each_axis() {
        let mut s = VectorSource::new(Rect::new(0.0, 0.0, 400.0, 100.0), 1.0);
        s.begin_contact(1, Point::new(300.0, 75.0), OriginMode::Fixed);
        assert!(close(s.target(), Vec2::new(0.5, 0.5)));
    }

    #[test]
    fn empty_geometry_skips_computation() {
        let mut s = VectorSource::new(Rect::ZERO, 0.92);
        assert!(s.begin_contact(1, Point::new(10.0, 10.0), OriginMode::Fixed));
        assert_eq!(s.target(), Vec2::ZERO);
        assert!(s.update_contact(1, Point::new(50.0, 0.0)));
        assert_eq!(s.target(), Vec2::ZERO);

        // Once laid out, the origin moves to the real centre and updates work again.
        s.set_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(s.origin(), Some(Point::new(50.0, 50.0)));
        assert!(close(s.target(), Vec2::new(0.0, -1.0)));
        s.update_contact(1, Point::new(73.0, 50.0));
        assert!(close(s.target(), Vec2::new(0.5, 0.0)));
    }

    #[test]
    fn layout_change_moves_fixed_origin() {
        let mut s = VectorSource::new(Rect::new(0.0, 0.0, 200.0, 200.0), 0.92);
        s.begin_contact(1, Point::new(150.0, 100.0), OriginMode::Fixed);
        assert!(s.target().x > 0.5);

        s.set_bounds(Rect::new(100.0, 0.0, 300.0, 200.0));
        assert_eq!(s.origin(), Some(Point::new(200.0, 100.0)));
        assert!(close(s.target(), Vec2::new(-50.0 / 92.0, 0.0)));
        s.update_contact(1, Point::new(200.0, 100.0));
        assert_eq!(s.target(), Vec2::ZERO);
        assert_eq!(s.indicator_position(s.target()), Point::new(200.0, 100.0));
    }

    #[test]
    fn layout_change_keeps_dynamic_origin() {
        let mut s = source();
        s.begin_contact(1, at(0.2, 0.2), OriginMode::Dynamic);
        s.update_contact(1, at(0.5, 0.2));
        s.set_bounds(Rect::new(0.0, 0.0, 400.0, 400.0));
        assert_eq!(s.origin(), Some(at(0.2, 0.2)));
        let session = s.session().copied();
        assert_eq!(session.map(|x| x.position), Some(at(0.5, 0.2)));
        assert!(close(s.target(), Vec2::new(27.6 / 184.0, 0.0)));
    }

    #[test]
    fn abandon_and_recenter() {
        let mut s = source();
        s.begin_contact(1, at(0.5, 0.0), OriginMode::Fixed);
        s.recenter();
        assert!(s.is_active());
        assert_eq!(s.target(), Vec2::ZERO);
        assert!(s.abandon());
        assert!(!s.is_active());
        assert!(!s.abandon());
    }

    #[test]
    fn indicator_inverts_normalization() {
        let s = source();
        let p = s.indicator_position(Vec2::new(0.5, -1.0));
        assert!((p - at(0.5, -1.0)).length() < 1e-9);
        assert_eq!(s.indicator_position(Vec2::ZERO), Point::new(200.0, 200.0));
    }
}
