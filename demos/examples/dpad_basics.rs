// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! D-pad basics.
//!
//! This minimal example drags a finger across a pad, ticks the engine, and
//! prints the key signals it produces under each snap policy.
//!
//! Run:
//! - `cargo run -p understory_demos --example dpad_basics`

use kurbo::{Point, Rect};
use understory_dpad::config::{PadConfig, SnapPolicy};
use understory_dpad::engine::PadEngine;
use understory_dpad::types::{Key, KeyEvent};

fn main() {
    let bounds = Rect::new(0.0, 0.0, 200.0, 200.0);
    let centre = bounds.center();
    // Down-right, slightly more right than down.
    let finger = Point::new(170.0, 160.0);

    for snap in [SnapPolicy::Smart, SnapPolicy::Eight] {
        let config = PadConfig {
            snap,
            ..PadConfig::default()
        };
        let mut pad = PadEngine::new(config, bounds, Vec::new());

        pad.begin_contact(1, centre);
        pad.update_contact(1, finger);
        for _ in 0..30 {
            pad.tick();
        }
        let pressed = pad.drain_events();
        println!("== {snap:?}: drag ==\n  {pressed:?}");
        println!("  knob at {:?}", pad.knob_position());

        pad.end_contact(1);
        for _ in 0..30 {
            pad.tick();
        }
        let released = pad.drain_events();
        println!("== {snap:?}: release ==\n  {released:?}");

        match snap {
            SnapPolicy::Smart => {
                assert_eq!(pressed, [KeyEvent::down(Key::Right)]);
                assert_eq!(released, [KeyEvent::up(Key::Right)]);
            }
            _ => {
                assert_eq!(
                    pressed,
                    [KeyEvent::down(Key::Right), KeyEvent::down(Key::Down)]
                );
                assert_eq!(released.len(), 2);
            }
        }
    }
}
