// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replay a scripted touch trace from a TOML file.
//!
//! The file holds a pad configuration and a list of timed steps. Positions are
//! given relative to the pad centre in units of the full deflection radius.
//! Without an argument a built-in trace is replayed.
//!
//! Run:
//! - `cargo run -p understory_demos --example dpad_replay`
//! - `RUST_LOG=debug cargo run -p understory_demos --example dpad_replay -- trace.toml`

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use kurbo::{Point, Rect};
use log::info;
use serde::Deserialize;
use understory_dpad::config::PadConfig;
use understory_dpad::engine::PadEngine;
use understory_dpad::input::{PointerEvent, PointerPhase};
use understory_dpad::sink::{DeliveryError, KeySink};
use understory_dpad::types::{KeyEvent, KeyEventKind};

const BUILTIN: &str = r#"
ticks = 120

[pad]
sensitivity = 1.0
snap = "off"

[[step]]
tick = 0
action = "down"
x = 0.0
y = 0.0

[[step]]
tick = 2
action = "move"
x = 0.8
y = 0.1

[[step]]
tick = 30
action = "move"
x = 0.7
y = -0.7

[[step]]
tick = 60
action = "up"

[[step]]
tick = 70
action = "placement"

[[step]]
tick = 75
action = "down"
x = -0.9
y = 0.0

[[step]]
tick = 80
action = "resume"
"#;

#[derive(Debug, Deserialize)]
struct Trace {
    ticks: u32,
    #[serde(default)]
    pad: PadConfig,
    #[serde(default)]
    step: Vec<Step>,
}

#[derive(Debug, Deserialize)]
struct Step {
    tick: u32,
    action: Action,
    #[serde(default = "default_pointer")]
    pointer: u64,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
}

fn default_pointer() -> u64 {
    1
}

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum Action {
    Down,
    Move,
    Up,
    Cancel,
    Placement,
    Resume,
    Reset,
}

/// Prints each signal the way a host shim would build a keyboard event.
#[derive(Default)]
struct PrintSink {
    tick: u32,
    delivered: Vec<KeyEvent>,
}

impl KeySink for PrintSink {
    fn deliver(&mut self, event: KeyEvent) -> Result<(), DeliveryError> {
        let kind = match event.kind {
            KeyEventKind::Down => "keydown",
            KeyEventKind::Up => "keyup",
        };
        println!(
            "  [{:>3}] {kind:<7} key={:?} code={} keyCode={}",
            self.tick,
            event.key.name(),
            event.key.code(),
            event.key.legacy_code()
        );
        self.delivered.push(event);
        Ok(())
    }

    fn pulse(&mut self, duration_ms: u32) {
        println!("        (haptic {duration_ms} ms)");
    }
}

fn load(path: Option<PathBuf>) -> Result<Trace> {
    let text = match &path {
        Some(p) => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read trace {}", p.display()))?,
        None => BUILTIN.to_owned(),
    };
    let trace: Trace = toml::from_str(&text).context("failed to parse trace")?;
    if trace.step.windows(2).any(|w| w[0].tick > w[1].tick) {
        bail!("trace steps must be ordered by tick");
    }
    Ok(trace)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let trace = load(std::env::args_os().nth(1).map(PathBuf::from))?;
    info!(
        "replaying {} steps over {} ticks with {:?}",
        trace.step.len(),
        trace.ticks,
        trace.pad
    );

    let bounds = Rect::new(0.0, 0.0, 200.0, 200.0);
    let reach = bounds.width() * 0.5 * trace.pad.tuning.interactive_radius;
    let to_screen = |x: f64, y: f64| bounds.center() + kurbo::Vec2::new(x, y) * reach;

    let mut pad = PadEngine::new(trace.pad, bounds, PrintSink::default());
    let mut steps = trace.step.iter().peekable();
    for tick in 0..trace.ticks {
        pad.sink_mut().tick = tick;
        while let Some(step) = steps.next_if(|s| s.tick == tick) {
            let at: Point = to_screen(step.x, step.y);
            let contact = |phase| PointerEvent::new(step.pointer, phase, at);
            let accepted = match step.action {
                Action::Down => pad.handle_pointer(contact(PointerPhase::Down)),
                Action::Move => pad.handle_pointer(contact(PointerPhase::Move)),
                Action::Up => pad.handle_pointer(contact(PointerPhase::Up)),
                Action::Cancel => pad.handle_pointer(contact(PointerPhase::Cancel)),
                Action::Placement => pad.enter_placement(),
                Action::Resume => pad.exit_placement(),
                Action::Reset => {
                    pad.reset();
                    true
                }
            };
            info!("tick {tick}: {:?} accepted={accepted}", step.action);
        }
        pad.tick();
        if let Some(hint) = pad.take_delivery_hint() {
            println!("hint: {hint}");
        }
    }

    let sink = pad.into_sink();
    let downs = sink
        .delivered
        .iter()
        .filter(|e| e.kind == KeyEventKind::Down)
        .count();
    let ups = sink.delivered.len() - downs;
    println!("== {downs} downs, {ups} ups ==");
    Ok(())
}
