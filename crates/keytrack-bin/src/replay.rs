use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use keytrack_input::{
    InputConfig, KeyPhase, KeyState, Keyboard, MockTimeProvider, RawKeyEvent, TimeProvider,
};
use log::{info, warn};
use serde::Serialize;

/// Result of feeding a capture through a [`Keyboard`].
pub struct Replay {
    pub keyboard: Keyboard<Rc<MockTimeProvider>>,
    pub clock: Rc<MockTimeProvider>,
    pub accepted: usize,
    pub rejected: usize,
}

/// Parse a JSON-lines capture. Blank lines and `#` comments are skipped.
pub fn parse_events(content: &str) -> Result<Vec<RawKeyEvent>> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| {
            serde_json::from_str::<RawKeyEvent>(line)
                .with_context(|| format!("invalid event on line {line_no}"))
        })
        .collect()
}

pub fn read_events(path: &Path) -> Result<Vec<RawKeyEvent>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read capture {}", path.display()))?;
    parse_events(&content)
}

/// Feed events in order. The clock follows the latest accepted timestamp.
pub fn replay(events: &[RawKeyEvent], config: InputConfig) -> Replay {
    let clock = Rc::new(MockTimeProvider::new());
    let mut keyboard = Keyboard::new(config, Rc::clone(&clock));
    let (mut accepted, mut rejected) = (0, 0);

    let mut clock_started = false;

    for raw in events {
        match keyboard.handle_raw(raw) {
            Ok(_) => {
                accepted += 1;
                if !clock_started || raw.timestamp > clock.now_us() {
                    clock.set_time(raw.timestamp);
                    clock_started = true;
                }
            }
            Err(e) => {
                warn!("Skipping event: {e}");
                rejected += 1;
            }
        }
    }

    info!("Replayed {accepted} events ({rejected} rejected)");
    Replay {
        keyboard,
        clock,
        accepted,
        rejected,
    }
}

fn phase_label(state: &KeyState) -> &'static str {
    match state.phase() {
        KeyPhase::Uninitialized => "untouched",
        KeyPhase::Down => "down",
        KeyPhase::Up => "up",
    }
}

/// One line per key describing its final state at the clock's current time.
pub fn render_report(replay: &Replay) -> String {
    let kb = &replay.keyboard;
    let now_us = replay.clock.now_us();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "t={now_us}us keys={} accepted={} rejected={}",
        kb.len(),
        replay.accepted,
        replay.rejected
    );
    for state in kb.keys() {
        let m = state.modifiers();
        let _ = writeln!(
            out,
            "{} {} down@{} up@{} held={}us repeats={} alt={} ctrl={} shift={} just_pressed={} just_released={}",
            state.code(),
            phase_label(state),
            state.time_down_us(),
            state.time_up_us(),
            state.duration_us(now_us),
            state.repeats(),
            m.alt,
            m.ctrl,
            m.shift,
            kb.just_pressed(state.code()),
            kb.just_released(state.code()),
        );
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    now_us: i64,
    accepted: usize,
    rejected: usize,
    keys: Vec<JsonKey<'a>>,
}

#[derive(Serialize)]
struct JsonKey<'a> {
    #[serde(flatten)]
    state: &'a KeyState,
    held_us: i64,
    just_pressed: bool,
    just_released: bool,
}

/// Same content as [`render_report`] as a pretty-printed JSON snapshot.
pub fn render_json(replay: &Replay) -> Result<String> {
    let kb = &replay.keyboard;
    let now_us = replay.clock.now_us();
    let report = JsonReport {
        now_us,
        accepted: replay.accepted,
        rejected: replay.rejected,
        keys: kb
            .keys()
            .map(|state| JsonKey {
                state,
                held_us: state.duration_us(now_us),
                just_pressed: kb.just_pressed(state.code()),
                just_released: kb.just_released(state.code()),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
