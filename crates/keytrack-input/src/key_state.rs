use serde::Serialize;

use crate::error::InputError;
use crate::event::{KeyCode, KeyEvent, KeyEventKind, Modifiers};

/// Logical position of a control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPhase {
    /// No event has been processed yet. Neither down nor up.
    #[default]
    Uninitialized,
    Down,
    Up,
}

/// What [`KeyState::update`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Up (or uninitialized) to down. Starts a new press cycle.
    Pressed,
    /// Press signal while already down (auto-repeat).
    Repeated,
    Released,
    /// Unrecognized event kind; nothing changed.
    Ignored,
}

/// State of a single control with timestamps of its last press/release cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyState {
    code: KeyCode,
    phase: KeyPhase,
    /// Modifiers held at the last press transition.
    modifiers: Modifiers,
    /// Timestamp of the last press transition (microseconds).
    time_down_us: i64,
    /// Timestamp of the last release transition (microseconds).
    time_up_us: i64,
    /// Press signals received while already down during the current cycle.
    repeats: u32,
    #[serde(skip)]
    last_event_us: Option<i64>,
}

impl KeyState {
    /// Create an uninitialized key state.
    pub fn new(code: impl Into<KeyCode>) -> Self {
        Self {
            code: code.into(),
            phase: KeyPhase::Uninitialized,
            modifiers: Modifiers::NONE,
            time_down_us: 0,
            time_up_us: 0,
            repeats: 0,
            last_event_us: None,
        }
    }

    /// Create a key state and immediately apply its first event.
    pub fn with_event(event: &KeyEvent) -> Self {
        let mut state = Self::new(event.code);
        state.update(event);
        state
    }

    pub fn code(&self) -> KeyCode {
        self.code
    }

    /// Re-bind this state to another control code. Timing state is kept.
    pub fn rebind(&mut self, code: impl Into<KeyCode>) {
        self.code = code.into();
    }

    pub fn phase(&self) -> KeyPhase {
        self.phase
    }

    pub fn is_down(&self) -> bool {
        self.phase == KeyPhase::Down
    }

    pub fn is_up(&self) -> bool {
        self.phase == KeyPhase::Up
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn time_down_us(&self) -> i64 {
        self.time_down_us
    }

    pub fn time_up_us(&self) -> i64 {
        self.time_up_us
    }

    pub fn repeats(&self) -> u32 {
        self.repeats
    }

    /// Timestamp of the last event that changed this state, if any.
    pub fn last_event_us(&self) -> Option<i64> {
        self.last_event_us
    }

    /// How long the key has been (or was last) held.
    ///
    /// While down this is `now - time_down`, zero at the press instant.
    /// While up it is the length of the last completed press.
    pub fn duration_us(&self, now_us: i64) -> i64 {
        match self.phase {
            KeyPhase::Uninitialized => 0,
            KeyPhase::Down => now_us.saturating_sub(self.time_down_us).max(0),
            KeyPhase::Up => self.time_up_us.saturating_sub(self.time_down_us).max(0),
        }
    }

    /// Apply one event. Never fails; unrecognized kinds leave the state untouched.
    pub fn update(&mut self, event: &KeyEvent) -> Transition {
        let transition = match event.kind {
            KeyEventKind::Press if self.is_down() => {
                self.repeats = self.repeats.saturating_add(1);
                Transition::Repeated
            }
            KeyEventKind::Press => {
                self.phase = KeyPhase::Down;
                self.time_down_us = event.time_us;
                self.repeats = 0;
                self.modifiers = event.modifiers;
                Transition::Pressed
            }
            KeyEventKind::Release => {
                self.phase = KeyPhase::Up;
                self.time_up_us = event.time_us;
                Transition::Released
            }
            KeyEventKind::Unrecognized => return Transition::Ignored,
        };
        self.last_event_us = Some(event.time_us);
        transition
    }

    /// Check an event against the strict-mode rules without applying it.
    pub fn validate(&self, event: &KeyEvent) -> Result<(), InputError> {
        if event.kind == KeyEventKind::Unrecognized {
            return Err(InputError::UnrecognizedEvent { code: event.code });
        }
        match self.last_event_us {
            Some(last_us) if event.time_us < last_us => Err(InputError::OutOfOrder {
                code: event.code,
                time_us: event.time_us,
                last_us,
            }),
            _ => Ok(()),
        }
    }

    /// True once the key has stayed down for longer than `within_us` since the press.
    ///
    /// Compares `time_down + within < now`. This is a minimum-dwell check, not
    /// "pressed during the last `within_us`".
    pub fn just_pressed(&self, within_us: i64, now_us: i64) -> bool {
        self.is_down() && self.time_down_us.saturating_add(within_us) < now_us
    }

    /// True once the key has stayed up for longer than `within_us` since the release.
    pub fn just_released(&self, within_us: i64, now_us: i64) -> bool {
        self.is_up() && self.time_up_us.saturating_add(within_us) < now_us
    }
}
