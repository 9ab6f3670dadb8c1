/// Keyboard manager owning one [`KeyState`] per observed control.
///
/// Demultiplexes incoming events by key code, resolves default query windows from
/// [`InputConfig`], and reads "now" from an injected [`TimeProvider`].
use std::collections::BTreeMap;

use log::debug;

use crate::config::InputConfig;
use crate::error::InputError;
use crate::event::{KeyCode, KeyEvent, KeyEventKind, RawKeyEvent};
use crate::key_state::{KeyState, Transition};
use crate::time::TimeProvider;

pub struct Keyboard<T: TimeProvider> {
    config: InputConfig,
    time: T,
    keys: BTreeMap<KeyCode, KeyState>,
}

impl<T: TimeProvider> Keyboard<T> {
    pub fn new(config: InputConfig, time: T) -> Self {
        Self {
            config,
            time,
            keys: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: InputConfig) {
        self.config = config;
    }

    pub fn time(&self) -> &T {
        &self.time
    }

    /// Register a key ahead of its first event. Existing state is kept.
    pub fn add_key(&mut self, code: impl Into<KeyCode>) -> &KeyState {
        let code = code.into();
        self.keys.entry(code).or_insert_with(|| KeyState::new(code))
    }

    pub fn key(&self, code: impl Into<KeyCode>) -> Option<&KeyState> {
        self.keys.get(&code.into())
    }

    /// All tracked keys in key code order.
    pub fn keys(&self) -> impl Iterator<Item = &KeyState> {
        self.keys.values()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Route one event to its key, creating the key on first sight.
    ///
    /// In strict mode unrecognized and out-of-order events are returned as errors
    /// and leave all state untouched. Otherwise this never fails.
    pub fn handle_event(&mut self, event: &KeyEvent) -> Result<Transition, InputError> {
        let existing = self.keys.get(&event.code);
        let check = match existing {
            Some(state) => state.validate(event),
            None => KeyState::new(event.code).validate(event),
        };

        if let Err(err) = check {
            if self.config.strict {
                debug!("Rejected event: {err}");
                return Err(err);
            }
            debug!("Accepting event despite: {err}");
        }

        let code = event.code;
        let state = self.keys.entry(code).or_insert_with(|| KeyState::new(code));
        let transition = state.update(event);
        if event.kind != KeyEventKind::Unrecognized {
            debug!("{code} {transition:?} at {}us", event.time_us);
        }
        Ok(transition)
    }

    /// Convert a dispatcher record at the boundary and handle it.
    pub fn handle_raw(&mut self, raw: &RawKeyEvent) -> Result<Transition, InputError> {
        self.handle_event(&KeyEvent::from(raw))
    }

    /// Whether the key is down. `false` for keys never observed.
    pub fn is_down(&self, code: impl Into<KeyCode>) -> bool {
        self.key(code).is_some_and(KeyState::is_down)
    }

    /// Whether the key is up. `false` for keys never observed or never released.
    pub fn is_up(&self, code: impl Into<KeyCode>) -> bool {
        self.key(code).is_some_and(KeyState::is_up)
    }

    /// [`KeyState::just_pressed`] with the configured rate and the current time.
    pub fn just_pressed(&self, code: impl Into<KeyCode>) -> bool {
        self.just_pressed_within(code, self.config.just_pressed_rate_us)
    }

    /// [`KeyState::just_released`] with the configured rate and the current time.
    pub fn just_released(&self, code: impl Into<KeyCode>) -> bool {
        self.just_released_within(code, self.config.just_released_rate_us)
    }

    pub fn just_pressed_within(&self, code: impl Into<KeyCode>, within_us: i64) -> bool {
        let now_us = self.time.now_us();
        self.key(code)
            .is_some_and(|state| state.just_pressed(within_us, now_us))
    }

    pub fn just_released_within(&self, code: impl Into<KeyCode>, within_us: i64) -> bool {
        let now_us = self.time.now_us();
        self.key(code)
            .is_some_and(|state| state.just_released(within_us, now_us))
    }

    /// Held duration of a key against the current time. `0` for unknown keys.
    pub fn duration_us(&self, code: impl Into<KeyCode>) -> i64 {
        let now_us = self.time.now_us();
        self.key(code).map_or(0, |state| state.duration_us(now_us))
    }

    /// Move a key's state to another code. Returns `false` if `from` is not tracked.
    ///
    /// Any state already tracked under `to` is replaced.
    pub fn rebind(&mut self, from: impl Into<KeyCode>, to: impl Into<KeyCode>) -> bool {
        let (from, to) = (from.into(), to.into());
        match self.keys.remove(&from) {
            Some(mut state) => {
                state.rebind(to);
                if self.keys.insert(to, state).is_some() {
                    debug!("Rebind {from} -> {to} replaced existing state");
                }
                true
            }
            None => false,
        }
    }

    /// Return every tracked key to the uninitialized state, e.g. after focus loss.
    pub fn reset(&mut self) {
        for (code, state) in self.keys.iter_mut() {
            *state = KeyState::new(*code);
        }
    }
}
