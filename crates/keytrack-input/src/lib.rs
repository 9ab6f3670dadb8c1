//! Per-key input state tracking driven by timestamped press/release events.
//!
//! This crate provides:
//! - [`KeyState`]: state machine for one control with windowed press/release queries
//! - [`Keyboard`]: demultiplexes events by key code and applies [`InputConfig`]
//! - [`TimeProvider`]: injected clock, with a mock for synthetic time
//! - [`RawKeyEvent`]: the record format external dispatchers feed in

pub mod config;
pub mod error;
pub mod event;
pub mod key_state;
pub mod keyboard;
pub mod time;

pub use config::InputConfig;
pub use error::InputError;
pub use event::{KeyCode, KeyEvent, KeyEventKind, Modifiers, RawKeyEvent};
pub use key_state::{KeyPhase, KeyState, Transition};
pub use keyboard::Keyboard;
pub use time::{MockTimeProvider, SystemTimeProvider, TimeProvider};
