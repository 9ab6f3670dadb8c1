//! Key events as consumed by [`KeyState`](crate::KeyState) and the wire form they arrive in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a control (a platform key code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key#{}", self.0)
    }
}

impl From<u32> for KeyCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

/// Modifier keys held when a press transition happened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        alt: false,
        ctrl: false,
        shift: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn any(&self) -> bool {
        self.alt || self.ctrl || self.shift
    }
}

/// Kind of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    Press,
    Release,
    /// Anything the upstream dispatcher forwarded that is neither a press nor a release.
    Unrecognized,
}

impl KeyEventKind {
    /// Map an upstream event type string (`"keydown"`, `"press"`, ...) to a kind.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "press" | "keydown" | "down" => Self::Press,
            "release" | "keyup" | "up" => Self::Release,
            _ => Self::Unrecognized,
        }
    }
}

/// A demultiplexed, timestamped transition signal for one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub kind: KeyEventKind,
    /// Timestamp in the same unit as the [`TimeProvider`](crate::TimeProvider) (microseconds).
    pub time_us: i64,
    /// Only meaningful for presses.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn press(code: impl Into<KeyCode>, time_us: i64) -> Self {
        Self::press_with(code, time_us, Modifiers::NONE)
    }

    pub fn press_with(code: impl Into<KeyCode>, time_us: i64, modifiers: Modifiers) -> Self {
        Self {
            code: code.into(),
            kind: KeyEventKind::Press,
            time_us,
            modifiers,
        }
    }

    pub fn release(code: impl Into<KeyCode>, time_us: i64) -> Self {
        Self {
            code: code.into(),
            kind: KeyEventKind::Release,
            time_us,
            modifiers: Modifiers::NONE,
        }
    }
}

/// Event record as produced by an external dispatcher, e.g. one JSON line of a capture.
///
/// Modifier flags may be absent; absent flags read as `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawKeyEvent {
    pub code: u32,
    #[serde(rename = "type")]
    pub event_type: String,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_key: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctrl_key: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_key: Option<bool>,
}

impl From<&RawKeyEvent> for KeyEvent {
    fn from(raw: &RawKeyEvent) -> Self {
        let kind = KeyEventKind::parse(&raw.event_type);
        let modifiers = match kind {
            KeyEventKind::Press => Modifiers {
                alt: raw.alt_key.unwrap_or(false),
                ctrl: raw.ctrl_key.unwrap_or(false),
                shift: raw.shift_key.unwrap_or(false),
            },
            _ => Modifiers::NONE,
        };
        Self {
            code: KeyCode(raw.code),
            kind,
            time_us: raw.timestamp,
            modifiers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_event_kinds() {
        assert_eq!(KeyEventKind::parse("keydown"), KeyEventKind::Press);
        assert_eq!(KeyEventKind::parse("Press"), KeyEventKind::Press);
        assert_eq!(KeyEventKind::parse("KEYUP"), KeyEventKind::Release);
        assert_eq!(KeyEventKind::parse("release"), KeyEventKind::Release);
        assert_eq!(KeyEventKind::parse("keypress"), KeyEventKind::Unrecognized);
        assert_eq!(KeyEventKind::parse(""), KeyEventKind::Unrecognized);
    }

    #[test]
    fn raw_event_missing_modifiers_read_as_false() {
        let raw: RawKeyEvent =
            serde_json::from_str(r#"{"code":65,"type":"keydown","timestamp":100}"#).unwrap();
        let event = KeyEvent::from(&raw);
        assert_eq!(event.code, KeyCode(65));
        assert_eq!(event.kind, KeyEventKind::Press);
        assert_eq!(event.time_us, 100);
        assert_eq!(event.modifiers, Modifiers::NONE);
    }

    #[test]
    fn raw_event_modifiers_captured_on_press() {
        let raw: RawKeyEvent = serde_json::from_str(
            r#"{"code":16,"type":"press","timestamp":5,"shiftKey":true,"ctrlKey":false}"#,
        )
        .unwrap();
        let event = KeyEvent::from(&raw);
        assert_eq!(event.modifiers, Modifiers::shift());
    }

    #[test]
    fn raw_event_modifiers_dropped_on_release() {
        let raw: RawKeyEvent = serde_json::from_str(
            r#"{"code":16,"type":"keyup","timestamp":5,"altKey":true}"#,
        )
        .unwrap();
        let event = KeyEvent::from(&raw);
        assert_eq!(event.kind, KeyEventKind::Release);
        assert!(!event.modifiers.any());
    }

    #[test]
    fn key_code_display() {
        assert_eq!(KeyCode(32).to_string(), "key#32");
    }
}
